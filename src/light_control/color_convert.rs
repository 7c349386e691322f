// Conversions between CIE xy, HSB and 8-bit RGB.
//
// None of the conversions clamp their results. Out of range or out of
// gamut input may give channel values outside 0-255. Non-finite
// intermediate values (y = 0, degenerate gamut) are carried through and
// end up as 0 (NaN) or saturated channels when converted to integers.

use super::gamut::{ChromaPoint, GamutEntry};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const fn new(r: i32, g: i32, b: i32) -> Rgb {
        Rgb { r, g, b }
    }

    /// True if all channels are in 0-255
    pub fn is_displayable(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0..=255).contains(c))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

// Linear XYZ to linear sRGB
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2410, -1.5374, -0.4986],
    [-0.9692, 1.8760, 0.0416],
    [0.0556, -0.2040, 1.0570],
];

// Accept points on the edges of the gamut despite rounding errors
const GAMUT_EPSILON: f64 = 1e-9;

fn cross(a: ChromaPoint, b: ChromaPoint) -> f64 {
    a.x * b.y - a.y * b.x
}

fn sub(a: ChromaPoint, b: ChromaPoint) -> ChromaPoint {
    ChromaPoint::new(a.x - b.x, a.y - b.y)
}

/// Check if (x, y) is inside the gamut triangle
pub fn is_within_gamut(gamut: &GamutEntry, x: f64, y: f64) -> bool {
    let v1 = sub(gamut.green, gamut.red);
    let v2 = sub(gamut.blue, gamut.red);
    let q = sub(ChromaPoint::new(x, y), gamut.red);

    let det = cross(v1, v2);
    let s = cross(q, v2) / det;
    let t = cross(v1, q) / det;

    s >= -GAMUT_EPSILON && t >= -GAMUT_EPSILON && s + t <= 1.0 + GAMUT_EPSILON
}

fn closest_point_on_segment(p: ChromaPoint, a: ChromaPoint, b: ChromaPoint) -> ChromaPoint {
    let ab = sub(b, a);
    let ab_sqr = ab.x * ab.x + ab.y * ab.y;
    if ab_sqr == 0.0 {
        return a;
    }
    let ap = sub(p, a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / ab_sqr).clamp(0.0, 1.0);
    ChromaPoint::new(a.x + ab.x * t, a.y + ab.y * t)
}

fn distance_sqr(a: ChromaPoint, b: ChromaPoint) -> f64 {
    let d = sub(a, b);
    d.x * d.x + d.y * d.y
}

/// Move a point outside the gamut to the closest point on its edge.
/// Points inside are returned unchanged.
pub fn closest_in_gamut(gamut: &GamutEntry, x: f64, y: f64) -> ChromaPoint {
    let p = ChromaPoint::new(x, y);
    if is_within_gamut(gamut, x, y) {
        return p;
    }
    [
        closest_point_on_segment(p, gamut.red, gamut.green),
        closest_point_on_segment(p, gamut.green, gamut.blue),
        closest_point_on_segment(p, gamut.blue, gamut.red),
    ]
    .into_iter()
    .fold(gamut.red, |best, c| {
        if distance_sqr(p, c) < distance_sqr(p, best) {
            c
        } else {
            best
        }
    })
}

fn gamma_encode(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

// Round half up, then saturate to i32. NaN becomes 0.
fn to_channel(v: f64) -> i32 {
    (255.0 * v + 0.5).floor() as i32
}

/// Convert chromaticity and luminance (0.0 - 1.0) to gamma encoded RGB
pub fn xy_brightness_to_rgb(x: f64, y: f64, brightness: f64) -> Rgb {
    let z = 1.0 - x - y;
    let lum_y = brightness;
    let lum_x = (lum_y / y) * x;
    let lum_z = (lum_y / y) * z;

    let linear = XYZ_TO_RGB.map(|row| row[0] * lum_x + row[1] * lum_y + row[2] * lum_z);
    let [r, g, b] = linear.map(|v| to_channel(gamma_encode(v)));
    Rgb { r, g, b }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let mut h = hue;
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }
    if 6.0 * h < 1.0 {
        m1 + (m2 - m1) * 6.0 * h
    } else if 2.0 * h < 1.0 {
        m2
    } else if 3.0 * h < 2.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

/// Hue, saturation and brightness all in 0.0 - 1.0
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> Rgb {
    let m2 = if brightness < 0.5 {
        brightness * (1.0 + saturation)
    } else {
        brightness + saturation - saturation * brightness
    };
    let m1 = 2.0 * brightness - m2;

    Rgb {
        r: to_channel(hue_channel(m1, m2, hue + 1.0 / 3.0)),
        g: to_channel(hue_channel(m1, m2, hue)),
        b: to_channel(hue_channel(m1, m2, hue - 1.0 / 3.0)),
    }
}
