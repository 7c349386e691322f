use std::error::Error;
use std::fmt;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateError {
    /// Requested chromaticity is outside the gamut of the light
    OutOfGamut { x: f64, y: f64 },
}

impl Error for UpdateError {}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::OutOfGamut { x, y } => {
                write!(f, "Color ({x}, {y}) is outside the gamut of the light")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadError {
    NotAnObject,
}

impl Error for PayloadError {}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::NotAnObject => write!(f, "Payload is not a JSON object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    UnknownLight(String),
    Payload(PayloadError),
    Update(UpdateError),
}

impl Error for BridgeError {}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::UnknownLight(id) => write!(f, "Unknown light {id}"),
            BridgeError::Payload(e) => write!(f, "Invalid payload: {e}"),
            BridgeError::Update(e) => write!(f, "Update failed: {e}"),
        }
    }
}

impl From<UpdateError> for BridgeError {
    fn from(e: UpdateError) -> Self {
        BridgeError::Update(e)
    }
}

impl From<PayloadError> for BridgeError {
    fn from(e: PayloadError) -> Self {
        BridgeError::Payload(e)
    }
}
