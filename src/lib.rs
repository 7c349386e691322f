pub mod error;

pub mod light_control {
    pub mod change_set;
    pub mod color_convert;
    pub mod controller;
    pub mod gamut;
    pub mod light_state;
    pub mod light_update;
    pub mod registry;
    #[cfg(test)]
    mod test;
}

pub mod bridge;
