pub mod overlay;
pub mod points;
pub mod surface;
