//! Individual preprocessing steps

pub mod blur;
pub mod grayscale;
pub mod normalize;
pub mod threshold;
