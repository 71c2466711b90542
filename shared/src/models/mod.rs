//! Data models for the FloodSense Delhi platform

pub mod forecast;
pub mod prediction;
pub mod ward;

pub use forecast::*;
pub use prediction::*;
pub use ward::*;
