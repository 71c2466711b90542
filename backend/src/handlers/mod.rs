//! HTTP handlers for the FloodSense Delhi backend

pub mod health;
pub mod prediction;
pub mod ward;
pub mod weather;

pub use health::*;
pub use prediction::*;
pub use ward::*;
pub use weather::*;
