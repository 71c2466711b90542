//! Shared types and models for the FloodSense Delhi platform
//!
//! This crate contains the data model and pure domain logic shared between
//! the backend server and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
