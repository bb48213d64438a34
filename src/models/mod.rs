// Data models and request validation

pub mod validation;
pub mod workout;

pub use workout::*;
