pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, TopolisError};
pub use operations::validity::{InvalidityReason, Validate};
