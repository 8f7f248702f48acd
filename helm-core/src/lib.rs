//! Helm Core - shared vocabulary for the measurement engine
//!
//! Small, dependency-free types used across the workspace: the measurement
//! system and marine region enums, rounding modes, and the conversion error
//! type. Everything here is plain serializable data.

mod error;
mod types;

pub use error::ConversionError;
pub use types::{MarineRegion, MeasurementSystem, RoundingMode};

/// Re-export for downstream crates
pub mod prelude {
    pub use crate::{ConversionError, MarineRegion, MeasurementSystem, RoundingMode};
}
