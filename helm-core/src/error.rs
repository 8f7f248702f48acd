//! Conversion errors
//!
//! Errors never crash the engine. They are values that propagate through
//! computations; the public facade reports them through a side-channel and
//! degrades to placeholder output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during unit conversion and formatting
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionError {
    /// Unit id absent from the registry
    #[error("unknown unit: {id}")]
    UnknownUnit { id: String },

    /// From/to units belong to different categories
    #[error("cannot convert {from} ({from_category}) to {to} ({to_category}): category mismatch")]
    CategoryMismatch {
        from: String,
        from_category: String,
        to: String,
        to_category: String,
    },

    /// Input value was missing, NaN or infinite
    #[error("invalid value: not a finite number")]
    InvalidValue,
}

impl ConversionError {
    pub fn unknown_unit(id: impl Into<String>) -> Self {
        ConversionError::UnknownUnit { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConversionError::unknown_unit("fathom_xyz");
        assert_eq!(err.to_string(), "unknown unit: fathom_xyz");

        let err = ConversionError::CategoryMismatch {
            from: "knots".into(),
            from_category: "vessel_speed".into(),
            to: "celsius".into(),
            to_category: "temperature".into(),
        };
        assert!(err.to_string().contains("category mismatch"));
    }

    #[test]
    fn test_serde_tagged() {
        let err = ConversionError::InvalidValue;
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"invalid_value"}"#);

        let back: ConversionError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConversionError::InvalidValue);
    }
}
