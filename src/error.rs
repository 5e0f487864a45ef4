//! Error types for forecast computation and reference data validation.

use crate::language::Language;

/// Errors surfaced by zone resolution, weather selection and forecasting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastError {
    /// The caller supplied an unusable request.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No zone has the requested id.
    #[error("zone not found: id {0}")]
    ZoneNotFound(u32),

    /// No zone has the requested name in the given language.
    #[error("zone not found: '{name}' ({language})")]
    ZoneNameNotFound {
        /// Name as supplied by the caller.
        name: String,
        /// Language the name was matched against.
        language: Language,
    },

    /// The reference data breaks one of its own invariants.
    #[error("reference data integrity violation: {0}")]
    DataIntegrity(String),
}

impl ForecastError {
    /// True for either flavour of zone lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ForecastError::ZoneNotFound(_) | ForecastError::ZoneNameNotFound { .. }
        )
    }
}
