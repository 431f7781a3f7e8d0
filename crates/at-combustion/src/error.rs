//! Combustion calculation errors.

use crate::species::Species;
use at_core::CoreError;
use at_flow::FlowError;
use at_results::ResultsError;
use thiserror::Error;

pub type CombustionResult<T> = Result<T, CombustionError>;

#[derive(Error, Debug)]
pub enum CombustionError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    /// The species table has no entry for a property a formula needs.
    #[error("No {property} data for {species}")]
    MissingProperty {
        species: Species,
        property: &'static str,
    },

    #[error("Nozzle flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),

    #[error("Export error: {0}")]
    Export(#[from] ResultsError),
}

impl CombustionError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        CombustionError::InvalidArgument { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_property_names_species() {
        let err = CombustionError::MissingProperty {
            species: Species::O2,
            property: "specific heat",
        };
        let msg = err.to_string();
        assert!(msg.contains("O2"));
        assert!(msg.contains("specific heat"));
    }
}
