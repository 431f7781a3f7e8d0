//! at-combustion: hydrogen/oxygen propellant bookkeeping and ideal rocket
//! performance.
//!
//! Provides:
//! - Species data for H2, O2 and H2O
//! - Equivalence ratio, O/F and product fractions for `H2 + O2`
//! - Frozen mixture properties and ideal performance (`Isp`, `C*`, `C_T`)
//! - Tabulated CEA results for the same mixture ratios, and side-by-side
//!   comparison series

pub mod cea;
pub mod comparison;
pub mod error;
pub mod mixture;
pub mod performance;
pub mod species;

pub use cea::{CeaMode, CeaRow, ReferenceTable};
pub use comparison::{Comparison, ComparisonRow, Parameter, compare};
pub use error::{CombustionError, CombustionResult};
pub use mixture::{
    MixtureProperties, OxidizerFuel, ProductFractions, equivalence_ratio, oxidizer_to_fuel,
};
pub use performance::{
    COMBUSTION_RESULTS_FILE, DEFAULT_EXPANSION_RATIO, DEFAULT_MIXTURE_RATIOS, PerformanceTable,
    RocketPerformance,
};
pub use species::Species;
