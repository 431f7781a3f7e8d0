//! Species data for the hydrogen/oxygen system.

use crate::error::{CombustionError, CombustionResult};
use at_core::units::{MolarMass, SpecHeat, j_per_kg_k, kg_per_mol};
use std::fmt;

/// Reactants and the single product tracked by the frozen model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Hydrogen (H₂)
    H2,
    /// Oxygen (O₂)
    O2,
    /// Water (H₂O)
    H2O,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::H2, Species::O2, Species::H2O];

    pub fn key(&self) -> &'static str {
        match self {
            Species::H2 => "H2",
            Species::O2 => "O2",
            Species::H2O => "H2O",
        }
    }

    pub fn molar_mass(&self) -> MolarMass {
        match self {
            Species::H2 => kg_per_mol(2.016e-3),
            Species::O2 => kg_per_mol(32.00e-3),
            Species::H2O => kg_per_mol(18.015e-3),
        }
    }

    /// Constant-pressure specific heat. Oxygen never appears in the products,
    /// so it has none.
    pub fn cp(&self) -> CombustionResult<SpecHeat> {
        match self {
            Species::H2 => Ok(j_per_kg_k(14_304.0)),
            Species::H2O => Ok(j_per_kg_k(1_872.0)),
            Species::O2 => Err(CombustionError::MissingProperty {
                species: *self,
                property: "specific heat",
            }),
        }
    }

    /// Specific gas constant.
    pub fn gas_constant(&self) -> CombustionResult<SpecHeat> {
        match self {
            Species::H2 => Ok(j_per_kg_k(4124.0)),
            Species::H2O => Ok(j_per_kg_k(461.5)),
            Species::O2 => Err(CombustionError::MissingProperty {
                species: *self,
                property: "gas constant",
            }),
        }
    }

    /// Molar mass in kg/mol as a bare number.
    pub(crate) fn mw(&self) -> f64 {
        self.molar_mass().value
    }

    /// `cp` in kJ/(kg K), the unit the mixture formulas are written in.
    pub(crate) fn cp_kj(&self) -> CombustionResult<f64> {
        Ok(self.cp()?.value / 1e3)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(Species::H2.mw(), 2.016e-3);
        assert_eq!(Species::O2.mw(), 32.00e-3);
        assert_eq!(Species::H2O.mw(), 18.015e-3);
        assert!((Species::H2.cp_kj().unwrap() - 14.304).abs() < 1e-12);
        assert!((Species::H2O.cp_kj().unwrap() - 1.872).abs() < 1e-12);
        assert_eq!(Species::H2O.gas_constant().unwrap().value, 461.5);
    }

    #[test]
    fn oxygen_has_no_product_properties() {
        assert!(matches!(
            Species::O2.cp(),
            Err(CombustionError::MissingProperty { .. })
        ));
        assert!(Species::O2.gas_constant().is_err());
    }
}
