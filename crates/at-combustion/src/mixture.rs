//! Stoichiometry and frozen product properties for `phi H2 + 0.5 O2`.

use crate::error::{CombustionError, CombustionResult};
use crate::species::Species;
use at_core::numeric::{Real, ensure_positive};
use at_core::units::constants::R_UNIVERSAL;

/// Equivalence ratio for an oxidizer-to-fuel mass ratio `r`.
///
/// `phi = 0.5 MW_O2 / (r MW_H2)`; `phi > 1` is fuel rich.
pub fn equivalence_ratio(r: Real) -> CombustionResult<Real> {
    let r = ensure_positive(r, "mixture ratio")?;
    Ok(0.5 * Species::O2.mw() / (r * Species::H2.mw()))
}

/// Reactant masses for one mole of water's worth of oxygen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OxidizerFuel {
    /// O/F by mass
    pub ratio: Real,
    /// kg
    pub mass_h2: Real,
    /// kg
    pub mass_o2: Real,
}

/// Reactants `phi` mol H2 and 0.5 mol O2.
pub fn oxidizer_to_fuel(phi: Real) -> CombustionResult<OxidizerFuel> {
    let phi = ensure_positive(phi, "equivalence ratio")?;
    let mass_h2 = phi * Species::H2.mw();
    let mass_o2 = 0.5 * Species::O2.mw();
    Ok(OxidizerFuel {
        ratio: mass_o2 / mass_h2,
        mass_h2,
        mass_o2,
    })
}

/// Complete combustion products: one mole of water plus any excess hydrogen.
///
/// Lean mixtures (`phi < 1`) are treated as producing pure water; leftover
/// oxygen is not tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductFractions {
    pub mole_h2o: Real,
    pub mole_h2: Real,
    pub mass_h2o: Real,
    pub mass_h2: Real,
}

impl ProductFractions {
    pub fn from_phi(phi: Real) -> CombustionResult<Self> {
        let phi = ensure_positive(phi, "equivalence ratio")?;
        let n_h2o = 1.0;
        let n_h2 = (phi - 1.0).max(0.0);
        let n_total = n_h2o + n_h2;

        let m_h2o = n_h2o * Species::H2O.mw();
        let m_h2 = n_h2 * Species::H2.mw();
        let m_total = m_h2o + m_h2;

        Ok(Self {
            mole_h2o: n_h2o / n_total,
            mole_h2: n_h2 / n_total,
            mass_h2o: m_h2o / m_total,
            mass_h2: m_h2 / m_total,
        })
    }
}

/// Frozen mixture properties of the products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureProperties {
    /// Mole-weighted molar mass (kg/mol)
    pub molar_mass: Real,
    /// Mass-weighted `cp` (kJ/(kg K))
    pub cp: Real,
    /// `R_u / MW` (kJ/(kg K))
    pub gas_constant: Real,
    pub gamma: Real,
}

impl MixtureProperties {
    pub fn from_fractions(fractions: &ProductFractions) -> CombustionResult<Self> {
        let molar_mass =
            fractions.mole_h2o * Species::H2O.mw() + fractions.mole_h2 * Species::H2.mw();
        let cp = fractions.mass_h2o * Species::H2O.cp_kj()?
            + fractions.mass_h2 * Species::H2.cp_kj()?;
        let gas_constant = R_UNIVERSAL * 1e-3 / molar_mass;

        if cp <= gas_constant {
            return Err(CombustionError::invalid(format!(
                "mixture cp {cp} does not exceed gas constant {gas_constant}"
            )));
        }

        Ok(Self {
            molar_mass,
            cp,
            gas_constant,
            gamma: cp / (cp - gas_constant),
        })
    }
}
