//! Ideal rocket performance from the frozen product mixture.

use crate::error::{CombustionError, CombustionResult};
use crate::mixture::{MixtureProperties, ProductFractions, equivalence_ratio};
use at_core::numeric::{Real, ensure_positive};
use at_core::units::constants::{G0_MPS2, R_UNIVERSAL};
use at_flow::IsentropicFlow;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COMBUSTION_RESULTS_FILE: &str = "combustion_results.csv";

/// Nozzle area ratio used for the exit state.
pub const DEFAULT_EXPANSION_RATIO: Real = 25.0;

pub const DEFAULT_MIXTURE_RATIOS: [Real; 3] = [8.0, 6.0, 4.7];

/// Heat of formation of water vapour, J/kmol.
const WATER_HEAT_OF_FORMATION: Real = 241.8e6;

/// Performance for one mixture ratio.
///
/// Units follow the coursework formulas: `cp` is in kJ/(kg K) while the
/// chamber temperature and `C*` use SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketPerformance {
    /// Oxidizer-to-fuel mass ratio
    pub r: Real,
    pub phi: Real,
    pub mixture: MixtureProperties,
    /// Products' gas constant, J/(kg K)
    pub gas_constant: Real,
    pub chamber_temperature: Real,
    pub exit_mach: Real,
    /// Exit static over chamber stagnation pressure
    pub pressure_ratio: Real,
    pub isp: Real,
    pub c_star: Real,
    /// `Isp g0`
    pub exhaust_velocity: Real,
    /// `C* / C`
    pub thrust_coefficient: Real,
}

impl RocketPerformance {
    pub fn evaluate(r: Real, expansion_ratio: Real) -> CombustionResult<Self> {
        let expansion_ratio = ensure_positive(expansion_ratio, "expansion ratio")?;
        if expansion_ratio < 1.0 {
            return Err(CombustionError::invalid(format!(
                "expansion ratio must be at least 1, got {expansion_ratio}"
            )));
        }

        let phi = equivalence_ratio(r)?;
        let fractions = ProductFractions::from_phi(phi)?;
        let mixture = MixtureProperties::from_fractions(&fractions)?;
        let g = mixture.gamma;
        let cp = mixture.cp;

        let qf = WATER_HEAT_OF_FORMATION / (18.0 + 2.0 * fractions.mole_h2);
        let t1 = qf / (cp * 1e3);

        let flow = IsentropicFlow::new(g)?;
        let exit_mach = flow.supersonic_mach(expansion_ratio)?;
        let pressure_ratio = flow.pressure_ratio(exit_mach);

        let isp = (2.0 * cp * t1 * (1.0 - pressure_ratio.powf((g - 1.0) / g))).sqrt();

        let gas_constant = R_UNIVERSAL / mixture.molar_mass;
        let c_star =
            (gas_constant * t1 / g).sqrt() * (1.0 + 0.5 * (g - 1.0)).powf(g / (g - 1.0) - 0.5);
        let exhaust_velocity = isp * G0_MPS2;

        debug!(r, phi, gamma = g, t1, exit_mach, isp, "rocket performance");

        Ok(Self {
            r,
            phi,
            mixture,
            gas_constant,
            chamber_temperature: t1,
            exit_mach,
            pressure_ratio,
            isp,
            c_star,
            exhaust_velocity,
            thrust_coefficient: c_star / exhaust_velocity,
        })
    }
}

// CSV row; column names line up with the CEA tables where a comparison exists.
#[derive(Serialize)]
struct PerformanceRecord {
    r: Real,
    phi: Real,
    #[serde(rename = "Cp (kJ/kg·K)")]
    cp: Real,
    #[serde(rename = "γ")]
    gamma: Real,
    #[serde(rename = "R_m")]
    gas_constant: Real,
    #[serde(rename = "T1")]
    chamber_temperature: Real,
    /// g/mol
    #[serde(rename = "MW")]
    molar_mass: Real,
    #[serde(rename = "M_e")]
    exit_mach: Real,
    #[serde(rename = "C^*")]
    c_star: Real,
    #[serde(rename = "I_sp (s)")]
    isp: Real,
    #[serde(rename = "C (m/s)")]
    exhaust_velocity: Real,
    #[serde(rename = "CT")]
    thrust_coefficient: Real,
}

impl From<&RocketPerformance> for PerformanceRecord {
    fn from(p: &RocketPerformance) -> Self {
        Self {
            r: p.r,
            phi: p.phi,
            cp: p.mixture.cp,
            gamma: p.mixture.gamma,
            gas_constant: p.gas_constant,
            chamber_temperature: p.chamber_temperature,
            molar_mass: p.mixture.molar_mass * 1e3,
            exit_mach: p.exit_mach,
            c_star: p.c_star,
            isp: p.isp,
            exhaust_velocity: p.exhaust_velocity,
            thrust_coefficient: p.thrust_coefficient,
        }
    }
}

/// Computed performance over several mixture ratios.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTable {
    pub rows: Vec<RocketPerformance>,
}

impl PerformanceTable {
    pub fn evaluate(mixture_ratios: &[Real], expansion_ratio: Real) -> CombustionResult<Self> {
        if mixture_ratios.is_empty() {
            return Err(CombustionError::invalid("no mixture ratios given"));
        }
        let rows = mixture_ratios
            .iter()
            .map(|&r| RocketPerformance::evaluate(r, expansion_ratio))
            .collect::<CombustionResult<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn r_values(&self) -> Vec<Real> {
        self.rows.iter().map(|p| p.r).collect()
    }

    /// Values of the named CSV column, if the table has one.
    pub fn column(&self, name: &str) -> Option<Vec<Real>> {
        let pick: fn(&RocketPerformance) -> Real = match name {
            "r" => |p| p.r,
            "phi" => |p| p.phi,
            "Cp (kJ/kg·K)" => |p| p.mixture.cp,
            "γ" => |p| p.mixture.gamma,
            "R_m" => |p| p.gas_constant,
            "T1" => |p| p.chamber_temperature,
            "MW" => |p| p.mixture.molar_mass * 1e3,
            "M_e" => |p| p.exit_mach,
            "C^*" => |p| p.c_star,
            "I_sp (s)" => |p| p.isp,
            "C (m/s)" => |p| p.exhaust_velocity,
            "CT" => |p| p.thrust_coefficient,
            _ => return None,
        };
        Some(self.rows.iter().map(pick).collect())
    }

    /// Write `combustion_results.csv` into `dir`.
    pub fn write_csv(&self, dir: &Path) -> CombustionResult<PathBuf> {
        let path = dir.join(COMBUSTION_RESULTS_FILE);
        let records: Vec<PerformanceRecord> = self.rows.iter().map(Into::into).collect();
        at_results::write_table(&path, &records)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stoichiometric_side_is_pure_water() {
        let p = RocketPerformance::evaluate(8.0, DEFAULT_EXPANSION_RATIO).unwrap();
        // phi just under one: no excess hydrogen
        assert!(p.phi < 1.0);
        assert_eq!(p.mixture.molar_mass, 18.015e-3);
        let t1 = 241.8e6 / 18.0 / 1872.0;
        assert!((p.chamber_temperature - t1).abs() < 1e-6);
        assert!(p.exit_mach > 1.0);
    }

    #[test]
    fn thrust_coefficient_is_ratio_of_velocities() {
        let p = RocketPerformance::evaluate(4.7, 25.0).unwrap();
        assert!((p.exhaust_velocity - p.isp * 9.81).abs() < 1e-9);
        assert!((p.thrust_coefficient * p.exhaust_velocity - p.c_star).abs() < 1e-9);
    }

    #[test]
    fn richer_mixture_is_lighter() {
        let table = PerformanceTable::evaluate(&DEFAULT_MIXTURE_RATIOS, 25.0).unwrap();
        let mw = table.column("MW").unwrap();
        assert!(mw[0] > mw[1] && mw[1] > mw[2]);
        assert!(table.column("Y_OH").is_none());
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(RocketPerformance::evaluate(8.0, 0.5).is_err());
        assert!(RocketPerformance::evaluate(0.0, 25.0).is_err());
        assert!(PerformanceTable::evaluate(&[], 25.0).is_err());
    }
}
