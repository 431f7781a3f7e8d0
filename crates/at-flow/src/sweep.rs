//! Nozzle exit conditions over a range of expansion ratios.

use crate::error::FlowResult;
use crate::isentropic::IsentropicFlow;
use at_core::linspace;
use serde::Serialize;
use tracing::debug;

/// Exit state for one expansion ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NozzlePoint {
    #[serde(rename = "A/A*")]
    pub area_ratio: f64,
    #[serde(rename = "M")]
    pub mach: f64,
    #[serde(rename = "P/P0")]
    pub pressure_ratio: f64,
}

impl IsentropicFlow {
    /// Supersonic exit Mach number for each area ratio, in input order.
    pub fn supersonic_mach_numbers(&self, area_ratios: &[f64]) -> FlowResult<Vec<f64>> {
        area_ratios
            .iter()
            .map(|&ar| self.supersonic_mach(ar))
            .collect()
    }

    pub fn pressure_ratios(&self, machs: &[f64]) -> Vec<f64> {
        machs.iter().map(|&m| self.pressure_ratio(m)).collect()
    }

    /// `points` evenly spaced area ratios over `[start, end]`, each solved on the
    /// supersonic branch.
    pub fn nozzle_sweep(&self, start: f64, end: f64, points: usize) -> FlowResult<Vec<NozzlePoint>> {
        let ratios = linspace(start, end, points)?;
        let machs = self.supersonic_mach_numbers(&ratios)?;

        let sweep: Vec<NozzlePoint> = ratios
            .into_iter()
            .zip(machs)
            .map(|(area_ratio, mach)| NozzlePoint {
                area_ratio,
                mach,
                pressure_ratio: self.pressure_ratio(mach),
            })
            .collect();

        debug!(gamma = self.gamma(), points = sweep.len(), "nozzle sweep done");
        Ok(sweep)
    }
}
