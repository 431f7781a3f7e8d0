//! Isentropic flow ratios as functions of Mach number.

use crate::error::{FlowError, FlowResult};
use at_core::numeric::ensure_finite;

/// Calorically perfect gas with constant specific heat ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsentropicFlow {
    gamma: f64,
}

impl IsentropicFlow {
    /// `gamma` must be finite and greater than one.
    pub fn new(gamma: f64) -> FlowResult<Self> {
        let gamma = ensure_finite(gamma, "gamma")?;
        if gamma <= 1.0 {
            return Err(FlowError::InvalidArgument {
                what: format!("gamma must exceed 1, got {gamma}"),
            });
        }
        Ok(Self { gamma })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// `1 + (gamma - 1)/2 * M^2`
    fn stagnation_factor(&self, mach: f64) -> f64 {
        1.0 + 0.5 * (self.gamma - 1.0) * mach * mach
    }

    /// `(2/(g+1)) * (1 + (g-1)/2 M^2)`
    fn throat_factor(&self, mach: f64) -> f64 {
        (2.0 / (self.gamma + 1.0)) * self.stagnation_factor(mach)
    }

    fn area_exponent(&self) -> f64 {
        (self.gamma + 1.0) / (2.0 * (self.gamma - 1.0))
    }

    /// `A/A*` for Mach number `mach > 0`.
    pub fn area_ratio(&self, mach: f64) -> f64 {
        (1.0 / mach) * self.throat_factor(mach).powf(self.area_exponent())
    }

    /// `d(A/A*)/dM`, zero at `M = 1`.
    pub fn area_ratio_derivative(&self, mach: f64) -> f64 {
        let b = self.throat_factor(mach);
        self.area_ratio(mach) * (mach * mach - b) / (mach * b)
    }

    /// Static to stagnation pressure, `P/P0`.
    pub fn pressure_ratio(&self, mach: f64) -> f64 {
        let g = self.gamma;
        self.stagnation_factor(mach).powf(-g / (g - 1.0))
    }

    /// Static to stagnation temperature, `T/T0`.
    pub fn temperature_ratio(&self, mach: f64) -> f64 {
        1.0 / self.stagnation_factor(mach)
    }
}
