//! Mach number from area ratio.
//!
//! Newton iteration on `A/A*(M) - target`, safeguarded by a sign-change
//! bracket: any step that leaves the bracket (or a vanishing derivative) is
//! replaced by bisection, so the iteration cannot wander onto the other branch.

use crate::error::{FlowError, FlowResult};
use crate::isentropic::IsentropicFlow;
use at_core::numeric::ensure_finite;
use std::fmt;
use tracing::debug;

/// Which side of the sonic throat to solve on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowBranch {
    Subsonic,
    Supersonic,
}

impl fmt::Display for FlowBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowBranch::Subsonic => f.write_str("subsonic"),
            FlowBranch::Supersonic => f.write_str("supersonic"),
        }
    }
}

/// Root finder configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Relative tolerance on the area-ratio residual
    pub rel_tol: f64,
    /// Relative tolerance on the Mach step
    pub step_tol: f64,
    /// First trial point on the supersonic branch; doubled until it brackets the root
    pub supersonic_seed: f64,
    /// First trial point on the subsonic branch; halved until it brackets the root
    pub subsonic_seed: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            rel_tol: 1e-13,
            step_tol: 1e-14,
            supersonic_seed: 2.0,
            subsonic_seed: 0.5,
        }
    }
}

/// Root finder result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachSolution {
    pub mach: f64,
    /// Area-ratio residual at `mach`
    pub residual: f64,
    pub iterations: usize,
}

const SUBSONIC_LIMIT: f64 = 1e-12;

impl IsentropicFlow {
    /// Supersonic Mach number for `A/A*` with default settings.
    pub fn supersonic_mach(&self, area_ratio: f64) -> FlowResult<f64> {
        self.mach_for_area_ratio(area_ratio, FlowBranch::Supersonic, &RootConfig::default())
            .map(|s| s.mach)
    }

    /// Subsonic Mach number for `A/A*` with default settings.
    pub fn subsonic_mach(&self, area_ratio: f64) -> FlowResult<f64> {
        self.mach_for_area_ratio(area_ratio, FlowBranch::Subsonic, &RootConfig::default())
            .map(|s| s.mach)
    }

    /// Invert `A/A*` on the requested branch.
    ///
    /// `area_ratio` below one has no isentropic solution; exactly one is the
    /// sonic throat on either branch. The supersonic bracket keeps doubling
    /// until `A/A*` passes the target, which includes the point where it
    /// overflows to infinity. A root past that overflow point cannot meet the
    /// residual tolerance and ends in [`FlowError::ConvergenceFailed`].
    pub fn mach_for_area_ratio(
        &self,
        area_ratio: f64,
        branch: FlowBranch,
        config: &RootConfig,
    ) -> FlowResult<MachSolution> {
        let target = ensure_finite(area_ratio, "area ratio")?;
        if target < 1.0 {
            return Err(FlowError::NoSolution {
                area_ratio: target,
                branch,
            });
        }
        if target == 1.0 {
            return Ok(MachSolution {
                mach: 1.0,
                residual: 0.0,
                iterations: 0,
            });
        }

        let residual = |m: f64| self.area_ratio(m) - target;

        // `below` has a negative residual, `above` a positive one.
        let (mut below, mut above) = match branch {
            FlowBranch::Supersonic => {
                let mut below = 1.0;
                let mut above = config.supersonic_seed.max(1.0 + 1e-3);
                while residual(above) < 0.0 {
                    below = above;
                    above *= 2.0;
                    if !above.is_finite() {
                        return Err(FlowError::NoSolution {
                            area_ratio: target,
                            branch,
                        });
                    }
                }
                (below, above)
            }
            FlowBranch::Subsonic => {
                let mut below = 1.0;
                let mut above = config.subsonic_seed.clamp(SUBSONIC_LIMIT, 1.0 - 1e-3);
                while residual(above) < 0.0 {
                    below = above;
                    above *= 0.5;
                    if above < SUBSONIC_LIMIT {
                        return Err(FlowError::NoSolution {
                            area_ratio: target,
                            branch,
                        });
                    }
                }
                (below, above)
            }
        };

        let inside = |x: f64, a: f64, b: f64| x > a.min(b) && x < a.max(b);
        let mut m = above;

        for iter in 0..config.max_iterations {
            let r = residual(m);
            if r.abs() <= config.rel_tol * target {
                debug!(%branch, area_ratio = target, mach = m, iterations = iter, "mach solved");
                return Ok(MachSolution {
                    mach: m,
                    residual: r,
                    iterations: iter,
                });
            }

            if r < 0.0 {
                below = m;
            } else {
                above = m;
            }

            let slope = self.area_ratio_derivative(m);
            let newton = m - r / slope;
            let next = if slope.is_finite() && slope != 0.0 && inside(newton, below, above) {
                newton
            } else {
                0.5 * (below + above)
            };

            if (next - m).abs() <= config.step_tol * m.abs() {
                let r_next = residual(next);
                debug!(%branch, area_ratio = target, mach = next, iterations = iter + 1, "mach solved on step size");
                return Ok(MachSolution {
                    mach: next,
                    residual: r_next,
                    iterations: iter + 1,
                });
            }
            m = next;
        }

        Err(FlowError::ConvergenceFailed {
            what: format!(
                "{branch} Mach for area ratio {target} after {} iterations (last M = {m})",
                config.max_iterations
            ),
        })
    }
}
