//! Isentropic compressible-flow relations for nozzle calculations.
//!
//! [`IsentropicFlow`] evaluates the standard ratios for a calorically perfect
//! gas and inverts the area-ratio relation for Mach number on either branch.
//!
//! # Example
//!
//! ```
//! use at_flow::IsentropicFlow;
//!
//! let flow = IsentropicFlow::new(1.4).unwrap();
//! let me = flow.supersonic_mach(25.0).unwrap();
//! assert!((me - 5.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod isentropic;
pub mod mach;
pub mod sweep;

pub use error::{FlowError, FlowResult};
pub use isentropic::IsentropicFlow;
pub use mach::{FlowBranch, MachSolution, RootConfig};
pub use sweep::NozzlePoint;
