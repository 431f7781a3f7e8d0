//! at-core: stable foundation for aerotherm.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - mesh (linspace, meshgrid, masked sampling)
//! - error (shared error types)

pub mod error;
pub mod mesh;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use mesh::{MaskedField, MeshGrid, linspace, masked_field};
pub use numeric::*;
pub use units::*;
