//! Measure/arrange contracts for Trellis containers

mod constraints;
mod policy;

pub use constraints::*;
pub use policy::*;

pub mod prelude {
    pub use crate::constraints::Constraints;
    pub use crate::policy::{LayoutChildren, LayoutPolicy};
}
