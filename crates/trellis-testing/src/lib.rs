//! Testing utilities and fixtures for Trellis layouts

pub mod policies;
pub mod probe;
pub mod rule;

pub use policies::*;
pub use probe::*;
pub use rule::*;

pub mod prelude {
    pub use crate::policies::CountingLeaf;
    pub use crate::probe::TracingHost;
    pub use crate::rule::LayoutTestRule;
}
