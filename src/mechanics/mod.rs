//! Pure formulas. No state, no host access.

pub mod budget;
pub mod control;
pub mod convert;

pub use budget::*;
pub use control::*;
pub use convert::*;
