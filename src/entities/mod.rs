//! Entity helpers

#[macro_use]
pub mod macros;
