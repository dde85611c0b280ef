//! Tools exposed over the protocol and the adapter that invokes them.

pub mod builtin;
pub mod content;
pub mod invoke;
pub mod registry;
