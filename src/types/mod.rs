//! Core type definitions using newtype patterns for type safety.
//!
//! Invalid ports and inverted ranges cannot be constructed, so every value
//! reaching the scanners has already been validated.

mod port;

pub use port::{ExcludeSet, Port, PortError, PortRange};
