//! Probe trait abstraction.
//!
//! The scanners only need to ask "is this port free?". Putting that behind
//! a trait lets them run against real sockets or an in-memory host.

use crate::types::Port;
use async_trait::async_trait;

/// Availability check for a single port.
///
/// Implementations must never fail: anything that prevents the port from
/// being used is reported as `false`.
///
/// # Example
///
/// ```ignore
/// use freeport::scanner::Probe;
///
/// async fn first_free<P: Probe>(probe: &P, ports: &[Port]) -> Option<Port> {
///     for &port in ports {
///         if probe.is_available(port).await {
///             return Some(port);
///         }
///     }
///     None
/// }
/// ```
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check whether `port` can be bound right now.
    async fn is_available(&self, port: Port) -> bool;

    /// Host the probe binds on.
    fn host(&self) -> &str;
}
