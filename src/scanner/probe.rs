//! TCP bind probe.
//!
//! A port is free when a listening socket can be bound to it. The socket is
//! closed again before the probe returns, so probing leaves nothing behind.

use crate::scanner::traits::Probe;
use crate::types::Port;
use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::time::timeout;

/// Default host to probe on (all IPv4 interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default upper bound on a single probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Probes ports by binding a TCP listener on a host.
///
/// Does not require elevated privileges, though binding ports below 1024
/// usually does, and those probes simply report `false` without them.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Create a probe for `host` with the default timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn is_available(&self, port: Port) -> bool {
        probe(port, &self.host, self.timeout).await
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Check whether `port` can be bound on `host`.
///
/// Every failure (address in use, permission denied, unresolvable host,
/// timeout) yields `false`.
pub async fn probe(port: Port, host: &str, limit: Duration) -> bool {
    matches!(timeout(limit, bind_and_release(port, host)).await, Ok(Ok(())))
}

/// Bind and listen on the first address `host` resolves to, then close.
async fn bind_and_release(port: Port, host: &str) -> io::Result<()> {
    let addr = lookup_host((host, port.as_u16()))
        .await?
        .next()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{} did not resolve to any address", host),
            )
        })?;
    listen_once(addr)
}

fn listen_once(addr: SocketAddr) -> io::Result<()> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // Same as tokio's TcpListener::bind, so TIME_WAIT leftovers count as free.
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn occupied_port() -> (TcpListener, Port) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        (listener, port)
    }

    #[test]
    fn test_probe_creation() {
        let probe = TcpProbe::default();
        assert_eq!(probe.host(), "0.0.0.0");
        assert_eq!(probe.timeout(), Duration::from_millis(1000));

        let probe = TcpProbe::new("127.0.0.1").with_timeout(Duration::from_millis(50));
        assert_eq!(probe.host(), "127.0.0.1");
        assert_eq!(probe.timeout(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_occupied_port_is_unavailable() {
        let (_listener, port) = occupied_port();
        assert!(!probe(port, "127.0.0.1", DEFAULT_TIMEOUT).await);
    }

    #[tokio::test]
    async fn test_free_port_is_released() {
        let (listener, port) = occupied_port();
        drop(listener);

        let probe = TcpProbe::new("127.0.0.1");
        assert!(probe.is_available(port).await);
        assert!(probe.is_available(port).await);

        // Nothing may still be holding the port after the probe returns.
        assert!(TcpListener::bind(("127.0.0.1", port.as_u16())).is_ok());
    }

    #[tokio::test]
    async fn test_bad_host_is_unavailable() {
        let port = Port::new(40000).unwrap();
        assert!(!probe(port, "not an address", DEFAULT_TIMEOUT).await);
        assert!(!probe(port, "203.0.113.300", DEFAULT_TIMEOUT).await);
    }
}
