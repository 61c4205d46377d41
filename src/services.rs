//! Well-known service ports.
//!
//! Ports that development tools and common daemons claim by default. The
//! `well-known` validator rejects every port in this table, so a port handed
//! out by freeport will not collide with a database or web server the user
//! starts later.

use crate::types::Port;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Every well-known port with its conventional service name, ascending.
pub const WELL_KNOWN_PORTS: &[(u16, &str)] = &[
    (20, "ftp-data"),
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (53, "dns"),
    (80, "http"),
    (110, "pop3"),
    (143, "imap"),
    (443, "https"),
    (465, "smtps"),
    (587, "submission"),
    (993, "imaps"),
    (995, "pop3s"),
    (1433, "mssql"),
    (1521, "oracle"),
    (3000, "dev-server"),
    (3306, "mysql"),
    (3389, "rdp"),
    (5000, "dev-server"),
    (5432, "postgresql"),
    (5672, "amqp"),
    (5900, "vnc"),
    (6379, "redis"),
    (8000, "http-alt"),
    (8080, "http-proxy"),
    (8443, "https-alt"),
    (8888, "http-alt"),
    (9000, "cslistener"),
    (9200, "elasticsearch"),
    (11211, "memcached"),
    (27017, "mongodb"),
];

static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| WELL_KNOWN_PORTS.iter().copied().collect());

/// Look up the service conventionally bound to a port.
///
/// Returns `None` if the port is not in the well-known table.
pub fn service_name(port: Port) -> Option<&'static str> {
    PORT_SERVICES.get(&port.as_u16()).copied()
}

/// Check whether a port belongs to a well-known service.
pub fn is_well_known(port: Port) -> bool {
    PORT_SERVICES.contains_key(&port.as_u16())
}
