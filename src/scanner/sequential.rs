//! Sequential scanner.
//!
//! Probes one port at a time in ascending order. This is the only strategy
//! that can find a block of adjacent free ports, because whether a port
//! extends the current run depends on the result for the port before it.

use crate::scanner::{is_candidate, Probe};
use crate::types::{ExcludeSet, Port, PortRange};
use crate::validators::Predicate;
use tracing::{debug, trace};

/// Walk `range` in order and return up to `count` free ports.
///
/// Excluded ports and ports the predicate rejects are never probed. With
/// `consecutive` set, only a complete run of `count` adjacent free ports is
/// returned; a skipped or occupied port breaks the run and the next eligible
/// port starts a new one.
///
/// Returns fewer ports than requested (possibly none) when the range runs
/// out. Deciding whether that is an error is up to the caller.
pub async fn scan_sequential<P: Probe + ?Sized>(
    probe: &P,
    range: PortRange,
    exclude: &ExcludeSet,
    predicate: Option<&Predicate>,
    count: usize,
    consecutive: bool,
) -> Vec<Port> {
    if count == 0 {
        return Vec::new();
    }
    debug!(%range, host = probe.host(), count, consecutive, "sequential scan");

    let mut found = Vec::with_capacity(count.min(range.len()));
    for port in range.iter() {
        if !is_candidate(port, exclude, predicate) || !probe.is_available(port).await {
            if consecutive && !found.is_empty() {
                trace!(%port, run = found.len(), "run broken");
                found.clear();
            }
            continue;
        }

        found.push(port);
        if found.len() == count {
            break;
        }
    }

    if consecutive && found.len() < count {
        found.clear();
    }
    debug!(found = found.len(), "sequential scan finished");
    found
}
