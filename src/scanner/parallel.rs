//! Windowed parallel scanner.
//!
//! Candidates are probed in fixed-size windows: every probe in a window
//! runs concurrently and the window is joined before the next one starts.
//! The window size caps how many sockets are open at once.

use crate::scanner::{is_candidate, Probe};
use crate::types::{ExcludeSet, Port, PortRange};
use crate::validators::Predicate;
use futures::future::join_all;
use tracing::{debug, trace};

/// Default number of probes in flight per window.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Probe `range` in windows of `max_concurrency` and return up to `count`
/// free ports in ascending order.
///
/// Filtering happens before any probing, so the predicate runs exactly once
/// for every non-excluded port in the range. No new window is started once
/// `count` ports are found; free ports beyond `count` from the last window
/// are dropped. A `max_concurrency` of 0 is treated as 1.
pub async fn scan_parallel<P: Probe + ?Sized>(
    probe: &P,
    range: PortRange,
    exclude: &ExcludeSet,
    predicate: Option<&Predicate>,
    count: usize,
    max_concurrency: usize,
) -> Vec<Port> {
    if count == 0 {
        return Vec::new();
    }

    let candidates: Vec<Port> = range
        .iter()
        .filter(|&port| is_candidate(port, exclude, predicate))
        .collect();
    let window = max_concurrency.max(1);
    debug!(
        %range,
        host = probe.host(),
        candidates = candidates.len(),
        window,
        count,
        "parallel scan"
    );

    let mut found = Vec::with_capacity(count.min(candidates.len()));
    for (index, batch) in candidates.chunks(window).enumerate() {
        let available = join_all(batch.iter().map(|&port| probe.is_available(port))).await;
        found.extend(
            batch
                .iter()
                .zip(available)
                .filter_map(|(&port, free)| free.then_some(port)),
        );
        trace!(window = index, total = found.len(), "window settled");

        if found.len() >= count {
            found.truncate(count);
            break;
        }
    }

    debug!(found = found.len(), "parallel scan finished");
    found
}
