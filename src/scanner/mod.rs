//! Scanner module - finds free ports in a range.
//!
//! Two strategies share the same filtering and the same [`Probe`]:
//! [`scan_sequential`] walks ports one by one and can find adjacent blocks,
//! [`scan_parallel`] probes in bounded concurrent windows.

pub mod parallel;
pub mod probe;
pub mod sequential;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

use crate::types::{ExcludeSet, Port, PortRange};
use crate::validators::Predicate;
use serde::Serialize;
use std::fmt;

pub use parallel::{scan_parallel, DEFAULT_CONCURRENCY};
pub use probe::{probe, TcpProbe, DEFAULT_HOST, DEFAULT_TIMEOUT};
pub use sequential::scan_sequential;
pub use traits::Probe;

/// How a scan walks its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "strategy")]
pub enum Strategy {
    /// One port at a time, ascending. Required for consecutive blocks.
    Sequential {
        /// Only return a complete run of adjacent free ports.
        consecutive: bool,
    },
    /// Concurrent windows of at most `max_concurrency` probes.
    Parallel { max_concurrency: usize },
}

impl Strategy {
    /// Pick the strategy for a request: adjacency forces a sequential walk.
    pub fn for_request(consecutive: bool, max_concurrency: usize) -> Self {
        if consecutive {
            Self::Sequential { consecutive: true }
        } else {
            Self::Parallel { max_concurrency }
        }
    }

    pub fn is_consecutive(&self) -> bool {
        matches!(self, Self::Sequential { consecutive: true })
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Parallel {
            max_concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential { consecutive: true } => write!(f, "sequential (consecutive)"),
            Self::Sequential { consecutive: false } => write!(f, "sequential"),
            Self::Parallel { max_concurrency } => write!(f, "parallel (window {})", max_concurrency),
        }
    }
}

/// Run one scan with the given strategy.
pub async fn run_scan<P: Probe + ?Sized>(
    probe: &P,
    range: PortRange,
    exclude: &ExcludeSet,
    predicate: Option<&Predicate>,
    count: usize,
    strategy: Strategy,
) -> Vec<Port> {
    match strategy {
        Strategy::Sequential { consecutive } => {
            scan_sequential(probe, range, exclude, predicate, count, consecutive).await
        }
        Strategy::Parallel { max_concurrency } => {
            scan_parallel(probe, range, exclude, predicate, count, max_concurrency).await
        }
    }
}

/// Whether a port passes the exclusion set and predicate, before probing.
pub(crate) fn is_candidate(port: Port, exclude: &ExcludeSet, predicate: Option<&Predicate>) -> bool {
    !exclude.contains(port) && predicate.map_or(true, |accept| accept(port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::mock::MockProbe;
    use std::sync::Arc;

    #[test]
    fn test_strategy_selection() {
        assert_eq!(
            Strategy::for_request(true, 50),
            Strategy::Sequential { consecutive: true }
        );
        assert_eq!(
            Strategy::for_request(false, 50),
            Strategy::Parallel { max_concurrency: 50 }
        );
        assert!(!Strategy::default().is_consecutive());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(
            Strategy::Sequential { consecutive: true }.to_string(),
            "sequential (consecutive)"
        );
        assert_eq!(Strategy::default().to_string(), "parallel (window 100)");
    }

    #[test]
    fn test_is_candidate() {
        let exclude: ExcludeSet = "80".parse().unwrap();
        let high: Predicate = Arc::new(|p: Port| p.as_u16() > 100);
        let port = |n| Port::new(n).unwrap();

        assert!(!is_candidate(port(80), &exclude, None));
        assert!(is_candidate(port(81), &exclude, None));
        assert!(!is_candidate(port(81), &exclude, Some(&high)));
        assert!(is_candidate(port(101), &exclude, Some(&high)));
    }

    #[tokio::test]
    async fn test_both_strategies_respect_filters() {
        let exclude: ExcludeSet = "7000-7004".parse().unwrap();
        let odd: Predicate = Arc::new(|p: Port| p.as_u16() % 2 == 1);
        let range = PortRange::from_bounds(7000, 7100).unwrap();

        for strategy in [
            Strategy::Sequential { consecutive: false },
            Strategy::Parallel { max_concurrency: 7 },
        ] {
            let probe = MockProbe::new([7005, 7009]);
            let found = run_scan(&probe, range, &exclude, Some(&odd), 5, strategy).await;

            assert_eq!(found.len(), 5, "{}", strategy);
            for port in &found {
                assert!(range.contains(*port));
                assert!(!exclude.contains(*port));
                assert!(odd(*port));
            }
            assert!(found.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[tokio::test]
    async fn test_consecutive_results_are_adjacent() {
        let probe = MockProbe::new([7002, 7006, 7007, 7011]);
        let range = PortRange::from_bounds(7000, 7100).unwrap();

        let found = run_scan(
            &probe,
            range,
            &ExcludeSet::new(),
            None,
            4,
            Strategy::for_request(true, 100),
        )
        .await;

        assert_eq!(found.len(), 4);
        assert!(found
            .windows(2)
            .all(|w| w[1].as_u16() == w[0].as_u16() + 1));
        assert_eq!(found[0].as_u16(), 7012);
    }
}
