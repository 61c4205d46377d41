//! In-memory probe for scanner tests.

use crate::scanner::Probe;
use crate::types::Port;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A host where a fixed set of ports is occupied.
///
/// Records every probe and the peak number of probes in flight.
pub struct MockProbe {
    occupied: HashSet<u16>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    probed: Mutex<Vec<u16>>,
}

impl MockProbe {
    pub fn new(occupied: impl IntoIterator<Item = u16>) -> Self {
        Self {
            occupied: occupied.into_iter().collect(),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Every port free.
    pub fn all_free() -> Self {
        Self::new([])
    }

    /// Hold each probe open for `delay` so concurrent probes overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn probed(&self) -> Vec<u16> {
        self.probed.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for MockProbe {
    async fn is_available(&self, port: Port) -> bool {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.probed.lock().unwrap().push(port.as_u16());

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        !self.occupied.contains(&port.as_u16())
    }

    fn host(&self) -> &str {
        "mock"
    }
}
