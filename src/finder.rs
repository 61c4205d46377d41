//! High-level port finding.
//!
//! [`FindOptions`] describes what the caller wants; [`PortFinder`] checks
//! it, resolves validators, runs the right scanner and turns a short
//! result into an error that says what was asked for and what was found.

use crate::error::{FindError, FindResult};
use crate::scanner::{
    self, Probe, Strategy, TcpProbe, DEFAULT_CONCURRENCY, DEFAULT_HOST, DEFAULT_TIMEOUT,
};
use crate::types::{ExcludeSet, Port, PortRange};
use crate::validators::ValidatorRegistry;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Parameters for a port search.
#[derive(Debug, Clone)]
pub struct FindOptions {
    pub range: PortRange,
    pub host: String,
    pub exclude: ExcludeSet,
    /// Validator names, applied in order.
    pub validators: Vec<String>,
    pub count: usize,
    pub consecutive: bool,
    pub concurrency: usize,
    pub timeout: Duration,
}

impl FindOptions {
    /// Search `range` for one free port on the default host.
    pub fn new(range: PortRange) -> Self {
        Self {
            range,
            host: DEFAULT_HOST.to_string(),
            exclude: ExcludeSet::new(),
            validators: Vec::new(),
            count: 1,
            consecutive: false,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_exclude(mut self, exclude: ExcludeSet) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set the validator names to apply, in order.
    pub fn with_validators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validators = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Require the ports to form one adjacent block.
    pub fn consecutive(mut self) -> Self {
        self.consecutive = true;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the numeric parameters. Ports and ranges are valid by type.
    pub fn validate(&self) -> FindResult<()> {
        if self.count == 0 {
            return Err(FindError::InvalidCount(self.count));
        }
        if self.concurrency == 0 {
            return Err(FindError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }

    pub fn strategy(&self) -> Strategy {
        Strategy::for_request(self.consecutive, self.concurrency)
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::new(PortRange::default())
    }
}

/// Outcome of a successful search.
#[derive(Debug, Clone, Serialize)]
pub struct FoundPorts {
    pub host: String,
    pub range: PortRange,
    pub strategy: Strategy,
    pub ports: Vec<Port>,
    pub duration_ms: u64,
}

/// Runs searches against a validator registry.
#[derive(Debug, Clone, Copy)]
pub struct PortFinder<'a> {
    registry: &'a ValidatorRegistry,
}

impl<'a> PortFinder<'a> {
    pub fn new(registry: &'a ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Find ports by binding on `options.host`.
    pub async fn find(&self, options: &FindOptions) -> FindResult<FoundPorts> {
        let probe = TcpProbe::new(options.host.clone()).with_timeout(options.timeout);
        self.find_with_probe(&probe, options).await
    }

    /// Find a single free port.
    pub async fn find_port(&self, options: &FindOptions) -> FindResult<Port> {
        let options = FindOptions {
            count: 1,
            consecutive: false,
            ..options.clone()
        };
        let found = self.find(&options).await?;
        found.ports.into_iter().next().ok_or(FindError::NoAvailablePort {
            range: options.range,
            host: options.host,
        })
    }

    /// Find ports using any probe implementation.
    ///
    /// All configuration errors surface before the first probe. A search
    /// for one port that finds nothing is `NoAvailablePort`; any other
    /// short result is `InsufficientPorts`.
    pub async fn find_with_probe<P: Probe + ?Sized>(
        &self,
        probe: &P,
        options: &FindOptions,
    ) -> FindResult<FoundPorts> {
        options.validate()?;
        let predicate = self.registry.compose(options.validators.as_slice())?;
        let strategy = options.strategy();
        debug!(
            range = %options.range,
            host = probe.host(),
            excluded = options.exclude.len(),
            validators = ?options.validators,
            %strategy,
            "starting search"
        );

        let started = Instant::now();
        let ports = scanner::run_scan(
            probe,
            options.range,
            &options.exclude,
            predicate.as_ref(),
            options.count,
            strategy,
        )
        .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        if ports.is_empty() && options.count == 1 {
            return Err(FindError::NoAvailablePort {
                range: options.range,
                host: probe.host().to_string(),
            });
        }
        if ports.len() < options.count {
            return Err(FindError::InsufficientPorts {
                requested: options.count,
                found: ports,
                range: options.range,
                host: probe.host().to_string(),
                consecutive: options.consecutive,
            });
        }

        info!(ports = ?ports, duration_ms, "found free ports");
        Ok(FoundPorts {
            host: probe.host().to_string(),
            range: options.range,
            strategy,
            ports,
            duration_ms,
        })
    }
}
