//! Named port validators and their composition.
//!
//! A validator is an [`Predicate`] over ports. The [`ValidatorRegistry`]
//! maps names to predicates; callers own the registry and pass it to
//! whatever needs to resolve names, so registrations never leak between
//! independent finders or tests.

use crate::error::{FindError, FindResult};
use crate::services;
use crate::types::Port;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A pure acceptance test over ports. Returning `false` rejects the port.
pub type Predicate = Arc<dyn Fn(Port) -> bool + Send + Sync>;

/// Name of the validator rejecting ports below 1024.
pub const PRIVILEGED: &str = "privileged";
/// Name of the validator rejecting well-known service ports.
pub const WELL_KNOWN: &str = "well-known";

/// Description of a built-in validator.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinValidator {
    pub name: &'static str,
    pub description: &'static str,
    check: fn(Port) -> bool,
}

/// Validators available in every registry.
pub const BUILTINS: &[BuiltinValidator] = &[
    BuiltinValidator {
        name: PRIVILEGED,
        description: "reject privileged ports (below 1024)",
        check: |port| !port.is_privileged(),
    },
    BuiltinValidator {
        name: WELL_KNOWN,
        description: "reject ports used by well-known services (ssh, http, databases, ...)",
        check: |port| !services::is_well_known(port),
    },
];

/// Registry of named validators.
///
/// Custom validators shadow built-ins registered under the same name.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    custom: HashMap<String, Predicate>,
}

impl ValidatorRegistry {
    /// Create a registry holding only the built-in validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom validator, replacing any earlier one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(Port) -> bool + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(predicate));
    }

    /// Remove a custom validator. Built-ins cannot be removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.custom.remove(name).is_some()
    }

    /// Look up a validator by name.
    pub fn resolve(&self, name: &str) -> Option<Predicate> {
        if let Some(predicate) = self.custom.get(name) {
            return Some(Arc::clone(predicate));
        }
        BUILTINS.iter().find(|b| b.name == name).map(|b| {
            let check = b.check;
            Arc::new(check) as Predicate
        })
    }

    /// Compose the named validators into one predicate.
    ///
    /// Validators run left to right and the first rejection wins. Every
    /// name is resolved up front, so an unknown name fails here rather
    /// than part way through a scan. An empty list yields `None`, meaning
    /// every port is accepted.
    pub fn compose<S: AsRef<str>>(&self, names: &[S]) -> FindResult<Option<Predicate>> {
        let predicates = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.resolve(name)
                    .ok_or_else(|| FindError::UnknownValidator(name.to_string()))
            })
            .collect::<FindResult<Vec<_>>>()?;

        if predicates.len() <= 1 {
            return Ok(predicates.into_iter().next());
        }
        let composed: Predicate = Arc::new(move |port: Port| predicates.iter().all(|p| p(port)));
        Ok(Some(composed))
    }

    /// Names of all resolvable validators, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTINS
            .iter()
            .map(|b| b.name.to_string())
            .chain(self.custom.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}

/// Split a comma-separated list of validator names.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
