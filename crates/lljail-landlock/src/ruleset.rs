//! Ruleset lifecycle: creation, population, hand-over for enforcement

use crate::access::AccessFs;
use crate::rule::{add_path_rule, Directive, PathRule};
use crate::service::LandlockService;
use lljail_core::{LljailError, Result};
use log::{debug, info};
use std::path::Path;

/// An open, not yet enforced ruleset.
///
/// Owns the service handle; dropping the ruleset releases it. Attached
/// rules are kept in declaration order for diagnostics only.
#[derive(Debug)]
pub struct Ruleset<H> {
    handle: H,
    handled: AccessFs,
    rules: Vec<PathRule>,
}

impl<H> Ruleset<H> {
    pub(crate) fn new(handle: H, handled: AccessFs) -> Self {
        Self {
            handle,
            handled,
            rules: Vec::new(),
        }
    }

    /// Rights this ruleset restricts; fixed at creation
    pub fn handled(&self) -> AccessFs {
        self.handled
    }

    /// Rules attached so far, in attachment order
    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    pub(crate) fn handle(&self) -> &H {
        &self.handle
    }

    pub(crate) fn record(&mut self, rule: PathRule) {
        self.rules.push(rule);
    }
}

/// Creates and fills rulesets through a [`LandlockService`]
pub struct RulesetManager<'a, S> {
    service: &'a S,
}

impl<'a, S: LandlockService> RulesetManager<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Create a ruleset handling `handled`.
    ///
    /// Fails with `UnsupportedFeature` on ENOSYS, `DisabledFeature` on
    /// EOPNOTSUPP and `RulesetCreation` for anything else.
    pub fn create(&self, handled: AccessFs) -> Result<Ruleset<S::Handle>> {
        let handle = self.service.create_ruleset(handled).map_err(|e| {
            LljailError::from_create_errno(e.raw_os_error().unwrap_or(libc::EINVAL))
        })?;
        debug!("Created ruleset handling {}", handled.names().join(","));
        Ok(Ruleset::new(handle, handled))
    }

    pub fn add_path_rule(
        &self,
        ruleset: &mut Ruleset<S::Handle>,
        path: &Path,
        allowed: AccessFs,
    ) -> Result<()> {
        add_path_rule(self.service, ruleset, path, allowed)
    }

    /// Attach one rule per directive, in order, stopping at the first failure.
    ///
    /// Rules already attached are not rolled back; the caller drops the
    /// ruleset on error.
    pub fn populate(&self, ruleset: &mut Ruleset<S::Handle>, directives: &[Directive]) -> Result<()> {
        for directive in directives {
            self.add_path_rule(ruleset, &directive.path, directive.allowed())?;
        }
        info!("Ruleset populated with {} rule(s)", ruleset.rules().len());
        Ok(())
    }
}
