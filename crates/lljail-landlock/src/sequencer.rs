//! Privilege drop, policy bind and handle release, in that order
//!
//! The order is encoded in types: [`RestrictionSequencer::bind`] needs a
//! [`NoNewPrivs`] token, and the only way to get one is a successful
//! [`RestrictionSequencer::drop_privileges`]. Both steps are fatal on
//! failure; nothing here retries.

use crate::ruleset::Ruleset;
use crate::service::{LandlockService, PrivilegeControl};
use lljail_core::{LljailError, Result};
use log::{debug, info};

/// Proof that `no_new_privs` is set on this process
#[derive(Debug)]
pub struct NoNewPrivs {
    _private: (),
}

/// Proof that a ruleset is enforced on this process
#[derive(Debug)]
#[must_use = "the restriction is in place; the next step is launching the command"]
pub struct PolicyBound {
    rules: usize,
}

impl PolicyBound {
    /// Number of path rules in the enforced ruleset
    pub fn rules(&self) -> usize {
        self.rules
    }
}

pub struct RestrictionSequencer<'a, S, P> {
    service: &'a S,
    privileges: &'a P,
}

impl<'a, S: LandlockService, P: PrivilegeControl> RestrictionSequencer<'a, S, P> {
    pub fn new(service: &'a S, privileges: &'a P) -> Self {
        Self {
            service,
            privileges,
        }
    }

    /// Unrestricted -> PrivilegeDropped
    pub fn drop_privileges(&self) -> Result<NoNewPrivs> {
        self.privileges
            .set_no_new_privs()
            .map_err(LljailError::PrivilegeDropFailed)?;
        debug!("no_new_privs set");
        Ok(NoNewPrivs { _private: () })
    }

    /// PrivilegeDropped -> PolicyBound.
    ///
    /// Consumes the ruleset: its handle is released on return whether or
    /// not the kernel accepted it.
    pub fn bind(&self, ruleset: Ruleset<S::Handle>, _proof: NoNewPrivs) -> Result<PolicyBound> {
        self.service
            .restrict_self(ruleset.handle())
            .map_err(LljailError::PolicyBindFailed)?;
        let rules = ruleset.rules().len();
        drop(ruleset);
        info!("Ruleset enforced ({} rule(s))", rules);
        Ok(PolicyBound { rules })
    }

    /// Run the whole sequence on `ruleset`.
    pub fn restrict(&self, ruleset: Ruleset<S::Handle>) -> Result<PolicyBound> {
        let proof = self.drop_privileges()?;
        self.bind(ruleset, proof)
    }
}
