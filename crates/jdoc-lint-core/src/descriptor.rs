//! Check descriptors and the kind-set contract validator.
//!
//! Every check declares three kind sets:
//!
//! - `default`: what it subscribes to when the user configures nothing;
//! - `acceptable`: everything it can handle (defaults to `default`);
//! - `required`: what it cannot work without (defaults to `default`).
//!
//! The user may override the subscription with `javadoc_tokens`. At
//! registration the validator enforces `required ⊆ default` (a property of
//! the check itself, checked unconditionally) and `subscribed ⊆ acceptable`.

use crate::check::Capability;
use crate::kind::{KindSet, NodeKind, UnknownKind};
use miette::Diagnostic;
use thiserror::Error;

/// Registration-time contract violations.
#[derive(Debug, Error, Diagnostic)]
pub enum ContractError {
    /// The check requires a kind it does not subscribe to by default.
    #[error(
        "Javadoc token \"{kind}\" from required javadoc tokens was not found in default javadoc tokens list in check {check}"
    )]
    #[diagnostic(
        code(jdoc_lint::contract::required_not_default),
        help("the check's required kinds must be part of its default kinds")
    )]
    RequiredNotInDefault {
        /// First offending kind.
        kind: NodeKind,
        /// Check name.
        check: String,
    },

    /// The configured subscription names a kind the check cannot handle.
    #[error("Javadoc token \"{kind}\" was not found in Acceptable javadoc tokens list in check {check}")]
    #[diagnostic(
        code(jdoc_lint::contract::not_acceptable),
        help("`javadoc_tokens` for this check may only use {acceptable}")
    )]
    NotAcceptable {
        /// First offending kind.
        kind: NodeKind,
        /// Check name.
        check: String,
        /// Kinds the check accepts.
        acceptable: KindSet,
    },

    /// The configured subscription names a kind that does not exist.
    #[error("invalid javadoc_tokens for check {check}")]
    #[diagnostic(
        code(jdoc_lint::contract::unknown_kind),
        help("run `jdoc-lint list-rules --kinds` to see valid names")
    )]
    UnknownKind {
        /// Check name.
        check: String,
        /// Parse failure.
        #[source]
        source: UnknownKind,
    },
}

/// Kind sets and capability of one registered check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDescriptor {
    name: String,
    default: KindSet,
    acceptable: KindSet,
    required: KindSet,
    subscribed: KindSet,
    capability: Capability,
}

impl CheckDescriptor {
    /// Creates a descriptor subscribed to its default kinds.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        default: &[NodeKind],
        acceptable: &[NodeKind],
        required: &[NodeKind],
        capability: Capability,
    ) -> Self {
        let default = KindSet::from(default);
        Self {
            name: name.into(),
            subscribed: default.clone(),
            default,
            acceptable: KindSet::from(acceptable),
            required: KindSet::from(required),
            capability,
        }
    }

    /// Replaces the subscription with a user override.
    #[must_use]
    pub fn with_subscription(mut self, kinds: KindSet) -> Self {
        self.subscribed = kinds;
        self
    }

    /// Replaces the subscription with configured kind names.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnknownKind`] if a name is not a node kind.
    pub fn with_subscription_names<I, S>(self, names: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = KindSet::parse_names(names).map_err(|source| ContractError::UnknownKind {
            check: self.name.clone(),
            source,
        })?;
        Ok(self.with_subscription(kinds))
    }

    /// Overrides the declared capability.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self
    }

    /// Validates the contract.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant, naming the first offending kind in
    /// declaration order.
    pub fn validate(&self) -> Result<(), ContractError> {
        if let Some(kind) = self.required.first_not_in(&self.default) {
            return Err(ContractError::RequiredNotInDefault {
                kind,
                check: self.name.clone(),
            });
        }
        if let Some(kind) = self.subscribed.first_not_in(&self.acceptable) {
            return Err(ContractError::NotAcceptable {
                kind,
                check: self.name.clone(),
                acceptable: self.acceptable.clone(),
            });
        }
        Ok(())
    }

    /// Check name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kinds subscribed to when nothing is configured.
    #[must_use]
    pub fn default_kinds(&self) -> &KindSet {
        &self.default
    }

    /// Kinds the check can handle.
    #[must_use]
    pub fn acceptable_kinds(&self) -> &KindSet {
        &self.acceptable
    }

    /// Kinds the check cannot work without.
    #[must_use]
    pub fn required_kinds(&self) -> &KindSet {
        &self.required
    }

    /// Kinds the dispatch engine will deliver.
    #[must_use]
    pub fn subscribed(&self) -> &KindSet {
        &self.subscribed
    }

    /// Whether the check runs on non-tight trees.
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }
}
