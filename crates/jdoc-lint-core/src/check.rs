//! Check traits for defining Javadoc rules.

use crate::config::RuleConfig;
use crate::descriptor::{CheckDescriptor, ContractError};
use crate::kind::NodeKind;
use crate::session::DispatchSession;
use crate::tree::Node;
use crate::types::{Severity, Violation};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether a check still runs on comments with malformed markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Skipped for non-tight trees.
    Strict,
    /// Dispatched on every tree that could be built.
    Tolerant,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Tolerant => write!(f, "tolerant"),
        }
    }
}

/// A rule that walks documentation comment trees.
///
/// A check declares the node kinds it understands through associated
/// constants and receives enter/leave callbacks for each subscribed node in
/// document order. All mutable state goes in [`JavadocCheck::State`], which
/// lives in a [`DispatchSession`] created fresh for every file.
///
/// # Example
///
/// ```ignore
/// use jdoc_lint_core::{DispatchSession, JavadocCheck, Node, NodeKind};
///
/// pub struct CountInlineTags;
///
/// impl JavadocCheck for CountInlineTags {
///     type State = usize;
///     const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::JavadocInlineTag];
///
///     fn name(&self) -> &'static str { "count-inline-tags" }
///     fn code(&self) -> &'static str { "JD900" }
///
///     fn visit(&self, session: &mut DispatchSession<'_, usize>, _node: Node<'_>) {
///         *session.state() += 1;
///     }
/// }
/// ```
pub trait JavadocCheck: Send + Sync {
    /// Per-file state.
    type State: Default + 'static;

    /// Kinds subscribed to when nothing is configured.
    const DEFAULT_KINDS: &'static [NodeKind];

    /// Kinds this check can handle.
    const ACCEPTABLE_KINDS: &'static [NodeKind] = Self::DEFAULT_KINDS;

    /// Kinds this check cannot work without.
    const REQUIRED_KINDS: &'static [NodeKind] = Self::DEFAULT_KINDS;

    /// Declared tolerance for malformed markup.
    const CAPABILITY: Capability = Capability::Tolerant;

    /// Returns the kebab-case name of this check (e.g., "atclause-order").
    fn name(&self) -> &'static str;

    /// Returns the check code (e.g., "JD003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this check reports.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this check.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Called once per tree before any node callback.
    fn begin_tree(&self, _session: &mut DispatchSession<'_, Self::State>, _root: Node<'_>) {}

    /// Called when entering a subscribed node.
    fn visit(&self, session: &mut DispatchSession<'_, Self::State>, node: Node<'_>);

    /// Called after a subscribed node and all its descendants were visited.
    fn leave(&self, _session: &mut DispatchSession<'_, Self::State>, _node: Node<'_>) {}

    /// Called once per tree after the walk, only if `begin_tree` ran.
    fn finish_tree(&self, _session: &mut DispatchSession<'_, Self::State>, _root: Node<'_>) {}
}

/// A check bound to one file's session.
pub(crate) trait BoundCheck {
    fn begin_tree(&mut self, root: Node<'_>);
    fn visit(&mut self, node: Node<'_>);
    fn leave(&mut self, node: Node<'_>);
    fn finish_tree(&mut self, root: Node<'_>);
    fn take_violations(&mut self) -> Vec<Violation>;
}

struct Bound<'f, C: JavadocCheck> {
    check: &'f C,
    session: DispatchSession<'f, C::State>,
}

impl<C: JavadocCheck> BoundCheck for Bound<'_, C> {
    fn begin_tree(&mut self, root: Node<'_>) {
        self.check.begin_tree(&mut self.session, root);
    }

    fn visit(&mut self, node: Node<'_>) {
        self.check.visit(&mut self.session, node);
    }

    fn leave(&mut self, node: Node<'_>) {
        self.check.leave(&mut self.session, node);
    }

    fn finish_tree(&mut self, root: Node<'_>) {
        self.check.finish_tree(&mut self.session, root);
    }

    fn take_violations(&mut self) -> Vec<Violation> {
        self.session.take_violations()
    }
}

/// Object-safe view of a [`JavadocCheck`].
pub(crate) trait ErasedCheck: Send + Sync {
    fn name(&self) -> &'static str;
    fn code(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn default_severity(&self) -> Severity;
    fn descriptor(&self) -> CheckDescriptor;
    fn bind<'f>(&'f self, file: &'f Path, severity: Severity) -> Box<dyn BoundCheck + 'f>;
}

impl<C: JavadocCheck> ErasedCheck for C {
    fn name(&self) -> &'static str {
        JavadocCheck::name(self)
    }

    fn code(&self) -> &'static str {
        JavadocCheck::code(self)
    }

    fn description(&self) -> &'static str {
        JavadocCheck::description(self)
    }

    fn default_severity(&self) -> Severity {
        JavadocCheck::default_severity(self)
    }

    fn descriptor(&self) -> CheckDescriptor {
        CheckDescriptor::new(
            JavadocCheck::name(self),
            C::DEFAULT_KINDS,
            C::ACCEPTABLE_KINDS,
            C::REQUIRED_KINDS,
            C::CAPABILITY,
        )
    }

    fn bind<'f>(&'f self, file: &'f Path, severity: Severity) -> Box<dyn BoundCheck + 'f> {
        Box::new(Bound {
            check: self,
            session: DispatchSession::new(
                file,
                JavadocCheck::code(self),
                JavadocCheck::name(self),
                severity,
            ),
        })
    }
}

/// A type-erased check awaiting registration.
pub struct CheckBox {
    check: Box<dyn ErasedCheck>,
}

impl CheckBox {
    /// Wraps a check.
    #[must_use]
    pub fn new<C: JavadocCheck + 'static>(check: C) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    /// Check name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.check.name()
    }

    /// Check code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.check.code()
    }

    /// Check description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.check.description()
    }

    /// Default severity.
    #[must_use]
    pub fn default_severity(&self) -> Severity {
        self.check.default_severity()
    }

    /// Descriptor as declared, before any configuration.
    #[must_use]
    pub fn descriptor(&self) -> CheckDescriptor {
        self.check.descriptor()
    }

    /// Applies configuration and validates the contract.
    ///
    /// `javadoc_tokens` replaces the subscription and
    /// `violate_on_non_tight_html = true` selects [`Capability::Strict`]
    /// (`false` selects [`Capability::Tolerant`]).
    ///
    /// # Errors
    ///
    /// Returns the first contract violation.
    pub fn register(self, config: Option<&RuleConfig>) -> Result<Registered, ContractError> {
        let mut descriptor = self.check.descriptor();
        let mut severity = self.check.default_severity();

        if let Some(config) = config {
            if let Some(names) = config.javadoc_tokens() {
                descriptor = descriptor.with_subscription_names(names)?;
            }
            if let Some(strict) = config.violate_on_non_tight_html() {
                descriptor = descriptor.with_capability(if strict {
                    Capability::Strict
                } else {
                    Capability::Tolerant
                });
            }
            if let Some(configured) = config.severity {
                severity = configured;
            }
        }

        descriptor.validate()?;
        tracing::debug!(
            check = descriptor.name(),
            subscribed = %descriptor.subscribed(),
            capability = %descriptor.capability(),
            "registered check"
        );
        Ok(Registered {
            check: self.check,
            descriptor,
            severity,
        })
    }
}

impl std::fmt::Debug for CheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckBox")
            .field("name", &self.name())
            .field("code", &self.code())
            .finish()
    }
}

/// A validated check ready for dispatch.
pub struct Registered {
    check: Box<dyn ErasedCheck>,
    descriptor: CheckDescriptor,
    severity: Severity,
}

impl Registered {
    /// Validated descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &CheckDescriptor {
        &self.descriptor
    }

    /// Effective severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Check name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.check.name()
    }

    pub(crate) fn bind<'f>(&'f self, file: &'f Path) -> Box<dyn BoundCheck + 'f> {
        self.check.bind(file, self.severity)
    }
}

impl std::fmt::Debug for Registered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registered")
            .field("descriptor", &self.descriptor)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}
