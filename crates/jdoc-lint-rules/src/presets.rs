//! Check presets for common configurations.

use crate::{
    atclause_order, non_empty_atclause, prefer_inline_tags, summary_sentence, AtclauseOrder,
    NonEmptyAtclauseDescription, PreferInlineTags, SummarySentence,
};
use jdoc_lint_core::{CheckBox, Config};
use std::str::FromStr;

/// Preset configurations for jdoc-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended checks with sensible defaults.
    Recommended,
    /// Every built-in check.
    Strict,
    /// Minimal checks for gradual adoption.
    Minimal,
}

impl Preset {
    /// Names of the checks in this preset.
    #[must_use]
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Self::Recommended => &[
                prefer_inline_tags::NAME,
                non_empty_atclause::NAME,
                atclause_order::NAME,
            ],
            Self::Strict => ALL_NAMES,
            Self::Minimal => &[non_empty_atclause::NAME],
        }
    }

    /// Returns the checks for this preset, built from `config`.
    #[must_use]
    pub fn checks(self, config: &Config) -> Vec<CheckBox> {
        self.names()
            .iter()
            .filter_map(|name| check_by_name(name, config))
            .collect()
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown preset `{other}`")),
        }
    }
}

const ALL_NAMES: &[&str] = &[
    prefer_inline_tags::NAME,
    non_empty_atclause::NAME,
    atclause_order::NAME,
    summary_sentence::NAME,
];

/// Builds a built-in check from its name or code, applying its options
/// from `config`.
#[must_use]
pub fn check_by_name(name: &str, config: &Config) -> Option<CheckBox> {
    let check = match name {
        prefer_inline_tags::NAME | prefer_inline_tags::CODE => {
            CheckBox::new(PreferInlineTags::new())
        }
        non_empty_atclause::NAME | non_empty_atclause::CODE => {
            CheckBox::new(NonEmptyAtclauseDescription::new())
        }
        atclause_order::NAME | atclause_order::CODE => CheckBox::new(AtclauseOrder::from_config(
            config.rule(atclause_order::NAME),
        )),
        summary_sentence::NAME | summary_sentence::CODE => {
            CheckBox::new(SummarySentence::new())
        }
        _ => return None,
    };
    Some(check)
}

/// Returns the recommended set of checks.
///
/// Includes:
/// - `prefer-inline-tags` (JD001)
/// - `non-empty-atclause-description` (JD002)
/// - `atclause-order` (JD003)
#[must_use]
pub fn recommended_checks() -> Vec<CheckBox> {
    Preset::Recommended.checks(&Config::default())
}

/// Returns the strict set of checks.
///
/// Includes all recommended checks plus `summary-sentence` (JD004).
#[must_use]
pub fn strict_checks() -> Vec<CheckBox> {
    Preset::Strict.checks(&Config::default())
}

/// Returns the minimal set of checks.
#[must_use]
pub fn minimal_checks() -> Vec<CheckBox> {
    Preset::Minimal.checks(&Config::default())
}

/// Returns all available checks.
#[must_use]
pub fn all_checks() -> Vec<CheckBox> {
    ALL_NAMES
        .iter()
        .filter_map(|name| check_by_name(name, &Config::default()))
        .collect()
}
