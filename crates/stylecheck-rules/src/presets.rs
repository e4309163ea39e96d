//! Rule sets for common configurations.

use crate::{AsyncSuffix, ForbiddenTimeAccess, GuardClause, MethodLength, NamespaceStyle};
use stylecheck_core::RuleBox;

/// Named groups of built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Every built-in rule.
    All,
    /// Naming conventions only.
    Naming,
    /// Method and file shape checks.
    Structure,
}

impl RuleSet {
    /// Returns the rules for this set.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::All => all_rules(),
            Self::Naming => naming_rules(),
            Self::Structure => structure_rules(),
        }
    }

    /// Looks a set up by its lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "naming" => Some(Self::Naming),
            "structure" => Some(Self::Structure),
            _ => None,
        }
    }
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MethodLength::new()),
        Box::new(AsyncSuffix::new()),
        Box::new(ForbiddenTimeAccess::new()),
        Box::new(GuardClause::new()),
        Box::new(NamespaceStyle::new()),
    ]
}

/// Returns the naming rules.
///
/// Includes:
/// - `async-suffix` (WTI0002) - Requires `Async` on asynchronous methods
/// - `namespace-style` (WTI0006, WTI0007) - File-scoped namespaces, one public type
#[must_use]
pub fn naming_rules() -> Vec<RuleBox> {
    vec![Box::new(AsyncSuffix::new()), Box::new(NamespaceStyle::new())]
}

/// Returns the structure rules.
///
/// Includes:
/// - `method-length` (WTI0001) - Limits method body lines
/// - `guard-clause` (WTI0005) - Requires a leading `Guard.Against` call
/// - `namespace-style` (WTI0006, WTI0007) - File-scoped namespaces, one public type
#[must_use]
pub fn structure_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MethodLength::new()),
        Box::new(GuardClause::new()),
        Box::new(NamespaceStyle::new()),
    ]
}

/// Finds a built-in rule by name or code.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name() == name || rule.code() == name)
}
