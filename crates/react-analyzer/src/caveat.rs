//! Non-fatal diagnostics raised while building the model.

use source_text::Span;
use std::fmt;

/// Message shared by every higher-order-component caveat.
pub const HOC_MESSAGE: &str = "possible higher-order-component pattern, unsupported";

/// Message raised when a component reads props without declaring any.
pub const MISSING_VALIDATION_MESSAGE: &str = "There is no props validation, manual check required.";

/// A construct the generator could not translate faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Caveat {
    /// The caveat code.
    pub code: CaveatCode,
    /// The human-readable message.
    pub message: String,
    /// Where in the cleaned source the construct sits, when known.
    pub span: Option<Span>,
}

impl Caveat {
    /// Creates a caveat anchored at `span`.
    pub fn new(code: CaveatCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span: Some(span),
        }
    }

    /// Creates a caveat that concerns the file as a whole.
    pub fn unanchored(code: CaveatCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: None,
        }
    }
}

impl fmt::Display for Caveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Caveat codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CaveatCode {
    /// `higher-order-component`: a component built or placed somewhere other than the top level
    HigherOrderComponent,
    /// `decorators`
    Decorators,
    /// `ambiguous-prop-type`: a prop whose type could not be mapped
    AmbiguousPropType,
    /// `missing-prop-validation`
    MissingPropValidation,
    /// `duplicate-prop-contract`: props declared by type and by `propTypes`
    DuplicatePropContract,
    /// `unsupported-lifecycle`
    UnsupportedLifecycle,
    /// `static-member`
    StaticMember,
    /// `setter`
    Setter,
    /// `state-updater`: a `setState` call the rewrite cannot express
    StateUpdater,
    /// `untransferred-statement`
    UntransferredStatement,
}

impl CaveatCode {
    /// Returns the caveat code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaveatCode::HigherOrderComponent => "higher-order-component",
            CaveatCode::Decorators => "decorators",
            CaveatCode::AmbiguousPropType => "ambiguous-prop-type",
            CaveatCode::MissingPropValidation => "missing-prop-validation",
            CaveatCode::DuplicatePropContract => "duplicate-prop-contract",
            CaveatCode::UnsupportedLifecycle => "unsupported-lifecycle",
            CaveatCode::StaticMember => "static-member",
            CaveatCode::Setter => "setter",
            CaveatCode::StateUpdater => "state-updater",
            CaveatCode::UntransferredStatement => "untransferred-statement",
        }
    }
}

impl fmt::Display for CaveatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered, append-only collection of caveats.
///
/// Nothing is ever deduplicated: the same construct met twice is reported
/// twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CaveatLog {
    caveats: Vec<Caveat>,
}

impl CaveatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, caveat: Caveat) {
        tracing::debug!(code = %caveat.code, message = %caveat.message, "caveat");
        self.caveats.push(caveat);
    }

    pub fn extend(&mut self, caveats: impl IntoIterator<Item = Caveat>) {
        for caveat in caveats {
            self.push(caveat);
        }
    }

    pub fn len(&self) -> usize {
        self.caveats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caveats.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Caveat> {
        self.caveats.iter()
    }

    /// Returns true if any caveat carries `code`.
    pub fn contains(&self, code: CaveatCode) -> bool {
        self.caveats.iter().any(|caveat| caveat.code == code)
    }

    /// The messages in the order they were raised.
    pub fn messages(&self) -> Vec<String> {
        self.caveats.iter().map(|c| c.message.clone()).collect()
    }

    pub fn into_vec(self) -> Vec<Caveat> {
        self.caveats
    }
}

impl IntoIterator for CaveatLog {
    type Item = Caveat;
    type IntoIter = std::vec::IntoIter<Caveat>;

    fn into_iter(self) -> Self::IntoIter {
        self.caveats.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaveatLog {
    type Item = &'a Caveat;
    type IntoIter = std::slice::Iter<'a, Caveat>;

    fn into_iter(self) -> Self::IntoIter {
        self.caveats.iter()
    }
}
