//! Provenance-tagged values.
//!
//! Every aggregated metric resolves to exactly one `SourceResult`: either the
//! authoritative value, or a fallback carrying the reason the authoritative
//! source was not used.

use serde::Serialize;

/// Whether a value came from its authoritative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Value read from the contract or partner API.
    Authoritative,
    /// Substituted value.
    Fallback,
}

/// A resolved metric value with its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceResult<T> {
    /// All authoritative calls for the metric succeeded.
    Authoritative {
        /// Decoded value.
        value: T,
        /// Upstream(s) the value was read from.
        #[serde(rename = "sourceName")]
        source_name: String,
    },
    /// At least one authoritative call failed.
    Fallback {
        /// Substituted value.
        value: T,
        /// Upstream that failed.
        #[serde(rename = "sourceName")]
        source_name: String,
        /// Failure description.
        reason: String,
    },
}

impl<T> SourceResult<T> {
    /// Creates an authoritative result.
    pub fn authoritative(value: T, source_name: impl Into<String>) -> Self {
        Self::Authoritative {
            value,
            source_name: source_name.into(),
        }
    }

    /// Creates a fallback result.
    pub fn fallback(value: T, source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Borrows the value regardless of origin.
    pub const fn value(&self) -> &T {
        match self {
            Self::Authoritative { value, .. } | Self::Fallback { value, .. } => value,
        }
    }

    /// Takes the value regardless of origin.
    pub fn into_value(self) -> T {
        match self {
            Self::Authoritative { value, .. } | Self::Fallback { value, .. } => value,
        }
    }

    /// Returns the origin kind.
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Authoritative { .. } => SourceKind::Authoritative,
            Self::Fallback { .. } => SourceKind::Fallback,
        }
    }

    /// Returns true if the value was substituted.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Upstream name attached to the result.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Authoritative { source_name, .. } | Self::Fallback { source_name, .. } => {
                source_name
            }
        }
    }

    /// Value-less view for responses and logs.
    pub fn provenance(&self) -> Provenance {
        match self {
            Self::Authoritative { source_name, .. } => Provenance {
                kind: SourceKind::Authoritative,
                source_name: source_name.clone(),
                reason: None,
            },
            Self::Fallback {
                source_name,
                reason,
                ..
            } => Provenance {
                kind: SourceKind::Fallback,
                source_name: source_name.clone(),
                reason: Some(reason.clone()),
            },
        }
    }

    /// Maps the value, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SourceResult<U> {
        match self {
            Self::Authoritative { value, source_name } => SourceResult::Authoritative {
                value: f(value),
                source_name,
            },
            Self::Fallback {
                value,
                source_name,
                reason,
            } => SourceResult::Fallback {
                value: f(value),
                source_name,
                reason,
            },
        }
    }
}

/// Origin of a value without the value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Authoritative or fallback.
    pub kind: SourceKind,
    /// Upstream name.
    pub source_name: String,
    /// Failure description, for fallbacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
