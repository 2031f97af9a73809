//! Log severity levels and the minimum-severity gating decision.

use std::fmt;

use serde::Serialize;

/// Severity of a log call, ordered from most to least verbose.
///
/// The numeric rank backs the gating comparison: a logger configured with
/// [`Severity::Debug`] as its minimum allows every call, while one configured
/// with [`Severity::Error`] allows only errors. Note that `Warn` ranks below
/// `Info` in this scheme, so an `Info`-configured logger drops warnings.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Diagnostic detail; the most verbose level.
    Debug = 1,

    /// Warning conditions.
    Warn = 2,

    /// Informational messages.
    Info = 3,

    /// Error conditions; the least verbose level.
    Error = 4,
}

impl Severity {
    /// Returns `true` if a call at `requested` severity passes a gate
    /// configured with `self` as the minimum.
    pub const fn allows(self, requested: Self) -> bool {
        self.rank() <= requested.rank()
    }

    /// The uppercase label used in rendered records.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }

    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Debug => 1,
            Self::Warn => 2,
            Self::Info => 3,
            Self::Error => 4,
        }
    }

    pub(crate) const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Debug),
            2 => Some(Self::Warn),
            3 => Some(Self::Info),
            4 => Some(Self::Error),
            _ => None,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Warn
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
