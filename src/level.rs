use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered log severity, least- to most-severe.
///
/// `Fatal` and `Panic` have no `tracing` counterpart but can be attached to
/// manually constructed entries; comparisons follow severity, so
/// `Severity::Error > Severity::Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
}

impl Severity {
    /// All severities, most- to least-severe. This is the iteration order of
    /// [`Severity::at_or_above`] and therefore of the hook's level set.
    pub const ALL: [Severity; 6] = [
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Upper-case token used in outgoing documents, e.g. `"ERROR"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
        }
    }

    /// Every severity at least as severe as `min`, most-severe first.
    ///
    /// Computed once at hook construction; the result is stored immutably
    /// and queried per event without further allocation.
    pub fn at_or_above(min: Severity) -> Vec<Severity> {
        Severity::ALL.iter().copied().filter(|l| *l >= min).collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&tracing::Level> for Severity {
    fn from(level: &tracing::Level) -> Self {
        if *level == tracing::Level::ERROR {
            Severity::Error
        } else if *level == tracing::Level::WARN {
            Severity::Warn
        } else if *level == tracing::Level::INFO {
            Severity::Info
        } else {
            // TRACE folds into DEBUG; there is nothing below it to forward.
            Severity::Debug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_severity() {
        assert!(Severity::Panic > Severity::Fatal);
        assert!(Severity::Fatal > Severity::Error);
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Warn > Severity::Info);
        assert!(Severity::Info > Severity::Debug);
    }

    #[test]
    fn at_or_above_keeps_exactly_the_more_severe_levels() {
        assert_eq!(
            Severity::at_or_above(Severity::Warn),
            vec![Severity::Panic, Severity::Fatal, Severity::Error, Severity::Warn]
        );
        assert_eq!(Severity::at_or_above(Severity::Panic), vec![Severity::Panic]);
        assert_eq!(Severity::at_or_above(Severity::Debug), Severity::ALL.to_vec());
    }

    #[test]
    fn renders_upper_case_tokens() {
        assert_eq!(Severity::Error.as_str(), "ERROR");
        assert_eq!(Severity::Info.to_string(), "INFO");
    }

    #[test]
    fn maps_tracing_levels() {
        assert_eq!(Severity::from(&tracing::Level::ERROR), Severity::Error);
        assert_eq!(Severity::from(&tracing::Level::TRACE), Severity::Debug);
    }
}
