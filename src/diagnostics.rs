//! Problem counting for the `{problems}` placeholder

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    /// Only warnings and errors show up as problems
    pub fn is_problem(self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: String::new(),
        }
    }
}

/// Shared count of warnings and errors across every open resource.
///
/// The host owns one of these behind an `Arc` and calls [`recount`] whenever the
/// editor reports that diagnostics changed. The composer only reads it.
///
/// [`recount`]: DiagnosticsCounter::recount
#[derive(Debug, Default)]
pub struct DiagnosticsCounter {
    count: AtomicUsize,
}

impl DiagnosticsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the count from the full diagnostics set, replacing the old value
    pub fn recount<I, K, D>(&self, all: I) -> usize
    where
        I: IntoIterator<Item = (K, D)>,
        D: AsRef<[Diagnostic]>,
    {
        let counted = all
            .into_iter()
            .map(|(_, diagnostics)| {
                diagnostics
                    .as_ref()
                    .iter()
                    .filter(|d| d.severity.is_problem())
                    .count()
            })
            .sum();

        let previous = self.count.swap(counted, Ordering::SeqCst);
        if previous != counted {
            tracing::debug!("Problem count changed: {} -> {}", previous, counted);
        }

        counted
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_input_counts_zero() {
        let counter = DiagnosticsCounter::new();
        let none: Vec<(&str, Vec<Diagnostic>)> = Vec::new();
        assert_eq!(counter.recount(none), 0);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_counts_only_warnings_and_errors() {
        let counter = DiagnosticsCounter::new();
        let mut all = HashMap::new();
        all.insert(
            "src/main.rs",
            vec![
                Diagnostic::new(Severity::Error),
                Diagnostic::new(Severity::Hint),
                Diagnostic::new(Severity::Warning),
            ],
        );
        all.insert(
            "src/lib.rs",
            vec![
                Diagnostic::new(Severity::Information),
                Diagnostic::new(Severity::Error),
            ],
        );
        all.insert("README.md", vec![]);

        assert_eq!(counter.recount(&all), 3);
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_recount_overwrites_previous_value() {
        let counter = DiagnosticsCounter::new();
        counter.recount([("a", vec![Diagnostic::new(Severity::Error); 4])]);
        assert_eq!(counter.get(), 4);

        counter.recount([("a", vec![Diagnostic::new(Severity::Hint)])]);
        assert_eq!(counter.get(), 0);
    }
}
