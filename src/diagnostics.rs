//! Non-fatal anomalies raised while validating facets and reshaping rows.
//!
//! Components report through a [`DiagnosticSink`] handed to them by the
//! caller instead of logging directly, so tests can capture what was raised.

use std::cell::RefCell;

use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// None of the requested facets exist in the header row.
    FacetFallback {
        requested: Vec<String>,
        headers: Vec<String>,
        fallback: String,
    },
    /// A row has no field for one of the active facets and was dropped.
    RowFacetMissing { row: usize, facet: String },
    /// A row has no field for the date or value column and was dropped.
    RowFieldMissing { row: usize, column: String },
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `tracing` subscriber at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FacetFallback {
                requested,
                headers,
                fallback,
            } => warn!(
                ?requested,
                ?headers,
                %fallback,
                "none of the requested facets found in headers; falling back"
            ),
            Diagnostic::RowFacetMissing { row, facet } => {
                warn!(row, %facet, "row missing facet; dropped")
            }
            Diagnostic::RowFieldMissing { row, column } => {
                warn!(row, %column, "row missing field; dropped")
            }
        }
    }
}

/// Keeps diagnostics in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct CollectingSink {
    seen: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.seen.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.seen.borrow_mut().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_preserves_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.report(Diagnostic::RowFacetMissing {
            row: 2,
            facet: "Sex".into(),
        });
        sink.report(Diagnostic::RowFieldMissing {
            row: 5,
            column: "VALUE".into(),
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.diagnostics()[0],
            Diagnostic::RowFacetMissing {
                row: 2,
                facet: "Sex".into()
            }
        );
    }
}
