use tracing::info;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::settings::DEFAULT_FACET;

/// Keep the requested facets that appear in `headers`, in requested order.
///
/// When nothing matches, a [`Diagnostic::FacetFallback`] is reported and the
/// hierarchy becomes `[GEO]`, whether or not `GEO` is itself a header.
pub fn validate(requested: &[String], headers: &[String], sink: &dyn DiagnosticSink) -> Vec<String> {
    let valid: Vec<String> = requested
        .iter()
        .filter(|f| headers.contains(f))
        .cloned()
        .collect();

    let valid = if valid.is_empty() {
        sink.report(Diagnostic::FacetFallback {
            requested: requested.to_vec(),
            headers: headers.to_vec(),
            fallback: DEFAULT_FACET.to_string(),
        });
        vec![DEFAULT_FACET.to_string()]
    } else {
        valid
    };

    info!(facets = ?valid, "using facet hierarchy");
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_requested_order() {
        let sink = CollectingSink::new();
        let headers = strings(&["REF_DATE", "GEO", "Sex", "Age group", "VALUE"]);
        let got = validate(&strings(&["Age group", "Missing", "GEO"]), &headers, &sink);
        assert_eq!(got, strings(&["Age group", "GEO"]));
        assert!(sink.is_empty());
    }

    #[test]
    fn falls_back_to_geo() {
        let sink = CollectingSink::new();
        let headers = strings(&["REF_DATE", "GEO", "VALUE"]);
        let got = validate(&strings(&["Sex"]), &headers, &sink);
        assert_eq!(got, strings(&["GEO"]));
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::FacetFallback {
                requested: strings(&["Sex"]),
                headers,
                fallback: "GEO".into(),
            }]
        );
    }

    #[test]
    fn fallback_is_unconditional() {
        let sink = CollectingSink::new();
        let got = validate(&strings(&["Sex"]), &strings(&["REF_DATE", "VALUE"]), &sink);
        assert_eq!(got, strings(&["GEO"]));
        assert_eq!(sink.len(), 1);
    }
}
