//! Normalization of raw recognizer reports into canonical notation.
//!
//! The rewrite runs as a fixed sequence of named stages so that ordering and
//! idempotence are explicit rather than incidental:
//!
//! 1. `extract_latex` — pull the recognized expression off the report's
//!    `LaTeX:` line.
//! 2. `repair_commas` — substitute the recognizer's comma placeholder.
//! 3. `canonicalize_hint` — rewrite hint fragments matching the relational
//!    grammar as `<operator>\{<content>\}`; non-matching fragments pass
//!    through unchanged.
//! 4. `cleanup` — strip stray underscores and collapse doubled braces.
//!
//! Every stage is a pure function of its input string; the whole pass is
//! deterministic over the reports and their submission-order parity.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::core::error::{InklineError, Result};
use crate::core::model::{CanonicalResult, Role};

fn latex_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"LaTeX:\s*(.*)").expect("latex line pattern"))
}

/// Relational operator followed by a subscripted group: either a summation
/// expression with an optional trailing digit sentinel, or an already
/// braced set expression.
fn hint_grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(=|\\lt|\\gt|\\leq|\\geq)_\{((\\sum\s*(.*?))|(\\\{(.+?)\\\})3?)\}")
            .expect("hint grammar pattern")
    })
}

fn doubled_braces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"=\{\\\{(.+?)\\\}\}").expect("doubled braces pattern"))
}

fn leading_underscore_operator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_(=|\\lt|\\gt|\\leq|\\geq)").expect("underscore pattern"))
}

/// Normalizes all reports of one request, in submission order.
///
/// Each entry pairs the fragment's line number with its raw report. Role is
/// derived from position parity: even positions are expressions and only get
/// token repair and cleanup, odd positions are hints and additionally go
/// through grammar canonicalization.
pub fn normalize_reports(reports: &[(usize, String)]) -> Result<Vec<CanonicalResult>> {
    reports
        .iter()
        .enumerate()
        .map(|(position, (line_number, report))| {
            let role = Role::from_position(position);
            let raw = extract_latex(report).ok_or(InklineError::MalformedRecognizerOutput {
                fragment: *line_number,
            })?;

            let repaired = repair_commas(&raw);
            let canonical = match role {
                Role::Hint => canonicalize_hint(&repaired),
                Role::Expression => repaired,
            };
            let text = cleanup(&canonical);

            debug!(line = line_number, ?role, %text, "normalized report");
            Ok(CanonicalResult {
                line_number: *line_number,
                role,
                text,
            })
        })
        .collect()
}

/// Stage 1: captures the remainder of the `LaTeX:` line, trimmed.
pub fn extract_latex(report: &str) -> Option<String> {
    latex_line()
        .captures(report)
        .map(|caps| caps[1].trim().to_string())
}

/// Stage 2: the recognizer emits ` COMMA ` where the expression contains a
/// literal comma.
pub fn repair_commas(text: &str) -> String {
    text.replace(" COMMA ", ", ")
}

/// Stage 3: rewrites a fragment matching the hint grammar as
/// `<operator>\{<content>\}`. Absence of the pattern means the fragment is
/// not a hint needing rewriting, so it passes through unchanged.
pub fn canonicalize_hint(text: &str) -> String {
    let Some(caps) = hint_grammar().captures(text) else {
        return text.to_string();
    };

    let operator = &caps[1];
    let content = match caps.get(6) {
        // Braced set branch: take the inner set as-is.
        Some(set) => set.as_str().trim().to_string(),
        // Summation branch: the lazy capture swallows the digit sentinel.
        None => {
            let body = caps.get(4).map(|m| m.as_str()).unwrap_or("");
            body.strip_suffix('3').unwrap_or(body).trim().to_string()
        }
    };

    format!("{operator}\\{{{content}\\}}")
}

/// Stage 4: removes a stray underscore after an equals sign, collapses
/// doubly-braced sets, and strips a leading underscore before any
/// relational operator. Idempotent on already-canonical strings.
pub fn cleanup(text: &str) -> String {
    let text = text.replace("=_", "=");
    let text = doubled_braces().replace_all(&text, "={$1}");
    leading_underscore_operator()
        .replace_all(&text, "$1")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(expr: &str) -> String {
        format!("recognition finished\nLaTeX: {expr}\n")
    }

    #[test]
    fn extracts_latex_line() {
        assert_eq!(
            extract_latex("noise\nLaTeX: x + y \nmore").as_deref(),
            Some("x + y")
        );
        assert_eq!(extract_latex("no expression here"), None);
    }

    #[test]
    fn missing_latex_line_fails() {
        let reports = vec![(0usize, "unrecognized input".to_string())];
        let err = normalize_reports(&reports).unwrap_err();
        assert!(matches!(
            err,
            InklineError::MalformedRecognizerOutput { fragment: 0 }
        ));
    }

    #[test]
    fn repairs_comma_placeholder() {
        assert_eq!(repair_commas("x COMMA y"), "x, y");
    }

    #[test]
    fn braced_set_hint_is_rewritten() {
        // Spec example: odd-position fragment with a braced-set subscript.
        let reports = vec![
            (0usize, report("a+b")),
            (1usize, report(r"x COMMA y =_{\{a,b\}}3")),
        ];
        let results = normalize_reports(&reports).unwrap();
        assert_eq!(results[0].text, "a+b");
        assert_eq!(results[0].role, Role::Expression);
        assert_eq!(results[1].text, r"=\{a,b\}");
        assert_eq!(results[1].role, Role::Hint);
    }

    #[test]
    fn summation_hint_trims_digit_sentinel() {
        let rewritten = canonicalize_hint(r"\leq_{\sum a+b3}");
        assert_eq!(rewritten, r"\leq\{a+b\}");
    }

    #[test]
    fn non_matching_hint_passes_through() {
        assert_eq!(canonicalize_hint("just text"), "just text");
    }

    #[test]
    fn even_position_is_never_hint_rewritten() {
        let reports = vec![(0usize, report(r"=_{\{a,b\}}"))];
        let results = normalize_reports(&reports).unwrap();
        // Only cleanup applies: `=_` collapses but no operator/brace rewrite.
        assert_eq!(results[0].text, r"={a,b}");
    }

    #[test]
    fn cleanup_removes_stray_underscores() {
        assert_eq!(cleanup("x =_ y"), "x = y");
        assert_eq!(cleanup(r"_\leq rest"), r"\leq rest");
    }

    #[test]
    fn cleanup_collapses_doubled_braces() {
        assert_eq!(cleanup(r"={\{a,b\}}"), "={a,b}");
    }

    #[test]
    fn canonical_strings_are_fixed_points() {
        for canonical in [r"=\{a,b\}", r"\lt\{x\}", "x + y = 3"] {
            assert_eq!(cleanup(&canonicalize_hint(canonical)), canonical);
        }
    }
}
