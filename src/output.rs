//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Page
//!     Tanaka Renovation → dist/index.html
//!
//! Cases
//! 001 浴室リフォーム
//!     Before: assets/cases/bath-before.jpg
//!     After: assets/cases/bath-after.jpg
//!
//! FAQ
//! 001 warranty → #warranty
//!
//! Assets
//!     assets/cases/bath-before.jpg
//!     assets/cases/bath-after.jpg
//!
//! Generated 1 page, 1 case, 1 FAQ entry, 2 assets
//! ```
//!
//! ## Check
//!
//! ```text
//! Tanaka Renovation: 1 case, 1 FAQ entry
//! Missing
//!     assets/cases/bath-after.jpg
//! ```
//!
//! ## Validate
//!
//! ```text
//! tel: invalid
//!     正しい電話番号を入力してください（10桁以上）
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{BuildSummary, CheckReport};
use crate::rules::Verdict;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 case`, `2 cases`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format build output showing what landed in the output directory.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![
        "Page".to_string(),
        format!(
            "{}{} \u{2192} {}",
            indent(1),
            summary.title,
            summary.page.display()
        ),
    ];

    if !summary.cases.is_empty() {
        lines.push(String::new());
        lines.push("Cases".to_string());
        for (i, case) in summary.cases.iter().enumerate() {
            let title = if case.caption.is_empty() {
                "(no caption)"
            } else {
                case.caption.as_str()
            };
            lines.push(format!("{} {}", format_index(i + 1), title));
            lines.push(format!("{}Before: {}", indent(1), case.before));
            lines.push(format!("{}After: {}", indent(1), case.after));
        }
    }

    if !summary.faq.is_empty() {
        lines.push(String::new());
        lines.push("FAQ".to_string());
        for (i, id) in summary.faq.iter().enumerate() {
            lines.push(format!("{} {} \u{2192} #{}", format_index(i + 1), id, id));
        }
    }

    if !summary.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &summary.assets {
            lines.push(format!("{}{}", indent(1), asset.display()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {}, {}, {}",
        count(summary.cases.len(), "case", "cases"),
        count(summary.faq.len(), "FAQ entry", "FAQ entries"),
        count(summary.assets.len(), "asset", "assets"),
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

/// Format the result of `check`.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: {}, {}",
        report.title,
        count(report.cases, "case", "cases"),
        count(report.faq, "FAQ entry", "FAQ entries"),
    )];
    if report.is_ok() {
        lines.push("Config OK".to_string());
    } else {
        lines.push("Missing".to_string());
        for reference in &report.missing {
            lines.push(format!("{}{}", indent(1), reference));
        }
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

/// Format a single field verdict.
pub fn format_verdict(verdict: &Verdict) -> Vec<String> {
    if verdict.valid {
        return vec![format!("{}: valid", verdict.field)];
    }
    let mut lines = vec![format!("{}: invalid", verdict.field)];
    if let Some(message) = &verdict.message {
        lines.push(format!("{}{}", indent(1), message));
    }
    lines
}

/// Print a verdict to stdout.
pub fn print_verdict(verdict: &Verdict) {
    for line in format_verdict(verdict) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
