use super::messages::generate_issue_message;
use owo_colors::OwoColorize;
use std::path::Path;
use otf::{
    language::LoadingError,
    parsing::{ParsingError, Workspace},
    validation::{Issue, Severity},
};

/// Format a parsing error with full details including source code context
pub fn full_parsing_error<'i>(error: &ParsingError, filename: &'i Path, source: &'i str) -> String {
    let details = match error {
        ParsingError::InvalidSyntax(_, message) => message
            .trim_ascii()
            .to_string(),
        ParsingError::UnknownBlock(_, _) => {
            "Block types must be one of the kinds listed by 'otf blocks --formula'.".to_string()
        }
    };

    excerpt(
        &"error".bright_red(),
        &error.message(),
        &details,
        filename,
        source,
        error.offset(),
    )
}

/// Format a validation issue with full details, pointing at the block in
/// the workspace source that it concerns
pub fn full_issue<'i>(
    issue: &Issue,
    workspace: &Workspace,
    filename: &'i Path,
    source: &'i str,
) -> String {
    let (problem, details) = generate_issue_message(issue, workspace);
    let offset = block_offset(issue, workspace);

    excerpt(
        &severity(issue.severity),
        &problem,
        &details,
        filename,
        source,
        offset,
    )
}

/// Format a validation issue with concise single-line output
pub fn concise_issue<'i>(
    issue: &Issue,
    workspace: &Workspace,
    filename: &'i Path,
    source: &'i str,
) -> String {
    let (problem, _) = generate_issue_message(issue, workspace);
    let offset = block_offset(issue, workspace);
    let line = calculate_line_number(source, offset) + 1;
    let column = calculate_column_number(source, offset) + 1;

    format!(
        "{}: {}:{}:{} {}",
        severity(issue.severity),
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error.bold()
    )
}

fn excerpt(
    label: &dyn std::fmt::Display,
    problem: &str,
    details: &str,
    filename: &Path,
    source: &str,
    offset: usize,
) -> String {
    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
        "#,
        label,
        filename.to_string_lossy(),
        line,
        column,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        '^'.bright_red(),
        details
    )
    .trim_ascii()
    .to_string()
}

fn severity(severity: Severity) -> String {
    match severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .yellow()
            .to_string(),
        Severity::Info => "info"
            .bright_blue()
            .to_string(),
    }
}

fn block_offset(issue: &Issue, workspace: &Workspace) -> usize {
    workspace
        .offsets
        .get(issue.index)
        .copied()
        .unwrap_or(0)
}

// Helper functions for line/column calculation, both zero-origin
fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

fn calculate_column_number(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}
