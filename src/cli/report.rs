//! Report formatting and printing utilities.
//!
//! Unknown translation calls are shown in cargo-style format, followed by a
//! summary of the merge. Separate from core logic so glean can be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{Flush, ParseError, UnknownCall};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract(summary, result, verbose, writer);
        }
        CommandSummary::Init(summary) => {
            print_init(summary, writer);
        }
    }
}

fn print_extract<W: Write>(
    summary: &ExtractSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    // Errors are always shown, warnings only when not silent.
    if summary.strict {
        report_unknown_calls(&summary.unknown_calls, Severity::Error, writer);
    } else if !summary.silent {
        report_unknown_calls(&summary.unknown_calls, Severity::Warning, writer);
    } else if !summary.unknown_calls.is_empty() {
        let _ = writeln!(
            writer,
            "{} {} translation call(s) with unknown keys (use {} for details)",
            "warning:".bold().yellow(),
            summary.unknown_calls.len(),
            "-v".cyan()
        );
    }
    print_parse_errors(&summary.parse_errors, verbose, writer);
    print_extract_summary(summary, writer);
    print_problems(result.error_count, result.warning_count, writer);
}

/// Print unknown calls in cargo-style format.
fn report_unknown_calls<W: Write>(calls: &[UnknownCall], severity: Severity, writer: &mut W) {
    if calls.is_empty() {
        return;
    }

    let mut sorted: Vec<&UnknownCall> = calls.iter().collect();
    sorted.sort_by(|a, b| a.context.location.cmp(&b.context.location));

    let max_line_width = sorted
        .iter()
        .map(|call| call.context.line())
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for call in sorted {
        print_unknown_call(call, severity, writer, max_line_width);
    }
}

fn print_unknown_call<W: Write>(
    call: &UnknownCall,
    severity: Severity,
    writer: &mut W,
    max_line_width: usize,
) {
    let ctx = &call.context;
    let (severity_str, caret) = match severity {
        Severity::Error => ("error".bold().red(), "^".red()),
        Severity::Warning => ("warning".bold().yellow(), "^".yellow()),
    };

    let _ = writeln!(
        writer,
        "{}: unknown translation key \"{}\"",
        severity_str, call.signature
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        ctx.file_path(),
        ctx.line(),
        ctx.col()
    );

    if !ctx.source_line.is_empty() {
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            ctx.line().to_string().blue(),
            "|".blue(),
            ctx.source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = ctx
            .source_line
            .chars()
            .take(ctx.col().saturating_sub(1))
            .collect();
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret,
            width = max_line_width,
            padding = UnicodeWidthStr::width(prefix.as_str())
        );
    }

    let _ = writeln!(
        writer,
        "{:>width$} {} {} list the keys it can produce under 'unknownKeys' in {}",
        "",
        "=".blue(),
        "hint:".bold().cyan(),
        CONFIG_FILE_NAME,
        width = max_line_width
    );
    let _ = writeln!(writer);
}

fn print_parse_errors<W: Write>(errors: &[ParseError], verbose: bool, writer: &mut W) {
    if errors.is_empty() {
        return;
    }

    if verbose {
        for error in errors {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "warning:".bold().yellow(),
                error.file_path,
                error.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            errors.len(),
            "-v".cyan()
        );
    }
}

fn print_extract_summary<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} source {} into {} {}",
            summary.key_count,
            plural(summary.key_count, "key", "keys"),
            summary.source_files,
            plural(summary.source_files, "file", "files"),
            summary.locales.len(),
            plural(summary.locales.len(), "locale", "locales"),
        )
        .green()
    );

    for locale in &summary.locales {
        if locale == &summary.base_lang {
            continue;
        }
        let count = summary
            .untranslated_counts
            .get(locale)
            .copied()
            .unwrap_or(0);
        if count > 0 {
            let _ = writeln!(writer, "  - {}: {} untranslated", locale.bold(), count);
        }
    }

    match &summary.flush {
        Flush::Written(written) => {
            let _ = writeln!(
                writer,
                "{} {} file(s) to {}",
                "Wrote".green().bold(),
                written.locale_files.len() + usize::from(written.report_file.is_some()),
                summary.out_dir.display()
            );
        }
        Flush::Skipped => {
            let _ = writeln!(
                writer,
                "{} nothing written to {}",
                "Dry run:".yellow().bold(),
                summary.out_dir.display()
            );
        }
        Flush::Clean => {
            let _ = writeln!(writer, "No changes to write.");
        }
    }
}

fn print_problems<W: Write>(errors: usize, warnings: usize, writer: &mut W) {
    let total = errors + warnings;
    if total == 0 {
        return;
    }

    let _ = writeln!(
        writer,
        "\n{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        total,
        errors,
        plural(errors, "error", "errors").red(),
        warnings,
        plural(warnings, "warning", "warnings").yellow()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
