use anyhow::Result;

use super::{CommandKind, CommandResult, CommandSummary, ExtractSummary};
use crate::cli::args::ExtractCommand;
use crate::core::{ExtractContext, ExtractionSession};

/// Run one extraction unit over all scanned source files.
///
/// Files are parsed in parallel, then registered one by one in path order so
/// the merged output does not depend on scheduling.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ExtractContext::new(args)?;
    let options = ctx.options();
    let out_dir = options.out_dir.clone();

    let mut session = ExtractionSession::new(options);
    session.program_enter()?;

    let mut parse_errors = Vec::new();
    for file in ctx.collect_calls() {
        match file.calls {
            Ok(calls) => {
                for call in &calls {
                    session.register(call)?;
                }
            }
            Err(error) => parse_errors.push(error),
        }
    }

    let flush = session.program_exit()?;

    let locales = session
        .catalog()
        .map(|catalog| catalog.inputs().names().map(String::from).collect())
        .unwrap_or_default();

    let unknown_calls: Vec<_> = session
        .unknown_calls()
        .iter()
        .filter(|call| !call.expanded)
        .cloned()
        .collect();

    let (error_count, warning_count) = if args.strict {
        (unknown_calls.len(), parse_errors.len())
    } else {
        (0, unknown_calls.len() + parse_errors.len())
    };

    Ok(CommandResult {
        kind: CommandKind::Extract,
        summary: CommandSummary::Extract(ExtractSummary {
            source_files: ctx.files.len(),
            locales,
            base_lang: ctx.config.base_lang.clone(),
            key_count: session.keys().len(),
            unknown_calls,
            untranslated_counts: session.untranslated_counts().clone(),
            parse_errors,
            out_dir,
            flush,
            strict: args.strict,
            silent: ctx.config.silent,
        }),
        error_count,
        warning_count,
        exit_on_errors: true,
    })
}
