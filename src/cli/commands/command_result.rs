use std::{collections::BTreeMap, path::PathBuf};

use crate::core::{Flush, ParseError, UnknownCall};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Extract,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub source_files: usize,
    /// Locale names found in the locales directory.
    pub locales: Vec<String>,
    pub base_lang: String,
    /// Distinct literal keys found (including expanded unknown calls).
    pub key_count: usize,
    /// Non-literal calls without a known expansion.
    pub unknown_calls: Vec<UnknownCall>,
    pub untranslated_counts: BTreeMap<String, usize>,
    pub parse_errors: Vec<ParseError>,
    pub out_dir: PathBuf,
    pub flush: Flush,
    /// Unknown calls are reported as errors instead of warnings.
    pub strict: bool,
    /// Per-call warnings are suppressed; only counts are shown.
    pub silent: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running glean commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}
