use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::ExtractArgs,
    config::{Config, load_config},
    core::{
        extract::{CallCollector, CallSite},
        file_scanner::scan_files,
        parsers::jsx::parse_jsx_source,
        session::ExtractOptions,
    },
};

/// A source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub file_path: String,
    pub error: String,
}

/// Translation calls of one source file, or why there are none.
pub struct FileCalls {
    pub file_path: String,
    pub calls: Result<Vec<CallSite>, ParseError>,
}

/// Everything an extraction run needs before the session starts.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--base-lang fr`)
/// 2. `.gleanrc.json` config file
/// 3. Built-in defaults
pub struct ExtractContext {
    pub config: Config,
    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,
    /// Source files to scan, sorted.
    pub files: BTreeSet<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

impl ExtractContext {
    pub fn new(args: &ExtractArgs) -> Result<Self> {
        let verbose = args.common.verbose;
        let root_dir = args
            .common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = load_config(&root_dir)?.config;

        if let Some(locales_path) = &args.common.locales_path {
            config.locales_path = locales_path.to_string_lossy().to_string();
        }
        if let Some(out) = &args.out {
            config.locales_out_path = Some(out.to_string_lossy().to_string());
        }
        if let Some(base_lang) = &args.base_lang {
            config.base_lang = base_lang.clone();
        }
        if !args.fn_names.is_empty() {
            config.fn_names = args.fn_names.clone();
        }
        if verbose {
            config.silent = false;
        }
        config.validate()?;

        let scan = scan_files(
            &root_dir,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        Ok(Self {
            config,
            root_dir,
            files: scan.files,
            verbose,
            dry_run: args.dry_run,
        })
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            dry_run: self.dry_run,
            ..ExtractOptions::from_config(&self.config, &self.root_dir)
        }
    }

    /// Parse every source file and collect its translation calls.
    ///
    /// Runs in parallel; the result is in file order.
    pub fn collect_calls(&self) -> Vec<FileCalls> {
        let source_map = Arc::new(SourceMap::default());
        let fn_names = &self.config.fn_names;

        let files: Vec<&String> = self.files.iter().collect();

        files
            .par_iter()
            .map(|file_path| FileCalls {
                file_path: file_path.to_string(),
                calls: collect_file_calls(file_path, fn_names, Arc::clone(&source_map)),
            })
            .collect()
    }
}

fn collect_file_calls(
    file_path: &str,
    fn_names: &[String],
    source_map: Arc<SourceMap>,
) -> Result<Vec<CallSite>, ParseError> {
    let to_error = |error: String| ParseError {
        file_path: file_path.to_string(),
        error,
    };

    let code = std::fs::read_to_string(Path::new(file_path))
        .map_err(|e| to_error(format!("Failed to read {}: {}", file_path, e)))?;
    let parsed = parse_jsx_source(code, file_path, source_map).map_err(|e| to_error(e.to_string()))?;

    Ok(CallCollector::new(file_path, &parsed.source_map, fn_names).collect(&parsed.module))
}
