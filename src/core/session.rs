//! Extraction session: the state of one compilation unit.
//!
//! The session is driven like a compiler plugin:
//!
//! 1. [`ExtractionSession::program_enter`] (optional) loads the locale files.
//! 2. [`ExtractionSession::call_expression`] or [`ExtractionSession::register`]
//!    is invoked for each translation call. The first one loads the locales if
//!    `program_enter` was not called.
//! 3. [`ExtractionSession::program_exit`] flushes the merged files once, and
//!    only if something changed.
//!
//! ```text
//! Uninitialized -> Loaded -> Accumulating -> Flushed
//! ```
//!
//! A flushed session rejects further calls.
//!
//! Non-literal calls are collected in [`ExtractionSession::unknown_calls`];
//! the caller decides how to report them (the CLI prints one cargo-style
//! warning per call unless `silent` is set).

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use swc_common::SourceMap;
use swc_ecma_ast::{CallExpr, Module};

use crate::{
    config::Config,
    core::{
        catalog::{Catalog, UnknownOutcome},
        extract::{CallCollector, CallKey, CallSite, call_context, classify_call},
        locales::LocaleStore,
        persist::{WrittenFiles, write_locales},
        source::SourceContext,
    },
};

/// Options of one extraction run, with paths already resolved.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub locales_dir: PathBuf,
    pub out_dir: PathBuf,
    pub fn_names: Vec<String>,
    pub base_lang: String,
    pub unknown_keys: BTreeMap<String, Vec<String>>,
    pub silent: bool,
    /// Merge and report, but never write.
    pub dry_run: bool,
}

impl ExtractOptions {
    pub fn from_config(config: &Config, root: &std::path::Path) -> Self {
        Self {
            locales_dir: config.locales_dir(root),
            out_dir: config.out_dir(root),
            fn_names: config.fn_names.clone(),
            base_lang: config.base_lang.clone(),
            unknown_keys: config.unknown_keys.clone(),
            silent: config.silent,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loaded,
    Accumulating,
    Flushed,
}

/// A translation call whose key could not be read statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCall {
    pub context: SourceContext,
    pub signature: String,
    /// True when a known expansion replaced the call with literal keys.
    pub expanded: bool,
}

/// Outcome of [`ExtractionSession::program_exit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flush {
    /// Nothing changed since the last flush.
    Clean,
    /// Changes were merged but not written (dry run).
    Skipped,
    Written(WrittenFiles),
}

pub struct ExtractionSession {
    options: ExtractOptions,
    phase: Phase,
    catalog: Option<Catalog>,
    keys: BTreeSet<String>,
    untranslated_counts: BTreeMap<String, usize>,
    unknown_calls: Vec<UnknownCall>,
}

impl ExtractionSession {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            phase: Phase::Uninitialized,
            catalog: None,
            keys: BTreeSet::new(),
            untranslated_counts: BTreeMap::new(),
            unknown_calls: Vec::new(),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Distinct literal keys registered so far.
    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    /// Number of keys recorded as untranslated, per locale.
    pub fn untranslated_counts(&self) -> &BTreeMap<String, usize> {
        &self.untranslated_counts
    }

    pub fn unknown_calls(&self) -> &[UnknownCall] {
        &self.unknown_calls
    }

    /// Start of the unit: load the locales.
    pub fn program_enter(&mut self) -> Result<()> {
        self.ensure_loaded()
    }

    /// Handle one call expression of `file_path`.
    pub fn call_expression(
        &mut self,
        file_path: &str,
        source_map: &SourceMap,
        node: &CallExpr,
    ) -> Result<()> {
        let Some(key) = classify_call(node, &self.options.fn_names, source_map) else {
            return Ok(());
        };

        self.register(&CallSite {
            context: call_context(node, file_path, source_map),
            key,
        })
    }

    /// Handle every call expression of a parsed module, in source order.
    pub fn visit_module(
        &mut self,
        file_path: &str,
        source_map: &SourceMap,
        module: &Module,
    ) -> Result<()> {
        let calls = CallCollector::new(file_path, source_map, &self.options.fn_names).collect(module);
        for call in &calls {
            self.register(call)?;
        }
        Ok(())
    }

    /// Register an already classified call.
    pub fn register(&mut self, call: &CallSite) -> Result<()> {
        self.ensure_loaded()?;
        let catalog = self.catalog.as_mut().context("Locale catalog is not loaded")?;

        match &call.key {
            CallKey::Literal(key) => {
                let outcome = catalog.add_key(key);
                for locale in outcome.untranslated {
                    *self.untranslated_counts.entry(locale).or_default() += 1;
                }
                self.keys.insert(key.clone());
            }
            CallKey::Unknown { signature } => {
                let expanded = match catalog.add_unknown(signature) {
                    UnknownOutcome::Expanded(keys) => {
                        self.keys.extend(keys);
                        true
                    }
                    UnknownOutcome::Recorded { .. } => false,
                };
                self.unknown_calls.push(UnknownCall {
                    context: call.context.clone(),
                    signature: signature.clone(),
                    expanded,
                });
            }
        }

        self.phase = Phase::Accumulating;
        Ok(())
    }

    /// End of the unit: write the merged files if anything changed.
    pub fn program_exit(&mut self) -> Result<Flush> {
        if self.phase == Phase::Flushed {
            bail!("Extraction session was already flushed");
        }
        self.phase = Phase::Flushed;

        let Some(catalog) = self.catalog.as_mut() else {
            return Ok(Flush::Clean);
        };
        if !catalog.is_dirty() {
            return Ok(Flush::Clean);
        }
        if self.options.dry_run {
            return Ok(Flush::Skipped);
        }

        let written = write_locales(
            &self.options.out_dir,
            catalog.outputs(),
            catalog.untranslated(),
        )?;
        catalog.mark_clean();

        if !self.options.silent {
            eprintln!(
                "{} write lang strings to {}",
                "info:".bold().green(),
                self.options.out_dir.display()
            );
        }

        Ok(Flush::Written(written))
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        if self.phase == Phase::Flushed {
            bail!("Extraction session was already flushed");
        }

        if self.catalog.is_none() {
            let catalog = self.load_catalog()?;
            self.catalog = Some(catalog);
            self.phase = Phase::Loaded;
        }
        Ok(())
    }

    fn load_catalog(&self) -> Result<Catalog> {
        let store = LocaleStore::load(&self.options.locales_dir)?;

        if !self.options.silent && !store.contains(&self.options.base_lang) {
            eprintln!(
                "{} base language '{}' has no locale file in {}",
                "warning:".bold().yellow(),
                self.options.base_lang,
                self.options.locales_dir.display()
            );
        }

        let mut expansions = store.resolved_unknowns();
        expansions.extend(self.options.unknown_keys.clone());

        Ok(Catalog::new(store, self.options.base_lang.clone(), expansions))
    }
}
