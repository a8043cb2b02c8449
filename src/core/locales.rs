//! Loading of the existing locale files.
//!
//! Every `*.json` file directly inside the locales directory is one locale,
//! named after its file stem (`en.json` -> `en`, `zh-CN.json` -> `zh-CN`).
//! Unlike source files, a locale file that cannot be read or parsed is fatal:
//! merging against a half-loaded store would silently drop translations.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::core::UNKNOWN_BUCKET;

/// Input translations of all locales, keyed by locale name.
#[derive(Debug, Default, Clone)]
pub struct LocaleStore {
    locales: BTreeMap<String, Value>,
    files: Vec<PathBuf>,
}

impl LocaleStore {
    /// Load every locale file in `dir` (non-recursive).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.exists() {
            bail!(
                "Locales directory '{}' does not exist.\n\
                 Hint: Check your .gleanrc.json 'localesPath' setting.",
                dir.display()
            );
        }

        if !dir.is_dir() {
            bail!("'{}' is not a directory.", dir.display());
        }

        let mut store = Self::default();
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read locales directory: {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();

            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(locale) = extract_locale(&path)
            {
                let value = parse_locale_file(&path)?;
                store.locales.insert(locale, value);
                store.files.push(path);
            }
        }

        store.files.sort();
        Ok(store)
    }

    /// Build a store from in-memory values. Used by tests and library callers.
    pub fn from_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            locales: locales
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            files: Vec::new(),
        }
    }

    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.locales.get(locale)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locale names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Files the store was loaded from.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Signatures that a human resolved by hand in an input file.
    ///
    /// An `__UNKNOWN` entry whose value was replaced by an array of keys, e.g.
    /// `"t(`nav.${id}`)": ["nav.home", "nav.about"]`, is a known expansion.
    pub fn resolved_unknowns(&self) -> BTreeMap<String, Vec<String>> {
        let mut resolved = BTreeMap::new();

        for value in self.locales.values() {
            let Some(Value::Object(bucket)) = value.get(UNKNOWN_BUCKET) else {
                continue;
            };
            for (signature, keys) in bucket {
                if let Value::Array(keys) = keys {
                    let keys: Vec<String> = keys
                        .iter()
                        .filter_map(|k| k.as_str())
                        .filter(|k| !k.is_empty())
                        .map(String::from)
                        .collect();
                    if !keys.is_empty() {
                        resolved.entry(signature.clone()).or_insert(keys);
                    }
                }
            }
        }

        resolved
    }
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "/path/to/locales/zh-CN.json" -> Some("zh-CN")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn parse_locale_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale file: {}", path.display()))
}
