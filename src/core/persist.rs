//! Writing merged locale mappings back to disk.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;

/// File name of the untranslated-keys report.
pub const UNTRANSLATED_FILE_NAME: &str = "_untranslated.json";

/// Files produced by one flush.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub locale_files: Vec<PathBuf>,
    pub report_file: Option<PathBuf>,
}

/// Write one `<locale>.json` per output mapping, plus `_untranslated.json`
/// when the report is non-empty.
///
/// The output directory is created with all missing parents. Any failure is
/// returned to the caller; nothing is retried.
pub fn write_locales(
    out_dir: &Path,
    outputs: &BTreeMap<String, Value>,
    untranslated: &BTreeMap<String, Value>,
) -> Result<WrittenFiles> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let mut written = WrittenFiles::default();

    for (locale, mapping) in outputs {
        let path = out_dir.join(format!("{}.json", locale));
        write_json(&path, mapping)?;
        written.locale_files.push(path);
    }

    if !untranslated.is_empty() {
        let path = out_dir.join(UNTRANSLATED_FILE_NAME);
        write_json(&path, untranslated)?;
        written.report_file = Some(path);
    }

    Ok(written)
}

/// Save a value with 2-space indentation and a trailing newline.
pub fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
