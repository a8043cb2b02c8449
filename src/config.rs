use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".gleanrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// Sub-directory of `localesPath` used when `localesOutPath` is not set.
pub const DEFAULT_OUT_DIR_NAME: &str = "parsed";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the existing `<locale>.json` files.
    #[serde(default = "default_locales_path")]
    pub locales_path: String,
    /// Destination of the merged files. Defaults to `<localesPath>/parsed`.
    #[serde(
        default,
        alias = "localeOutPath",
        skip_serializing_if = "Option::is_none"
    )]
    pub locales_out_path: Option<String>,
    /// Callee names treated as translation calls.
    #[serde(default = "default_fn_names")]
    pub fn_names: Vec<String>,
    /// Locale used as fallback for missing translations.
    #[serde(default = "default_base_lang")]
    pub base_lang: String,
    /// Known expansions of non-literal call sites: call text -> keys.
    #[serde(default)]
    pub unknown_keys: BTreeMap<String, Vec<String>>,
    /// Suppress per-call warnings and informational output.
    #[serde(default = "default_silent")]
    pub silent: bool,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_locales_path() -> String {
    "./locales".to_string()
}

fn default_fn_names() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_base_lang() -> String {
    "en".to_string()
}

fn default_silent() -> bool {
    true
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_path: default_locales_path(),
            locales_out_path: None,
            fn_names: default_fn_names(),
            base_lang: default_base_lang(),
            unknown_keys: BTreeMap::new(),
            silent: default_silent(),
            includes: Vec::new(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, an empty `fnNames` list or
    /// an empty `baseLang`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths,
        // so [locale] (Next.js dynamic route) is valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.fn_names.iter().all(|name| name.trim().is_empty()) {
            bail!("'fnNames' must contain at least one function name");
        }

        if self.base_lang.trim().is_empty() {
            bail!("'baseLang' must not be empty");
        }

        Ok(())
    }

    /// Locales directory, resolved against `root`.
    pub fn locales_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.locales_path)
    }

    /// Output directory, resolved against `root`.
    pub fn out_dir(&self, root: &Path) -> PathBuf {
        match &self.locales_out_path {
            Some(out) => root.join(out),
            None => self.locales_dir(root).join(DEFAULT_OUT_DIR_NAME),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
