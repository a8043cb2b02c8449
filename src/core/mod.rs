//! Extraction engine.
//!
//! ## Module Structure
//!
//! - `path`: dotted-path get/set on nested JSON values
//! - `locales`: loading of the existing locale files
//! - `catalog`: merge of discovered keys into every locale, unknown-call bucket
//! - `extract`: swc visitor classifying translation calls
//! - `session`: per-unit lifecycle (lazy load, registration, flush)
//! - `persist`: writing merged files and the untranslated report
//! - `context`: configuration merge, file scanning and parallel parsing
//! - `file_scanner`, `parsers`: source discovery and parsing

pub mod catalog;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod locales;
pub mod parsers;
pub mod path;
pub mod persist;
pub mod session;
pub mod source;

/// Reserved top-level key holding non-literal call sites in every locale.
pub const UNKNOWN_BUCKET: &str = "__UNKNOWN";

pub use catalog::{Catalog, KeyOutcome, UnknownOutcome};
pub use context::{ExtractContext, FileCalls, ParseError};
pub use extract::{CallCollector, CallKey, CallSite};
pub use locales::LocaleStore;
pub use path::Lookup;
pub use persist::{UNTRANSLATED_FILE_NAME, WrittenFiles, write_locales};
pub use session::{ExtractOptions, ExtractionSession, Flush, Phase, UnknownCall};
pub use source::{SourceContext, SourceLocation};
