use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Parse JS/JSX/TS/TSX source code string into an AST.
///
/// Everything goes through the TypeScript parser. JSX is enabled for every
/// extension except plain `.ts`/`.mts`/`.cts`, where it would clash with
/// `<Type>value` assertions.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJSX> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: enables_jsx(file_path),
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        Ok(ParsedJSX { module, source_map })
    })
}

fn enables_jsx(file_path: &str) -> bool {
    !matches!(
        Path::new(file_path).extension().and_then(|e| e.to_str()),
        Some("ts" | "mts" | "cts")
    )
}
