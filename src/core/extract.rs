//! Translation call extraction.
//!
//! Walks a parsed module and classifies every call whose callee is one of the
//! configured translation function names (`t` by default):
//!
//! ```ignore
//! t("home.title")          // CallKey::Literal("home.title")
//! t(key)                   // CallKey::Unknown { signature: "t(key)" }
//! t(`nav.${page}`)         // CallKey::Unknown { signature: "t(`nav.${page}`)" }
//! i18n.t("x")              // ignored, callee is not a plain identifier
//! ```
//!
//! Calls nested in arguments (`t(t("inner"))`) are visited too.

use swc_common::{SourceMap, SourceMapper, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Expr, Lit, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::source::{SourceContext, SourceLocation};

/// What a translation call passes as its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKey {
    /// Non-empty string literal.
    Literal(String),
    /// Anything else. `signature` is the call's source text with whitespace
    /// runs collapsed, used as the key in the unknown bucket.
    Unknown { signature: String },
}

/// A translation call found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub context: SourceContext,
    pub key: CallKey,
}

/// Classifies a call expression.
///
/// Returns `None` when the callee is not a configured translation function or
/// the call has no arguments.
pub fn classify_call(node: &CallExpr, fn_names: &[String], source_map: &SourceMap) -> Option<CallKey> {
    let Callee::Expr(callee) = &node.callee else {
        return None;
    };
    let Expr::Ident(ident) = &**callee else {
        return None;
    };

    let name = ident.sym.as_str();
    if !fn_names.iter().any(|n| n == name) {
        return None;
    }

    let arg = node.args.first()?;

    if arg.spread.is_none()
        && let Expr::Lit(Lit::Str(s)) = &*arg.expr
        && let Some(value) = s.value.as_str()
        && !value.is_empty()
    {
        return Some(CallKey::Literal(value.to_string()));
    }

    let signature = source_map
        .span_to_snippet(node.span())
        .map(|text| collapse_whitespace(&text))
        .unwrap_or_else(|_| format!("{}(...)", name));

    Some(CallKey::Unknown { signature })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds the reporting context for a call.
pub fn call_context(node: &CallExpr, file_path: &str, source_map: &SourceMap) -> SourceContext {
    let loc = source_map.lookup_char_pos(node.span.lo);
    let source_line = loc
        .file
        .get_line(loc.line - 1)
        .map(|cow| cow.to_string())
        .unwrap_or_default();

    SourceContext::new(
        SourceLocation::new(file_path, loc.line, loc.col_display + 1),
        source_line,
    )
}

/// Visitor collecting all translation calls of one module.
pub struct CallCollector<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    fn_names: &'a [String],
    calls: Vec<CallSite>,
}

impl<'a> CallCollector<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, fn_names: &'a [String]) -> Self {
        Self {
            file_path,
            source_map,
            fn_names,
            calls: Vec::new(),
        }
    }

    /// Walk `module` and return its translation calls in source order.
    pub fn collect(mut self, module: &Module) -> Vec<CallSite> {
        module.visit_with(&mut self);
        self.calls
    }
}

impl Visit for CallCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(key) = classify_call(node, self.fn_names, self.source_map) {
            self.calls.push(CallSite {
                context: call_context(node, self.file_path, self.source_map),
                key,
            });
        }
        node.visit_children_with(self);
    }
}
