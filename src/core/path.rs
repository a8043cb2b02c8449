//! Dotted-path access into nested locale mappings.
//!
//! Keys such as `home.title` or `faq.items[0].question` address a leaf inside a
//! nested JSON tree. Reads are total: any miss (absent member, index out of
//! range, access through a string) degrades to [`Lookup::NotFound`]. Writes
//! create missing intermediate containers on the way down.
//!
//! # Array heuristic
//!
//! When [`set`] has to create an intermediate container it looks at the *next*
//! segment: if that segment parses as a non-negative integer no larger than
//! `i32::MAX` the container becomes an array, otherwise an object. So `set(v, "list.0", ..)` produces
//! `{"list": [..]}`. Keys with numeric segments therefore may not round-trip
//! into the object shape a reader would expect.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.\[\]]+").unwrap());

/// Result of resolving a key path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// The found value, only if it is truthy (see [`is_truthy`]).
    pub fn truthy(self) -> Option<&'a Value> {
        self.value().filter(|value| is_truthy(value))
    }

    pub fn is_found(self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Splits a key path into segments.
///
/// Both `.` and bracket notation separate segments:
/// `"a.b[0].c"` -> `["a", "b", "0", "c"]`. Empty segments are dropped.
pub fn segments(path: &str) -> Vec<&str> {
    SEGMENT_REGEX.find_iter(path).map(|m| m.as_str()).collect()
}

/// Largest segment treated as an array index. Bigger numbers are object keys.
pub const MAX_INDEX: usize = i32::MAX as usize;

/// Parses a segment as an array index.
pub fn parse_index(segment: &str) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|&i| i <= MAX_INDEX)
}

/// Whether a segment looks like an array index.
pub fn is_index(segment: &str) -> bool {
    parse_index(segment).is_some()
}

/// Truthiness of a locale value.
///
/// `null`, `false`, `0` and the empty string count as "no value", so an empty
/// translation falls through to the base language.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Resolves `path` against `container`.
///
/// A truthy top-level member whose name is the whole path wins over the
/// segmented lookup, so flat files like `{"home.title": "Home"}` still resolve.
pub fn get<'a>(container: &'a Value, path: &str) -> Lookup<'a> {
    if let Value::Object(map) = container
        && let Some(value) = map.get(path)
        && is_truthy(value)
    {
        return Lookup::Found(value);
    }

    let segments = segments(path);
    if segments.is_empty() {
        return Lookup::NotFound;
    }

    segments
        .into_iter()
        .try_fold(container, child)
        .map_or(Lookup::NotFound, Lookup::Found)
}

/// Like [`get`], returning `default` when nothing is found.
pub fn get_or<'a>(container: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    get(container, path).value().unwrap_or(default)
}

/// Assigns `value` at `path`, creating intermediate containers as needed.
///
/// Returns the top-level container. If the container is not an object or an
/// array, or the path cannot be materialized (a non-index segment addressing
/// an array), the container is returned without the assignment.
pub fn set<'a>(container: &'a mut Value, path: &str, value: Value) -> &'a mut Value {
    if is_compound(container) {
        let segments = segments(path);
        set_in(container, &segments, value);
    }
    container
}

fn set_in(root: &mut Value, segments: &[&str], value: Value) -> Option<()> {
    let (last, parents) = segments.split_last()?;

    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        let slot = slot_mut(current, segment)?;
        if !is_compound(slot) {
            *slot = if is_index(segments[i + 1]) {
                Value::Array(Vec::new())
            } else {
                Value::Object(Map::new())
            };
        }
        current = slot;
    }

    *slot_mut(current, last)? = value;
    Some(())
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Slot for `segment` inside `container`, inserted as `null` when absent.
/// Arrays are padded with `null` up to the requested index.
fn slot_mut<'a>(container: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match container {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = parse_index(segment)?;
            if index >= items.len() {
                items.resize(index.checked_add(1)?, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

fn is_compound(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
