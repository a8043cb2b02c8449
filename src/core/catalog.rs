//! In-memory merge of discovered keys into every locale.
//!
//! The [`Catalog`] holds the loaded input translations and the output mapping
//! being built for each locale. Discovering a key projects it into every
//! output, taking the locale's own translation if it has one, otherwise the
//! base language's value, otherwise the key text itself.
//!
//! Non-literal call sites are recorded under the reserved `__UNKNOWN` bucket,
//! keyed by their source text, unless a known expansion for that text exists.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::core::{
    UNKNOWN_BUCKET,
    locales::LocaleStore,
    path::{self, Lookup},
};

/// Effect of registering one literal key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Locales whose output received the key in this call.
    pub added: Vec<String>,
    /// Locales where the key was recorded as untranslated.
    pub untranslated: Vec<String>,
}

impl KeyOutcome {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
    }
}

/// Effect of registering a non-literal call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownOutcome {
    /// The signature had a known expansion; these keys were registered instead.
    Expanded(Vec<String>),
    /// The signature went into the unknown bucket. `inserted` is false when it
    /// was already there for every locale.
    Recorded { inserted: bool },
}

#[derive(Debug)]
pub struct Catalog {
    base_lang: String,
    inputs: LocaleStore,
    outputs: BTreeMap<String, Value>,
    untranslated: BTreeMap<String, Value>,
    expansions: BTreeMap<String, Vec<String>>,
    dirty: bool,
}

impl Catalog {
    pub fn new(
        inputs: LocaleStore,
        base_lang: impl Into<String>,
        expansions: BTreeMap<String, Vec<String>>,
    ) -> Self {
        let outputs = inputs
            .names()
            .map(|name| (name.to_string(), Value::Object(Map::new())))
            .collect();

        Self {
            base_lang: base_lang.into(),
            inputs,
            outputs,
            untranslated: BTreeMap::new(),
            expansions,
            dirty: false,
        }
    }

    pub fn base_lang(&self) -> &str {
        &self.base_lang
    }

    pub fn inputs(&self) -> &LocaleStore {
        &self.inputs
    }

    /// Merged output mapping per locale.
    pub fn outputs(&self) -> &BTreeMap<String, Value> {
        &self.outputs
    }

    /// Keys per locale that were filled without a translation of their own.
    pub fn untranslated(&self) -> &BTreeMap<String, Value> {
        &self.untranslated
    }

    pub fn expansions(&self) -> &BTreeMap<String, Vec<String>> {
        &self.expansions
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Registers a literal key in every locale.
    ///
    /// A locale that already has a truthy value at `key` is left alone, so
    /// registering the same key again is a no-op.
    pub fn add_key(&mut self, key: &str) -> KeyOutcome {
        let mut outcome = KeyOutcome::default();

        let segments = path::segments(key);
        if segments.is_empty() || segments[0] == UNKNOWN_BUCKET {
            return outcome;
        }

        let base_value = self
            .inputs
            .get(&self.base_lang)
            .and_then(|base| path::get(base, key).truthy())
            .cloned();

        for name in self.inputs.names() {
            let output = self
                .outputs
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            if path::get(output, key).truthy().is_some() {
                continue;
            }

            let own_value = self
                .inputs
                .get(name)
                .map_or(Lookup::NotFound, |input| path::get(input, key))
                .truthy()
                .cloned();
            let translated = own_value.is_some();

            let value = own_value
                .or_else(|| base_value.clone())
                .unwrap_or_else(|| Value::String(key.to_string()));

            if name != self.base_lang && (!translated || Some(&value) == base_value.as_ref()) {
                let report = self
                    .untranslated
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                path::set(report, key, value.clone());
                outcome.untranslated.push(name.to_string());
            }

            path::set(output, key, value);
            outcome.added.push(name.to_string());
            self.dirty = true;
        }

        outcome
    }

    /// Registers the source text of a call whose key is not a string literal.
    pub fn add_unknown(&mut self, signature: &str) -> UnknownOutcome {
        if let Some(keys) = self.expansions.get(signature).cloned() {
            for key in &keys {
                self.add_key(key);
            }
            return UnknownOutcome::Expanded(keys);
        }

        let mut inserted = false;
        for name in self.inputs.names() {
            let output = self
                .outputs
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            if insert_unknown(output, signature) {
                inserted = true;
            }
        }

        if inserted {
            self.dirty = true;
        }
        UnknownOutcome::Recorded { inserted }
    }
}

/// Adds `signature -> signature` to the bucket of one locale output.
///
/// The bucket is kept as the first member of the output object.
fn insert_unknown(output: &mut Value, signature: &str) -> bool {
    let Value::Object(map) = output else {
        return false;
    };

    if !matches!(map.get(UNKNOWN_BUCKET), Some(Value::Object(_))) {
        let rest = std::mem::take(map);
        map.insert(UNKNOWN_BUCKET.to_string(), Value::Object(Map::new()));
        map.extend(rest.into_iter().filter(|(k, _)| k != UNKNOWN_BUCKET));
    }

    let Some(Value::Object(bucket)) = map.get_mut(UNKNOWN_BUCKET) else {
        return false;
    };

    if bucket.contains_key(signature) {
        return false;
    }
    bucket.insert(signature.to_string(), Value::String(signature.to_string()));
    true
}
