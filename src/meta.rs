//! Context-scoped log metadata.
//!
//! [`Meta`] is a flat string-to-string mapping of descriptive tags, the kind
//! of thing a call chain knows early and a log call needs late: a user id, a
//! request id, a job name. [`Context::with_meta`] accumulates tags as the
//! chain descends; [`Context::decorate`] folds whatever has accumulated into
//! the fields of a log entry at the leaf.
//!
//! Merging is copy-on-write. Attaching over inherited metadata clones the
//! inherited mapping and extends the clone on a freshly derived context, so
//! ancestors and siblings keep observing exactly the mapping they had.
//! Within one chain the behavior is plain last-write-wins per key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Context;
use crate::fields::Field;

/// Name of the field that [`Context::decorate`] appends to a log entry.
pub const CONTEXT_FIELD: &str = "context";

/// The private context slot metadata rides in. The type is unexported, so
/// no consumer of [`Context`] can read or shadow it.
#[derive(Debug, Clone)]
struct MetaSlot(Meta);

/// A flat string-to-string mapping of log tags.
///
/// Keys are unique; inserting a key that is already present replaces the
/// prior value. Iteration order is unspecified, and the serialized member
/// order is likewise unspecified; consumers must treat the rendered object
/// as a set of members.
///
/// ```
/// use ctxmeta::Meta;
///
/// let meta = Meta::from([("user_id", "u-1001"), ("request_id", "req-42")]);
/// assert_eq!(meta.get("user_id"), Some("u-1001"));
/// assert_eq!(meta.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(HashMap<String, String>);

impl Meta {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts a tag, returning the value it replaced, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up a tag by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of tags in the mapping.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the tags in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the mapping as a JSON object with one string member per tag.
    pub fn to_value(&self) -> Value {
        let mut members = serde_json::Map::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            members.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(members)
    }
}

impl<K, V> FromIterator<(K, V)> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Meta {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::collections::hash_map::Iter<'a, String, String>,
        fn((&'a String, &'a String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> Extend<(K, V)> for Meta
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl Context {
    /// Derives a context carrying `data` merged over any inherited metadata.
    ///
    /// Tags already visible from this context survive unless `data` names
    /// the same key, in which case the new value wins. The inherited mapping
    /// itself is never mutated; the merge lands on the returned context
    /// only. Attaching an empty mapping returns a context equivalent to the
    /// input and introduces no metadata.
    ///
    /// Wrap contexts as often as the call tree wants:
    ///
    /// ```
    /// use ctxmeta::{Context, Meta};
    ///
    /// let ctx = Context::new();
    /// let ctx = ctx.with_meta(Meta::from([("user_id", "u-1001")]));
    /// let ctx = ctx.with_meta(Meta::from([("deal_id", "xyz")]));
    ///
    /// let meta = ctx.meta().unwrap();
    /// assert_eq!(meta.get("user_id"), Some("u-1001"));
    /// assert_eq!(meta.get("deal_id"), Some("xyz"));
    /// ```
    #[must_use]
    pub fn with_meta(&self, data: Meta) -> Self {
        if data.is_empty() {
            return self.clone();
        }
        match self.get::<MetaSlot>() {
            Some(slot) => {
                let mut merged = slot.0.clone();
                merged.0.extend(data.0);
                self.with_value(MetaSlot(merged))
            }
            None => self.with_value(MetaSlot(data)),
        }
    }

    /// The metadata visible from this context, if any was ever attached on
    /// the path back to the root. A context that never saw an attachment
    /// yields `None`, not an empty mapping.
    pub fn meta(&self) -> Option<&Meta> {
        self.get::<MetaSlot>().map(|slot| &slot.0)
    }

    /// Appends the accumulated metadata to a list of log fields.
    ///
    /// If no metadata is visible from this context, the input comes back
    /// unchanged. Otherwise exactly one trailing field named
    /// [`CONTEXT_FIELD`] is appended, carrying the mapping as a JSON object
    /// with string members. Caller fields keep their order either way.
    #[must_use]
    pub fn decorate(&self, fields: Vec<Field>) -> Vec<Field> {
        match self.meta() {
            Some(meta) => {
                let mut decorated = fields;
                decorated.push(Field::new(CONTEXT_FIELD, meta.to_value()));
                decorated
            }
            None => fields,
        }
    }
}
