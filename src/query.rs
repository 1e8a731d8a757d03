//! Read-request shapes and their result containers.
//!
//! A view accepts three request shapes: a single key, a bounded [`Slice`] of
//! the key space, or an explicit [`KeyList`] collection. Collection requests
//! preserve their kind: an ordered sequence of keys produces an ordered
//! sequence of values, a set produces an unordered, key-addressed result.

use std::collections::{HashMap, HashSet};

use derive_more::From;

use crate::encoding::Value;

/// A contiguous, half-open region of the logical key space.
///
/// Both bounds are optional; an open bound reaches the backend untouched and
/// means "no bound". The `step` field exists so slice-shaped requests can be
/// represented losslessly, but stepped reads are rejected: the key-space
/// model has no notion of stride.
///
/// # Example
///
/// ```
/// use sublevel_store::query::Slice;
///
/// let slice = Slice::new().start_at("a").stop_before("m");
/// assert_eq!(slice.start.as_deref(), Some(b"a".as_slice()));
/// assert_eq!(slice.stop.as_deref(), Some(b"m".as_slice()));
/// assert_eq!(slice.step, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slice {
    /// Inclusive lower bound.
    pub start: Option<Vec<u8>>,
    /// Exclusive upper bound.
    pub stop: Option<Vec<u8>>,
    /// Stride. Always rejected by reads; see [`crate::SublevelError::StepNotSupported`].
    pub step: Option<usize>,
}

impl Slice {
    /// The full, unbounded slice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive lower bound.
    ///
    /// # Example
    ///
    /// ```
    /// use sublevel_store::query::Slice;
    ///
    /// let slice = Slice::new().start_at("users");
    /// assert!(slice.start.is_some());
    /// ```
    pub fn start_at(mut self, start: impl Into<Vec<u8>>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the exclusive upper bound.
    ///
    /// # Example
    ///
    /// ```
    /// use sublevel_store::query::Slice;
    ///
    /// let slice = Slice::new().stop_before("users");
    /// assert!(slice.stop.is_some());
    /// ```
    pub fn stop_before(mut self, stop: impl Into<Vec<u8>>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    /// Set a stride.
    ///
    /// Reads fail fast on a stepped slice; the setter exists so callers
    /// porting slice semantics get a deterministic error instead of a
    /// silently ignored field.
    ///
    /// # Example
    ///
    /// ```
    /// use sublevel_store::query::Slice;
    ///
    /// let slice = Slice::new().with_step(2);
    /// assert_eq!(slice.step, Some(2));
    /// ```
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }
}

/// An explicit, finite collection of logical keys.
///
/// The variant records the requested output shape: `Seq` preserves order,
/// `Set` does not.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum KeyList {
    Seq(Vec<Vec<u8>>),
    Set(HashSet<Vec<u8>>),
}

impl KeyList {
    pub fn len(&self) -> usize {
        match self {
            KeyList::Seq(keys) => keys.len(),
            KeyList::Set(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One of the three request shapes a view accepts.
#[derive(Debug, Clone, PartialEq, From)]
pub enum ReadRequest {
    Key(Vec<u8>),
    Slice(Slice),
    Keys(KeyList),
}

impl From<&str> for ReadRequest {
    fn from(key: &str) -> Self {
        ReadRequest::Key(key.as_bytes().to_vec())
    }
}

impl From<&[u8]> for ReadRequest {
    fn from(key: &[u8]) -> Self {
        ReadRequest::Key(key.to_vec())
    }
}

impl From<Vec<Vec<u8>>> for ReadRequest {
    fn from(keys: Vec<Vec<u8>>) -> Self {
        ReadRequest::Keys(KeyList::Seq(keys))
    }
}

impl From<HashSet<Vec<u8>>> for ReadRequest {
    fn from(keys: HashSet<Vec<u8>>) -> Self {
        ReadRequest::Keys(KeyList::Set(keys))
    }
}

/// Result container of a collection read, mirroring the request's kind.
///
/// `Seq` holds values in request order. `Set` is unordered and addressed by
/// the requested logical key, since decoded values are not hashable for
/// every encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Entries {
    Seq(Vec<Value>),
    Set(HashMap<Vec<u8>, Value>),
}

impl Entries {
    pub fn len(&self) -> usize {
        match self {
            Entries::Seq(values) => values.len(),
            Entries::Set(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ordered values, if this was a sequence request.
    pub fn as_seq(&self) -> Option<&Vec<Value>> {
        match self {
            Entries::Seq(values) => Some(values),
            _ => None,
        }
    }

    /// The key-addressed values, if this was a set request.
    pub fn as_set(&self) -> Option<&HashMap<Vec<u8>, Value>> {
        match self {
            Entries::Set(values) => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_defaults_to_unbounded() {
        let slice = Slice::new();
        assert_eq!(slice.start, None);
        assert_eq!(slice.stop, None);
        assert_eq!(slice.step, None);
    }

    #[test]
    fn slice_builder_chains() {
        let slice = Slice::new().start_at("a").stop_before("z").with_step(3);
        assert_eq!(slice.start, Some(b"a".to_vec()));
        assert_eq!(slice.stop, Some(b"z".to_vec()));
        assert_eq!(slice.step, Some(3));
    }

    #[test]
    fn key_list_reports_cardinality() {
        let seq = KeyList::from(vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(seq.len(), 2);
        assert!(!seq.is_empty());

        let set: HashSet<Vec<u8>> = HashSet::new();
        assert!(KeyList::from(set).is_empty());
    }

    #[test]
    fn read_request_conversions() {
        assert!(matches!(ReadRequest::from("users"), ReadRequest::Key(_)));
        assert!(matches!(ReadRequest::from(Slice::new()), ReadRequest::Slice(_)));
        assert!(matches!(
            ReadRequest::from(vec![b"a".to_vec()]),
            ReadRequest::Keys(KeyList::Seq(_))
        ));
    }

    #[test]
    fn entries_accessors_match_variant() {
        let seq = Entries::Seq(vec![Value::Text("x".into())]);
        assert_eq!(seq.len(), 1);
        assert!(seq.as_seq().is_some());
        assert!(seq.as_set().is_none());
    }
}
