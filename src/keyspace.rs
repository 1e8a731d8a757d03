//! Namespace arithmetic: translating logical keys into backend-qualified keys.
//!
//! A [`Keyspace`] is the pure, stateless half of a view: given a prefix and a
//! delimiter it rewrites logical keys, range bounds, and child segments into
//! the flat key space of the backend. It never touches a backend itself.

/// Delimiter used by root keyspaces unless overridden.
pub const DEFAULT_DELIMITER: &[u8] = b"!";

/// A namespace inside the backend's flat key space.
///
/// The backend key for a logical key `k` is `prefix + delimiter + k` when the
/// prefix is non-empty, and `k` unchanged at the root. Child keyspaces
/// accumulate: deriving with segment `s` produces prefix `p + d + s` (or `s`
/// at the root) and inherits the delimiter.
///
/// No escaping or validation is performed on logical keys. A logical key that
/// itself contains the delimiter produces a backend key indistinguishable
/// from a deeper sub-namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    prefix: Vec<u8>,
    delimiter: Vec<u8>,
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::root()
    }
}

impl Keyspace {
    /// The root namespace: empty prefix, [`DEFAULT_DELIMITER`].
    pub fn root() -> Self {
        Self {
            prefix: Vec::new(),
            delimiter: DEFAULT_DELIMITER.to_vec(),
        }
    }

    pub fn new(prefix: impl Into<Vec<u8>>, delimiter: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: delimiter.into(),
        }
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Replace the delimiter, keeping the prefix.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Backend key for a logical key in this namespace.
    ///
    /// The empty logical key is valid and maps to exactly `prefix +
    /// delimiter`, the namespace's own root record.
    pub fn subkey(&self, key: &[u8]) -> Vec<u8> {
        if self.prefix.is_empty() {
            return key.to_vec();
        }
        let mut out = Vec::with_capacity(self.prefix.len() + self.delimiter.len() + key.len());
        out.extend_from_slice(&self.prefix);
        out.extend_from_slice(&self.delimiter);
        out.extend_from_slice(key);
        out
    }

    /// Backend form of an optional range endpoint.
    ///
    /// `None` stays `None`: an open endpoint must reach the backend untouched
    /// so it is interpreted as "no bound".
    pub fn subkey_bound(&self, bound: Option<&[u8]>) -> Option<Vec<u8>> {
        bound.map(|key| self.subkey(key))
    }

    /// Namespace for a child segment, delimiter inherited.
    pub fn child(&self, segment: &[u8]) -> Keyspace {
        Keyspace {
            prefix: self.subkey(segment),
            delimiter: self.delimiter.clone(),
        }
    }

    /// Half-open backend range covering exactly this namespace.
    ///
    /// The root namespace is unbounded on both sides. An upper bound of
    /// `None` on a non-root namespace means the scope runs to the end of the
    /// key space (the scope start is all `0xff` bytes).
    pub fn scope_bounds(&self) -> (Option<Vec<u8>>, Option<Vec<u8>>) {
        if self.prefix.is_empty() {
            return (None, None);
        }
        let lower = self.subkey(b"");
        let upper = lexicographic_successor(&lower);
        (Some(lower), upper)
    }

    /// Recover the logical key from a backend key inside this namespace.
    ///
    /// Returns `None` if the backend key does not carry this namespace's
    /// `prefix + delimiter`.
    pub fn strip<'a>(&self, backend_key: &'a [u8]) -> Option<&'a [u8]> {
        if self.prefix.is_empty() {
            return Some(backend_key);
        }
        let scope = self.subkey(b"");
        backend_key.strip_prefix(scope.as_slice())
    }
}

/// Smallest byte string greater than every string that starts with `key`.
///
/// `None` when `key` is empty or all `0xff`: no finite upper bound exists.
fn lexicographic_successor(key: &[u8]) -> Option<Vec<u8>> {
    let mut out = key.to_vec();
    while let Some(last) = out.pop() {
        if last < 0xff {
            out.push(last + 1);
            return Some(out);
        }
    }
    None
}
