//! Read-only views over one namespace of one backend.
//!
//! A [`View`] is an immutable triple of backend handle, [`Keyspace`], and
//! [`ValueEncoding`]. Every read translates logical keys through the
//! keyspace, delegates to the backend, and decodes the raw bytes. Deriving a
//! child view composes the key transform with a new path segment; parent and
//! child share nothing mutably beyond the backend handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::encoding::{Value, ValueEncoding};
use crate::error::{SublevelError, SublevelResult};
use crate::keyspace::Keyspace;
use crate::query::{Entries, KeyList, ReadRequest, Slice};
use crate::traits::backend::{BackendRead, RawEntries};

/// Immutable, read-only handle scoping all key access to one namespace.
#[derive(Clone)]
pub struct View {
    reader: Arc<dyn BackendRead>,
    keyspace: Keyspace,
    encoding: ValueEncoding,
}

impl View {
    pub(crate) fn new(reader: Arc<dyn BackendRead>, keyspace: Keyspace, encoding: ValueEncoding) -> Self {
        Self {
            reader,
            keyspace,
            encoding,
        }
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    pub fn encoding(&self) -> ValueEncoding {
        self.encoding
    }

    /// Look up a single logical key.
    ///
    /// A missing key is [`SublevelError::NotFound`], carrying the
    /// backend-qualified key.
    pub fn get(&self, key: impl AsRef<[u8]>) -> SublevelResult<Value> {
        let backend_key = self.keyspace.subkey(key.as_ref());
        match self.reader.get(&backend_key)? {
            Some(raw) => self.encoding.decode(raw),
            None => Err(SublevelError::NotFound { key: backend_key }),
        }
    }

    /// Whether a logical key is present.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> SublevelResult<bool> {
        let backend_key = self.keyspace.subkey(key.as_ref());
        Ok(self.reader.get(&backend_key)?.is_some())
    }

    /// Range read over a slice of the logical key space.
    ///
    /// Both bounds are translated through the key transform; an open bound
    /// stays open and reaches the backend untouched, so a fully unbounded
    /// slice scans the entire backend, not just this namespace (use
    /// [`View::entries`] for namespace-scoped iteration). The result is
    /// lazy, forward-ordered, and non-restartable; keys are
    /// backend-qualified. A slice carrying a step fails with
    /// [`SublevelError::StepNotSupported`].
    pub fn slice(&self, slice: Slice) -> SublevelResult<RangeIter> {
        if slice.step.is_some() {
            return Err(SublevelError::StepNotSupported);
        }
        let lower = self.keyspace.subkey_bound(slice.start.as_deref());
        let upper = self.keyspace.subkey_bound(slice.stop.as_deref());
        let inner = self.reader.range(lower.as_deref(), upper.as_deref())?;
        Ok(RangeIter {
            inner,
            encoding: self.encoding,
        })
    }

    /// Batched lookup of an explicit key collection, preserving its kind.
    ///
    /// A sequence of keys yields values in the same order; a set yields an
    /// unordered result addressed by logical key. Any missing key fails
    /// with the same [`SublevelError::NotFound`] as a point read.
    pub fn get_many(&self, keys: impl Into<KeyList>) -> SublevelResult<Entries> {
        match keys.into() {
            KeyList::Seq(keys) => {
                let mut values = Vec::with_capacity(keys.len());
                for key in keys {
                    values.push(self.get(&key)?);
                }
                Ok(Entries::Seq(values))
            }
            KeyList::Set(keys) => {
                let mut values = HashMap::with_capacity(keys.len());
                for key in keys {
                    let value = self.get(&key)?;
                    values.insert(key, value);
                }
                Ok(Entries::Set(values))
            }
        }
    }

    /// Dispatch any of the three request shapes.
    pub fn read(&self, request: impl Into<ReadRequest>) -> SublevelResult<ReadOutcome> {
        match request.into() {
            ReadRequest::Key(key) => Ok(ReadOutcome::Value(self.get(key)?)),
            ReadRequest::Slice(slice) => Ok(ReadOutcome::Range(self.slice(slice)?)),
            ReadRequest::Keys(keys) => Ok(ReadOutcome::Entries(self.get_many(keys)?)),
        }
    }

    /// Derive the view of a child namespace.
    ///
    /// Delimiter and encoding are inherited; use [`View::with_delimiter`]
    /// and [`View::with_encoding`] on the result to override either.
    pub fn subview(&self, segment: impl AsRef<[u8]>) -> View {
        View {
            reader: self.reader.clone(),
            keyspace: self.keyspace.child(segment.as_ref()),
            encoding: self.encoding,
        }
    }

    /// Same view with a different delimiter (affects this view's lookups
    /// and everything derived from it).
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> View {
        self.keyspace = self.keyspace.with_delimiter(delimiter);
        self
    }

    /// Same view with a different value encoding.
    pub fn with_encoding(mut self, encoding: ValueEncoding) -> View {
        self.encoding = encoding;
        self
    }

    /// Lazy iteration over exactly this namespace's records, in key order,
    /// with logical (prefix-stripped) keys.
    pub fn entries(&self) -> SublevelResult<ScopedIter> {
        let (lower, upper) = self.keyspace.scope_bounds();
        let inner = self.reader.range(lower.as_deref(), upper.as_deref())?;
        Ok(ScopedIter {
            inner,
            encoding: self.encoding,
            keyspace: self.keyspace.clone(),
        })
    }

    /// Logical keys of this namespace, in order.
    pub fn keys(&self) -> SublevelResult<KeysIter> {
        Ok(KeysIter {
            inner: self.entries()?,
        })
    }

    /// Decoded values of this namespace, in key order.
    pub fn values(&self) -> SublevelResult<ValuesIter> {
        Ok(ValuesIter {
            inner: self.entries()?,
        })
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("keyspace", &self.keyspace)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`View::read`], mirroring the request shape.
pub enum ReadOutcome {
    Value(Value),
    Range(RangeIter),
    Entries(Entries),
}

impl ReadOutcome {
    pub fn into_value(self) -> Option<Value> {
        match self {
            ReadOutcome::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_range(self) -> Option<RangeIter> {
        match self {
            ReadOutcome::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn into_entries(self) -> Option<Entries> {
        match self {
            ReadOutcome::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Lazy, forward-ordered sequence of decoded `(backend key, value)` pairs.
///
/// Dropping the iterator early releases the backend cursor.
pub struct RangeIter {
    inner: RawEntries,
    encoding: ValueEncoding,
}

impl Iterator for RangeIter {
    type Item = SublevelResult<(Vec<u8>, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(entry.and_then(|(key, raw)| Ok((key, self.encoding.decode(raw)?))))
    }
}

impl fmt::Debug for RangeIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Lazy iteration over one namespace, yielding logical keys.
pub struct ScopedIter {
    inner: RawEntries,
    encoding: ValueEncoding,
    keyspace: Keyspace,
}

impl Iterator for ScopedIter {
    type Item = SublevelResult<(Vec<u8>, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(entry.and_then(|(key, raw)| {
            let logical = self.keyspace.strip(&key).unwrap_or(key.as_slice()).to_vec();
            let value = self.encoding.decode(raw)?;
            Ok((logical, value))
        }))
    }
}

/// Logical keys of one namespace, in order.
pub struct KeysIter {
    inner: ScopedIter,
}

impl Iterator for KeysIter {
    type Item = SublevelResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(key, _)| key))
    }
}

/// Decoded values of one namespace, in key order.
pub struct ValuesIter {
    inner: ScopedIter,
}

impl Iterator for ValuesIter {
    type Item = SublevelResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.inner.next()?.map(|(_, value)| value))
    }
}
