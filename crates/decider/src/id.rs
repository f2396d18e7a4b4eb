use serde::{Deserialize, Serialize};
use std::{fmt, marker::PhantomData, str::FromStr};
use thiserror::Error;
use ulid::Ulid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("id is empty")]
    Empty,
    #[error("id is not a valid ulid")]
    Malformed,
}

/// Marker trait tying an id to its kind, e.g. a command id, an event id,
/// or one aggregate type's instance id.
pub trait IdKind: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const PREFIX: &'static str;
}

/// Prefix-tagged ULID identifier.
///
/// Renders as `"{prefix}-{ulid}"` and parses from either the prefixed or the
/// bare ULID form. ULIDs are lexicographically time-ordered, so freshly
/// generated ids sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id<K: IdKind> {
    ulid: Ulid,
    _kind: PhantomData<K>,
}

impl<K: IdKind> Id<K> {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _kind: PhantomData,
        }
    }

    pub fn ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<K: IdKind> Default for Id<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IdKind> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", K::PREFIX, self.ulid)
    }
}

impl<K: IdKind> FromStr for Id<K> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        let bare = s.strip_prefix(&format!("{}-", K::PREFIX)).unwrap_or(s);
        let ulid = Ulid::from_string(bare).map_err(|_| IdError::Malformed)?;

        Ok(Self::from_ulid(ulid))
    }
}

impl<K: IdKind> Serialize for Id<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de, K: IdKind> Deserialize<'de> for Id<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
