//! Translation terms and the identity policies used to deduplicate them.
//!
//! A [`Term`] has two independent notions of sameness:
//!
//! - structural equality (`==`, [`Hash`]): `key` and `value`, always;
//! - identity ([`Term::identity_key`]): a composite chosen by [`IdentityMode`],
//!   used only for set-style deduplication.
//!
//! The source row never takes part in equality.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Which fields of a [`Term`] contribute to its identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IdentityMode {
    /// `key` only.
    #[default]
    #[serde(rename = "key")]
    KeyOnly,
    /// `key` + `value`.
    #[serde(rename = "key-value")]
    KeyAndValue,
    /// `key` + `value` + source row; every row is its own identity.
    #[serde(rename = "full")]
    Full,
}

impl IdentityMode {
    /// Maps a numeric uniqueness level onto a mode: 0 key, 1 key + value, 2 full.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(IdentityMode::KeyOnly),
            1 => Some(IdentityMode::KeyAndValue),
            2 => Some(IdentityMode::Full),
            _ => None,
        }
    }
}

impl Display for IdentityMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityMode::KeyOnly => write!(f, "key"),
            IdentityMode::KeyAndValue => write!(f, "key-value"),
            IdentityMode::Full => write!(f, "full"),
        }
    }
}

impl FromStr for IdentityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', '+'], "");
        match normalized.as_str() {
            "key" | "keyonly" | "0" => Ok(IdentityMode::KeyOnly),
            "keyvalue" | "keyandvalue" | "1" => Ok(IdentityMode::KeyAndValue),
            "full" | "2" => Ok(IdentityMode::Full),
            _ => Err(format!(
                "Unknown identity mode: '{}'. Supported modes: key, key-value, full",
                s
            )),
        }
    }
}

/// The deduplication key of a [`Term`] under a given [`IdentityMode`].
///
/// Hashing covers the whole tuple of participating fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityKey {
    Key(String),
    KeyValue(String, String),
    Full(String, String, usize),
}

/// A single key → value translation pair tied to the row it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Term {
    key: String,
    value: String,
    source_row: usize,
    #[serde(skip)]
    identity_mode: IdentityMode,
}

impl Term {
    /// Creates a term in [`IdentityMode::KeyOnly`].
    pub fn new(key: impl Into<String>, value: impl Into<String>, source_row: usize) -> Self {
        Term {
            key: key.into(),
            value: value.into(),
            source_row,
            identity_mode: IdentityMode::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 0-based position of the originating row, header excluded.
    pub fn source_row(&self) -> usize {
        self.source_row
    }

    pub fn identity_mode(&self) -> IdentityMode {
        self.identity_mode
    }

    pub(crate) fn set_identity_mode(&mut self, mode: IdentityMode) {
        self.identity_mode = mode;
    }

    /// Identity key under the term's current mode.
    pub fn identity_key(&self) -> IdentityKey {
        self.identity_key_for(self.identity_mode)
    }

    /// Identity key under an explicit mode; does not touch the stored mode.
    pub fn identity_key_for(&self, mode: IdentityMode) -> IdentityKey {
        match mode {
            IdentityMode::KeyOnly => IdentityKey::Key(self.key.clone()),
            IdentityMode::KeyAndValue => {
                IdentityKey::KeyValue(self.key.clone(), self.value.clone())
            }
            IdentityMode::Full => {
                IdentityKey::Full(self.key.clone(), self.value.clone(), self.source_row)
            }
        }
    }

    /// Orders by `key` only. An absent right-hand term is a maximal sentinel,
    /// so any concrete term compares [`Ordering::Greater`] against it.
    pub fn compare(&self, other: Option<&Term>) -> Ordering {
        match other {
            Some(other) => self.key.cmp(&other.key),
            None => Ordering::Greater,
        }
    }
}

/// Sentinel-aware comparison over optional terms.
///
/// `None` sorts after every concrete term; two `None`s are equal.
pub fn compare_optional(lhs: Option<&Term>, rhs: Option<&Term>) -> Ordering {
    match (lhs, rhs) {
        (Some(lhs), rhs) => lhs.compare(rhs),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (&self.key, &self.value).hash(state);
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row: {} key: {} value: {}",
            self.source_row, self.key, self.value
        )
    }
}
