//! Custom header set applied to every outbound request.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Values configured for a single header name.
///
/// Deserializes from either a plain string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    /// A single value that replaces any default.
    Single(String),
    /// The first value replaces any default, the rest are appended.
    Multiple(Vec<String>),
}

impl HeaderValues {
    /// Returns the configured values in order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                *self = Self::Multiple(vec![std::mem::take(first), value]);
            }
            Self::Multiple(values) => values.push(value),
        }
    }
}

/// Header set mapping a name to one or many values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushHeaders(BTreeMap<String, HeaderValues>);

impl PushHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to a single value, replacing anything configured before.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(name.into(), HeaderValues::Single(value.into()));
    }

    /// Adds another value for `name`, keeping the ones already configured.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match self.0.entry(name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            Entry::Vacant(entry) => {
                entry.insert(HeaderValues::Single(value.into()));
            }
        }
    }

    /// Returns the values configured for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(HeaderValues::as_slice)
    }

    /// Iterates over the configured headers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of configured header names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no headers are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validates every name and value and converts them into a [`HeaderMap`].
    pub(crate) fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, values) in self.iter() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|source| Error::HeaderName {
                    name: name.to_owned(),
                    source,
                })?;

            for value in values {
                let header_value =
                    HeaderValue::from_str(value).map_err(|source| Error::HeaderValue {
                        name: name.to_owned(),
                        source,
                    })?;
                map.append(header_name.clone(), header_value);
            }
        }

        Ok(map)
    }
}

impl<K, V> FromIterator<(K, V)> for PushHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Applies `configured` onto `target`.
///
/// For each name the first value replaces whatever `target` already holds
/// and the remaining values are appended.
pub(crate) fn apply_headers(target: &mut HeaderMap, configured: &HeaderMap) {
    for name in configured.keys() {
        let mut values = configured.get_all(name).iter();
        if let Some(first) = values.next() {
            target.insert(name.clone(), first.clone());
        }
        for value in values {
            target.append(name.clone(), value.clone());
        }
    }
}
