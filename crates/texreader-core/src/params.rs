//! URL query-string handling.
//!
//! Decoding follows `decodeURIComponent` rather than form decoding: `+` is
//! left alone so raw base64 payloads survive a trip through the address bar.

use std::borrow::Cow;

/// Ordered list of decoded query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Each pair is split on its first `=`. Pairs with an empty key are
    /// skipped, and malformed percent escapes are kept as raw text.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                if key.is_empty() {
                    return None;
                }
                Some((decode_component(key), decode_component(value)))
            })
            .collect();
        Self { pairs }
    }

    /// Value for `key`. When a key repeats the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`get`](Self::get), but an empty value counts as absent.
    pub fn get_nonempty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_nonempty(key).is_some()
    }

    /// Replace the first occurrence of `key` and drop any others, or append
    /// when the key is absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut idx = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = idx <= first || *k != key;
                    idx += 1;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize back to `k=v&k=v` with every component percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&urlencoding::encode(key));
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn decode_component(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(e) => {
            tracing::debug!("keeping undecodable query component {raw:?}: {e}");
            raw.to_string()
        }
    }
}

/// Build `<base>?<query>`, or just `<base>` for an empty query.
pub fn with_query(base: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", params.to_query_string())
    }
}
