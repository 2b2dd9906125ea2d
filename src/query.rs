use crate::encoding::{self, Table, QUERY};
use crate::{ParseError, ParseErrorKind};
use core::fmt;
use std::borrow::Cow;

/// Bytes that may appear unencoded inside a key or a value. `&` and `=`
/// are the pair structure itself.
const PAIR: &Table = &QUERY.sub(&Table::gen(b"&="));

/// Under RFC 1738 a literal `+` must also be encoded, or it would decode
/// back as a space.
const PAIR_1738: &Table = &PAIR.sub(&Table::gen(b"+"));

/// How `+` and spaces are treated in a query string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// RFC 3986 semantics: `+` is an ordinary sub-delimiter.
    #[default]
    Rfc3986,
    /// Legacy `application/x-www-form-urlencoded` semantics (RFC 1738):
    /// `+` decodes to a space, and spaces render as `+`.
    Rfc1738,
}

/// The query component of a URI, as an ordered multimap of `key=value`
/// pairs.
///
/// Keys and values are stored **decoded**; duplicates and order are
/// preserved. A pair without `=` has no value, which renders differently
/// from an empty one (`key` vs `key=`).
///
/// # Examples
///
/// ```
/// use uri_parts::{Query, QueryMode};
///
/// let query = Query::parse("a=1&b&a=2", QueryMode::Rfc3986)?;
/// assert_eq!(query.get("a"), Some("1"));
/// assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
/// assert_eq!(query.get("b"), None);
/// assert!(query.contains_key("b"));
/// # Ok::<_, uri_parts::ParseError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pairs: Vec<(String, Option<String>)>,
    mode: QueryMode,
}

impl Query {
    /// Parses a raw query component.
    ///
    /// Under [`QueryMode::Rfc1738`], `+` decodes to a space; under
    /// [`QueryMode::Rfc3986`] it stays a literal plus sign.
    ///
    /// # Errors
    ///
    /// Returns an error on a character outside the query grammar, a
    /// malformed percent-encoded octet, or a key or value that does not
    /// decode to UTF-8.
    pub fn parse(raw: &str, mode: QueryMode) -> Result<Query, ParseError> {
        let mut pairs = Vec::new();
        if !raw.is_empty() {
            let mut offset = 0;
            for pair in raw.split('&') {
                let (key, value) = match pair.split_once('=') {
                    Some((key, value)) => {
                        let decoded = decode_part(value, offset + key.len() + 1, mode)?;
                        (key, Some(decoded))
                    }
                    None => (pair, None),
                };
                pairs.push((decode_part(key, offset, mode)?, value));
                offset += pair.len() + 1;
            }
        }
        Ok(Query { pairs, mode })
    }

    /// Builds a query directly from decoded pairs.
    pub fn from_pairs<I, K, V>(pairs: I, mode: QueryMode) -> Query
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Query {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
            mode,
        }
    }

    /// Returns the decoded pairs in order.
    #[inline]
    #[must_use]
    pub fn pairs(&self) -> &[(String, Option<String>)] {
        &self.pairs
    }

    /// Returns the mode this query was built with.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// Returns the number of pairs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the query has no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the value of the first pair with the given key.
    ///
    /// `None` means the key is absent or has no value; disambiguate with
    /// [`contains_key`](Self::contains_key).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns the values of every pair with the given key, in order.
    ///
    /// Pairs without a value are skipped.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .filter_map(|(_, v)| v.as_deref())
    }

    /// Returns `true` if any pair has the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns the same query with one pair appended.
    #[must_use]
    pub fn with_pair(&self, key: &str, value: Option<&str>) -> Query {
        let mut pairs = self.pairs.clone();
        pairs.push((key.to_owned(), value.map(str::to_owned)));
        Query {
            pairs,
            mode: self.mode,
        }
    }

    /// Returns the same query with every pair under the given key removed.
    ///
    /// An absent key is a silent no-op.
    #[must_use]
    pub fn without_key(&self, key: &str) -> Query {
        Query {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
            mode: self.mode,
        }
    }

    /// Returns the same query with pairs sorted by key, preserving the
    /// relative order of duplicates.
    #[must_use]
    pub fn sorted(&self) -> Query {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Query {
            pairs,
            mode: self.mode,
        }
    }
}

fn decode_part(raw: &str, offset: usize, mode: QueryMode) -> Result<String, ParseError> {
    for (i, &x) in raw.as_bytes().iter().enumerate() {
        if x != b'%' && !QUERY.allows(x) {
            return Err(ParseError::new(offset + i, ParseErrorKind::UnexpectedChar));
        }
    }
    let s: Cow<'_, str> = match mode {
        QueryMode::Rfc3986 => Cow::Borrowed(raw),
        QueryMode::Rfc1738 => Cow::Owned(raw.replace('+', " ")),
    };
    let bytes = encoding::decode(&s).map_err(|e| ParseError::new(offset + e.index, e.kind))?;
    String::from_utf8(bytes).map_err(|_| ParseError::new(offset, ParseErrorKind::InvalidUtf8))
}

fn encode_part(s: &str, mode: QueryMode) -> String {
    match mode {
        QueryMode::Rfc3986 => encoding::encode(s, PAIR),
        // Every % in the output starts an encoded octet, so the substring
        // %20 can only come from a space byte.
        QueryMode::Rfc1738 => encoding::encode(s, PAIR_1738).replace("%20", "+"),
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i != 0 {
                f.write_str("&")?;
            }
            f.write_str(&encode_part(key, self.mode))?;
            if let Some(value) = value {
                f.write_str("=")?;
                f.write_str(&encode_part(value, self.mode))?;
            }
        }
        Ok(())
    }
}

impl core::str::FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Query, ParseError> {
        Query::parse(s, QueryMode::Rfc3986)
    }
}
