use crate::encoding::{self, Table, FRAGMENT, SCHEME, USERINFO};
use crate::{
    Host, OperationError, ParseError, ParseErrorKind, Path, Query, QueryMode, UriError,
};
use core::fmt;
use core::str::FromStr;
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use uri_parts::{Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let uri = Uri::parse("HTTP://EXAMPLE.COM/")?;
/// let scheme = uri.scheme().unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, uri_parts::UriError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the
    /// conversion fails.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scheme").field(&&self.inner).finish()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// An [authority] component.
///
/// The userinfo is stored decoded; the host is a parsed [`Host`]; an empty
/// port in the input counts as absent.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    userinfo: Option<String>,
    host: Option<Host>,
    port: Option<u16>,
}

impl Authority {
    /// Builds an authority from its parts.
    #[must_use]
    pub fn new(userinfo: Option<String>, host: Option<Host>, port: Option<u16>) -> Authority {
        Authority {
            userinfo,
            host,
            port,
        }
    }

    fn parse(raw: &str, offset: usize) -> Result<Authority, UriError> {
        let (userinfo, rest, rest_off) = match raw.split_once('@') {
            Some((ui, rest)) => {
                validate(ui, USERINFO, offset)?;
                let decoded = encoding::decode_str(ui, offset)?;
                (Some(decoded), rest, offset + ui.len() + 1)
            }
            None => (None, raw, offset),
        };

        let (host_raw, port_raw) = if rest.starts_with('[') {
            let close = rest.find(']').ok_or_else(|| {
                ParseError::new(rest_off, ParseErrorKind::UnexpectedChar)
            })?;
            let after = &rest[close + 1..];
            if after.is_empty() {
                (rest, None)
            } else if let Some(port) = after.strip_prefix(':') {
                (&rest[..=close], Some((port, rest_off + close + 2)))
            } else {
                return Err(
                    ParseError::new(rest_off + close + 1, ParseErrorKind::UnexpectedChar).into(),
                );
            }
        } else {
            match rest.split_once(':') {
                Some((host, port)) => (host, Some((port, rest_off + host.len() + 1))),
                None => (rest, None),
            }
        };

        let host = if host_raw.is_empty() {
            None
        } else {
            Some(Host::parse(host_raw)?)
        };

        let port = match port_raw {
            Some(("", _)) | None => None,
            Some((port, port_off)) => Some(
                port.parse::<u16>()
                    .map_err(|_| ParseError::new(port_off, ParseErrorKind::InvalidPort))?,
            ),
        };

        Ok(Authority {
            userinfo,
            host,
            port,
        })
    }

    /// Returns the decoded userinfo.
    #[inline]
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the host, `None` when the authority has an empty host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Authority {
    /// Renders the wire form: the userinfo re-encoded and the host in its
    /// ASCII form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{}@", encoding::encode(userinfo, USERINFO))?;
        }
        if let Some(host) = &self.host {
            f.write_str(&host.to_ascii())?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// A URI reference: scheme, authority, path, query and fragment, each an
/// immutable value.
///
/// A reference without a scheme is relative; [`resolve`](crate::resolve)
/// turns it into a URI against an absolute base. Every `with_*` method is a
/// pure function returning a new `Uri`; when the new component equals the
/// old one by value, the original is returned unchanged.
///
/// [`Display`](fmt::Display) renders the wire form: the host in ASCII, the
/// path, query and fragment re-encoded with uppercase hex.
///
/// # Examples
///
/// ```
/// use uri_parts::Uri;
///
/// let uri = Uri::parse("http://user@example.com:8080/a%2Fb?k=v#frag")?;
/// assert_eq!(uri.scheme().unwrap().as_str(), "http");
/// assert_eq!(uri.port(), Some(8080));
/// assert!(uri.path().segments().iter().eq(["a/b"]));
/// assert_eq!(uri.fragment(), Some("frag"));
/// assert_eq!(uri.to_string(), "http://user@example.com:8080/a%2Fb?k=v#frag");
/// # Ok::<_, uri_parts::UriError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    pub(crate) scheme: Option<String>,
    pub(crate) authority: Option<Authority>,
    pub(crate) path: Path,
    pub(crate) query: Option<Query>,
    pub(crate) fragment: Option<String>,
}

impl Uri {
    /// Parses a URI reference.
    ///
    /// # Errors
    ///
    /// Returns an error when any component fails validation; the index of a
    /// [`UriError::Parse`] refers to the full input string.
    pub fn parse(s: &str) -> Result<Uri, UriError> {
        let (rest, fragment) = match s.find('#') {
            Some(i) => (&s[..i], Some((&s[i + 1..], i + 1))),
            None => (s, None),
        };
        let (rest, query) = match rest.find('?') {
            Some(i) => (&rest[..i], Some((&rest[i + 1..], i + 1))),
            None => (rest, None),
        };

        let (scheme, rest, mut offset) = match rest.find(|c| matches!(c, ':' | '/')) {
            Some(i) if rest.as_bytes()[i] == b':' => {
                let raw = &rest[..i];
                if Scheme::new(raw).is_none() {
                    return Err(ParseError::new(0, ParseErrorKind::InvalidScheme).into());
                }
                (Some(raw.to_owned()), &rest[i + 1..], i + 1)
            }
            _ => (None, rest, 0),
        };

        let (authority, path_raw) = match rest.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find('/').unwrap_or(rest.len());
                let authority = Authority::parse(&rest[..end], offset + 2)?;
                offset += 2 + end;
                (Some(authority), &rest[end..])
            }
            None => (None, rest),
        };

        let path = Path::parse(path_raw)
            .map_err(|e| ParseError::new(offset + e.index, e.kind))?;

        let query = query
            .map(|(raw, off)| {
                Query::parse(raw, QueryMode::Rfc3986)
                    .map_err(|e| ParseError::new(off + e.index, e.kind))
            })
            .transpose()?;

        let fragment = fragment
            .map(|(raw, off)| {
                validate(raw, FRAGMENT, off)?;
                encoding::decode_str(raw, off)
            })
            .transpose()?;

        Ok(Uri {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    /// Returns the scheme component.
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_deref().map(Scheme::new_validated)
    }

    /// Returns the authority component.
    #[inline]
    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Returns the host of the authority.
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.authority.as_ref().and_then(Authority::host)
    }

    /// Returns the port of the authority.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.authority.as_ref().and_then(Authority::port)
    }

    /// Returns the decoded userinfo of the authority.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.authority.as_ref().and_then(Authority::userinfo)
    }

    /// Returns the path component.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the query component.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the decoded fragment component.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns `true` if the reference has a scheme.
    #[inline]
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns `true` if the reference is relative, that is, has no scheme.
    #[inline]
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Returns the same reference with the scheme replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::InvalidScheme`] on an invalid scheme name.
    pub fn with_scheme(&self, scheme: Option<&str>) -> Result<Uri, UriError> {
        if let Some(s) = scheme {
            if Scheme::new(s).is_none() {
                return Err(ParseError::new(0, ParseErrorKind::InvalidScheme).into());
            }
        }
        if self.scheme.as_deref() == scheme {
            return Ok(self.clone());
        }
        Ok(Uri {
            scheme: scheme.map(str::to_owned),
            ..self.clone()
        })
    }

    /// Returns the same reference with the authority replaced.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::RootlessPathWithAuthority`] when an
    /// authority is set while the path is rootless and non-empty; such a
    /// reference has no textual form that reads back to the same value.
    pub fn with_authority(&self, authority: Option<Authority>) -> Result<Uri, OperationError> {
        if self.authority == authority {
            return Ok(self.clone());
        }
        let uri = Uri {
            authority,
            ..self.clone()
        };
        uri.check_authority_path()?;
        Ok(uri)
    }

    /// Returns the same reference with the host replaced, keeping the
    /// userinfo and port of an existing authority.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::RootlessPathWithAuthority`] when this
    /// creates an authority while the path is rootless and non-empty.
    pub fn with_host(&self, host: Option<Host>) -> Result<Uri, OperationError> {
        if self.host() == host.as_ref() {
            return Ok(self.clone());
        }
        let mut authority = self.authority.clone().unwrap_or_default();
        authority.host = host;
        let uri = Uri {
            authority: Some(authority),
            ..self.clone()
        };
        uri.check_authority_path()?;
        Ok(uri)
    }

    /// Returns the same reference with the port replaced, keeping the rest
    /// of an existing authority.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::RootlessPathWithAuthority`] when this
    /// creates an authority while the path is rootless and non-empty.
    pub fn with_port(&self, port: Option<u16>) -> Result<Uri, OperationError> {
        if self.port() == port {
            return Ok(self.clone());
        }
        let mut authority = self.authority.clone().unwrap_or_default();
        authority.port = port;
        let uri = Uri {
            authority: Some(authority),
            ..self.clone()
        };
        uri.check_authority_path()?;
        Ok(uri)
    }

    /// Returns the same reference with the path replaced.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::RootlessPathWithAuthority`] when the
    /// reference has an authority and `path` is rootless and non-empty.
    pub fn with_path(&self, path: Path) -> Result<Uri, OperationError> {
        if self.path == path {
            return Ok(self.clone());
        }
        let uri = Uri {
            path,
            ..self.clone()
        };
        uri.check_authority_path()?;
        Ok(uri)
    }

    // When an authority is present the path must be empty or absolute, or
    // the rendered form would merge the path into the host.
    fn check_authority_path(&self) -> Result<(), OperationError> {
        if self.authority.is_some() && !self.path.is_empty() && !self.path.is_absolute() {
            return Err(OperationError::RootlessPathWithAuthority);
        }
        Ok(())
    }

    /// Returns the same reference with the query replaced.
    #[must_use]
    pub fn with_query(&self, query: Option<Query>) -> Uri {
        if self.query == query {
            return self.clone();
        }
        Uri {
            query,
            ..self.clone()
        }
    }

    /// Returns the same reference with the fragment replaced, given decoded.
    #[must_use]
    pub fn with_fragment(&self, fragment: Option<&str>) -> Uri {
        if self.fragment.as_deref() == fragment {
            return self.clone();
        }
        Uri {
            fragment: fragment.map(str::to_owned),
            ..self.clone()
        }
    }
}

fn validate(raw: &str, table: &Table, offset: usize) -> Result<(), ParseError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ParseError::new(offset + i, ParseErrorKind::InvalidOctet));
            }
            i += 3;
        } else if table.allows(bytes[i]) {
            i += 1;
        } else {
            return Err(ParseError::new(offset + i, ParseErrorKind::UnexpectedChar));
        }
    }
    Ok(())
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        } else if self.path.is_absolute()
            && self.path.segments().len() >= 2
            && self.path.segments().get(0) == Some("")
        {
            // A path starting with "//" would otherwise read back as an
            // authority.
            f.write_str("/.")?;
        } else if self.scheme.is_none()
            && !self.path.is_absolute()
            && matches!(self.path.segments().get(0), Some(seg) if seg.contains(':'))
        {
            // A leading segment with ":" would otherwise read back as a
            // scheme.
            f.write_str("./")?;
        }
        fmt::Display::fmt(&self.path, f)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", encoding::encode(fragment, FRAGMENT))?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Uri, UriError> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Uri::parse(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
        })
    }
}
