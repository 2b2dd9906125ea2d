use crate::encoding::{self, PATH, PCHAR};
use crate::{ParseError, ParseErrorKind, Segments};
use core::fmt;
use core::str::FromStr;

/// The path component of a URI reference.
///
/// Each segment is stored in **decoded** form; rendering re-encodes every
/// byte outside the fixed "unreserved + sub-delims + `:` + `@`" allow-list
/// with uppercase hex digits. A trailing slash is modeled as one empty
/// trailing segment and is never silently dropped.
///
/// Like every type in this crate, `Path` is an immutable value: structural
/// editing goes through [`segments`] and [`from_segments`].
///
/// [`segments`]: Self::segments
/// [`from_segments`]: Self::from_segments
///
/// # Examples
///
/// ```
/// use uri_parts::Path;
///
/// let path = Path::parse("/%7bfoo%7d/b%61r")?;
/// assert!(path.segments().iter().eq(["{foo}", "bar"]));
/// assert_eq!(path.to_string(), "/%7Bfoo%7D/bar");
/// # Ok::<_, uri_parts::ParseError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    inner: Segments,
}

impl Path {
    /// Parses a raw path component, percent-decoding each segment.
    ///
    /// # Errors
    ///
    /// Returns an error on a character outside the path grammar, a malformed
    /// percent-encoded octet, or a segment that does not decode to UTF-8.
    pub fn parse(raw: &str) -> Result<Path, ParseError> {
        validate_raw(raw)?;

        let absolute = raw.starts_with('/');
        let rest = if absolute { &raw[1..] } else { raw };
        let mut labels = Vec::new();
        if !raw.is_empty() {
            let mut offset = usize::from(absolute);
            for seg in rest.split('/') {
                labels.push(encoding::decode_str(seg, offset)?);
                offset += seg.len() + 1;
            }
        }
        Ok(Path {
            inner: Segments::from_labels(labels, absolute),
        })
    }

    /// Builds a path directly from decoded segments.
    #[must_use]
    pub fn from_segments(segments: Segments) -> Path {
        Path { inner: segments }
    }

    /// Returns the decoded segments.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &Segments {
        &self.inner
    }

    /// Returns `true` if the path begins with `/`.
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.inner.is_absolute()
    }

    /// Returns `true` if the path has no segments at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the path ends with `/`.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        matches!(self.inner.iter().next_back(), Some(""))
    }

    /// Removes `.` and `..` segments per Section 5.2.4 of RFC 3986.
    ///
    /// `.` is dropped; `..` pops the previous output segment, and popping
    /// below the root is a silent no-op. A trailing `.` or `..` leaves a
    /// trailing slash behind. The function is idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Path;
    ///
    /// let path = Path::parse("/a/./b/../c")?;
    /// assert_eq!(path.remove_dot_segments().to_string(), "/a/c");
    ///
    /// let path = Path::parse("/bar/..")?;
    /// assert_eq!(path.remove_dot_segments().to_string(), "/");
    /// # Ok::<_, uri_parts::ParseError>(())
    /// ```
    #[must_use]
    pub fn remove_dot_segments(&self) -> Path {
        if self.inner.is_empty() {
            return self.clone();
        }
        let mut out: Vec<String> = Vec::with_capacity(self.inner.len());
        let mut trailing = false;
        for seg in self.inner.iter() {
            match seg {
                "." => trailing = true,
                ".." => {
                    trailing = true;
                    out.pop();
                }
                _ => {
                    trailing = false;
                    out.push(seg.to_owned());
                }
            }
        }
        if trailing {
            out.push(String::new());
        }
        Path {
            inner: Segments::from_labels(out, self.is_absolute()),
        }
    }

    /// Expresses `target` relative to this path.
    ///
    /// Both paths are normalized first. The longest common segment prefix is
    /// computed excluding each path's own final segment; one `..` is emitted
    /// per remaining base directory, followed by the target's remaining
    /// segments. Empty interior segments are collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Path;
    ///
    /// let base = Path::parse("/a/b/c")?;
    /// let target = Path::parse("/a/x/y")?;
    /// assert_eq!(base.relativize(&target).to_string(), "../x/y");
    /// # Ok::<_, uri_parts::ParseError>(())
    /// ```
    #[must_use]
    pub fn relativize(&self, target: &Path) -> Path {
        let base = self.remove_dot_segments();
        let target = target.remove_dot_segments();

        let base_dirs: Vec<&str> = skip_last(&base.inner).collect();
        let target_segs: Vec<&str> = target.inner.iter().collect();
        let target_dirs = target_segs.len().saturating_sub(1);

        let common = base_dirs
            .iter()
            .zip(&target_segs[..target_dirs.min(target_segs.len())])
            .take_while(|(a, b)| a == b)
            .count();

        let mut out: Vec<String> = vec!["..".to_owned(); base_dirs.len() - common];
        let rest = &target_segs[common.min(target_segs.len())..];
        for (i, seg) in rest.iter().enumerate() {
            // Collapse empty interior segments; keep a trailing one.
            if !seg.is_empty() || i + 1 == rest.len() {
                out.push((*seg).to_owned());
            }
        }
        Path {
            inner: Segments::from_labels(out, false),
        }
    }

    /// Returns the final segment, or `""` for an empty path.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.inner.iter().next_back().unwrap_or("")
    }

    /// Returns the same path with the final segment replaced.
    ///
    /// An empty path gains `basename` as its only segment.
    #[must_use]
    pub fn with_basename(&self, basename: &str) -> Path {
        let mut labels: Vec<String> = skip_last(&self.inner).map(str::to_owned).collect();
        labels.push(basename.to_owned());
        Path {
            inner: Segments::from_labels(labels, self.is_absolute()),
        }
    }

    /// Returns everything but the final segment.
    #[must_use]
    pub fn dirname(&self) -> Path {
        Path {
            inner: Segments::from_labels(
                skip_last(&self.inner).map(str::to_owned).collect::<Vec<_>>(),
                self.is_absolute(),
            ),
        }
    }

    /// Returns `dirname` with this path's final segment appended to it.
    ///
    /// The result takes its absolute flag from `dirname`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Path;
    ///
    /// let path = Path::parse("/a/b/report.txt")?;
    /// let dir = Path::parse("/archive/2024")?;
    /// assert_eq!(path.with_dirname(&dir).to_string(), "/archive/2024/report.txt");
    /// # Ok::<_, uri_parts::ParseError>(())
    /// ```
    #[must_use]
    pub fn with_dirname(&self, dirname: &Path) -> Path {
        let mut labels: Vec<String> = dirname.inner.iter().map(str::to_owned).collect();
        labels.push(self.basename().to_owned());
        Path {
            inner: Segments::from_labels(labels, dirname.is_absolute()),
        }
    }

    /// Returns the extension of the basename, or `""` when there is none.
    ///
    /// An FTP typecode suffix does not count as part of the extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        let (stem, _) = split_typecode(self.basename());
        match stem.rfind('.') {
            Some(i) if i != 0 => &stem[i + 1..],
            _ => "",
        }
    }

    /// Returns the same path with the basename's extension replaced.
    ///
    /// An empty extension removes the current one; the typecode suffix, if
    /// any, is preserved. An empty basename is returned unchanged.
    #[must_use]
    pub fn with_extension(&self, extension: &str) -> Path {
        let (stem, typecode) = split_typecode(self.basename());
        if stem.is_empty() {
            return self.clone();
        }
        let bare = match stem.rfind('.') {
            Some(i) if i != 0 => &stem[..i],
            _ => stem,
        };
        let mut basename = bare.to_owned();
        if !extension.is_empty() {
            basename.push('.');
            basename.push_str(extension);
        }
        if let Some(t) = typecode {
            basename.push_str(";type=");
            basename.push(t.to_char());
        }
        self.with_basename(&basename)
    }

    /// Returns the FTP typecode carried by the basename, if any.
    #[must_use]
    pub fn typecode(&self) -> Option<Typecode> {
        split_typecode(self.basename()).1
    }

    /// Returns the same path with the FTP typecode suffix replaced or removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::{Path, Typecode};
    ///
    /// let path = Path::parse("/file")?;
    /// let path = path.with_typecode(Some(Typecode::Binary));
    /// assert_eq!(path.to_string(), "/file;type=i");
    /// assert_eq!(path.typecode(), Some(Typecode::Binary));
    /// assert_eq!(path.with_typecode(None).to_string(), "/file");
    /// # Ok::<_, uri_parts::ParseError>(())
    /// ```
    #[must_use]
    pub fn with_typecode(&self, typecode: Option<Typecode>) -> Path {
        let (stem, _) = split_typecode(self.basename());
        let mut basename = stem.to_owned();
        if let Some(t) = typecode {
            basename.push_str(";type=");
            basename.push(t.to_char());
        }
        self.with_basename(&basename)
    }
}

fn skip_last(segments: &Segments) -> impl Iterator<Item = &str> {
    let n = segments.len().saturating_sub(1);
    segments.iter().take(n)
}

fn split_typecode(basename: &str) -> (&str, Option<Typecode>) {
    if let Some(stem) = basename.strip_suffix(";type=a") {
        (stem, Some(Typecode::Ascii))
    } else if let Some(stem) = basename.strip_suffix(";type=i") {
        (stem, Some(Typecode::Binary))
    } else if let Some(stem) = basename.strip_suffix(";type=d") {
        (stem, Some(Typecode::Directory))
    } else {
        (basename, None)
    }
}

fn validate_raw(raw: &str) -> Result<(), ParseError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ParseError::new(i, ParseErrorKind::InvalidOctet));
            }
            i += 3;
        } else if PATH.allows(bytes[i]) {
            i += 1;
        } else {
            return Err(ParseError::new(i, ParseErrorKind::UnexpectedChar));
        }
    }
    Ok(())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absolute() {
            f.write_str("/")?;
        }
        for (i, seg) in self.inner.iter().enumerate() {
            if i != 0 {
                f.write_str("/")?;
            }
            f.write_str(&encoding::encode(seg, PCHAR))?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Path, ParseError> {
        Path::parse(s)
    }
}

/// The transfer-mode typecode of an FTP path, carried as a `;type=` suffix
/// on the final segment (RFC 1738, Section 3.2.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Typecode {
    /// Text transfer (`;type=a`).
    Ascii,
    /// Binary transfer (`;type=i`).
    Binary,
    /// Directory listing (`;type=d`).
    Directory,
}

impl Typecode {
    fn to_char(self) -> char {
        match self {
            Typecode::Ascii => 'a',
            Typecode::Binary => 'i',
            Typecode::Directory => 'd',
        }
    }
}
