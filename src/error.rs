use core::fmt;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the character.
    UnexpectedChar,
    /// Percent-decoded bytes that are not valid UTF-8.
    ///
    /// The error index points to the start of the offending component.
    InvalidUtf8,
    /// Invalid scheme name.
    InvalidScheme,
    /// A port that is nonempty yet does not parse into `u16`.
    InvalidPort,
}

/// An error occurred when parsing a URI reference or one of its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(index: usize, kind: ParseErrorKind) -> ParseError {
        ParseError { index, kind }
    }

    /// Returns the index where the error occurred in the input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            ParseErrorKind::UnexpectedChar => "unexpected character at index ",
            ParseErrorKind::InvalidUtf8 => "non-UTF-8 percent-decoded bytes at index ",
            ParseErrorKind::InvalidScheme => "invalid scheme name at index ",
            ParseErrorKind::InvalidPort => "invalid port at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl std::error::Error for ParseError {}

/// An error occurred when validating a host.
///
/// Every variant carries the offending raw value, so callers can report
/// exactly what was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// A DNS label is empty or, once Punycode-encoded, longer than 63 octets.
    InvalidLabelLength {
        /// The offending label.
        label: String,
    },
    /// A DNS label contains a character outside `[0-9a-z-]` or begins or
    /// ends with a hyphen once Punycode-encoded.
    InvalidLabelContent {
        /// The offending label.
        label: String,
    },
    /// The host has more than 127 labels.
    TooManyLabels {
        /// The label count.
        count: usize,
    },
    /// The encoded host exceeds 255 octets.
    HostTooLong {
        /// The encoded length in octets.
        len: usize,
    },
    /// A bracketed literal is neither a valid IPv6 address nor an
    /// IPvFuture literal, or the bracket is unterminated.
    InvalidIpLiteral {
        /// The offending literal, brackets included.
        input: String,
    },
    /// A zone identifier is empty, contains a forbidden character, or is
    /// attached to an address that is not link-local.
    InvalidScopeId {
        /// The offending zone identifier, percent-encoding preserved.
        zone: String,
    },
    /// A label failed to round-trip through the Punycode codec.
    Punycode(PunycodeError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::InvalidLabelLength { label } => {
                write!(f, "label {label:?} has invalid length")
            }
            HostError::InvalidLabelContent { label } => {
                write!(f, "label {label:?} has invalid content")
            }
            HostError::TooManyLabels { count } => write!(f, "too many labels: {count}"),
            HostError::HostTooLong { len } => write!(f, "encoded host too long: {len} octets"),
            HostError::InvalidIpLiteral { input } => write!(f, "invalid IP literal {input:?}"),
            HostError::InvalidScopeId { zone } => write!(f, "invalid zone identifier {zone:?}"),
            HostError::Punycode(e) => write!(f, "punycode: {e}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<PunycodeError> for HostError {
    fn from(e: PunycodeError) -> HostError {
        HostError::Punycode(e)
    }
}

/// An error occurred in the Punycode codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunycodeError {
    /// Arithmetic overflow on pathological input.
    Overflow,
    /// A character in the encoded input is not a base-36 digit.
    InvalidDigit,
    /// The encoded input ends in the middle of a variable-length integer.
    UnexpectedEnd,
    /// A decoded value is not a Unicode scalar value.
    InvalidCodePoint,
}

impl fmt::Display for PunycodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PunycodeError::Overflow => "arithmetic overflow",
            PunycodeError::InvalidDigit => "invalid base-36 digit",
            PunycodeError::UnexpectedEnd => "truncated encoded input",
            PunycodeError::InvalidCodePoint => "invalid code point",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for PunycodeError {}

/// An error occurred when applying a structural operation to a collection.
///
/// Note the asymmetry with anchor-based insertion: [`Segments::append_after`]
/// and friends silently return the original collection when the anchor is not
/// found, while offset-based [`Segments::replace`] reports `OutOfRange`.
/// Anchor-based insertion is advisory; an explicit offset is a precondition.
///
/// [`Segments::append_after`]: crate::Segments::append_after
/// [`Segments::replace`]: crate::Segments::replace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationError {
    /// The offset is outside `[0, len)`.
    OutOfRange {
        /// The requested offset.
        offset: usize,
        /// The collection length.
        len: usize,
    },
    /// An authority was combined with a rootless non-empty path.
    ///
    /// Such a reference has no textual form that reads back to the same
    /// value: the path would merge into the host.
    RootlessPathWithAuthority,
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::OutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for length {len}")
            }
            OperationError::RootlessPathWithAuthority => {
                f.write_str("path must be empty or absolute when an authority is present")
            }
        }
    }
}

impl std::error::Error for OperationError {}

/// An error occurred when parsing a `data:` URI path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataPathError {
    /// The path has no `,` separating the mediatype from the payload.
    MissingSeparator,
    /// The mime type does not match `^[a-z-/+]+$`.
    InvalidMimeType {
        /// The offending mime type.
        mime_type: String,
    },
    /// A parameter is not of the form `key=value`, or is named `base64`.
    InvalidParameter {
        /// The offending parameter.
        parameter: String,
    },
    /// A binary payload does not round-trip through base64.
    InvalidBinaryPayload,
}

impl fmt::Display for DataPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPathError::MissingSeparator => {
                f.write_str("missing \",\" between mediatype and payload")
            }
            DataPathError::InvalidMimeType { mime_type } => {
                write!(f, "invalid mime type {mime_type:?}")
            }
            DataPathError::InvalidParameter { parameter } => {
                write!(f, "invalid parameter {parameter:?}")
            }
            DataPathError::InvalidBinaryPayload => f.write_str("payload is not valid base64"),
        }
    }
}

impl std::error::Error for DataPathError {}

/// An error occurred when resolving a URI reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The base has no scheme.
    NonAbsoluteBase,
    /// The base has a fragment.
    BaseWithFragment,
    /// The base has no authority and its path is rootless, but the reference
    /// is relative, is not empty and does not start with `'#'`.
    InvalidReferenceAgainstOpaqueBase,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ResolveError::NonAbsoluteBase => "base URI has no scheme",
            ResolveError::BaseWithFragment => "base URI has a fragment",
            ResolveError::InvalidReferenceAgainstOpaqueBase => {
                "cannot resolve a relative reference against an opaque base"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ResolveError {}

/// An error occurred when parsing or rebuilding a URI reference.
///
/// Wraps the component-level error of whichever constructor rejected its
/// part of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriError {
    /// A component failed syntactic validation.
    Parse(ParseError),
    /// The host failed validation.
    Host(HostError),
}

impl From<ParseError> for UriError {
    fn from(e: ParseError) -> UriError {
        UriError::Parse(e)
    }
}

impl From<HostError> for UriError {
    fn from(e: HostError) -> UriError {
        UriError::Host(e)
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriError::Parse(e) => fmt::Display::fmt(e, f),
            UriError::Host(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for UriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UriError::Parse(e) => Some(e),
            UriError::Host(e) => Some(e),
        }
    }
}
