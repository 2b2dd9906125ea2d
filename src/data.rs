use crate::encoding::{self, UNRESERVED};
use crate::DataPathError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use core::fmt;
use core::str::FromStr;
use std::io;

/// The path of a `data:` URI (RFC 2397).
///
/// The path carries a mediatype and a payload separated by `,`. An absent
/// mediatype defaults to `text/plain` with the single parameter
/// `charset=us-ascii`; a trailing `;base64` marks the payload as binary and
/// is a flag, not a stored parameter.
///
/// # Examples
///
/// ```
/// use uri_parts::DataPath;
///
/// let data = DataPath::parse(",")?;
/// assert_eq!(data.mime_type(), "text/plain");
/// assert_eq!(data.parameters(), ["charset=us-ascii"]);
/// assert!(!data.is_binary());
/// assert_eq!(data.payload(), "");
/// # Ok::<_, uri_parts::DataPathError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataPath {
    mime_type: String,
    parameters: Vec<String>,
    is_binary: bool,
    payload: String,
    bytes: Vec<u8>,
}

impl DataPath {
    /// Parses the path component of a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns an error when the `,` separator is missing, the mime type
    /// does not match `[a-z-/+]+`, a parameter is not `key=value` or claims
    /// the name `base64`, or a `;base64` payload does not round-trip through
    /// base64 byte-identically.
    pub fn parse(raw: &str) -> Result<DataPath, DataPathError> {
        let (mediatype, payload) = raw
            .split_once(',')
            .ok_or(DataPathError::MissingSeparator)?;
        let mediatype = mediatype.to_ascii_lowercase();

        let mut params: Vec<&str> = mediatype.split(';').collect();
        // `base64` is a flag only in parameter position; as the whole
        // mediatype it is an (invalid) mime type.
        let is_binary = params.len() >= 2 && matches!(params.last(), Some(&"base64"));
        if is_binary {
            params.pop();
        }

        let mut mime_type = params.remove(0).to_owned();
        if mime_type.is_empty() {
            mime_type = "text/plain".to_owned();
        }
        if !mime_type
            .bytes()
            .all(|x| x.is_ascii_lowercase() || matches!(x, b'-' | b'/' | b'+'))
        {
            return Err(DataPathError::InvalidMimeType { mime_type });
        }

        let mut parameters = Vec::with_capacity(params.len().max(1));
        for param in params {
            validate_parameter(param)?;
            parameters.push(param.to_owned());
        }
        if parameters.is_empty() {
            parameters.push("charset=us-ascii".to_owned());
        }

        let bytes = if is_binary {
            let bytes = STANDARD
                .decode(payload)
                .map_err(|_| DataPathError::InvalidBinaryPayload)?;
            if STANDARD.encode(&bytes) != payload {
                return Err(DataPathError::InvalidBinaryPayload);
            }
            bytes
        } else {
            decode_lenient(payload)
        };

        Ok(DataPath {
            mime_type,
            parameters,
            is_binary,
            payload: payload.to_owned(),
            bytes,
        })
    }

    /// Returns the mime type, `"text/plain"` when the path carried none.
    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the `key=value` parameters, `charset=us-ascii` by default.
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns `true` if the payload is base64-encoded.
    #[inline]
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    /// Returns the payload as it appears in the path, still encoded.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns the decoded payload bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the decoded payload bytes to `sink`.
    pub fn write_to<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&self.bytes)
    }

    /// Returns the same path with the parameter list replaced.
    ///
    /// `parameters` is a `;`-separated list; an empty string restores the
    /// `charset=us-ascii` default.
    ///
    /// # Errors
    ///
    /// Returns an error on a parameter that is not `key=value` or that is
    /// named `base64`.
    pub fn with_parameters(&self, parameters: &str) -> Result<DataPath, DataPathError> {
        let parameters = parameters.to_ascii_lowercase();
        let mut list = Vec::new();
        if !parameters.is_empty() {
            for param in parameters.split(';') {
                validate_parameter(param)?;
                list.push(param.to_owned());
            }
        }
        if list.is_empty() {
            list.push("charset=us-ascii".to_owned());
        }
        Ok(DataPath {
            parameters: list,
            ..self.clone()
        })
    }

    /// Converts to the base64 representation of the same payload.
    ///
    /// Already-binary paths are returned unchanged.
    #[must_use]
    pub fn to_binary(&self) -> DataPath {
        if self.is_binary {
            return self.clone();
        }
        DataPath {
            payload: STANDARD.encode(&self.bytes),
            is_binary: true,
            ..self.clone()
        }
    }

    /// Converts to the percent-encoded text representation of the same
    /// payload.
    ///
    /// Already-textual paths are returned unchanged.
    #[must_use]
    pub fn to_ascii(&self) -> DataPath {
        if !self.is_binary {
            return self.clone();
        }
        DataPath {
            payload: encoding::encode_bytes(&self.bytes, UNRESERVED),
            is_binary: false,
            ..self.clone()
        }
    }
}

/// Percent-decodes a textual payload, leaving malformed escapes untouched.
fn decode_lenient(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (
                (bytes[i + 1] as char).to_digit(16),
                (bytes[i + 2] as char).to_digit(16),
            ) {
                out.push((hi << 4 | lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn validate_parameter(param: &str) -> Result<(), DataPathError> {
    let invalid = || DataPathError::InvalidParameter {
        parameter: param.to_owned(),
    };
    let (key, _value) = param.split_once('=').ok_or_else(invalid)?;
    if key.is_empty() || key == "base64" {
        return Err(invalid());
    }
    Ok(())
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mime_type)?;
        for param in &self.parameters {
            write!(f, ";{param}")?;
        }
        if self.is_binary {
            f.write_str(";base64")?;
        }
        write!(f, ",{}", self.payload)
    }
}

impl FromStr for DataPath {
    type Err = DataPathError;

    fn from_str(s: &str) -> Result<DataPath, DataPathError> {
        DataPath::parse(s)
    }
}
