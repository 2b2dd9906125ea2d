use crate::encoding::{self, RESERVED, ZONE_ID};
use crate::punycode;
use crate::{ip, HostError, Segments};
use core::fmt;
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Maximum number of octets in an encoded host.
const MAX_HOST_OCTETS: usize = 255;
/// Maximum number of octets in one encoded label.
const MAX_LABEL_OCTETS: usize = 63;
/// Maximum number of labels in a host.
const MAX_LABELS: usize = 127;

/// A validated registered name.
///
/// The canonical storage form is Unicode: every label is Punycode-decoded at
/// construction, and the ASCII-compatible ([`xn--`]) rendering is computed
/// once and cached for [`to_ascii`]. The absolute flag of the underlying
/// [`Segments`] models the FQDN trailing dot.
///
/// [`xn--`]: crate::punycode
/// [`to_ascii`]: Self::to_ascii
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomainName {
    labels: Segments,
    ascii: String,
    idn: bool,
}

impl DomainName {
    /// Parses and validates a registered name.
    ///
    /// ASCII letters are folded to lower case; non-ASCII code points are left
    /// untouched and Punycode-encoded per label. Each encoded label must
    /// match `[0-9a-z]([0-9a-z-]{0,61}[0-9a-z])?`, the label count must not
    /// exceed 127 and the encoded name must not exceed 255 octets.
    pub fn parse(raw: &str) -> Result<DomainName, HostError> {
        let folded: String = raw.chars().map(|c| c.to_ascii_lowercase()).collect();
        let (rest, fqdn) = match folded.strip_suffix('.') {
            Some(rest) => (rest, true),
            None => (folded.as_str(), false),
        };

        let mut unicode = Vec::new();
        let mut ascii_labels: Vec<String> = Vec::new();
        let mut idn = false;

        for label in rest.split('.') {
            let ace = punycode::encode_label(label)?;
            validate_encoded_label(&ace, label)?;
            let decoded = punycode::decode_label(&ace)?;
            if decoded != ace {
                idn = true;
            }
            unicode.push(decoded);
            ascii_labels.push(ace);
        }

        if unicode.len() > MAX_LABELS {
            return Err(HostError::TooManyLabels {
                count: unicode.len(),
            });
        }
        let ascii = ascii_labels.join(".");
        if ascii.len() > MAX_HOST_OCTETS {
            return Err(HostError::HostTooLong { len: ascii.len() });
        }

        Ok(DomainName {
            labels: Segments::from_labels(unicode, fqdn),
            ascii,
            idn,
        })
    }

    /// Builds a name from a label collection, revalidating every label.
    ///
    /// The collection's absolute flag carries over as the FQDN flag. This is
    /// the way back after structural editing through [`segments`].
    ///
    /// [`segments`]: Self::segments
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::{DomainName, Segments};
    ///
    /// let name = DomainName::parse("example.com")?;
    /// let www = Segments::from_labels(["www"], false);
    /// let name = DomainName::from_labels(&name.segments().prepend(&www))?;
    /// assert_eq!(name.to_string(), "www.example.com");
    /// # Ok::<_, uri_parts::HostError>(())
    /// ```
    pub fn from_labels(labels: &Segments) -> Result<DomainName, HostError> {
        let mut raw = labels.iter().collect::<Vec<_>>().join(".");
        if labels.is_absolute() {
            raw.push('.');
        }
        DomainName::parse(&raw)
    }

    /// Returns the Unicode labels.
    ///
    /// The collection's absolute flag is the FQDN flag.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &Segments {
        &self.labels
    }

    /// Returns `true` if the name is fully qualified (trailing dot).
    #[inline]
    #[must_use]
    pub fn is_fqdn(&self) -> bool {
        self.labels.is_absolute()
    }

    /// Returns `true` if any label required Punycode encoding.
    #[inline]
    #[must_use]
    pub fn is_idn(&self) -> bool {
        self.idn
    }

    /// Returns the cached ASCII-compatible form.
    ///
    /// A fully qualified name keeps its trailing dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::DomainName;
    ///
    /// let name = DomainName::parse("bücher.example")?;
    /// assert_eq!(name.to_ascii(), "xn--bcher-kva.example");
    /// assert_eq!(name.to_string(), "bücher.example");
    /// # Ok::<_, uri_parts::HostError>(())
    /// ```
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = self.ascii.clone();
        if self.is_fqdn() {
            out.push('.');
        }
        out
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            f.write_str(label)?;
        }
        if self.is_fqdn() {
            f.write_str(".")?;
        }
        Ok(())
    }
}

fn validate_encoded_label(ace: &str, original: &str) -> Result<(), HostError> {
    let bytes = ace.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_LABEL_OCTETS {
        return Err(HostError::InvalidLabelLength {
            label: original.to_owned(),
        });
    }
    let allowed = |x: u8| x.is_ascii_lowercase() || x.is_ascii_digit() || x == b'-';
    if !bytes.iter().all(|&x| allowed(x))
        || bytes[0] == b'-'
        || bytes[bytes.len() - 1] == b'-'
    {
        return Err(HostError::InvalidLabelContent {
            label: original.to_owned(),
        });
    }
    Ok(())
}

/// The host subcomponent of authority.
///
/// Exactly one variant is active; the variant is derived from the validated
/// input, never stored redundantly. All derived facts (`is_ip`, `is_idn`,
/// FQDN) are computed at construction and never change afterwards.
///
/// `Display` renders the decoded Unicode form; [`to_ascii`] renders the
/// wire form (Punycode labels, `%25`-escaped zone identifier).
///
/// [`to_ascii`]: Self::to_ascii
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Host {
    /// A registered name.
    Name(DomainName),
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address, optionally zoned per RFC 6874.
    Ipv6 {
        /// The address.
        addr: Ipv6Addr,
        /// The decoded zone identifier, if any.
        zone: Option<String>,
    },
    /// An IP address of future version; the literal between the brackets.
    IpvFuture(String),
}

impl Host {
    /// Parses a host as it appears in a URI authority.
    ///
    /// The recognition order follows Section 3.2.2 of RFC 3986: a bracketed
    /// literal is an IPv6 or IPvFuture address; a dotted quad is IPv4;
    /// anything else is validated as a registered name.
    ///
    /// A zone identifier (after `%25`) is accepted only on a link-local
    /// address, per RFC 6874.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_parts::Host;
    ///
    /// assert!(matches!(Host::parse("192.168.1.24")?, Host::Ipv4(_)));
    /// assert!(matches!(Host::parse("[::1]")?, Host::Ipv6 { .. }));
    /// assert!(matches!(Host::parse("[v1.addr]")?, Host::IpvFuture(_)));
    /// assert!(matches!(Host::parse("www.example.com")?, Host::Name(_)));
    /// # Ok::<_, uri_parts::HostError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Host, HostError> {
        if raw.starts_with('[') {
            return parse_ip_literal(raw);
        }
        if let Some(addr) = ip::parse_v4(raw) {
            return Ok(Host::Ipv4(addr));
        }
        DomainName::parse(raw).map(Host::Name)
    }

    /// Returns `true` for the IP variants.
    #[must_use]
    pub fn is_ip(&self) -> bool {
        !matches!(self, Host::Name(_))
    }

    /// Returns `true` if the host is an internationalized registered name.
    #[must_use]
    pub fn is_idn(&self) -> bool {
        matches!(self, Host::Name(name) if name.is_idn())
    }

    /// Returns `true` if the host is a fully qualified name.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Host::Name(name) if name.is_fqdn())
    }

    /// Returns the registered name, if that is the active variant.
    #[must_use]
    pub fn as_name(&self) -> Option<&DomainName> {
        match self {
            Host::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Renders the wire form: Punycode for IDN labels, bracketed IP
    /// literals, `%25`-escaped zone identifiers.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        match self {
            Host::Name(name) => name.to_ascii(),
            Host::Ipv4(addr) => addr.to_string(),
            Host::Ipv6 { addr, zone: None } => format!("[{addr}]"),
            Host::Ipv6 {
                addr,
                zone: Some(zone),
            } => format!("[{addr}%25{}]", encoding::encode(zone, ZONE_ID)),
            Host::IpvFuture(lit) => format!("[{lit}]"),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Name(name) => fmt::Display::fmt(name, f),
            Host::Ipv4(addr) => fmt::Display::fmt(addr, f),
            Host::Ipv6 { addr, zone: None } => write!(f, "[{addr}]"),
            Host::Ipv6 {
                addr,
                zone: Some(zone),
            } => write!(f, "[{addr}%{zone}]"),
            Host::IpvFuture(lit) => write!(f, "[{lit}]"),
        }
    }
}

impl FromStr for Host {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Host, HostError> {
        Host::parse(s)
    }
}

fn parse_ip_literal(raw: &str) -> Result<Host, HostError> {
    let invalid = || HostError::InvalidIpLiteral {
        input: raw.to_owned(),
    };
    let inner = raw[1..].strip_suffix(']').ok_or_else(invalid)?;

    if let Some((addr, zone_raw)) = inner.split_once('%') {
        let addr = ip::parse_v6(addr).ok_or_else(invalid)?;
        if !ip::is_link_local(&addr) {
            return Err(HostError::InvalidScopeId {
                zone: zone_raw.to_owned(),
            });
        }
        let zone = parse_zone(zone_raw).ok_or_else(|| HostError::InvalidScopeId {
            zone: zone_raw.to_owned(),
        })?;
        return Ok(Host::Ipv6 {
            addr,
            zone: Some(zone),
        });
    }

    if let Some(addr) = ip::parse_v6(inner) {
        return Ok(Host::Ipv6 { addr, zone: None });
    }
    if ip::is_ipv_future(inner) {
        return Ok(Host::IpvFuture(inner.to_owned()));
    }
    Err(invalid())
}

// RFC 6874 writes the zone delimiter itself as "%25": strip it when present
// so that both the wire form and the bare literal form are accepted.
fn parse_zone(zone_raw: &str) -> Option<String> {
    let encoded = zone_raw.strip_prefix("25").unwrap_or(zone_raw);
    if encoded.is_empty() || !ZONE_ID.validate(encoded.as_bytes()) {
        return None;
    }
    let bytes = encoding::decode(encoded).ok()?;
    if bytes
        .iter()
        .any(|&x| x < 0x20 || x == 0x7f || RESERVED.allows(x))
    {
        return None;
    }
    String::from_utf8(bytes).ok()
}
