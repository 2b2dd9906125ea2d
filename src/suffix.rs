use crate::Host;
use std::collections::HashSet;

/// A read-only public-suffix lookup.
///
/// The crate never ships or fetches a suffix list itself; callers supply
/// one and treat it as immutable for the process lifetime. Queries against
/// an absent or incomplete list simply report "unknown".
pub trait SuffixList {
    /// Returns `true` if `domain`, in ASCII form without a trailing dot,
    /// is a public suffix.
    fn is_public_suffix(&self, domain: &str) -> bool;
}

impl SuffixList for HashSet<String> {
    fn is_public_suffix(&self, domain: &str) -> bool {
        self.contains(domain)
    }
}

/// Returns the registrable domain of a host: the longest public suffix
/// found in `list` plus one more label, in ASCII form.
///
/// Returns `None` for an IP host, for a host that is itself a public
/// suffix, and whenever no suffix in `list` matches.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use uri_parts::{registrable_domain, Host};
///
/// let list: HashSet<String> = ["com", "co.uk"].iter().map(|s| s.to_string()).collect();
///
/// let host = Host::parse("www.example.co.uk")?;
/// assert_eq!(registrable_domain(&host, &list).as_deref(), Some("example.co.uk"));
///
/// let host = Host::parse("co.uk")?;
/// assert_eq!(registrable_domain(&host, &list), None);
///
/// let host = Host::parse("localhost")?;
/// assert_eq!(registrable_domain(&host, &list), None);
/// # Ok::<_, uri_parts::HostError>(())
/// ```
#[must_use]
pub fn registrable_domain(host: &Host, list: &dyn SuffixList) -> Option<String> {
    let name = host.as_name()?;
    let ascii = name.to_ascii();
    let ascii = ascii.strip_suffix('.').unwrap_or(&ascii);
    let labels: Vec<&str> = ascii.split('.').collect();

    for i in 0..labels.len() {
        if list.is_public_suffix(&labels[i..].join(".")) {
            return (i > 0).then(|| labels[i - 1..].join("."));
        }
    }
    None
}
