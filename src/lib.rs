#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Composable, immutable URI component value objects, strictly adhering to
//! IETF [RFC 3986], [RFC 3492] and [RFC 6874].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492/
//! [RFC 6874]: https://datatracker.ietf.org/doc/html/rfc6874/
//!
//! Every component type in this crate is an owned value object: a validating
//! constructor produces a canonical internal representation, and every
//! structural "mutation" is a pure function returning a new value. Nothing is
//! ever modified in place, so values may be freely shared across threads.
//!
//! - [`Segments`] is the ordered label/segment model shared by hosts and paths.
//! - [`Host`] recognizes registered names (with [Punycode] IDN support),
//!   IPv4, IPv6 (optionally zoned per RFC 6874) and IPvFuture literals.
//! - [`Path`] keeps decoded segments and re-encodes on render; it implements
//!   dot-segment removal ([Section 5.2.4, RFC 3986][dot]) and relativization.
//! - [`DataPath`] parses the payload of a `data:` URI.
//! - [`Query`] is a duplicate-preserving `key=value` pair codec.
//! - [`Uri`] aggregates the components; [`resolve`] implements reference
//!   resolution per [Section 5.2, RFC 3986][res].
//!
//! [Punycode]: punycode
//! [dot]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4
//! [res]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2
//!
//! # Feature flags
//!
//! - `serde`: Enables `Serialize` and `Deserialize` implementations for
//!   [`Uri`] through its string form.
//!
//! # Examples
//!
//! ```
//! use uri_parts::{resolve, Uri};
//!
//! let base = Uri::parse("http://a/b/c/d;p?q")?;
//! let reference = Uri::parse("../g")?;
//! let target = resolve(&base, &reference).unwrap();
//! assert_eq!(target.to_string(), "http://a/b/g");
//! # Ok::<_, uri_parts::UriError>(())
//! ```

pub mod encoding;
pub mod punycode;

mod error;
pub use error::*;

mod segment;
pub use segment::Segments;

mod ip;

mod host;
pub use host::{DomainName, Host};

mod path;
pub use path::{Path, Typecode};

mod data;
pub use data::DataPath;

mod query;
pub use query::{Query, QueryMode};

mod uri;
pub use uri::{Authority, Scheme, Uri};

mod resolve;
pub use resolve::resolve;

mod suffix;
pub use suffix::{registrable_domain, SuffixList};
