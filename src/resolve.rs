//! Reference resolution per Section 5.2 of RFC 3986.

use crate::{Path, ResolveError, Segments, Uri};

/// Resolves a URI reference against an absolute base.
///
/// The target components follow Section 5.2.2 of RFC 3986: a reference with
/// a scheme stands on its own; one with an authority takes the base's
/// scheme; otherwise the base also contributes its authority, and the paths
/// are merged and normalized. Excess `..` segments beyond the root are
/// absorbed, never an error.
///
/// # Errors
///
/// Returns an error when the base has no scheme, when the base has a
/// fragment, or when the base has no authority and a rootless path while
/// the reference is relative and neither empty nor fragment-only.
///
/// # Examples
///
/// ```
/// use uri_parts::{resolve, Uri};
///
/// let base = Uri::parse("http://example.com/foo/bar").unwrap();
///
/// let reference = Uri::parse("baz").unwrap();
/// assert_eq!(resolve(&base, &reference)?.to_string(), "http://example.com/foo/baz");
///
/// let reference = Uri::parse("../baz").unwrap();
/// assert_eq!(resolve(&base, &reference)?.to_string(), "http://example.com/baz");
///
/// let reference = Uri::parse("?baz").unwrap();
/// assert_eq!(resolve(&base, &reference)?.to_string(), "http://example.com/foo/bar?baz");
/// # Ok::<_, uri_parts::ResolveError>(())
/// ```
pub fn resolve(base: &Uri, reference: &Uri) -> Result<Uri, ResolveError> {
    if base.scheme.is_none() {
        return Err(ResolveError::NonAbsoluteBase);
    }
    if base.fragment.is_some() {
        return Err(ResolveError::BaseWithFragment);
    }
    // A reference that only replaces the fragment is always fine; anything
    // else cannot be resolved against an opaque (rootless-path) base.
    let fragment_only = reference.scheme.is_none()
        && reference.authority.is_none()
        && reference.path.is_empty()
        && reference.query.is_none();
    if base.authority.is_none()
        && !base.path.is_absolute()
        && reference.scheme.is_none()
        && !fragment_only
    {
        return Err(ResolveError::InvalidReferenceAgainstOpaqueBase);
    }

    let (t_scheme, t_authority, t_path, t_query);

    if reference.scheme.is_some() {
        t_scheme = reference.scheme.clone();
        t_authority = reference.authority.clone();
        t_path = normalized(&reference.path);
        t_query = reference.query.clone();
    } else if reference.authority.is_some() {
        t_scheme = base.scheme.clone();
        t_authority = reference.authority.clone();
        t_path = normalized(&reference.path);
        t_query = reference.query.clone();
    } else {
        if reference.path.is_empty() {
            t_path = normalized(&base.path);
            t_query = reference.query.clone().or_else(|| base.query.clone());
        } else if reference.path.is_absolute() {
            t_path = normalized(&reference.path);
            t_query = reference.query.clone();
        } else {
            t_path = merge(base, &reference.path).remove_dot_segments();
            t_query = reference.query.clone();
        }
        t_scheme = base.scheme.clone();
        t_authority = base.authority.clone();
    }

    Ok(Uri {
        scheme: t_scheme,
        authority: t_authority,
        path: t_path,
        query: t_query,
        fragment: reference.fragment.clone(),
    })
}

/// Normalizes an absolute path; a rootless path is kept as-is so that the
/// resolution of a foreign-scheme reference never turns relative into
/// absolute.
fn normalized(path: &Path) -> Path {
    if path.is_absolute() {
        path.remove_dot_segments()
    } else {
        path.clone()
    }
}

/// Merges the base path with a relative reference path
/// (Section 5.2.3 of RFC 3986).
fn merge(base: &Uri, rel: &Path) -> Path {
    if base.authority.is_some() && base.path.is_empty() {
        return Path::from_segments(rel.segments().with_absolute(true));
    }
    let base_segs = base.path.segments();
    // Keep a trailing ".." so that swapping the order of resolution and
    // normalization does not change the result.
    let keep = match base_segs.iter().next_back() {
        Some("..") => base_segs.len(),
        _ => base_segs.len().saturating_sub(1),
    };
    let labels: Vec<String> = base_segs
        .iter()
        .take(keep)
        .chain(rel.segments().iter())
        .map(str::to_owned)
        .collect();
    Path::from_segments(Segments::from_labels(labels, base.path.is_absolute()))
}
