//! URL normalization for user and entrypoint supplied Home Assistant URLs.
//!
//! Users type bare hosts (`192.168.1.5:8123`), trailing slashes and the odd
//! `/api` suffix copied from the HA docs. Everything is reduced to
//! `scheme://authority[/base-path]` before it is used or stored.

const HTTP_SCHEME: &str = "http://";
const HTTPS_SCHEME: &str = "https://";
const API_SEGMENT: &str = "/api";

/// Normalize a URL for use as the backend base.
///
/// Blank input yields `None`. A missing scheme defaults to `http://`.
///
/// # Example
/// ```rust
/// use reterminal_frontend::system::connection::url::normalize_url;
///
/// assert_eq!(
///     normalize_url(" 192.168.1.5:8123/api/ ").as_deref(),
///     Some("http://192.168.1.5:8123")
/// );
/// ```
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if has_scheme(trimmed) {
        strip_suffixes(trimmed)
    } else {
        strip_suffixes(&format!("{}{}", HTTP_SCHEME, trimmed))
    }
}

/// Sanitize a URL before it is persisted.
///
/// Same as [`normalize_url`] minus the scheme default: a scheme-free value is
/// stored as typed and gets its scheme on read.
pub fn sanitize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    strip_suffixes(trimmed)
}

/// Join a resolved base URL with an API path, using exactly one `/` between them.
pub fn join_api_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

fn has_scheme(url: &str) -> bool {
    url.starts_with(HTTP_SCHEME) || url.starts_with(HTTPS_SCHEME)
}

/// Drop trailing slashes and a trailing `/api[/...]` from the path part.
///
/// The authority is left untouched so a host literally named `api` survives.
/// A URL without an authority is absent.
fn strip_suffixes(url: &str) -> Option<String> {
    let scheme_len = if url.starts_with(HTTPS_SCHEME) {
        HTTPS_SCHEME.len()
    } else if url.starts_with(HTTP_SCHEME) {
        HTTP_SCHEME.len()
    } else {
        0
    };

    let (scheme, rest) = url.split_at(scheme_len);
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    if authority.is_empty() {
        return None;
    }

    let mut path = path.trim_end_matches('/');
    if let Some(idx) = find_api_suffix(path) {
        path = path[..idx].trim_end_matches('/');
    }

    Some(format!("{}{}{}", scheme, authority, path))
}

/// Position of the first `/api` that is followed by `/` or the end of the path.
fn find_api_suffix(path: &str) -> Option<usize> {
    path.match_indices(API_SEGMENT).map(|(idx, _)| idx).find(|&idx| {
        let after = &path[idx + API_SEGMENT.len()..];
        after.is_empty() || after.starts_with('/')
    })
}
