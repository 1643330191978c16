use url::Url;

/// True when the reference parses as a fully qualified URL on its own.
///
/// Any parse failure means "not absolute"; this never fails.
pub fn is_absolute_url(reference: &str) -> bool {
    Url::parse(reference)
        .map(|url| !url.as_str().is_empty())
        .unwrap_or(false)
}

/// Resolve a reference to the URL it should be fetched from.
///
/// Absolute references are parsed as-is. Anything else is taken to be an
/// absolute path on the page's own host and is concatenated verbatim onto
/// the page's scheme and authority; no `..`-style path resolution happens.
pub fn resolve_reference(reference: &str, page_url: &Url) -> Result<Url, url::ParseError> {
    if is_absolute_url(reference) {
        return Url::parse(reference);
    }

    let scheme = page_url.scheme();
    let host = page_url.host_str().unwrap_or_default();
    let resolved = match page_url.port() {
        Some(port) => format!("{scheme}://{host}:{port}{reference}"),
        None => format!("{scheme}://{host}{reference}"),
    };
    Url::parse(&resolved)
}

/// Exact hostname equality; scheme and port are ignored.
pub fn is_same_origin(url: &Url, page_host: &str) -> bool {
    url.host_str() == Some(page_host)
}
