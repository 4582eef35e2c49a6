use url::{Host, Url};

use crate::error::{AppError, Result};

/// Checks a user-supplied URL before anything touches the network.
///
/// Blank input is `MissingUrl`. Anything that is not an absolute URL with an
/// authority and a plausible host is `InvalidUrl`. The scheme is not checked
/// here; the fetcher decides what it can retrieve. The raw string is checked
/// as typed, so surrounding whitespace makes it invalid.
pub fn validate_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(AppError::MissingUrl);
    }

    // Url::parse silently strips leading/trailing spaces and encodes inner ones.
    if raw.chars().any(char::is_whitespace) {
        return Err(AppError::InvalidUrl);
    }

    let url = Url::parse(raw).map_err(|_| AppError::InvalidUrl)?;

    match url.host() {
        Some(Host::Domain(domain)) if is_valid_domain(domain) => Ok(url),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(url),
        _ => Err(AppError::InvalidUrl),
    }
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}
