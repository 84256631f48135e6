// cas-net/src/validation.rs
use cas_common::error::{CasError, Result};
use url::{Host, Url};

/// Validates an API base URL: https, or plain http to a loopback address
/// (local mock servers).
pub fn validate_base_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)
        .map_err(|e| CasError::Config(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback(&url) => {
            tracing::debug!("Allowing plain http for loopback base URL {}", url);
            Ok(url)
        }
        scheme => Err(CasError::Config(format!(
            "Invalid URL scheme for '{url_str}': Must be https, but got '{scheme}'"
        ))),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
