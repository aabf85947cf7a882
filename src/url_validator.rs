//! Validation of the answering-service base URL.
//!
//! The base URL comes from configuration and every endpoint is joined onto
//! it, so it is checked once at startup:
//! - HTTP or HTTPS only
//! - a host must be present
//! - no embedded credentials, query string or fragment
//!
//! The accepted URL is normalised to end in `/` so relative joins append
//! to its path instead of replacing the last segment.

use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use url::{Host, Url};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    /// URL is malformed or cannot be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("Credentials are not allowed in the service URL")]
    CredentialsNotAllowed,
    /// Query strings and fragments would be dropped by endpoint joins
    #[error("Service URL must not contain a {0}")]
    UnexpectedComponent(&'static str),
}

/// Validate and normalise the base URL of the answering service.
pub fn validate_service_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let mut url =
        Url::parse(url_str.trim()).map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(UrlValidationError::CredentialsNotAllowed);
    }

    if url.query().is_some() {
        return Err(UrlValidationError::UnexpectedComponent("query string"));
    }
    if url.fragment().is_some() {
        return Err(UrlValidationError::UnexpectedComponent("fragment"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Join an endpoint path such as `qa` or `index-pdf` onto a validated base.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, UrlValidationError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))
}

/// Whether the URL points at this machine (loopback or `localhost`).
pub fn is_local(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_loopback_ipv4(&ip),
        Some(Host::Ipv6(ip)) => is_loopback_ipv6(&ip),
        None => false,
    }
}

fn is_loopback_ipv4(ip: &Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_unspecified()
}

fn is_loopback_ipv6(ip: &Ipv6Addr) -> bool {
    ip.is_loopback()
        || ip.is_unspecified()
        // IPv4-mapped addresses - check the embedded IPv4
        || ip.to_ipv4_mapped().map(|v4| is_loopback_ipv4(&v4)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_default_backend() {
        let url = validate_service_url("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
        assert!(is_local(&url));
    }

    #[test]
    fn test_normalises_path_for_joins() {
        let url = validate_service_url("https://rag.example.com/api/v1").unwrap();
        assert_eq!(url.as_str(), "https://rag.example.com/api/v1/");
        assert_eq!(
            endpoint(&url, "qa").unwrap().as_str(),
            "https://rag.example.com/api/v1/qa"
        );
        assert_eq!(
            endpoint(&url, "/index-pdf").unwrap().as_str(),
            "https://rag.example.com/api/v1/index-pdf"
        );
        assert!(!is_local(&url));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate_service_url("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_service_url("not a url"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_credentials_query_fragment() {
        assert_eq!(
            validate_service_url("http://user:pw@localhost:8000"),
            Err(UrlValidationError::CredentialsNotAllowed)
        );
        assert_eq!(
            validate_service_url("http://localhost:8000/?key=1"),
            Err(UrlValidationError::UnexpectedComponent("query string"))
        );
        assert_eq!(
            validate_service_url("http://localhost:8000/#top"),
            Err(UrlValidationError::UnexpectedComponent("fragment"))
        );
    }

    #[test]
    fn test_loopback_detection() {
        assert!(is_local(&Url::parse("http://127.0.0.1:8000/").unwrap()));
        assert!(is_local(&Url::parse("http://[::1]:8000/").unwrap()));
        assert!(is_local(&Url::parse("http://api.localhost/").unwrap()));
        assert!(!is_local(&Url::parse("http://10.0.0.4/").unwrap()));
    }
}
