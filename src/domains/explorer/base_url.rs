//! Base URL normalization for the explorer API.

use std::fmt;

use reqwest::Url;

use super::ApiError;

const VERSION_SEGMENT: &str = "v2";

/// Explorer API root, always ending in exactly one `/v2/`.
///
/// Endpoint paths are joined relative to this URL, so the trailing slash
/// matters: `https://host/v2` joined with `stats` would drop the `v2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Normalize and validate a configured base URL.
    ///
    /// `https://host`, `https://host/`, `https://host/v2` and
    /// `https://host/v2/` all become `https://host/v2/`.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let normalized = normalize(raw.trim());
        let url = Url::parse(&normalized).map_err(|e| ApiError::invalid_url(&normalized, e))?;

        if url.cannot_be_a_base() {
            return Err(ApiError::invalid_url(normalized, "URL cannot be used as a base"));
        }

        Ok(Self(url))
    }

    /// Resolve an endpoint path (relative, without leading slash) against the root.
    pub fn join(&self, path: &str) -> Result<Url, ApiError> {
        let relative = path.trim_start_matches('/');
        self.0
            .join(relative)
            .map_err(|e| ApiError::invalid_url(format!("{}{}", self.0, relative), e))
    }

    /// The normalized root as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(raw: &str) -> String {
    let versioned = format!("/{}", VERSION_SEGMENT);
    let versioned_slash = format!("/{}/", VERSION_SEGMENT);

    if raw.ends_with(&versioned_slash) {
        raw.to_string()
    } else if raw.ends_with(&versioned) {
        format!("{}/", raw)
    } else if raw.ends_with('/') {
        format!("{}{}/", raw, VERSION_SEGMENT)
    } else {
        format!("{}/{}/", raw, VERSION_SEGMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variants() {
        for raw in [
            "https://host",
            "https://host/",
            "https://host/v2",
            "https://host/v2/",
        ] {
            let base = BaseUrl::parse(raw).unwrap();
            assert_eq!(base.as_str(), "https://host/v2/", "input: {}", raw);
        }
    }

    #[test]
    fn test_normalize_keeps_api_prefix() {
        let base = BaseUrl::parse("https://eth.blockscout.com/api").unwrap();
        assert_eq!(base.as_str(), "https://eth.blockscout.com/api/v2/");

        let base = BaseUrl::parse("https://eth.blockscout.com/api/v2").unwrap();
        assert_eq!(base.as_str(), "https://eth.blockscout.com/api/v2/");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let base = BaseUrl::parse("  https://host/v2 \n").unwrap();
        assert_eq!(base.as_str(), "https://host/v2/");
    }

    #[test]
    fn test_join_endpoint() {
        let base = BaseUrl::parse("https://host/api").unwrap();
        let url = base.join("transactions/0xabc/logs").unwrap();
        assert_eq!(url.as_str(), "https://host/api/v2/transactions/0xabc/logs");

        let url = base.join("/stats").unwrap();
        assert_eq!(url.as_str(), "https://host/api/v2/stats");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = BaseUrl::parse("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
