//! Image source resolution with a placeholder fallback.

use reqwest::Url;

/// How a product image should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Host is allow-listed; served through the optimizing path
    Optimized(String),
    /// Any other parseable URL; loaded as-is
    Direct(String),
    /// Missing, unparseable, or failed to load
    Placeholder,
}

impl ImageSource {
    /// Pick a source for `url`. A host is allowed when it equals an entry of
    /// `allowed_hosts` or is a subdomain of one.
    pub fn resolve(url: &str, allowed_hosts: &[String]) -> Self {
        if url.is_empty() {
            return ImageSource::Placeholder;
        }
        let Ok(parsed) = Url::parse(url) else {
            return ImageSource::Placeholder;
        };

        let host = parsed.host_str().unwrap_or_default().to_lowercase();
        let allowed = allowed_hosts
            .iter()
            .any(|a| host == *a || host.ends_with(&format!(".{a}")));

        if allowed {
            ImageSource::Optimized(url.to_string())
        } else {
            ImageSource::Direct(url.to_string())
        }
    }

    /// The source to use after the image failed to load.
    pub fn fail(self) -> Self {
        ImageSource::Placeholder
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSource::Optimized(url) | ImageSource::Direct(url) => Some(url),
            ImageSource::Placeholder => None,
        }
    }

    /// Alt text shown in place of a placeholder.
    pub fn placeholder_text() -> &'static str {
        "No image"
    }
}
