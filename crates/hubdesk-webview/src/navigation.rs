//! Navigation allowlist for shell webviews.
//!
//! A window may only navigate to:
//! - the origin of the configured start URL
//! - `about:blank`
//! - `hubdesk://` (bundled pages)
//!
//! Everything else is blocked. External links go through the `open-link`
//! channel instead, which hands them to the OS browser.

/// Fixed prefixes that are always allowed.
pub const ALWAYS_ALLOWED: &[&str] = &["about:blank", "hubdesk://"];

/// Extract `scheme://authority` from a URL. `None` when there is no authority.
pub fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if authority_len == 0 {
        return None;
    }
    Some(&url[..scheme_end + 3 + authority_len])
}

/// Decides which URLs a webview may navigate to.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    origin: Option<String>,
}

impl NavigationPolicy {
    /// Allow the origin of `start_url` in addition to the fixed prefixes.
    pub fn for_start_url(start_url: &str) -> Self {
        Self {
            origin: origin_of(start_url).map(|o| o.to_ascii_lowercase()),
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        if ALWAYS_ALLOWED.iter().any(|prefix| url.starts_with(prefix)) {
            return true;
        }

        let Some(origin) = &self.origin else {
            return false;
        };
        match origin_of(url) {
            Some(candidate) => candidate.eq_ignore_ascii_case(origin),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_extraction() {
        assert_eq!(origin_of("http://localhost:5173/app?x=1"), Some("http://localhost:5173"));
        assert_eq!(origin_of("http://localhost:5173"), Some("http://localhost:5173"));
        assert_eq!(origin_of("https://a.b#frag"), Some("https://a.b"));
        assert_eq!(origin_of("about:blank"), None);
        assert_eq!(origin_of("file:///etc/passwd"), None);
    }

    #[test]
    fn start_origin_allowed() {
        let p = NavigationPolicy::for_start_url("http://localhost:5174");
        assert!(p.is_allowed("http://localhost:5174"));
        assert!(p.is_allowed("http://localhost:5174/settings"));
        assert!(p.is_allowed("HTTP://LOCALHOST:5174/"));
    }

    #[test]
    fn fixed_prefixes_allowed() {
        let p = NavigationPolicy::for_start_url("http://localhost:5173");
        assert!(p.is_allowed("about:blank"));
        assert!(p.is_allowed("hubdesk://localhost/floating.html"));
    }

    #[test]
    fn lookalike_origins_blocked() {
        let p = NavigationPolicy::for_start_url("http://localhost:5173");
        assert!(!p.is_allowed("http://localhost:51730/"));
        assert!(!p.is_allowed("http://localhost:5173.evil.com/"));
        assert!(!p.is_allowed("http://localhost:5174/"));
        assert!(!p.is_allowed("https://localhost:5173/"));
    }

    #[test]
    fn external_and_file_urls_blocked() {
        let p = NavigationPolicy::for_start_url("http://localhost:5173");
        assert!(!p.is_allowed("https://evil.com"));
        assert!(!p.is_allowed("file:///etc/passwd"));
        assert!(!p.is_allowed("javascript:alert(1)"));
    }

    #[test]
    fn unparseable_start_url_allows_only_fixed() {
        let p = NavigationPolicy::for_start_url("not a url");
        assert!(p.is_allowed("about:blank"));
        assert!(!p.is_allowed("http://localhost:5173"));
    }
}
