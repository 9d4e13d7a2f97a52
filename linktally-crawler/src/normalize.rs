use crate::error::{CrawlError, Result};
use url::Url;

/// Reduce a URL to the canonical key used for visit deduplication:
/// lowercase host + path, one trailing slash stripped. Scheme, port,
/// query and fragment do not participate in page identity.
pub fn normalize_url(raw: &str) -> Result<String> {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        // A bare "host/path" (e.g. a key produced by a previous call)
        // parses as a relative reference; retry it as plain http.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{raw}"))
                .map_err(|e| CrawlError::InvalidUrl(format!("{raw}: {e}")))?
        }
        Err(e) => return Err(CrawlError::InvalidUrl(format!("{raw}: {e}"))),
    };

    let host = parsed.host_str().unwrap_or_default();
    let mut key = format!("{}{}", host, parsed.path()).to_lowercase();
    if key.ends_with('/') {
        key.pop();
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_lowercases() {
        let key = normalize_url("https://WWW.Example.COM/a/").unwrap();
        assert_eq!(key, "www.example.com/a");
    }

    #[test]
    fn http_and_https_normalize_identically() {
        let a = normalize_url("https://www.example.com/a").unwrap();
        let b = normalize_url("http://www.example.com/a/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn discards_query_and_fragment() {
        let key = normalize_url("http://blog.example.dev/post?x=1#top").unwrap();
        assert_eq!(key, "blog.example.dev/post");
    }

    #[test]
    fn root_url_normalizes_to_bare_host() {
        let key = normalize_url("https://blog.example.dev/").unwrap();
        assert_eq!(key, "blog.example.dev");
    }

    #[test]
    fn idempotent_over_its_own_output() {
        let once = normalize_url("https://WWW.Example.COM/Path/").unwrap();
        let twice = normalize_url(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_url_is_an_error() {
        let err = normalize_url(":\\invalid");
        assert!(matches!(err, Err(CrawlError::InvalidUrl(_))));
    }

    #[test]
    fn only_one_trailing_slash_is_removed() {
        let key = normalize_url("http://example.com/a//").unwrap();
        assert_eq!(key, "example.com/a/");
    }
}
