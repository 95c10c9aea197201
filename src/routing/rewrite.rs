//! Upstream path rewriting.

use url::Url;

use crate::routing::matcher::RouteEntry;

/// Replace the first occurrence of `/{segment}/` in `path` with `/`.
///
/// Literal replacement: later occurrences are kept, and a path without the
/// prefix (hostname-alias match) comes back unchanged.
pub fn rewrite_path(path: &str, segment: &str) -> String {
    path.replacen(&format!("/{}/", segment), "/", 1)
}

/// Build the upstream URL: target base + rewritten path + original query.
pub fn upstream_url(
    entry: &RouteEntry,
    path: &str,
    query: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut raw = String::with_capacity(entry.target_base().len() + path.len());
    raw.push_str(entry.target_base());
    raw.push_str(&rewrite_path(path, entry.path_segment()));
    if let Some(query) = query {
        raw.push('?');
        raw.push_str(query);
    }
    Url::parse(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_segment() {
        assert_eq!(rewrite_path("/openai/v1/models", "openai"), "/v1/models");
        assert_eq!(rewrite_path("/openai/", "openai"), "/");
        assert_eq!(
            rewrite_path("/openrouter/api/v1/chat", "openrouter/api"),
            "/v1/chat"
        );
    }

    #[test]
    fn test_only_first_occurrence() {
        assert_eq!(
            rewrite_path("/openai/v1/openai/files", "openai"),
            "/v1/openai/files"
        );
    }

    #[test]
    fn test_missing_prefix_is_noop() {
        assert_eq!(rewrite_path("/v1beta/models", "generativelanguage"), "/v1beta/models");
    }

    #[test]
    fn test_upstream_url_keeps_query() {
        let entry = RouteEntry::new("openai", "https://api.openai.com", None).unwrap();
        let url = upstream_url(&entry, "/openai/v1/models", None).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models");

        let url = upstream_url(&entry, "/openai/v1/models", Some("limit=5&after=x")).unwrap();
        assert_eq!(url.as_str(), "https://api.openai.com/v1/models?limit=5&after=x");
    }

    #[test]
    fn test_upstream_url_strips_only_first_segment() {
        let entry = RouteEntry::new("openai", "https://api.openai.com", None).unwrap();
        let path = "/openai/v1/openai/files";
        let url = upstream_url(&entry, path, None).unwrap();
        assert_eq!(url.path(), rewrite_path(path, "openai"));
        assert_eq!(url.as_str(), "https://api.openai.com/v1/openai/files");
    }

    #[test]
    fn test_upstream_url_keeps_target_base_path() {
        let entry = RouteEntry::new("openrouter", "https://openrouter.ai/api", None).unwrap();
        let url = upstream_url(&entry, "/openrouter/v1/chat/completions", None).unwrap();
        assert_eq!(url.as_str(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn test_upstream_url_for_alias_match() {
        let entry = RouteEntry::new(
            "generativelanguage",
            "https://generativelanguage.googleapis.com",
            Some("gooai.chatkit.app".into()),
        )
        .unwrap();
        let url = upstream_url(&entry, "/v1beta/models", Some("key=abc")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models?key=abc"
        );
    }
}
