//! Relevance predicate: which network calls are worth parsing.
//!
//! Deliberately permissive. A false positive costs one wasted parse; a false
//! negative loses video data.

use crate::config::TvdConfig;

/// API path substrings known to carry post payloads.
pub const API_PATH_PATTERNS: [&str; 4] = [
    "/TweetDetail",
    "/TweetResultByRestId",
    "/graphql/",
    "/i/api/graphql/",
];

/// Matched case-insensitively anywhere in the URL.
pub const ENTITY_KEYWORD: &str = "tweet";

fn mentions_entity(url: &str) -> bool {
    url.to_ascii_lowercase().contains(ENTITY_KEYWORD)
}

/// True if `url` names a known API path or mentions the post entity at all.
pub fn should_intercept(url: &str) -> bool {
    mentions_entity(url) || API_PATH_PATTERNS.iter().any(|p| url.contains(p))
}

/// Built-in allowlist plus any configured extra path substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptPolicy {
    patterns: Vec<String>,
}

impl Default for InterceptPolicy {
    fn default() -> Self {
        Self {
            patterns: API_PATH_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl InterceptPolicy {
    pub fn from_config(cfg: &TvdConfig) -> Self {
        let mut policy = Self::default();
        for extra in &cfg.extra_intercept_patterns {
            let extra = extra.trim();
            if !extra.is_empty() && !policy.patterns.iter().any(|p| p == extra) {
                policy.patterns.push(extra.to_string());
            }
        }
        policy
    }

    pub fn matches(&self, url: &str) -> bool {
        mentions_entity(url) || self.patterns.iter().any(|p| url.contains(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_path_matches() {
        assert!(should_intercept(
            "https://x.com/i/api/graphql/abc123/HomeTimeline?variables=%7B%7D"
        ));
        assert!(should_intercept("https://api.example.com/graphql/q"));
    }

    #[test]
    fn keyword_matches_case_insensitively() {
        assert!(should_intercept("https://api.example.com/1.1/statuses/TWEETS.json"));
        assert!(should_intercept("https://example.com/retweeted_by"));
    }

    #[test]
    fn unrelated_url_does_not_match() {
        assert!(!should_intercept("https://example.com/assets/logo.png"));
        assert!(!should_intercept(""));
    }

    #[test]
    fn path_patterns_are_case_sensitive() {
        assert!(!should_intercept("https://example.com/GRAPHQL/x"));
    }

    #[test]
    fn default_policy_agrees_with_predicate() {
        let policy = InterceptPolicy::default();
        for url in [
            "https://x.com/i/api/graphql/q/TweetDetail",
            "https://example.com/assets/logo.png",
            "https://example.com/Tweet",
        ] {
            assert_eq!(policy.matches(url), should_intercept(url), "{url}");
        }
    }

    #[test]
    fn configured_patterns_extend_allowlist() {
        let cfg = TvdConfig {
            extra_intercept_patterns: vec!["/UserMedia".into(), "  ".into(), "/graphql/".into()],
            ..TvdConfig::default()
        };
        let policy = InterceptPolicy::from_config(&cfg);
        assert!(policy.matches("https://x.com/i/api/2/UserMedia?id=1"));
        assert!(!should_intercept("https://x.com/i/api/2/UserMedia?id=1"));
        assert_eq!(policy.patterns.len(), API_PATH_PATTERNS.len() + 1);
    }
}
