use crate::cache::{FetchCache, DEFAULT_MAX_AGE};
use crate::error::{ApiError, ApiResult};
use serde_json::Value;

/// Public OpenDota endpoint; no authentication required
pub const OPENDOTA_API: &str = "https://api.opendota.com/api";

const USER_AGENT: &str = "DotaStat/1.0";

/// Issue a blocking GET and parse the response body as JSON
///
/// A body carrying an `error` field, or a non-success status, maps to
/// `ApiError::Upstream` so error payloads never look like data.
pub fn http_get_json(url: &str) -> ApiResult<Value> {
    log::info!("GET {}", url);

    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()?;

    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        // OpenDota error responses still carry a JSON body with an `error` field
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            if let Some(err) = upstream_error(&value) {
                return Err(err);
            }
        }
        return Err(ApiError::Upstream(format!("HTTP {}", status)));
    }

    let value: Value = serde_json::from_str(&body)?;
    if let Some(err) = upstream_error(&value) {
        return Err(err);
    }

    Ok(value)
}

fn upstream_error(value: &Value) -> Option<ApiError> {
    let err = value.get("error")?;
    let message = err
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    Some(ApiError::Upstream(message))
}

/// Reject identifiers that are not a non-empty run of decimal digits
fn validate_id(id: &str) -> ApiResult<&str> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id)
    } else {
        Err(ApiError::InvalidIdentifier(id.to_string()))
    }
}

/// Data-access façade for OpenDota resources
///
/// Stateless aside from the fetcher: each operation validates its
/// identifier, maps to one URL and one cache key, and hands the response
/// JSON back unmodified.
#[derive(Debug)]
pub struct OpenDota {
    base_url: String,
    cache: FetchCache,
}

impl Default for OpenDota {
    fn default() -> Self {
        Self::new(OPENDOTA_API, FetchCache::new())
    }
}

impl OpenDota {
    /// Create a façade over `base_url` backed by `cache`
    ///
    /// The base URL is injectable so tests can point it at a mock server.
    pub fn new(base_url: impl Into<String>, cache: FetchCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, cache }
    }

    /// The cache behind this façade
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Full details for a match ID
    pub fn match_details(&self, match_id: &str) -> ApiResult<Value> {
        let id = validate_id(match_id)?;
        self.cache.fetch(
            &format!("{}/matches/{}", self.base_url, id),
            &format!("match_{}", id),
            DEFAULT_MAX_AGE,
        )
    }

    /// Win/loss record for an account ID
    pub fn player_win_lose(&self, account_id: &str) -> ApiResult<Value> {
        let id = validate_id(account_id)?;
        self.cache.fetch(
            &format!("{}/players/{}/wl", self.base_url, id),
            &format!("player_wl_{}", id),
            DEFAULT_MAX_AGE,
        )
    }

    /// Profile for an account ID
    pub fn player_profile(&self, account_id: &str) -> ApiResult<Value> {
        let id = validate_id(account_id)?;
        self.cache.fetch(
            &format!("{}/players/{}", self.base_url, id),
            &format!("player_{}", id),
            DEFAULT_MAX_AGE,
        )
    }

    /// Current statistics for every hero; takes no identifier
    pub fn hero_stats(&self) -> ApiResult<Value> {
        self.cache.fetch(
            &format!("{}/heroStats", self.base_url),
            "hero_stats",
            DEFAULT_MAX_AGE,
        )
    }

    /// Most recent matches for an account ID
    pub fn recent_matches(&self, account_id: &str) -> ApiResult<Value> {
        let id = validate_id(account_id)?;
        self.cache.fetch(
            &format!("{}/players/{}/recentMatches", self.base_url, id),
            &format!("recent_matches_{}", id),
            DEFAULT_MAX_AGE,
        )
    }

    /// Drop every cached entry and report what happened
    pub fn clear_cache(&self) -> ApiResult<String> {
        self.cache.clear()
    }
}
