//! End-to-end tests for the cache-backed OpenDota façade.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use dotastat::{ApiError, FetchCache, OpenDota};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn facade(base_url: &str, dir: &Path) -> OpenDota {
    OpenDota::new(base_url, FetchCache::at(dir))
}

/// Sample payload in the upstream `/matches/{id}` shape.
fn match_json() -> serde_json::Value {
    serde_json::json!({
        "duration": 1800,
        "radiant_win": true,
        "players": [
            {"hero_id": 14, "kills": 7, "deaths": 2, "assists": 11, "player_slot": 0,
             "gold_per_min": 512, "xp_per_min": 633},
            {"hero_id": 26, "kills": 1, "deaths": 9, "assists": 4, "player_slot": 128,
             "gold_per_min": 287, "xp_per_min": 301}
        ]
    })
}

/// Push a cache entry's mtime into the past to simulate elapsed time.
fn age_entry(path: &Path, secs: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(secs))
        .unwrap();
}

#[tokio::test]
async fn second_fetch_within_window_makes_no_network_call() {
    let mock_server = MockServer::start().await;

    // expect(1): a second transport call would fail the test on drop
    Mock::given(method("GET"))
        .and(path("/matches/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(match_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let (first, second) = tokio::task::spawn_blocking(move || {
        let api = facade(&base_url, &dir);
        (api.match_details("123"), api.match_details("123"))
    })
    .await
    .unwrap();

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, match_json());
    assert_eq!(first, second);
}

#[tokio::test]
async fn expired_entry_is_refetched_and_overwritten() {
    let mock_server = MockServer::start().await;

    // First response, consumed exactly once
    Mock::given(method("GET"))
        .and(path("/players/9/wl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"win": 1, "lose": 1})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    // Response after the entry went stale
    Mock::given(method("GET"))
        .and(path("/players/9/wl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"win": 2, "lose": 1})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();
    let entry = temp_dir.path().join("opendota_player_wl_9.json");

    let base = base_url.clone();
    let d = dir.clone();
    let first = tokio::task::spawn_blocking(move || facade(&base, &d).player_win_lose("9"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, serde_json::json!({"win": 1, "lose": 1}));
    assert!(entry.exists());

    age_entry(&entry, 90_000); // past the 86 400 s window

    let second = tokio::task::spawn_blocking(move || facade(&base_url, &dir).player_win_lose("9"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, serde_json::json!({"win": 2, "lose": 1}));

    // The entry on disk now holds the refreshed payload
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&entry).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({"win": 2, "lose": 1}));
}

#[tokio::test]
async fn invalid_identifier_touches_neither_transport_nor_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let result = tokio::task::spawn_blocking(move || facade(&base_url, &dir).player_win_lose("abc"))
        .await
        .unwrap();

    match result {
        Err(ApiError::InvalidIdentifier(id)) => assert_eq!(id, "abc"),
        other => panic!("Expected ApiError::InvalidIdentifier, got: {other:?}"),
    }
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn clear_cache_removes_entries_and_spares_neighbors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/matches/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(match_json()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let message = tokio::task::spawn_blocking(move || {
        let api = facade(&base_url, &dir);
        api.match_details("5").unwrap();
        api.hero_stats().unwrap();
        std::fs::write(dir.join("unrelated.txt"), "keep").unwrap();
        api.clear_cache()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(message, "Removed 2 cached entries.");
    assert!(!temp_dir.path().join("opendota_match_5.json").exists());
    assert!(!temp_dir.path().join("opendota_hero_stats.json").exists());
    assert!(temp_dir.path().join("unrelated.txt").exists());
}

#[tokio::test]
async fn cleared_entry_goes_back_to_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/matches/6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(match_json()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        let api = facade(&base_url, &dir);
        api.match_details("6").unwrap();
        api.clear_cache().unwrap();
        api.match_details("6").unwrap();
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn cached_payload_round_trips_deep_equal() {
    let mock_server = MockServer::start().await;

    let payload = serde_json::json!({
        "profile": {"personaname": "Dendi", "account_id": 70388657},
        "rank_tier": null,
        "mmr_estimate": {"estimate": 4321},
        "history": [[1, 2], [3, 4]]
    });

    Mock::given(method("GET"))
        .and(path("/players/70388657"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let dir: PathBuf = temp_dir.path().to_path_buf();

    let (first, second) = tokio::task::spawn_blocking(move || {
        let api = facade(&base_url, &dir);
        (
            api.player_profile("70388657").unwrap(),
            api.player_profile("70388657").unwrap(),
        )
    })
    .await
    .unwrap();

    assert_eq!(first, payload);
    assert_eq!(second, payload);
}
