//! Unit tests for the thumbnail cache facade
//!
//! Most of these run without a loader thread, so entries stay where the
//! caller left them.

use fbfsvg::thumbnail::{CacheStats, MAX_CACHE_BYTES, MAX_CACHE_ENTRIES};
use fbfsvg::{ThumbnailCache, ThumbnailState};

use crate::helpers::{cache_with_capacity, instant_renderer, wait_for_state};

#[test]
fn new_cache_is_empty() {
    let cache = ThumbnailCache::new(instant_renderer);
    assert_eq!(cache.get_entry_count(), 0);
    assert_eq!(cache.cache_size_bytes(), 0);
    assert!(!cache.has_new_ready_thumbnails());
    assert!(!cache.is_loader_running());
    assert_eq!(cache.stats(), CacheStats::default());
}

#[test]
fn default_limits_match_constants() {
    let cache = ThumbnailCache::new(instant_renderer);
    let limits = cache.limits();
    assert_eq!(limits.max_entries, MAX_CACHE_ENTRIES);
    assert_eq!(limits.max_bytes, MAX_CACHE_BYTES);
}


#[test]
fn request_without_loader_stays_pending() {
    let cache = ThumbnailCache::new(instant_renderer);
    cache.request_load("a.svg", 200.0, 200.0, 0);
    assert_eq!(cache.get_state("a.svg"), ThumbnailState::Pending);
    assert!(cache.get_thumbnail_svg("a.svg").is_none());

    let stats = cache.stats();
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.queued, 1);
}

#[test]
fn duplicate_requests_create_one_entry() {
    let cache = ThumbnailCache::new(instant_renderer);
    for priority in [50, 10, 30] {
        cache.request_load("a.svg", 200.0, 200.0, priority);
    }
    assert_eq!(cache.get_entry_count(), 1);
    assert_eq!(cache.stats().queued, 1);
}


#[test]
fn cancel_request_removes_pending_entry() {
    let cache = ThumbnailCache::new(instant_renderer);
    cache.request_load("a.svg", 200.0, 200.0, 0);
    cache.request_load("b.svg", 200.0, 200.0, 1);

    cache.cancel_request("a.svg");
    assert_eq!(cache.get_state("a.svg"), ThumbnailState::NotLoaded);
    assert_eq!(cache.get_state("b.svg"), ThumbnailState::Pending);
    assert_eq!(cache.stats().queued, 1);

    // Unknown paths are a no-op
    cache.cancel_request("missing.svg");
    assert_eq!(cache.get_entry_count(), 1);
}

#[test]
fn cancel_all_requests_drops_pending_entries() {
    let cache = ThumbnailCache::new(instant_renderer);
    for i in 0..10 {
        cache.request_load(&format!("p{i}.svg"), 100.0, 100.0, i);
    }
    cache.cancel_all_requests();
    assert_eq!(cache.get_entry_count(), 0);
    assert_eq!(cache.stats().queued, 0);
}


#[test]
fn clear_drops_everything_and_resets_flag() {
    let cache = ThumbnailCache::new(instant_renderer);
    cache.start_loader();
    cache.request_load("a.svg", 100.0, 100.0, 0);
    assert!(wait_for_state(&cache, "a.svg", ThumbnailState::Ready));
    cache.stop_loader();
    assert!(cache.has_new_ready_thumbnails());

    cache.request_load("b.svg", 100.0, 100.0, 0);
    cache.clear();

    assert_eq!(cache.get_entry_count(), 0);
    assert_eq!(cache.cache_size_bytes(), 0);
    assert!(!cache.has_new_ready_thumbnails());
    assert_eq!(cache.stats().queued, 0);
}

#[test]
fn entry_count_never_exceeds_capacity() {
    let cache = cache_with_capacity(5);
    for i in 0..20 {
        cache.request_load(&format!("p{i}.svg"), 100.0, 100.0, i);
        assert!(cache.get_entry_count() <= 5);
    }
    assert_eq!(cache.get_entry_count(), 5);
    // Evicted pending entries leave the queue too
    assert_eq!(cache.stats().queued, 5);
}


#[test]
fn ready_content_is_shared_not_copied() {
    let cache = ThumbnailCache::new(instant_renderer);
    cache.start_loader();
    cache.request_load("a.svg", 120.0, 80.0, 0);
    assert!(wait_for_state(&cache, "a.svg", ThumbnailState::Ready));

    let first = cache.get_thumbnail_svg("a.svg").unwrap();
    let second = cache.get_thumbnail_svg("a.svg").unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(first.contains(r#"width="120""#));
    assert_eq!(cache.cache_size_bytes(), first.len());
}





#[test]
fn from_config_applies_limits() {
    let config = fbfsvg::config::ThumbnailConfig {
        max_entries: 3,
        max_bytes: 4096,
        ..Default::default()
    };
    let cache = ThumbnailCache::from_config(&config);
    assert_eq!(cache.limits().max_entries, 3);
    assert_eq!(cache.limits().max_bytes, 4096);

    for i in 0..6 {
        cache.request_load(&format!("p{i}.svg"), 50.0, 50.0, i);
    }
    assert_eq!(cache.get_entry_count(), 3);
}

#[test]
fn stats_track_mixed_states() {
    let cache = ThumbnailCache::new(instant_renderer);
    cache.start_loader();
    cache.request_load("good.svg", 40.0, 40.0, 0);
    cache.request_load("bad.svg", 40.0, 40.0, 1);
    assert!(wait_for_state(&cache, "good.svg", ThumbnailState::Ready));
    assert!(wait_for_state(&cache, "bad.svg", ThumbnailState::Error));
    cache.stop_loader();
    cache.request_load("later.svg", 40.0, 40.0, 2);

    let stats = cache.stats();
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.ready, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.loading, 0);
    assert_eq!(stats.queued, 1);
    assert_eq!(stats.bytes, cache.cache_size_bytes());
    assert!(stats.bytes > 0);
}
