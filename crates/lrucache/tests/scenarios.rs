use lrucache::{Error, LruCache};

fn cache_with(capacity: usize, keys: impl IntoIterator<Item = u32>) -> LruCache<u32, u32> {
    let mut cache = LruCache::new(capacity).unwrap();
    for key in keys {
        cache.set(key, key);
    }
    cache
}

#[test]
fn zero_capacity_is_rejected() {
    let err = LruCache::<u32, u32>::new(0).unwrap_err();
    assert_eq!(err, Error::InvalidCapacity(0));
}

#[test]
fn positive_capacity_starts_empty() {
    for capacity in [1, 2, 5, 1024] {
        let cache = LruCache::<u32, u32>::new(capacity).unwrap();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), capacity);
    }
}

#[test]
fn all_keys_retrievable_within_capacity() {
    let mut cache = cache_with(10, 0..10);
    cache.set(3, 33);

    assert_eq!(cache.len(), 10);
    for key in 0..10 {
        let expected = if key == 3 { 33 } else { key };
        assert_eq!(cache.get(&key), Some(&expected));
    }
}

#[test]
fn overflow_evicts_least_recently_touched() {
    let mut cache = cache_with(3, [1, 2, 3]);
    cache.get(&1);
    cache.set(2, 22);
    cache.set(4, 4); // 3 is untouched since insertion

    assert_eq!(cache.get(&3), None);
    assert_eq!(cache.len(), 3);
}

#[test]
fn get_protects_key_from_eviction() {
    let capacity = 4;
    let mut cache = cache_with(capacity, 1..=capacity as u32);

    cache.get(&1);
    cache.set(100, 100);

    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.len(), capacity);
}

#[test]
fn reset_updates_value_and_recency() {
    let mut cache = cache_with(2, [1, 2]);
    cache.set(1, 10);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.mru_key(), Some(&1));
    assert_eq!(cache.lru_key(), Some(&2));
    assert_eq!(cache.peek(&1), Some(&10));
}

#[test]
fn repeated_get_is_stable() {
    let mut cache = cache_with(3, [1, 2, 3]);

    for _ in 0..5 {
        assert_eq!(cache.get(&2), Some(&2));
        assert_eq!(cache.len(), 3);
    }
}

#[test]
fn promoted_keys_survive_two_evictions() {
    let mut cache = cache_with(5, [1, 2, 3, 4]);

    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.get(&2), Some(&2));
    assert_eq!(cache.get(&9), None);

    cache.set(5, 5);
    cache.set(6, 6);

    assert_eq!(cache.get(&3), None);
    assert_eq!(cache.get(&4), Some(&4));
    assert_eq!(cache.len(), 5);
}

#[test]
fn resetting_key_at_capacity_shifts_victim() {
    let mut cache = cache_with(5, [1, 2, 3, 4]);
    cache.get(&1);
    cache.get(&2);
    cache.get(&9);

    cache.set(5, 5); // full
    cache.set(3, 3); // 3 is refreshed, 4 becomes LRU
    cache.set(6, 6);

    assert_eq!(cache.get(&4), None);
    let mut keys: Vec<_> = cache.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec![1, 2, 3, 5, 6]);
}

#[test]
fn eviction_emits_events_under_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("lrucache=trace"))
        .with_test_writer()
        .try_init();

    let mut cache = cache_with(2, [1, 2, 3]);
    cache.remove(&3);
    cache.clear();

    assert!(cache.is_empty());
}
