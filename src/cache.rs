use crate::classifier::ContentClassifier;
use crate::config::CacheConfig;
use crate::content::ParsedContent;
use crate::safety::{SecurityAnalysis, UrlSafetyChecker};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub timestamp: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            timestamp: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.timestamp.elapsed() > self.ttl
    }
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    insertion_order: VecDeque<String>,
    inserts_since_cleanup: usize,
}

/// Bounded memo table with a time-to-live, evicting the oldest insertion first.
///
/// Keys are normalized by trimming so that inputs the engines treat alike
/// share an entry. Results are value-equal whether they come from the cache
/// or not.
pub struct AnalysisCache<V> {
    state: Mutex<CacheState<V>>,
    max_entries: usize,
    ttl: Duration,
    cleanup_interval: usize,
}

impl<V: Clone> AnalysisCache<V> {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self::with_cleanup_interval(max_entries, ttl, 25)
    }

    pub fn with_cleanup_interval(max_entries: usize, ttl: Duration, cleanup_interval: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
                inserts_since_cleanup: 0,
            }),
            max_entries: max_entries.max(1),
            ttl,
            cleanup_interval: cleanup_interval.max(1),
        }
    }

    fn normalize(key: &str) -> &str {
        key.trim()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let key = Self::normalize(key);
        let mut state = self.state.lock().ok()?;

        let expired = match state.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Cache hit for {:?}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            state.insertion_order.retain(|k| k != key);
        }
        None
    }

    pub fn insert(&self, key: &str, value: V) {
        let key = Self::normalize(key).to_string();
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => {
                log::warn!("Cache lock poisoned, skipping insert");
                return;
            }
        };

        if state.entries.contains_key(&key) {
            state.insertion_order.retain(|k| k != &key);
        }

        while state.entries.len() >= self.max_entries && !state.entries.contains_key(&key) {
            match state.insertion_order.pop_front() {
                Some(oldest) => {
                    log::debug!("Evicting oldest cache entry {:?}", oldest);
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }

        state.insertion_order.push_back(key.clone());
        state.entries.insert(key, CacheEntry::new(value, self.ttl));

        state.inserts_since_cleanup += 1;
        if state.inserts_since_cleanup >= self.cleanup_interval {
            state.inserts_since_cleanup = 0;
            let CacheState {
                entries,
                insertion_order,
                ..
            } = &mut *state;
            entries.retain(|_, entry| !entry.is_expired());
            insertion_order.retain(|k| entries.contains_key(k));
        }
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.clear();
            state.insertion_order.clear();
            state.inserts_since_cleanup = 0;
        }
    }
}

/// Classifier and URL checker with optional memoization in front of each.
pub struct CachedInspector {
    classifier: ContentClassifier,
    checker: UrlSafetyChecker,
    parse_cache: Option<AnalysisCache<ParsedContent>>,
    safety_cache: Option<AnalysisCache<SecurityAnalysis>>,
}

impl CachedInspector {
    pub fn new(
        classifier: ContentClassifier,
        checker: UrlSafetyChecker,
        cache: &CacheConfig,
    ) -> Self {
        let (parse_cache, safety_cache) = if cache.enabled {
            let ttl = Duration::from_secs(cache.ttl_seconds);
            (
                Some(AnalysisCache::with_cleanup_interval(
                    cache.max_entries,
                    ttl,
                    cache.cleanup_interval,
                )),
                Some(AnalysisCache::with_cleanup_interval(
                    cache.max_entries,
                    ttl,
                    cache.cleanup_interval,
                )),
            )
        } else {
            (None, None)
        };

        Self {
            classifier,
            checker,
            parse_cache,
            safety_cache,
        }
    }

    pub fn classify(&self, raw: &str) -> ParsedContent {
        match &self.parse_cache {
            Some(cache) => cache.get_or_insert_with(raw, || self.classifier.classify(raw)),
            None => self.classifier.classify(raw),
        }
    }

    pub fn check_url(&self, url: &str) -> SecurityAnalysis {
        match &self.safety_cache {
            Some(cache) => cache.get_or_insert_with(url, || self.checker.check(url)),
            None => self.checker.check(url),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.parse_cache.as_ref().map_or(0, |c| c.len())
            + self.safety_cache.as_ref().map_or(0, |c| c.len())
    }
}
