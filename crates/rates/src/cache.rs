//! Process-wide rate cache with TTL expiry and request coalescing.
//!
//! The cache sits between the calculation core and a [`RateProvider`].
//! Fresh entries are served without network access; a stale entry is
//! refreshed by at most one in-flight fetch per pair while concurrent
//! readers keep getting the stale value (stale-while-revalidate). When
//! the provider fails, the last cached rate is served regardless of
//! staleness; with no cached value the caller gets `RateUnavailable`
//! and is expected to degrade.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, error, warn};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::RateError;
use crate::models::{ExchangeRate, HistoricalExchangeRate, SymbolSearchResult};
use crate::provider::RateProvider;

/// Cache tuning knobs. Plain data so hosts can deserialize it from
/// their own configuration source.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateCacheConfig {
    /// How long a fetched rate is served without hitting the provider.
    pub ttl: Duration,
    /// Chunk size, in days, for lazy historical fetches.
    pub history_chunk_days: i64,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            history_chunk_days: 90,
        }
    }
}

/// Cache-facing contract consumed by the calculation core.
///
/// An explicit, injectable component rather than hidden global state so
/// tests can substitute a deterministic fake.
#[async_trait]
pub trait RateService: Send + Sync {
    /// Latest rate for a pair. Identity pairs return rate 1 without any
    /// provider call.
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError>;

    /// Lazy, finite, non-restartable sequence of historical rates in
    /// ascending date order. Days missing upstream are absent.
    fn historical_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxStream<'static, Result<HistoricalExchangeRate, RateError>>;

    /// Symbol search passthrough.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>, RateError>;
}

type PairKey = (String, String);

#[derive(Clone)]
struct CachedRate {
    rate: ExchangeRate,
    fetched_at: Instant,
}

/// TTL cache over a [`RateProvider`], keyed by currency pair.
pub struct RateCache {
    provider: Arc<dyn RateProvider>,
    config: RateCacheConfig,
    entries: DashMap<PairKey, CachedRate>,
    in_flight: DashMap<PairKey, Arc<Mutex<()>>>,
}

impl RateCache {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self::with_config(provider, RateCacheConfig::default())
    }

    pub fn with_config(provider: Arc<dyn RateProvider>, config: RateCacheConfig) -> Self {
        Self {
            provider,
            config,
            entries: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    fn fresh_entry(&self, key: &PairKey) -> Option<ExchangeRate> {
        self.entries.get(key).and_then(|entry| {
            if entry.fetched_at.elapsed() <= self.config.ttl {
                Some(entry.rate.clone())
            } else {
                None
            }
        })
    }

    fn any_entry(&self, key: &PairKey) -> Option<ExchangeRate> {
        self.entries.get(key).map(|entry| entry.rate.clone())
    }

    /// Per-pair fetch lock. The guard must never be held across a
    /// `DashMap` reference, only across the provider call.
    fn fetch_lock(&self, key: &PairKey) -> Arc<Mutex<()>> {
        let entry = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    async fn refresh(&self, from: &str, to: &str, key: &PairKey) -> Result<ExchangeRate, RateError> {
        let fetched = self.provider.get_latest_rate(from, to).await?;
        debug!(
            "Refreshed rate {}/{} = {} from {}",
            from,
            to,
            fetched.rate,
            self.provider.id()
        );
        self.entries.insert(
            key.clone(),
            CachedRate {
                rate: fetched.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(fetched)
    }
}

#[async_trait]
impl RateService for RateCache {
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError> {
        if from == to {
            return Ok(ExchangeRate::identity(from));
        }

        let key: PairKey = (from.to_string(), to.to_string());

        if let Some(rate) = self.fresh_entry(&key) {
            return Ok(rate);
        }

        let lock = self.fetch_lock(&key);

        match self.any_entry(&key) {
            Some(stale) => {
                // Stale-while-revalidate: the first caller refreshes,
                // everyone else keeps the stale value without waiting.
                match lock.try_lock() {
                    Ok(_guard) => match self.refresh(from, to, &key).await {
                        Ok(fresh) => Ok(fresh),
                        Err(e) => {
                            warn!(
                                "Rate refresh failed for {}/{}, serving stale rate: {}",
                                from, to, e
                            );
                            Ok(stale)
                        }
                    },
                    Err(_) => Ok(stale),
                }
            }
            None => {
                let _guard = lock.lock().await;

                // Another caller may have completed the fetch while we
                // waited on the lock.
                if let Some(rate) = self.fresh_entry(&key) {
                    return Ok(rate);
                }

                match self.refresh(from, to, &key).await {
                    Ok(fresh) => Ok(fresh),
                    Err(e) => {
                        error!("Rate fetch failed for {}/{} with no cached fallback: {}", from, to, e);
                        if let Some(rate) = self.any_entry(&key) {
                            return Ok(rate);
                        }
                        Err(RateError::RateUnavailable {
                            from: from.to_string(),
                            to: to.to_string(),
                        })
                    }
                }
            }
        }
    }

    fn historical_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxStream<'static, Result<HistoricalExchangeRate, RateError>> {
        if from == to || start > end {
            return stream::empty().boxed();
        }

        struct Cursor {
            provider: Arc<dyn RateProvider>,
            from: String,
            to: String,
            next: NaiveDate,
            end: NaiveDate,
            chunk_days: i64,
            buffered: VecDeque<HistoricalExchangeRate>,
        }

        let cursor = Cursor {
            provider: Arc::clone(&self.provider),
            from: from.to_string(),
            to: to.to_string(),
            next: start,
            end,
            chunk_days: self.config.history_chunk_days.max(1),
            buffered: VecDeque::new(),
        };

        stream::try_unfold(cursor, |mut state| async move {
            loop {
                if let Some(item) = state.buffered.pop_front() {
                    return Ok(Some((item, state)));
                }
                if state.next > state.end {
                    return Ok(None);
                }

                let chunk_end = std::cmp::min(
                    state.next + chrono::Duration::days(state.chunk_days - 1),
                    state.end,
                );
                let rates = state
                    .provider
                    .get_historical_rates(&state.from, &state.to, state.next, chunk_end)
                    .await?;
                state.buffered.extend(rates);
                state.next = chunk_end + chrono::Duration::days(1);
            }
        })
        .boxed()
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>, RateError> {
        self.provider.search_symbols(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateSource;
    use chrono::Utc;
    use futures::TryStreamExt;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Provider that counts calls and can be switched into failure mode.
    struct CountingProvider {
        rate: Decimal,
        latest_calls: AtomicUsize,
        historical_calls: AtomicUsize,
        failing: AtomicBool,
        delay: Option<Duration>,
    }

    impl CountingProvider {
        fn new(rate: Decimal) -> Self {
            Self {
                rate,
                latest_calls: AtomicUsize::new(0),
                historical_calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn latest_calls(&self) -> usize {
            self.latest_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for CountingProvider {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        async fn get_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError> {
            self.latest_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(RateError::ProviderError {
                    provider: "COUNTING".to_string(),
                    message: "down".to_string(),
                });
            }
            ExchangeRate::new(from, to, self.rate, Utc::now(), RateSource::Manual)
        }

        async fn get_historical_rates(
            &self,
            from: &str,
            to: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<HistoricalExchangeRate>, RateError> {
            self.historical_calls.fetch_add(1, Ordering::SeqCst);
            let mut rates = Vec::new();
            let mut date = start;
            while date <= end {
                rates.push(HistoricalExchangeRate {
                    from_currency: from.to_string(),
                    to_currency: to.to_string(),
                    rate: self.rate,
                    date,
                    timestamp: Utc::now(),
                    source: RateSource::Manual,
                });
                date += chrono::Duration::days(1);
            }
            Ok(rates)
        }
    }

    fn cache_with_ttl(provider: Arc<CountingProvider>, ttl: Duration) -> RateCache {
        RateCache::with_config(
            provider,
            RateCacheConfig {
                ttl,
                history_chunk_days: 90,
            },
        )
    }

    #[tokio::test]
    async fn test_identity_pair_skips_provider() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        let cache = RateCache::new(provider.clone());

        let rate = cache.get_rate("USD", "USD").await.unwrap();
        assert_eq!(rate.rate, Decimal::ONE);
        assert_eq!(rate.source, RateSource::Identity);
        assert_eq!(provider.latest_calls(), 0);
    }

    #[tokio::test]
    async fn test_fresh_hit_avoids_second_fetch() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        let cache = cache_with_ttl(provider.clone(), Duration::from_secs(60));

        let first = cache.get_rate("USD", "EUR").await.unwrap();
        let second = cache.get_rate("USD", "EUR").await.unwrap();

        assert_eq!(first.rate, second.rate);
        assert_eq!(provider.latest_calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_rate_served_when_provider_fails() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        // Zero TTL: every entry is stale immediately.
        let cache = cache_with_ttl(provider.clone(), Duration::ZERO);

        cache.get_rate("USD", "EUR").await.unwrap();
        provider.set_failing(true);

        let rate = cache.get_rate("USD", "EUR").await.unwrap();
        assert_eq!(rate.rate, dec!(0.9));
    }

    #[tokio::test]
    async fn test_unavailable_with_no_cached_value() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        provider.set_failing(true);
        let cache = RateCache::new(provider.clone());

        let result = cache.get_rate("USD", "EUR").await;
        assert!(matches!(result, Err(RateError::RateUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_coalesce() {
        let provider = Arc::new(
            CountingProvider::new(dec!(0.9)).with_delay(Duration::from_millis(50)),
        );
        let cache = Arc::new(cache_with_ttl(provider.clone(), Duration::from_secs(60)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.get_rate("USD", "EUR").await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(provider.latest_calls(), 1);
    }

    #[tokio::test]
    async fn test_historical_stream_is_chunked_and_ascending() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        let cache = RateCache::with_config(
            provider.clone(),
            RateCacheConfig {
                ttl: Duration::from_secs(60),
                history_chunk_days: 2,
            },
        );

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let rates: Vec<HistoricalExchangeRate> = cache
            .historical_rates("USD", "EUR", start, end)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(rates.len(), 5);
        assert!(rates.windows(2).all(|w| w[0].date < w[1].date));
        // 5 days in 2-day chunks: three provider round-trips.
        assert_eq!(provider.historical_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_historical_stream_identity_is_empty() {
        let provider = Arc::new(CountingProvider::new(dec!(0.9)));
        let cache = RateCache::new(provider.clone());

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let rates: Vec<HistoricalExchangeRate> = cache
            .historical_rates("USD", "USD", start, end)
            .try_collect()
            .await
            .unwrap();

        assert!(rates.is_empty());
        assert_eq!(provider.historical_calls.load(Ordering::SeqCst), 0);
    }
}
