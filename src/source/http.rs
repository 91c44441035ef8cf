use std::collections::HashMap;
use std::env;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{MenuError, Result};
use crate::models::RawDocument;
use crate::source::catalog::date_parts;
use crate::source::{
    API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_CACHE_TTL_SECS, DEFAULT_TIMEOUT_SECS, MenuSource,
    USER_AGENT,
};

/// Settings for [`HttpMenuSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub api_base: String,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpSourceConfig {
    /// API base from an explicit value, then `NUTRISLICE_API_BASE`, then the default.
    pub fn resolve_api_base(explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| env::var(API_BASE_ENV).ok())
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }
}

struct CacheEntry {
    document: RawDocument,
    expires_at: Instant,
}

/// Fetches weekly menu documents from the upstream API, caching by URL.
pub struct HttpMenuSource {
    client: Client,
    config: HttpSourceConfig,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl HttpMenuSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// `{base}/{hall}/menu-type/{meal}/{yyyy}/{mm}/{dd}/?format=json`
    pub fn build_url(&self, hall_slug: &str, meal_slug: &str, date: &str) -> String {
        let (year, month, day) = date_parts(date);
        format!(
            "{}/{}/menu-type/{}/{}/{}/{}/?format=json",
            self.config.api_base.trim_end_matches('/'),
            hall_slug,
            meal_slug,
            year,
            month,
            day
        )
    }

    fn cached(&self, url: &str) -> Option<RawDocument> {
        let cache = self.cache.lock().ok()?;
        cache
            .get(url)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.document.clone())
    }

    fn store(&self, url: String, document: RawDocument) {
        if let Ok(mut cache) = self.cache.lock() {
            let now = Instant::now();
            cache.retain(|_, entry| entry.expires_at > now);
            cache.insert(
                url,
                CacheEntry {
                    document,
                    expires_at: now + self.config.cache_ttl,
                },
            );
        }
    }
}

impl MenuSource for HttpMenuSource {
    fn fetch(&self, hall_slug: &str, meal_slug: &str, date: &str) -> Result<RawDocument> {
        let url = self.build_url(hall_slug, meal_slug, date);

        if let Some(document) = self.cached(&url) {
            debug!(%url, "menu cache hit");
            return Ok(document);
        }

        info!(%url, "fetching menu");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MenuError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let document: RawDocument = response.json()?;
        self.store(url, document.clone());
        Ok(document)
    }

    fn location(&self, hall_slug: &str, meal_slug: &str, date: &str) -> String {
        self.build_url(hall_slug, meal_slug, date)
    }
}
