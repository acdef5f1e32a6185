//! Live news signal for an account: newest public RSS item, summarized by the LLM and
//! cached in Redis. A broken cache never fails a lookup; it only costs a refetch.

use std::borrow::Cow;
use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;
use redis::AsyncCommands;
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::signal::NewsSignal;
use crate::pulse::prompts::{NEWS_SIGNAL_PROMPT, NO_NEWS_CONTEXT};

const RSS_SEARCH_URL: &str = "https://news.google.com/rss/search";
const RSS_TIMEOUT_SECS: u64 = 15;

/// First `<item>` of an RSS document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssItem {
    pub title: String,
    pub link: Option<String>,
}

/// HTTP client for the public news search feed.
#[derive(Clone)]
pub struct NewsFeed {
    http: reqwest::Client,
}

impl NewsFeed {
    pub fn new() -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(RSS_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build RSS client: {e}")))?;
        Ok(Self { http })
    }

    /// Newest item for `company`, or `None` when the feed has no results.
    pub async fn first_item(&self, company: &str) -> Result<Option<RssItem>, AppError> {
        let url = search_url(company)?;
        let body = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Upstream(format!("News feed request failed: {e}")))?
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("News feed body unreadable: {e}")))?;
        Ok(parse_first_item(&body))
    }
}

/// Search URL sorted newest-first.
pub fn search_url(company: &str) -> Result<Url, AppError> {
    Url::parse_with_params(
        RSS_SEARCH_URL,
        &[
            ("q", company),
            ("hl", "en-US"),
            ("gl", "US"),
            ("ceid", "US:en"),
            ("scoring", "n"),
        ],
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid RSS URL: {e}")))
}

#[derive(Clone, Copy)]
enum ItemField {
    Title,
    Link,
}

/// Title and link of the first `<item>`. Items without a title are treated as absent.
pub fn parse_first_item(xml: &str) -> Option<RssItem> {
    let mut reader = Reader::from_str(xml);
    let mut in_item = false;
    let mut field: Option<ItemField> = None;
    let mut title = String::new();
    let mut link = String::new();

    loop {
        let text = match reader.read_event() {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"item" => in_item = true,
                    b"title" if in_item => field = Some(ItemField::Title),
                    b"link" if in_item => field = Some(ItemField::Link),
                    _ => {}
                }
                continue;
            }
            Ok(Event::End(e)) => {
                match e.local_name().as_ref() {
                    b"item" if in_item => break,
                    b"title" | b"link" => field = None,
                    _ => {}
                }
                continue;
            }
            // Unknown named entities are kept verbatim rather than dropping the text.
            Ok(Event::Text(e)) => e
                .unescape()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned()),
            Ok(Event::CData(e)) => String::from_utf8_lossy(&e).into_owned(),
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!("Unreadable RSS feed at byte {}: {e}", reader.buffer_position());
                return None;
            }
            _ => continue,
        };

        match field {
            Some(ItemField::Title) => title.push_str(&text),
            Some(ItemField::Link) => link.push_str(&text),
            None => {}
        }
    }

    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let link = link.trim();
    Some(RssItem {
        title: title.to_string(),
        link: (!link.is_empty()).then(|| link.to_string()),
    })
}

pub fn cache_key(company: &str) -> String {
    format!("pulse:news:{}", company.trim().to_lowercase())
}

fn build_prompt(company: &str, item: Option<&RssItem>) -> String {
    let context = item.map_or(NO_NEWS_CONTEXT, |i| i.title.as_str());
    let link = item.and_then(|i| i.link.as_deref()).unwrap_or("");
    NEWS_SIGNAL_PROMPT
        .replace("{company}", company)
        .replace("{context}", context)
        .replace("{link}", link)
}

/// Puts the feed's link back when the model dropped it.
fn with_article_link(mut signal: NewsSignal, item: Option<&RssItem>) -> NewsSignal {
    let missing = signal.link.as_deref().map_or(true, |l| l.trim().is_empty());
    if missing {
        signal.link = item.and_then(|i| i.link.clone());
    }
    signal
}

async fn read_cached(redis: &redis::Client, key: &str) -> redis::RedisResult<Option<String>> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.get(key).await
}

async fn write_cached(
    redis: &redis::Client,
    key: &str,
    payload: String,
    ttl_secs: u64,
) -> redis::RedisResult<()> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    conn.set_ex(key, payload, ttl_secs).await
}

async fn cache_get(redis: &redis::Client, key: &str) -> Option<NewsSignal> {
    match read_cached(redis, key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(signal) => Some(signal),
            Err(e) => {
                warn!("Discarding malformed cached news signal {key}: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("News cache read failed for {key}: {e}");
            None
        }
    }
}

async fn cache_put(redis: &redis::Client, key: &str, signal: &NewsSignal, ttl_secs: u64) {
    let payload = match serde_json::to_string(signal) {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to serialize news signal for cache: {e}");
            return;
        }
    };
    if let Err(e) = write_cached(redis, key, payload, ttl_secs).await {
        warn!("News cache write failed for {key}: {e}");
    }
}

/// Returns the current news signal for `company`, served from cache when fresh.
pub async fn fetch_news_signal(
    feed: &NewsFeed,
    llm: &LlmClient,
    redis: &redis::Client,
    company: &str,
    ttl_secs: u64,
) -> Result<NewsSignal, AppError> {
    let company = company.trim();
    if company.is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    let key = cache_key(company);
    if let Some(signal) = cache_get(redis, &key).await {
        debug!("News cache hit for {company}");
        return Ok(signal);
    }

    let item = feed.first_item(company).await?;
    let prompt = build_prompt(company, item.as_ref());
    let signal: NewsSignal = llm
        .call_json(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("News summarization failed: {e}")))?;
    let signal = with_article_link(signal, item.as_ref());

    info!("News signal for {company}: [{}] {}", signal.category, signal.headline);
    cache_put(redis, &key, &signal, ttl_secs).await;
    Ok(signal)
}
