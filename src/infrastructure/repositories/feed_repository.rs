use crate::domain::news::FeedError;
use crate::domain::source::Source;
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use futures::StreamExt;
use moka::future::Cache;
use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::sync::LazyLock;
use std::time::Duration;

const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/rdf+xml, application/xml;q=0.9, text/xml;q=0.8";
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const CACHE_CAPACITY: u64 = 256;
const RESPONSE_TOO_LARGE: &str = "response too large";
const PROLOG_SNIFF_LEN: usize = 512;

static XML_ENCODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"encoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#).expect("encoding pattern is valid")
});

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Retrieves the raw XML of one feed.
///
/// Every failure comes back as a `FeedError` value so that the caller can
/// keep processing the remaining sources.
#[async_trait]
pub trait FeedRepository: Send + Sync {
    async fn fetch(&self, source: &Source, timeout: Duration) -> Result<String, FeedError>;
}

/// HTTP implementation with an optional short-lived cache of feed bodies
pub struct HttpFeedRepository {
    http_client: reqwest::Client,
    user_agent: String,
    cache: Option<Cache<String, String>>,
    max_body_size: usize,
}

impl HttpFeedRepository {
    pub fn new(user_agent: String, cache_ttl: Duration) -> Self {
        // Only successful bodies are ever inserted
        let cache = if cache_ttl.is_zero() {
            None
        } else {
            Some(
                Cache::builder()
                    .max_capacity(CACHE_CAPACITY)
                    .time_to_live(cache_ttl)
                    .build(),
            )
        };

        Self {
            http_client: reqwest::Client::new(),
            user_agent,
            cache,
            max_body_size: MAX_FEED_SIZE,
        }
    }

    /// Override the body size cap
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    async fn fetch_uncached(&self, url: &str) -> Result<String, FeedError> {
        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, FEED_ACCEPT)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let http_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_param)
            .map(str::to_string);

        let bytes = read_limited_bytes(response, self.max_body_size).await?;

        Ok(decode_body(&bytes, http_charset.as_deref()))
    }
}

/// Read the body chunk by chunk, failing as soon as it exceeds `limit`
async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, FeedError> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(FeedError::Network(RESPONSE_TOO_LARGE.to_string()));
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(classify_error)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FeedError::Network(RESPONSE_TOO_LARGE.to_string()));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').map(str::trim).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Encoding named in the `<?xml ... encoding="..."?>` prolog
fn prolog_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(PROLOG_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head);
    let prolog = &head[head.find("<?xml")?..];
    let prolog = &prolog[..prolog.find("?>")?];
    let caps = XML_ENCODING.captures(prolog)?;
    // A prolog readable as ASCII rules out UTF-16 without a BOM
    Encoding::for_label(caps.get(1)?.as_str().as_bytes()).filter(|e| e.is_ascii_compatible())
}

/// Byte order mark, then HTTP charset, then XML prolog, then UTF-8
fn decode_body(bytes: &[u8], http_charset: Option<&str>) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| http_charset.and_then(|label| Encoding::for_label(label.as_bytes())))
        .or_else(|| prolog_encoding(bytes))
        .unwrap_or(UTF_8);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "Feed body contained undecodable bytes");
    }
    text.into_owned()
}

fn classify_error(err: reqwest::Error) -> FeedError {
    if err.is_timeout() {
        FeedError::Timeout
    } else {
        FeedError::Network(err.to_string())
    }
}

#[async_trait]
impl FeedRepository for HttpFeedRepository {
    async fn fetch(&self, source: &Source, timeout: Duration) -> Result<String, FeedError> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&source.url).await {
                tracing::debug!(source = %source.name, "Feed body served from cache");
                return Ok(body);
            }
        }

        tracing::debug!(source = %source.name, url = %source.url, "Fetching feed");

        // One deadline covers connect, headers and body
        let body = tokio::time::timeout(timeout, self.fetch_uncached(&source.url))
            .await
            .map_err(|_| FeedError::Timeout)??;

        if let Some(cache) = &self.cache {
            cache.insert(source.url.clone(), body.clone()).await;
        }

        Ok(body)
    }
}
