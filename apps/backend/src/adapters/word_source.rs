//! Word source: supplies the secret word for a new session.
//!
//! `fetch` never fails. Any transport, status or decode problem, or an
//! answer that is not a lowercase word of the requested length, yields
//! `FALLBACK_WORD` so session creation is never blocked.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

pub const FALLBACK_WORD: &str = "apple";

pub const DEFAULT_WORD_API_URL: &str = "https://random-word-api.herokuapp.com/word";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch(&self, length: usize) -> String;
}

/// Random-word HTTP API answering `GET {url}?length=N` with `["word"]`.
pub struct HttpWordSource {
    client: Client,
    url: String,
}

impl HttpWordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    async fn try_fetch(&self, length: usize) -> Result<Vec<String>, reqwest::Error> {
        self.client
            .get(&self.url)
            .query(&[("length", length)])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<String>>()
            .await
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch(&self, length: usize) -> String {
        match self.try_fetch(length).await {
            Ok(words) => pick_valid(words, length),
            Err(err) => {
                warn!(error = %err, length, "Word API failed, using fallback word");
                FALLBACK_WORD.to_string()
            }
        }
    }
}

/// Take the first answer if it is usable, otherwise the fallback word.
fn pick_valid(words: Vec<String>, length: usize) -> String {
    match words.into_iter().next() {
        Some(word) if is_usable(&word, length) => word,
        Some(word) => {
            warn!(word = %word, length, "Word API returned unusable word, using fallback word");
            FALLBACK_WORD.to_string()
        }
        None => {
            warn!(length, "Word API returned no words, using fallback word");
            FALLBACK_WORD.to_string()
        }
    }
}

fn is_usable(word: &str, length: usize) -> bool {
    !word.is_empty() && word.len() == length && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Always answers with the same word; for tests and offline runs.
pub struct FixedWordSource {
    word: String,
}

impl FixedWordSource {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

#[async_trait]
impl WordSource for FixedWordSource {
    async fn fetch(&self, _length: usize) -> String {
        self.word.clone()
    }
}
