//! HTTP backend for the view model.
//!
//! Talks to the server's JSON API with a bearer session token. Status codes
//! are turned into `ClientError` without reading error bodies; the server
//! sends none.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use super::repository::PoemRepository;
use super::voice::VoiceApi;
use super::ClientError;
use crate::poem::{LikeOutcome, Poem, PoemDraft, PoemScope, User, WordCategories};
use crate::services::analysis::{AnalysisRequest, PoemAnalysis};
use crate::services::auth::SignedIn;
use crate::services::diagnostics::DiagnosticReport;
use crate::services::poems::PoemReading;
use crate::services::tts::{TtsRequest, TtsResponse};
use crate::store::MAX_PAGE_LIMIT;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(serde::Deserialize)]
struct WordsBody {
    words: Vec<String>,
}

#[derive(serde::Deserialize)]
struct VoicesBody {
    voices: Vec<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

fn json_body<T: Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

pub(crate) fn status_error(status: u16) -> ClientError {
    if status == 401 { ClientError::Unauthorized } else { ClientError::Status { status } }
}

impl HttpClient {
    /// A client for the server at `base_url`, not yet signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(transport)?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), token: None })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<reqwest::Response, ClientError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16()));
        }
        Ok(response)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        self.send(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    // -------------------------------------------------------------------------
    // Accounts
    // -------------------------------------------------------------------------

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Fails when the server is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), ClientError> {
        self.send(Method::GET, "/healthz", None).await.map(|_| ())
    }

    /// Create an account and keep its session token.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or when the server rejects the account.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        self.authenticate("/api/auth/signup", email, password).await
    }

    /// Sign in and keep the session token.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or bad credentials.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        self.authenticate("/api/auth/login", email, password).await
    }

    async fn authenticate(&mut self, path: &str, email: &str, password: &str) -> Result<User, ClientError> {
        let body = Credentials { email, password };
        let signed_in: SignedIn = self.request_json(Method::POST, path, Some(json_body(&body)?)).await?;
        self.token = Some(signed_in.token);
        Ok(signed_in.user)
    }

    /// End the session. The local token is dropped even if the server call
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the server call's error.
    pub async fn sign_out(&mut self) -> Result<(), ClientError> {
        let result = self.send(Method::POST, "/api/auth/logout", None).await.map(|_| ());
        self.token = None;
        result
    }

    /// # Errors
    ///
    /// Fails when not signed in.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.request_json(Method::GET, "/api/auth/me", None).await
    }

    // -------------------------------------------------------------------------
    // Words, poems, stickers
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// `Status { 404 }` when no record is stored.
    pub async fn word_categories(&self) -> Result<WordCategories, ClientError> {
        self.request_json(Method::GET, "/api/words/categories", None).await
    }

    /// # Errors
    ///
    /// Fails when not signed in or the record is empty.
    pub async fn put_word_categories(&self, categories: &WordCategories) -> Result<WordCategories, ClientError> {
        self.request_json(Method::PUT, "/api/words/categories", Some(json_body(categories)?))
            .await
    }

    /// One window of the feed, newest first.
    ///
    /// # Errors
    ///
    /// Fails on transport or auth errors.
    pub async fn feed_page(&self, offset: usize, limit: usize) -> Result<Vec<Poem>, ClientError> {
        self.request_json(Method::GET, &format!("/api/feed?offset={offset}&limit={limit}"), None)
            .await
    }

    /// # Errors
    ///
    /// `Status { 404 }` for unknown poems.
    pub async fn reading(&self, poem_id: Uuid) -> Result<PoemReading, ClientError> {
        self.request_json(Method::GET, &format!("/api/poems/{poem_id}/reading"), None)
            .await
    }

    /// The sticker catalog with unlock flags, as raw JSON.
    ///
    /// # Errors
    ///
    /// Fails on transport or auth errors.
    pub async fn stickers(&self) -> Result<Value, ClientError> {
        self.request_json(Method::GET, "/api/stickers", None).await
    }

    // -------------------------------------------------------------------------
    // Voice
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn voices(&self) -> Result<Vec<String>, ClientError> {
        let body: VoicesBody = self.request_json(Method::GET, "/api/voices", None).await?;
        Ok(body.voices)
    }

    /// Download stored audio by its URL.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or unknown audio.
    pub async fn fetch_audio(&self, audio_url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.http.get(audio_url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16()));
        }
        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }

    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn check_fish_audio(&self) -> Result<DiagnosticReport, ClientError> {
        self.request_json(Method::GET, "/api/debug/check-fish-audio", None).await
    }
}

#[async_trait]
impl PoemRepository for HttpClient {
    async fn word_bank(&self) -> Result<Vec<String>, ClientError> {
        let body: WordsBody = self.request_json(Method::GET, "/api/words", None).await?;
        Ok(body.words)
    }

    async fn save_poem(&self, draft: PoemDraft) -> Result<Poem, ClientError> {
        self.request_json(Method::POST, "/api/poems", Some(json_body(&draft)?))
            .await
    }

    async fn list_poems(&self, scope: PoemScope) -> Result<Vec<Poem>, ClientError> {
        let base = match scope {
            PoemScope::Mine => "/api/poems",
            PoemScope::Everyone => "/api/feed",
        };
        // Offsets can shift when poems are saved mid-walk; ids already seen are skipped.
        let mut seen = HashSet::new();
        let mut poems = Vec::new();
        let mut offset = 0;
        loop {
            let path = format!("{base}?offset={offset}&limit={MAX_PAGE_LIMIT}");
            let page: Vec<Poem> = self.request_json(Method::GET, &path, None).await?;
            let fetched = page.len();
            offset += fetched;
            poems.extend(page.into_iter().filter(|poem| seen.insert(poem.id)));
            if fetched < MAX_PAGE_LIMIT {
                return Ok(poems);
            }
        }
    }

    async fn toggle_like(&self, poem_id: Uuid) -> Result<LikeOutcome, ClientError> {
        self.request_json(Method::POST, &format!("/api/poems/{poem_id}/like"), None)
            .await
    }

    async fn like_total(&self) -> Result<i64, ClientError> {
        let catalog = self.stickers().await?;
        catalog
            .get("like_total")
            .and_then(Value::as_i64)
            .ok_or_else(|| ClientError::Decode("missing like_total".into()))
    }
}

#[async_trait]
impl VoiceApi for HttpClient {
    async fn tts(&self, request: &TtsRequest) -> Result<String, ClientError> {
        let body: TtsResponse = self.request_json(Method::POST, "/api/tts", Some(json_body(request)?))
            .await?;
        Ok(body.audio_url)
    }

    async fn analyze(&self, text: &str) -> Result<PoemAnalysis, ClientError> {
        let body = AnalysisRequest { text: text.to_owned() };
        self.request_json(Method::POST, "/api/analyze-poem", Some(json_body(&body)?))
            .await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
