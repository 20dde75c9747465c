#![allow(dead_code)]

//! In-process stand-in for Spotify's accounts service and Web API.
//!
//! Replies are scripted per endpoint family and handed out in order; every
//! request is recorded so tests can count upstream calls and inspect what was
//! sent.

use std::{
    collections::{HashMap, VecDeque},
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::State,
    http::{
        HeaderMap, HeaderValue, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
    },
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use sporlgate::{
    config::{Config, RetryConfig, SpotifyConfig},
    server::AppState,
    types::Credential,
};
use tokio::net::TcpListener;

pub const FRONTEND_URL: &str = "http://frontend.test";
pub const AUTH_URL: &str = "http://accounts.test/authorize";
pub const CLIENT_ID: &str = "client";
pub const CLIENT_SECRET: &str = "secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:8080/auth/spotify/callback";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
    pub raw: Option<String>,
    pub retry_after: Option<String>,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            raw: None,
            retry_after: None,
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self::ok(json!({ "error": { "status": status, "message": "scripted" } })).with_status(status)
    }

    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        let mut reply = Self::status(429);
        reply.retry_after = retry_after.map(String::from);
        reply
    }

    pub fn raw(status: u16, body: &str) -> Self {
        let mut reply = Self::ok(Value::Null).with_status(status);
        reply.raw = Some(body.to_string());
        reply
    }

    pub fn token(access: &str, refresh: Option<&str>) -> Self {
        let mut body = json!({
            "access_token": access,
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "user-read-private user-top-read",
        });
        if let Some(refresh) = refresh {
            body["refresh_token"] = json!(refresh);
        }
        Self::ok(body)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

#[derive(Default)]
struct Recorder {
    catalog_replies: Mutex<VecDeque<Reply>>,
    token_replies: Mutex<VecDeque<Reply>>,
    catalog_requests: Mutex<Vec<CatalogRequest>>,
    token_requests: Mutex<Vec<TokenRequest>>,
}

pub struct FakeSpotify {
    pub addr: SocketAddr,
    recorder: Arc<Recorder>,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let recorder = Arc::new(Recorder::default());
        let app = Router::new()
            .route("/api/token", post(token))
            .fallback(catalog)
            .with_state(recorder.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorder }
    }

    pub fn push_catalog(&self, reply: Reply) {
        self.recorder.catalog_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_token(&self, reply: Reply) {
        self.recorder.token_replies.lock().unwrap().push_back(reply);
    }

    pub fn catalog_requests(&self) -> Vec<CatalogRequest> {
        self.recorder.catalog_requests.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<TokenRequest> {
        self.recorder.token_requests.lock().unwrap().clone()
    }

    pub fn catalog_hits(&self) -> usize {
        self.recorder.catalog_requests.lock().unwrap().len()
    }

    pub fn token_hits(&self) -> usize {
        self.recorder.token_requests.lock().unwrap().len()
    }

    /// Configuration pointing at this fake with zero retry delays.
    pub fn config(&self) -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            frontend_url: FRONTEND_URL.to_string(),
            spotify: SpotifyConfig {
                client_id: CLIENT_ID.to_string(),
                client_secret: CLIENT_SECRET.to_string(),
                redirect_uri: REDIRECT_URI.to_string(),
                scope: "user-read-private user-top-read".to_string(),
                auth_url: AUTH_URL.to_string(),
                token_url: format!("http://{}/api/token", self.addr),
                api_url: format!("http://{}/v1", self.addr),
            },
            retry: RetryConfig {
                max_attempts: 3,
                default_delay_seconds: 0,
                max_delay_seconds: 0,
            },
            request_timeout: Duration::from_secs(5),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.config()).unwrap()
    }
}

pub fn credential(access: &str, refresh: Option<&str>) -> Credential {
    Credential {
        access_token: access.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: refresh.map(String::from),
        expires_in: 3600,
        scope: "user-read-private user-top-read".to_string(),
        obtained_at: 1_700_000_000,
    }
}

async fn catalog(State(recorder): State<Arc<Recorder>>, uri: Uri, headers: HeaderMap) -> Response {
    recorder.catalog_requests.lock().unwrap().push(CatalogRequest {
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        authorization: header(&headers),
    });

    let reply = recorder.catalog_replies.lock().unwrap().pop_front();
    respond(reply).await
}

async fn token(
    State(recorder): State<Arc<Recorder>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    recorder.token_requests.lock().unwrap().push(TokenRequest {
        authorization: header(&headers),
        form,
    });

    let reply = recorder.token_replies.lock().unwrap().pop_front();
    respond(reply).await
}

fn header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn respond(reply: Option<Reply>) -> Response {
    let reply = reply.unwrap_or_else(|| Reply::status(500));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap();
    let mut response = match reply.raw {
        Some(raw) => (status, [(CONTENT_TYPE, "application/json")], raw).into_response(),
        None => (status, Json(reply.body)).into_response(),
    };

    if let Some(retry_after) = reply.retry_after {
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from_str(&retry_after).unwrap());
    }

    response
}
