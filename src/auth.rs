//! Login and bearer-token extraction.
//!
//! Login responses are loosely shaped, so the token is looked up through an
//! ordered list of strategies ([`TOKEN_STRATEGIES`]); the first one that
//! yields a non-empty string wins.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::http::{ApiResponse, HttpClient};
use serde_json::{Value, json};
use std::fmt;
use tracing::{error, info};

pub const LOGIN_ENDPOINT: &str = "/api/login";
pub const DRY_RUN_TOKEN: &str = "dry-run-token";

/// Keys that may carry the token, checked in this order.
pub const TOKEN_KEYS: [&str; 5] = ["token", "access_token", "accessToken", "auth_token", "bearer"];

type TokenStrategy = fn(&ApiResponse) -> Option<String>;

/// Extraction strategies in evaluation order.
pub const TOKEN_STRATEGIES: &[(&str, TokenStrategy)] = &[
    ("top-level field", from_top_level),
    ("data envelope", from_data_envelope),
    ("authorization header", from_authorization_header),
];

/// Bearer token for one invocation. Never persisted, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn authorization_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.0))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            base_url: cfg.base_url().to_string(),
            email: cfg.email.clone(),
            password: cfg.password.clone(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.base_url.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(AppError::Configuration(
                "API_BASE_URL, EMAIL and PASSWORD must be set in the environment or config file"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

pub struct Authenticator<'a> {
    client: &'a HttpClient,
    credentials: Credentials,
}

impl<'a> Authenticator<'a> {
    pub fn new(client: &'a HttpClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        self.credentials.base_url.trim_end_matches('/')
    }

    /// Log in and return a fresh token.
    ///
    /// Missing credentials fail before any request is made. The login call
    /// itself goes through the client's retry policy.
    pub fn login(&self) -> AppResult<Token> {
        self.credentials.validate()?;

        let url = format!("{}{}", self.base_url(), LOGIN_ENDPOINT);
        info!(url = %url, email = %self.credentials.email, "Logging in");

        if self.client.is_dry_run() {
            info!("DRY_RUN: skipping actual login");
            return Ok(Token::new(DRY_RUN_TOKEN));
        }

        let payload = json!({
            "email": self.credentials.email,
            "password": self.credentials.password,
        });
        let resp = self.client.post_json(&url, &payload, &[])?;

        if !resp.ok {
            error!(status = %resp.status, body = %resp.body, "Login rejected");
            return Err(AppError::Authentication {
                reason: format!("login returned status {}", resp.status),
                body: resp.body,
            });
        }

        match extract_token(&resp) {
            Some(token) => {
                info!("Login successful; token obtained");
                Ok(token)
            }
            None => {
                error!(body = %resp.body, "Could not find token in login response");
                Err(AppError::Authentication {
                    reason: "no token found in login response".to_string(),
                    body: resp.body,
                })
            }
        }
    }
}

/// Run every strategy in order and return the first token found.
pub fn extract_token(resp: &ApiResponse) -> Option<Token> {
    TOKEN_STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(resp))
        .map(Token::new)
}

fn token_field(obj: &Value) -> Option<String> {
    let map = obj.as_object()?;
    TOKEN_KEYS.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn from_top_level(resp: &ApiResponse) -> Option<String> {
    token_field(&resp.json()?)
}

fn from_data_envelope(resp: &ApiResponse) -> Option<String> {
    token_field(resp.json()?.get("data")?)
}

fn from_authorization_header(resp: &ApiResponse) -> Option<String> {
    resp.header("authorization")?
        .split_whitespace()
        .last()
        .map(str::to_string)
}
