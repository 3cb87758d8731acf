//! Google OAuth token management.
//!
//! Tokens are cached as JSON in the application data directory. A request
//! for an access token first tries the cache, then a refresh-token renewal,
//! and only as a last resort walks the user through the browser consent
//! flow, catching the redirect on a one-shot loopback listener.

use crate::api::gmail::GmailConfig;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print, msg_success};
use anyhow::Result;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TOKEN_FILE_NAME: &str = "gmail_token.json";

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/gmail.modify";

// Renew slightly early so a token never expires mid-request.
const EXPIRY_SLACK_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct TokenSet {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

pub struct Auth {
    client: Client,
    config: GmailConfig,
}

impl Auth {
    pub fn new(config: &GmailConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// A valid access token: cached, refreshed, or freshly authorized.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(tokens) = self.read_tokens() {
            if tokens.expires_at > Utc::now().timestamp() + EXPIRY_SLACK_SECS {
                return Ok(tokens.access_token);
            }
            if let Some(refresh_token) = &tokens.refresh_token {
                if let Ok(renewed) = self.refresh(refresh_token).await {
                    self.write_tokens(&renewed)?;
                    return Ok(renewed.access_token);
                }
            }
        }

        let tokens = self.authorize().await?;
        self.write_tokens(&tokens)?;
        Ok(tokens.access_token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet> {
        let response: TokenResponse = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(TokenSet {
            access_token: response.access_token,
            // Google omits the refresh token on renewals; keep the old one
            refresh_token: response.refresh_token.or_else(|| Some(refresh_token.to_string())),
            expires_at: Utc::now().timestamp() + response.expires_in,
        })
    }

    /// Runs the browser consent flow against a loopback redirect.
    async fn authorize(&self) -> Result<TokenSet> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let redirect_uri = format!("http://127.0.0.1:{}", listener.local_addr()?.port());

        let url = Url::parse_with_params(
            AUTH_ENDPOINT,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )?;
        msg_print!(Message::AuthorizeHint(url.to_string()));

        let code = Self::wait_for_code(&listener).await?;
        msg_success!(Message::AuthCodeReceived);

        let response: TokenResponse = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(TokenSet {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: Utc::now().timestamp() + response.expires_in,
        })
    }

    /// Accepts exactly one redirect request and extracts the code from it.
    async fn wait_for_code(listener: &TcpListener) -> Result<String> {
        let (mut socket, _) = listener.accept().await?;
        let mut buffer = vec![0u8; 4096];
        let read = socket.read(&mut buffer).await?;
        let request = String::from_utf8_lossy(&buffer[..read]).to_string();

        let code = Self::code_from_request(&request);

        let body = "<html><body>Authorization received. You can close this window.</body></html>";
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(reply.as_bytes()).await?;
        socket.shutdown().await?;

        code
    }

    fn code_from_request(request: &str) -> Result<String> {
        let path = request.split_whitespace().nth(1).unwrap_or("/");
        let url = Url::parse(&format!("http://127.0.0.1{}", path))?;

        if let Some((_, error)) = url.query_pairs().find(|(key, _)| key == "error") {
            msg_bail_anyhow!(Message::AuthDenied(error.to_string()));
        }
        match url.query_pairs().find(|(key, _)| key == "code") {
            Some((_, code)) => Ok(code.to_string()),
            None => msg_bail_anyhow!(Message::AuthNoCode),
        }
    }

    fn read_tokens(&self) -> Option<TokenSet> {
        let path = DataStorage::new().get_path(TOKEN_FILE_NAME).ok()?;
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn write_tokens(&self, tokens: &TokenSet) -> Result<()> {
        let path = DataStorage::new().get_path(TOKEN_FILE_NAME)?;
        fs::write(path, serde_json::to_string_pretty(tokens)?)?;
        Ok(())
    }
}
