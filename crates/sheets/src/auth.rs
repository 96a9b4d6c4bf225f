//! Service-account OAuth for the Google Sheets API.
//!
//! Exchanges a signed JWT assertion for a short-lived bearer token and
//! caches it until close to expiry.

use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::StoreError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Credentials for a Google service account, as found in the downloaded
/// JSON key file.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub struct TokenProvider {
    account: ServiceAccount,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(account: ServiceAccount, http: reqwest::Client) -> Self {
        Self {
            account,
            http,
            cached: Mutex::new(None),
        }
    }

    /// A bearer token valid for at least [`EXPIRY_MARGIN`] from now.
    pub async fn bearer_token(&self) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;
        if let Some(tok) = cached.as_ref() {
            if tok.expires_at > Instant::now() + EXPIRY_MARGIN {
                return Ok(tok.token.clone());
            }
        }
        let fetched = self.fetch_token().await?;
        let token = fetched.access_token.clone();
        *cached = Some(CachedToken {
            token: fetched.access_token,
            expires_at: Instant::now() + Duration::from_secs(fetched.expires_in),
        });
        tracing::debug!("Refreshed Sheets access token");
        Ok(token)
    }

    async fn fetch_token(&self) -> Result<TokenResponse, StoreError> {
        let assertion = self.signed_assertion()?;
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token exchange failed with status {status}: {body}"
            )));
        }
        Ok(response.json().await?)
    }

    fn signed_assertion(&self) -> Result<String, StoreError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| StoreError::Auth(e.to_string()))?
            .as_secs();
        let claims = Claims {
            iss: &self.account.client_email,
            scope: SCOPE,
            aud: TOKEN_URL,
            iat: now,
            exp: now + 3600,
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("bad service account key: {e}")))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StoreError::Auth(format!("jwt signing failed: {e}")))
    }
}
