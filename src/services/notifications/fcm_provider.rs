//! Firebase Cloud Messaging (HTTP v1) provider.
//!
//! Access tokens come from the Google OAuth2 JWT-bearer flow: a service
//! account signs an RS256 assertion which is exchanged for a short-lived
//! bearer token. Tokens are cached until shortly before they expire.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::credentials::ServiceAccountKey;
use super::provider::{ProviderError, PushProvider};
use crate::config::settings::FirebaseConfig;
use crate::models::OutboundMessage;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Lifetime requested for signed assertions
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Cached tokens are refreshed this long before they expire
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Error body of the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Error envelope of Google APIs: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: &'a OutboundMessage,
    validate_only: bool,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    /// Unix seconds
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at > now + REFRESH_MARGIN_SECS
    }
}

/// FCM HTTP v1 push provider
pub struct FcmProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    send_url: String,
    dry_run: bool,
    http: reqwest::Client,
    token_cache: Mutex<Option<CachedToken>>,
}

impl FcmProvider {
    /// Creates a provider for the project named in `key`
    ///
    /// # Errors
    /// `ProviderError::Configuration` if the private key is not a valid RSA PEM.
    pub fn new(
        key: ServiceAccountKey,
        config: &FirebaseConfig,
        http: reqwest::Client,
    ) -> Result<Self, ProviderError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            ProviderError::Configuration {
                message: format!("Invalid service account private key: {}", e),
            }
        })?;

        let send_url = format!(
            "{}/projects/{}/messages:send",
            config.api_base_url.trim_end_matches('/'),
            key.project_id
        );

        Ok(Self {
            key,
            encoding_key,
            send_url,
            dry_run: config.dry_run,
            http,
            token_cache: Mutex::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.key.project_id
    }

    fn sign_assertion(&self, now: i64) -> Result<String, ProviderError> {
        let claims = JwtClaims {
            iss: &self.key.client_email,
            sub: &self.key.client_email,
            scope: FCM_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key).map_err(|e| ProviderError::Authentication {
            message: format!("Failed to sign token assertion: {}", e),
        })
    }

    /// Returns a cached access token or mints a new one.
    ///
    /// The cache lock is held while minting so concurrent callers wait for a
    /// single exchange.
    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cache = self.token_cache.lock().await;
        let now = jiff::Timestamp::now().as_second();

        if let Some(cached) = cache.as_ref()
            && cached.is_fresh(now)
        {
            return Ok(cached.access_token.clone());
        }

        let minted = self.mint_token(now).await?;
        let access_token = minted.access_token.clone();
        *cache = Some(minted);
        Ok(access_token)
    }

    async fn mint_token(&self, now: i64) -> Result<CachedToken, ProviderError> {
        let assertion = self.sign_assertion(now)?;

        tracing::debug!(token_uri = %self.key.token_uri, "Requesting FCM access token");

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("Token request failed with status {}", status.as_u16()),
            };
            tracing::warn!(status = status.as_u16(), error = %message, "FCM token exchange failed");
            return Err(ProviderError::Authentication { message });
        }

        let token: GoogleTokenResponse = response.json().await?;
        tracing::debug!(expires_in = token.expires_in, "FCM access token minted");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }

    async fn invalidate_token(&self) {
        *self.token_cache.lock().await = None;
    }
}

/// Turn a non-2xx FCM response into a `ProviderError`.
fn rejection(status: u16, body: &str) -> ProviderError {
    let message = match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => {
            if let Some(code) = envelope.error.status.as_deref() {
                tracing::debug!(status = code, "FCM error status");
            }
            envelope.error.message
        }
        Err(_) if body.trim().is_empty() => format!("FCM request failed with status {}", status),
        Err(_) => body.trim().to_string(),
    };
    ProviderError::Rejected { status, message }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        let access_token = self.access_token().await?;

        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(&access_token)
            .json(&SendRequest {
                message,
                validate_only: self.dry_run,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response.json().await?;
            return Ok(body.name);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
        }
        let body = response.text().await.unwrap_or_default();
        Err(rejection(status.as_u16(), &body))
    }

    fn name(&self) -> &'static str {
        "fcm"
    }

    /// Checks that the credential can sign an assertion. Does not touch the network.
    async fn validate_config(&self) -> Result<(), ProviderError> {
        if self.key.project_id.trim().is_empty() {
            return Err(ProviderError::Configuration {
                message: "Firebase project id is empty".to_string(),
            });
        }
        self.sign_assertion(jiff::Timestamp::now().as_second())
            .map(|_| ())
    }
}
