use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::auth::jwt::Claims;
use crate::config::SupabaseConfig;

/// One verification key from the project's JWKS document.
#[derive(Debug, Clone, PartialEq)]
pub enum SigningKey {
    Ec {
        x: String,
        y: String,
        algorithm: Algorithm,
    },
    Rsa {
        n: String,
        e: String,
        algorithm: Algorithm,
    },
}

impl SigningKey {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SigningKey::Ec { algorithm, .. } | SigningKey::Rsa { algorithm, .. } => *algorithm,
        }
    }

    fn decoding_key(&self) -> Result<DecodingKey, String> {
        match self {
            SigningKey::Ec { x, y, .. } => DecodingKey::from_ec_components(x, y),
            SigningKey::Rsa { n, e, .. } => DecodingKey::from_rsa_components(n, e),
        }
        .map_err(|e| format!("Failed to create decoding key: {e}"))
    }
}

/// Verifies Supabase access tokens.
///
/// Asymmetric tokens (ES256/ES384/RS256) are checked against the keys the
/// project publishes at `/auth/v1/.well-known/jwks.json`, cached by `kid`
/// for an hour. HS256 tokens are only accepted when the legacy JWT secret
/// is configured.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Cache<String, SigningKey>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
    secret: Option<String>,
}

impl TokenVerifier {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            keys: Cache::builder()
                .time_to_live(Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
            jwks_url: format!("{}/auth/v1/.well-known/jwks.json", config.url),
            client: reqwest::Client::new(),
            anon_key: config.anon_key.clone(),
            secret: config.jwt_secret.clone(),
        }
    }

    /// Validate `token` and return its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, String> {
        let header = decode_header(token).map_err(|e| format!("Failed to decode header: {e}"))?;

        match (header.alg, self.secret.as_deref()) {
            (Algorithm::HS256, Some(secret)) => verify_hs256(token, secret),
            (Algorithm::HS256, None) => Err("HS256 tokens require SUPABASE_JWT_SECRET".to_string()),
            (alg, _) => {
                let kid = header.kid.ok_or("No 'kid' in token header")?;
                let key = self.signing_key(&kid).await?;
                if key.algorithm() != alg {
                    return Err(format!(
                        "Token algorithm {alg:?} does not match key {kid} ({:?})",
                        key.algorithm()
                    ));
                }
                verify_with_key(token, &key)
            }
        }
    }

    async fn signing_key(&self, kid: &str) -> Result<SigningKey, String> {
        if let Some(cached) = self.keys.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let key = parse_signing_key(&jwks, kid)?;

        self.keys.insert(kid.to_string(), key.clone()).await;
        Ok(key)
    }

    async fn fetch_jwks(&self) -> Result<serde_json::Value, String> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to fetch JWKS: HTTP {status}"));
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse JWKS JSON: {e}"))
    }
}

/// Validate an HS256 token signed with the project's legacy JWT secret.
pub fn verify_hs256(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|td| td.claims)
        .map_err(|e| format!("Token validation failed: {e:?}"))
}

fn verify_with_key(token: &str, key: &SigningKey) -> Result<Claims, String> {
    let mut validation = Validation::new(key.algorithm());
    validation.validate_aud = false;

    decode::<Claims>(token, &key.decoding_key()?, &validation)
        .map(|td| td.claims)
        .map_err(|e| format!("Token validation failed: {e:?}"))
}

/// Find the key with `kid` in a JWKS document.
pub fn parse_signing_key(jwks: &serde_json::Value, kid: &str) -> Result<SigningKey, String> {
    let keys = jwks["keys"].as_array().ok_or("No keys in JWKS")?;

    let key = keys
        .iter()
        .find(|k| k["kid"].as_str() == Some(kid))
        .ok_or(format!("Key with kid={kid} not found in JWKS"))?;

    let field = |name: &str| {
        key[name]
            .as_str()
            .map(str::to_string)
            .ok_or(format!("Missing '{name}' in JWK {kid}"))
    };

    match key["kty"].as_str() {
        Some("EC") => {
            let algorithm = match key["alg"].as_str() {
                Some("ES384") => Algorithm::ES384,
                _ => Algorithm::ES256,
            };
            Ok(SigningKey::Ec {
                x: field("x")?,
                y: field("y")?,
                algorithm,
            })
        }
        Some("RSA") => {
            let algorithm = match key["alg"].as_str() {
                Some("RS384") => Algorithm::RS384,
                Some("RS512") => Algorithm::RS512,
                _ => Algorithm::RS256,
            };
            Ok(SigningKey::Rsa {
                n: field("n")?,
                e: field("e")?,
                algorithm,
            })
        }
        other => Err(format!("Unsupported key type {other:?} for kid={kid}")),
    }
}
