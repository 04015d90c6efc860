//! JWT validation against a locally minted HS256 token.
//!
//! No running server, database or Supabase project is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use freelancebot_backend::auth::jwks::{SigningKey, TokenVerifier, parse_signing_key, verify_hs256};
use freelancebot_backend::auth::jwt::{Claims, UserMetadata};
use freelancebot_backend::config::SupabaseConfig;
use freelancebot_backend::models::profiles::UserType;

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn claims_for(sub: &str, email: &str, metadata: Option<UserMetadata>, exp_offset: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: sub.to_string(),
        exp: (now + exp_offset) as usize,
        iat: Some(now as usize),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: metadata,
    }
}

fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let metadata = UserMetadata {
        full_name: Some("Alice Smith".to_string()),
        user_type: Some(UserType::Client),
        avatar_url: Some("https://example.com/avatar.png".to_string()),
        ..Default::default()
    };
    let token = sign(
        &claims_for(&user_id.to_string(), "alice@example.com", Some(metadata), 3600),
        TEST_SECRET,
    );

    let claims = verify_hs256(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/avatar.png");
    assert_eq!(claims.user_type(), UserType::Client);
}

#[test]
fn test_expired_token_is_rejected() {
    // Well past the 60s default leeway.
    let claims = claims_for(&Uuid::new_v4().to_string(), "late@example.com", None, -300);
    let token = sign(&claims, TEST_SECRET);

    let err = verify_hs256(&token, TEST_SECRET).unwrap_err();
    assert!(err.contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let claims = claims_for(&Uuid::new_v4().to_string(), "bob@example.com", None, 3600);
    let token = sign(&claims, TEST_SECRET);

    let err = verify_hs256(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx").unwrap_err();
    assert!(err.contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(verify_hs256("not.a.valid.jwt", TEST_SECRET).is_err());
}

#[test]
fn test_claims_helpers_fall_back_without_metadata() {
    let claims = claims_for(&Uuid::new_v4().to_string(), "bare@example.com", None, 3600);

    assert_eq!(claims.user_email().unwrap(), "bare@example.com");
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
    // Accounts created outside the sign-up form default to freelancer.
    assert_eq!(claims.user_type(), UserType::Freelancer);
}

#[test]
fn test_oauth_metadata_fields_are_used_as_fallbacks() {
    let metadata = UserMetadata {
        name: Some("Carol".to_string()),
        picture: Some("https://example.com/carol.png".to_string()),
        email: Some("carol@example.com".to_string()),
        ..Default::default()
    };
    let mut claims = claims_for(&Uuid::new_v4().to_string(), "", Some(metadata), 3600);
    claims.email = None;

    assert_eq!(claims.display_name().unwrap(), "Carol");
    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/carol.png");
    assert_eq!(claims.user_email().unwrap(), "carol@example.com");
}

#[test]
fn test_non_uuid_subject_is_an_error() {
    let claims = claims_for("not-a-uuid", "x@example.com", None, 3600);
    assert!(claims.user_id().is_err());
}

fn supabase(jwt_secret: Option<&str>) -> SupabaseConfig {
    SupabaseConfig {
        url: "https://example.supabase.co".to_string(),
        project_ref: "example".to_string(),
        anon_key: "anon".to_string(),
        jwt_secret: jwt_secret.map(str::to_string),
        storage_bucket: "project-files".to_string(),
    }
}

#[tokio::test]
async fn test_verifier_accepts_hs256_with_the_project_secret() {
    let user_id = Uuid::new_v4();
    let token = sign(
        &claims_for(&user_id.to_string(), "dee@example.com", None, 3600),
        TEST_SECRET,
    );

    let claims = TokenVerifier::new(&supabase(Some(TEST_SECRET)))
        .verify(&token)
        .await
        .expect("Token should be valid");

    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[tokio::test]
async fn test_verifier_refuses_hs256_without_a_secret() {
    let token = sign(
        &claims_for(&Uuid::new_v4().to_string(), "dee@example.com", None, 3600),
        TEST_SECRET,
    );

    let err = TokenVerifier::new(&supabase(None))
        .verify(&token)
        .await
        .unwrap_err();

    assert!(err.contains("SUPABASE_JWT_SECRET"));
}

#[test]
fn test_jwks_keys_are_parsed_by_type() {
    let jwks = serde_json::json!({
        "keys": [
            { "kid": "ec-1", "kty": "EC", "alg": "ES256", "crv": "P-256", "x": "x-coord", "y": "y-coord" },
            { "kid": "rsa-1", "kty": "RSA", "alg": "RS256", "n": "modulus", "e": "AQAB" },
            { "kid": "oct-1", "kty": "oct", "k": "secret" }
        ]
    });

    assert_eq!(
        parse_signing_key(&jwks, "ec-1").unwrap(),
        SigningKey::Ec {
            x: "x-coord".to_string(),
            y: "y-coord".to_string(),
            algorithm: Algorithm::ES256,
        }
    );
    assert_eq!(
        parse_signing_key(&jwks, "rsa-1").unwrap(),
        SigningKey::Rsa {
            n: "modulus".to_string(),
            e: "AQAB".to_string(),
            algorithm: Algorithm::RS256,
        }
    );
    assert!(parse_signing_key(&jwks, "oct-1").is_err());
    assert!(parse_signing_key(&jwks, "missing").unwrap_err().contains("not found"));
}

#[test]
fn test_jwk_without_coordinates_is_rejected() {
    let jwks = serde_json::json!({ "keys": [{ "kid": "ec-2", "kty": "EC", "x": "only-x" }] });

    assert!(parse_signing_key(&jwks, "ec-2").unwrap_err().contains("'y'"));
}
