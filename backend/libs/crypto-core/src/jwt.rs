/// Shared JWT module for Orbit services
///
/// Tokens are HS256, signed with a secret shared by the deployment
/// (`JWT_SECRET`, base64-encoded). Only identity-service issues tokens;
/// every service can validate them.
///
/// Key material is derived lazily, exactly once, behind a `OnceCell`:
/// the first caller pays the base64 decode, every later caller reads the
/// immutable keys. Services that want to fail fast at startup can call
/// `initialize_keys` themselves.
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Environment variable holding the base64-encoded HMAC secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// JWT claims carried by Orbit access tokens.
///
/// The subject is the numeric user id rendered as a string; the email
/// claim mirrors the account's login email.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id as a decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Email address of the account
    pub email: String,
}

struct HmacKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl HmacKeys {
    fn derive(secret_base64: &str) -> Result<Self> {
        if secret_base64.trim().is_empty() {
            return Err(anyhow!("JWT secret is empty"));
        }

        let key_bytes = BASE64
            .decode(secret_base64.trim())
            .map_err(|e| anyhow!("JWT secret is not valid base64: {e}"))?;

        // HS256 wants at least 256 bits of key material
        if key_bytes.len() < 32 {
            tracing::warn!(
                "JWT secret decodes to {} bytes; fewer than 32 is weak for HS256",
                key_bytes.len()
            );
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(&key_bytes),
            decoding: DecodingKey::from_secret(&key_bytes),
        })
    }
}

static HMAC_KEYS: OnceCell<HmacKeys> = OnceCell::new();

/// Derive and install key material from an explicit secret.
///
/// Returns an error if keys were already initialized with a different call.
pub fn initialize_keys(secret_base64: &str) -> Result<()> {
    let keys = HmacKeys::derive(secret_base64)?;
    HMAC_KEYS
        .set(keys)
        .map_err(|_| anyhow!("JWT keys already initialized"))
}

fn keys() -> Result<&'static HmacKeys> {
    HMAC_KEYS.get_or_try_init(|| {
        let secret = std::env::var(JWT_SECRET_ENV)
            .map_err(|_| anyhow!("{JWT_SECRET_ENV} is not set and JWT keys were never initialized"))?;
        HmacKeys::derive(&secret)
    })
}

/// Generate an access token for a user.
pub fn generate_access_token(user_id: i64, email: &str) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        email: email.to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, &keys()?.encoding)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Validate a token's signature and expiry and return its claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    decode::<Claims>(token, &keys()?.decoding, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

/// Extract the numeric user id from a validated token.
pub fn get_user_id_from_token(token: &str) -> Result<i64> {
    let token_data = validate_token(token)?;
    token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|e| anyhow!("Invalid user id in token subject: {e}"))
}

/// Extract the email claim from a validated token.
pub fn get_email_from_token(token: &str) -> Result<String> {
    let token_data = validate_token(token)?;
    Ok(token_data.claims.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64 of a 44-byte test secret - FOR TESTING ONLY
    const TEST_SECRET: &str =
        "c2VjcmV0LWtleS1mb3ItdW5pdC10ZXN0cy1vbmx5LW5ldmVyLXByb2QtMDE=";

    fn init_test_keys() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            initialize_keys(TEST_SECRET).expect("Failed to initialize test keys");
        });
    }

    #[test]
    fn generates_well_formed_token() {
        init_test_keys();

        let token = generate_access_token(7, "user@example.com").unwrap();
        assert_eq!(token.matches('.').count(), 2);
    }

    #[test]
    fn round_trips_claims() {
        init_test_keys();

        let token = generate_access_token(42, "admin@example.com").unwrap();
        let data = validate_token(&token).unwrap();

        assert_eq!(data.claims.sub, "42");
        assert_eq!(data.claims.email, "admin@example.com");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn rejects_garbage_token() {
        init_test_keys();

        assert!(validate_token("not.a.token").is_err());
    }

    #[test]
    fn rejects_tampered_token() {
        init_test_keys();

        let token = generate_access_token(7, "user@example.com").unwrap();
        // Flip the last signature character
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn extracts_numeric_user_id() {
        init_test_keys();

        let token = generate_access_token(1234, "user@example.com").unwrap();
        assert_eq!(get_user_id_from_token(&token).unwrap(), 1234);
    }

    #[test]
    fn second_initialize_fails() {
        init_test_keys();

        assert!(initialize_keys(TEST_SECRET).is_err());
    }
}
