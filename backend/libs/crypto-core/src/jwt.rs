/// Shared JWT module for MUN portal services
///
/// Session tokens are signed with RS256 (RSA with SHA-256). The portal has a
/// single issuer (the login endpoint) and validates on every `/api/v1` call.
///
/// ## Security Design
///
/// - **RS256 ONLY**: no symmetric algorithms, no algorithm negotiation
/// - **No hardcoded keys**: keys come from the environment or key files
/// - **Thread-safe**: keys are loaded once at startup, immutable thereafter
///
/// ## Usage
///
/// ```rust,no_run
/// use crypto_core::jwt;
///
/// let (private_pem, public_pem) = jwt::load_key_pair_from_env().expect("jwt keys");
/// jwt::initialize_jwt_keys(&private_pem, &public_pem).expect("init jwt");
///
/// let token = jwt::generate_access_token("0007", "delegate", "Ada Lovelace").unwrap();
/// let data = jwt::validate_token(&token).unwrap();
/// assert_eq!(data.claims.role, "delegate");
/// ```
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// A conference day; delegates stay logged in through committee sessions.
const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 12;

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Session claims issued at login
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Participant ID (delegate, chair or admin id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type, always "access"
    pub token_type: String,
    /// "delegate", "chair" or "admin"
    pub role: String,
    /// Display name ("firstname lastname")
    pub name: String,
}

/// Login response body
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Key Storage
// ============================================================================

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize signing and validation keys from PEM strings.
///
/// Can only be called once per process; later calls return an error.
pub fn initialize_jwt_keys(private_key_pem: &str, public_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA private key: {e}"))?;
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;
    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Initialize only the validation key (no token issuance).
pub fn initialize_jwt_validation_only(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Read a PEM either inline from `{var}` or from the file named by `{var}_FILE`.
fn read_pem(var: &str) -> Result<String> {
    if let Ok(pem) = std::env::var(var) {
        if !pem.trim().is_empty() {
            return Ok(pem);
        }
    }

    let file_var = format!("{var}_FILE");
    let path = std::env::var(&file_var).map_err(|_| anyhow!("{var} or {file_var} must be set"))?;
    std::fs::read_to_string(&path).map_err(|e| anyhow!("Failed to read {file_var}={path}: {e}"))
}

/// Load `(private_pem, public_pem)` from `JWT_PRIVATE_KEY_PEM[_FILE]` and
/// `JWT_PUBLIC_KEY_PEM[_FILE]`.
pub fn load_key_pair_from_env() -> Result<(String, String)> {
    let private_pem = read_pem("JWT_PRIVATE_KEY_PEM")?;
    let public_pem = read_pem("JWT_PUBLIC_KEY_PEM")?;
    Ok((private_pem, public_pem))
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY.get().ok_or_else(|| {
        anyhow!("JWT keys not initialized. Call initialize_jwt_keys() during startup.")
    })
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_jwt_keys() or initialize_jwt_validation_only() during startup."))
}

// ============================================================================
// Token Generation
// ============================================================================

/// Generate a session token for a participant.
pub fn generate_access_token(subject: &str, role: &str, name: &str) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        token_type: "access".to_string(),
        role: role.to_string(),
        name: name.to_string(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Generate the login response body for a participant.
pub fn generate_token_response(subject: &str, role: &str, name: &str) -> Result<TokenResponse> {
    Ok(TokenResponse {
        access_token: generate_access_token(subject, role, name)?,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TOKEN_EXPIRY_HOURS * 3600,
    })
}

// ============================================================================
// Token Validation
// ============================================================================

/// Validate and decode a session token.
///
/// Verifies the RS256 signature and the expiry; rejects anything else.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))?;

    if data.claims.token_type != "access" {
        return Err(anyhow!("Unexpected token type: {}", data.claims.token_type));
    }

    Ok(data)
}

// ============================================================================
// Tests
// ============================================================================
