use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tubely_api::auth::jwt::{JwtClaims, TOKEN_ISSUER};
use uuid::Uuid;

use super::JWT_SECRET;

pub fn token_for(user_id: Uuid) -> String {
    sign(user_id, JWT_SECRET, Duration::hours(1))
}

pub fn expired_token_for(user_id: Uuid) -> String {
    sign(user_id, JWT_SECRET, Duration::hours(-2))
}

pub fn token_signed_with(user_id: Uuid, secret: &str) -> String {
    sign(user_id, secret, Duration::hours(1))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn sign(user_id: Uuid, secret: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
