// utils/token.rs
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorMessage, HttpError},
    models::usermodel::User,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub iat: usize,
    pub exp: usize,
}

/// Issues a signed token carrying the user's identity claims. `sub` is
/// the primary key, which the auth middleware uses to reload the user.
pub fn create_token(
    user: &User,
    secret: &[u8],
    expires_in_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user.id.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.to_str().to_string(),
        department: user.department_id.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(expires_in_minutes)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<String, HttpError> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(HttpError::new(
            ErrorMessage::InvalidToken.to_string(),
            StatusCode::UNAUTHORIZED,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserRole;

    fn test_user() -> User {
        User {
            id: "1".to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            email: "admin@nexdesk.com".to_string(),
            username: "admin".to_string(),
            password: "encrypted".to_string(),
            is_active: true,
            role: UserRole::Admin,
            department_id: "1".to_string(),
            user_id: "USR001".to_string(),
            created_by: "System".to_string(),
            created_time: Utc::now(),
            updated_time: Utc::now(),
        }
    }

    #[test]
    fn create_then_decode_returns_subject() {
        let user = test_user();
        let secret = b"my_ultra_secure_jwt_secret_key";

        let token = create_token(&user, secret, 60).unwrap();
        let subject = decode_token(token, secret).unwrap();

        assert_eq!(subject, "1");
    }

    #[test]
    fn create_token_rejects_empty_subject() {
        let mut user = test_user();
        user.id = String::new();

        let result = create_token(&user, b"secret", 60);

        assert!(result.is_err());
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let user = test_user();

        let token = create_token(&user, b"first-secret", 60).unwrap();
        let result = decode_token(token, b"other-secret");

        assert!(result.is_err());
    }

    #[test]
    fn decode_rejects_expired_token() {
        let user = test_user();
        let secret = b"my_ultra_secure_jwt_secret_key";

        let token = create_token(&user, secret, -5).unwrap();
        let result = decode_token(token, secret);

        assert!(result.is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = decode_token("not.a.token", b"secret");

        assert!(result.is_err());
    }
}
