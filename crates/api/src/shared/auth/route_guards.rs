use crate::error::GatherError;
use actix_web::HttpRequest;
use gather_notifier_domain::ID;
use gather_notifier_infra::GatherContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of the session tokens issued by the web application
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (as UTC timestamp in seconds)
    pub exp: usize,
    /// Id of the user the token was issued to
    pub sub: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .trim_start_matches("Bearer")
        .trim_start_matches("bearer")
        .trim()
        .to_string()
}

fn decode_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Tokens of the application carry an audience we have no opinion about
    validation.validate_aud = false;
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?
    .claims;

    Ok(claims)
}

/// Authenticates the user a request is made on behalf of
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &GatherContext,
) -> Result<AuthenticatedUser, GatherError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(GatherError::Unauthorized(
                    "Malformed authorization header provided".into(),
                ))
            }
        },
        None => {
            return Err(GatherError::Unauthorized(
                "Unable to find token in authorization header".into(),
            ))
        }
    };

    let claims = decode_token(&ctx.config.auth_jwt_secret, &token)
        .map_err(|e| GatherError::Unauthorized(format!("Invalid token provided: {}", e)))?;
    let user_id = claims.sub.parse::<ID>().map_err(|_| {
        GatherError::Unauthorized(format!("Token subject: {} is not a valid user id", claims.sub))
    })?;

    Ok(AuthenticatedUser { user_id })
}

/// Only lets through requests from the web application itself
pub async fn protect_internal_route(
    req: &HttpRequest,
    ctx: &GatherContext,
) -> Result<(), GatherError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(GatherError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(GatherError::Unauthorized(
                "Unable to find api-key in x-api-key header".to_string(),
            ))
        }
    };

    if api_key == ctx.config.internal_api_key {
        Ok(())
    } else {
        Err(GatherError::Unauthorized(
            "Invalid api-key provided in x-api-key header".to_string(),
        ))
    }
}
