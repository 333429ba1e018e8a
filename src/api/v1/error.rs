use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiErrorCode>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone(), err.to_string()));
        Ok(warp::reply::with_status(json, err.status()))
    } else {
        let json = warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ApiErrorCode::InternalError,
                message: format!("Unhandled error: {:?}", err),
            }),
        });
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Invalid request body")]
    InvalidRequest,
    #[error("Wrong login or password provided")]
    InvalidCredentials,
    #[error("User with that login or email already exists")]
    UserExists,
    #[error("Token is malformed")]
    MalformedToken,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Refresh token is no longer active")]
    StaleRefreshToken,
    #[error("Storage temporarily unavailable")]
    StoreUnavailable,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorCode::InvalidCredentials
            | ApiErrorCode::InvalidToken
            | ApiErrorCode::TokenExpired
            | ApiErrorCode::StaleRefreshToken => StatusCode::UNAUTHORIZED,
            ApiErrorCode::UserExists => StatusCode::CONFLICT,
            ApiErrorCode::MalformedToken => StatusCode::BAD_REQUEST,
            ApiErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Malformed => ApiErrorCode::MalformedToken,
            AuthError::BadSignature | AuthError::WrongType => ApiErrorCode::InvalidToken,
            AuthError::Expired => ApiErrorCode::TokenExpired,
            AuthError::StaleOrForgedToken => ApiErrorCode::StaleRefreshToken,
            AuthError::InvalidInput(_) => ApiErrorCode::InvalidRequest,
            AuthError::InvalidCredentials => ApiErrorCode::InvalidCredentials,
            AuthError::UserExists => ApiErrorCode::UserExists,
            // A token that verifies but points at no user reads as invalid
            // from outside; the details stay server-side.
            AuthError::UserNotFound => ApiErrorCode::InvalidToken,
            AuthError::StoreFailure(e) => {
                warn!("Store failure: {}", e);
                ApiErrorCode::StoreUnavailable
            }
            AuthError::SecretUnavailable => ApiErrorCode::internal("signing secret unavailable"),
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}
