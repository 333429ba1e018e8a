use super::error::*;
use crate::application_port::{
    AuthService, LoginInput, RegisterInput, UserService,
};
use crate::domain_model::{AccessToken, RefreshToken, UserId};
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userID")]
    pub user_id: UserId,
}

pub async fn register(
    body: RegisterRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!("registration attempt");

    let user_id = auth_service
        .register(RegisterInput {
            email: body.email,
            login: body.login,
            password: body.password,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(RegisterResponse {
        user_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub login: String,
    #[serde(rename = "accessToken")]
    pub access_token: AccessToken,
    #[serde(rename = "refreshToken")]
    pub refresh_token: RefreshToken,
}

pub async fn login(
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!("login attempt");

    let result = auth_service
        .login(LoginInput {
            login: body.login,
            password: body.password,
        })
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(LoginResponse {
        login: result.login,
        access_token: result.tokens.access_token,
        refresh_token: result.tokens.refresh_token,
    })))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: AccessToken,
    #[serde(rename = "refreshToken")]
    pub refresh_token: RefreshToken,
}

pub async fn rotate_token(
    body: TokenRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!("refresh token rotation attempt");

    let pair = auth_service
        .rotate(&body.refresh_token)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(TokenResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    })))
}

#[derive(Debug, Serialize)]
pub struct CabinetResponse {
    #[serde(rename = "userID")]
    pub user_id: UserId,
    pub login: String,
    pub email: String,
}

pub async fn cabinet(
    user_id: UserId,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debug!(%user_id, "cabinet attempt");

    let profile = user_service
        .profile(user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(CabinetResponse {
        user_id: profile.user_id,
        login: profile.login,
        email: profile.email,
    })))
}
