use super::error::*;
use super::handler;
use crate::application_port::AuthService;
use crate::domain_model::UserId;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let register = warp::post()
        .and(warp::path("register"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::register);

    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let token = warp::post()
        .and(warp::path("token"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::rotate_token);

    let cabinet = warp::get()
        .and(warp::path("cabinet"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.user_service.clone()))
        .and_then(handler::cabinet);

    register.or(login).or(token).or(cabinet)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    // No header at all reads the same as a non-bearer one: not logged in,
    // not a server fault.
    warp::header::<String>(http::header::AUTHORIZATION.as_ref())
        .or_else(|_| async {
            Err::<(String,), warp::Rejection>(reject::custom(ApiErrorCode::InvalidToken))
        })
        .and_then(move |token: String| {
            let auth_service = auth_service.clone();
            async move {
                if let Some(token) = token.strip_prefix("Bearer ") {
                    let user_id = auth_service
                        .verify_access(token)
                        .await
                        .map_err(ApiErrorCode::from)
                        .map_err(reject::custom)?;
                    Ok(user_id)
                } else {
                    Err(reject::custom(ApiErrorCode::InvalidToken))
                }
            }
        })
}
