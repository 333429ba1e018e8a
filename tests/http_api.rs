use serde_json::{Value, json};
use snipegate::api;
use snipegate::server::Server;
use snipegate::settings::{Auth, Http, Log, Mysql, Redis, Settings, Store, User};
use std::sync::{Arc, Once};
use warp::Filter;
use warp::http::StatusCode;

static SECRET: Once = Once::new();

fn memory_settings() -> Settings {
    Settings {
        auth: Auth {
            backend: "real".into(),
        },
        store: Store {
            backend: "memory".into(),
        },
        user: User {
            backend: "memory".into(),
        },
        http: Http {
            address: "127.0.0.1:0".into(),
        },
        log: Log {
            filter: "warn".into(),
        },
        redis: Redis {
            dsn: "redis://127.0.0.1:6379".into(),
            prefix: "refresh".into(),
        },
        mysql: Mysql {
            dsn: "mysql://unused".into(),
        },
    }
}

async fn server() -> Arc<Server> {
    SECRET.call_once(|| {
        // SAFETY: set once, before any test reads it.
        unsafe { std::env::set_var("SECRET_KEY", "http-test-secret") };
    });
    Arc::new(Server::try_new(&memory_settings()).await.unwrap())
}

fn body_json(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[tokio::test]
async fn register_login_cabinet_and_rotation_flow() {
    let api = api::v1::routes(server().await).recover(api::v1::recover_error);

    let response = warp::test::request()
        .method("POST")
        .path("/register")
        .json(&json!({
            "email": "u1@example.com",
            "login": "u1",
            "password": "Sup3rSecret",
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let registered = body_json(&response);
    assert_eq!(registered["success"], json!(true));
    let user_id = registered["data"]["userID"].as_str().unwrap().to_string();

    let response = warp::test::request()
        .method("POST")
        .path("/login")
        .json(&json!({ "login": "u1", "password": "Sup3rSecret" }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let logged_in = body_json(&response);
    let access = logged_in["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();
    let refresh = logged_in["data"]["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();

    let response = warp::test::request()
        .method("GET")
        .path("/cabinet")
        .header("authorization", format!("Bearer {access}"))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(&response);
    assert_eq!(profile["data"]["userID"], json!(user_id));
    assert_eq!(profile["data"]["login"], json!("u1"));
    assert!(profile["data"].get("password").is_none());

    let response = warp::test::request()
        .method("POST")
        .path("/token")
        .json(&json!({ "refreshToken": refresh }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(&response);
    assert_ne!(rotated["data"]["refreshToken"], json!(refresh));

    // The consumed refresh token is now rejected.
    let response = warp::test::request()
        .method("POST")
        .path("/token")
        .json(&json!({ "refreshToken": refresh }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(&response)["success"], json!(false));
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let api = api::v1::routes(server().await).recover(api::v1::recover_error);

    warp::test::request()
        .method("POST")
        .path("/register")
        .json(&json!({
            "email": "u1@example.com",
            "login": "u1",
            "password": "Sup3rSecret",
        }))
        .reply(&api)
        .await;

    let response = warp::test::request()
        .method("POST")
        .path("/login")
        .json(&json!({ "login": "u1", "password": "WrongPass1" }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let api = api::v1::routes(server().await).recover(api::v1::recover_error);
    let body = json!({
        "email": "u1@example.com",
        "login": "u1",
        "password": "Sup3rSecret",
    });

    warp::test::request()
        .method("POST")
        .path("/register")
        .json(&body)
        .reply(&api)
        .await;
    let response = warp::test::request()
        .method("POST")
        .path("/register")
        .json(&body)
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn weak_password_is_unprocessable() {
    let api = api::v1::routes(server().await).recover(api::v1::recover_error);

    let response = warp::test::request()
        .method("POST")
        .path("/register")
        .json(&json!({
            "email": "u1@example.com",
            "login": "u1",
            "password": "short",
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn cabinet_requires_a_bearer_access_token() {
    let api = api::v1::routes(server().await).recover(api::v1::recover_error);

    // No header at all is "not logged in", never a server error.
    let response = warp::test::request()
        .method("GET")
        .path("/cabinet")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = warp::test::request()
        .method("GET")
        .path("/cabinet")
        .header("authorization", "Bearer not-a-token")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = warp::test::request()
        .method("GET")
        .path("/cabinet")
        .header("authorization", "Basic dXNlcjpwdw==")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
