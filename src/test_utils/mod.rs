#![allow(missing_docs)]

use axum::{
    Router,
    extract::{Path, State},
    middleware,
    routing::post,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, COOKIE_SESSION, Error, UserId, build_router, logging_middleware, set_session_cookie,
};

/// Stands in for the external identity provider that issues session cookies.
const TEST_LOG_IN_ROUTE: &str = "/test/log_in/{user_id}";

async fn stub_log_in_route(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    jar: PrivateCookieJar,
) -> Result<PrivateCookieJar, Error> {
    set_session_cookie(jar, UserId::new(&user_id), state.cookie_duration)
}

/// A server for the full app backed by an in-memory database, with the same
/// logging layer as the server binary.
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection, "foobar").expect("Could not create app state.");

    let log_in_route = Router::new()
        .route(TEST_LOG_IN_ROUTE, post(stub_log_in_route))
        .with_state(state.clone());
    let app = build_router(state)
        .merge(log_in_route)
        .layer(middleware::from_fn(logging_middleware));

    TestServer::new(app).expect("Could not create test server.")
}

/// Get a session cookie for `user_id` from the stub log in route.
pub(crate) async fn log_in(server: &TestServer, user_id: &str) -> Cookie<'static> {
    let response = server.post(&format!("/test/log_in/{user_id}")).await;
    response.assert_status_ok();

    response.cookie(COOKIE_SESSION)
}
