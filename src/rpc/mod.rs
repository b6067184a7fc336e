//! JSON procedure-call surface of the account service.
//!
//! Each procedure is a unary `POST /bankbook.AccountService/<Method>` call.
//! A call ends in exactly one JSON response: the method's response message
//! on success, or an [`ErrorBody`] with a status chosen by its [`RpcCode`].

pub mod handlers;
pub mod messages;
pub mod status;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::application::AccountService;

pub use status::{ErrorBody, RpcCode, RpcStatus};

pub const SERVICE_NAME: &str = "bankbook.AccountService";

/// Shared handler state. Cloned per request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub service: AccountService,
}

impl AppState {
    pub fn new(service: AccountService) -> Self {
        Self { service }
    }
}

fn method_path(method: &str) -> String {
    format!("/{}/{}", SERVICE_NAME, method)
}

/// Build the router serving the four procedures plus `/health`.
pub fn router(service: AccountService) -> Router {
    Router::new()
        .route(&method_path("ListAccounts"), post(handlers::list_accounts))
        .route(&method_path("GetAccountById"), post(handlers::get_account_by_id))
        .route(&method_path("CreateAccount"), post(handlers::create_account))
        .route(&method_path("GetStatistics"), post(handlers::get_statistics))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(service))
}
