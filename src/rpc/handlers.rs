use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, error, info, warn};

use crate::application::AppError;
use crate::domain::AccountDraft;

use super::AppState;
use super::messages::{
    AccountMessage, CreateAccountRequest, CreateAccountResponse, GetAccountByIdRequest,
    GetAccountByIdResponse, GetStatisticsResponse, ListAccountsResponse,
};
use super::status::RpcStatus;

type RpcResult<T> = Result<Json<T>, RpcStatus>;

/// Translate a service failure into the single terminal status of a call.
/// `context` prefixes internal errors so callers can tell which call failed.
fn status_from_app_error(err: AppError, context: &str) -> RpcStatus {
    match err {
        AppError::AccountNotFound(id) => {
            RpcStatus::not_found(AppError::AccountNotFound(id).to_string())
        }
        AppError::InvalidBalance(_) => RpcStatus::invalid_argument("Balance cannot be negative"),
        AppError::Database(cause) => {
            let cause = format!("{:#}", cause);
            error!(error = %cause, "{}", context);
            RpcStatus::internal(format!("{}: {}", context, cause))
        }
    }
}

/// `ListAccounts`: every stored account.
pub async fn list_accounts(State(state): State<AppState>) -> RpcResult<ListAccountsResponse> {
    debug!("Fetching all bank accounts");

    let accounts: Vec<AccountMessage> = state
        .service
        .list_accounts()
        .await
        .map_err(|err| status_from_app_error(err, "Failed to retrieve accounts"))?
        .into_iter()
        .map(AccountMessage::from)
        .collect();

    info!(count = accounts.len(), "Retrieved accounts");
    Ok(Json(ListAccountsResponse { accounts }))
}

/// `GetAccountById`: one account, or `NOT_FOUND`.
pub async fn get_account_by_id(
    State(state): State<AppState>,
    payload: Result<Json<GetAccountByIdRequest>, JsonRejection>,
) -> RpcResult<GetAccountByIdResponse> {
    let Json(request) = payload?;
    debug!(account_id = %request.id, "Searching for account");

    let account = state
        .service
        .get_account(&request.id)
        .await
        .map_err(|err| status_from_app_error(err, "Internal error"))?;

    match account {
        Some(account) => {
            info!(account_id = %account.id, "Account found");
            Ok(Json(GetAccountByIdResponse {
                account: account.into(),
            }))
        }
        None => {
            warn!(account_id = %request.id, "Account not found");
            Err(status_from_app_error(
                AppError::AccountNotFound(request.id),
                "Internal error",
            ))
        }
    }
}

/// `CreateAccount`: validate the draft, persist it, return it with its new ID.
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> RpcResult<CreateAccountResponse> {
    let Json(request) = payload?;
    let draft = AccountDraft::from(request.account);
    debug!(
        account_type = %draft.account_type,
        balance = draft.balance,
        "Saving new account"
    );

    // Rejected here so an invalid draft never reaches storage.
    if !draft.has_valid_balance() {
        warn!(balance = draft.balance, "Attempt to create account with negative balance");
        return Err(RpcStatus::invalid_argument("Balance cannot be negative"));
    }

    let account = state
        .service
        .create_account(draft)
        .await
        .map_err(|err| status_from_app_error(err, "Failed to save account"))?;

    info!(account_id = %account.id, "Account created");
    Ok(Json(CreateAccountResponse {
        account: account.into(),
    }))
}

/// `GetStatistics`: count, sum and average balance.
pub async fn get_statistics(State(state): State<AppState>) -> RpcResult<GetStatisticsResponse> {
    debug!("Calculating balance statistics");

    let stats = state
        .service
        .compute_statistics()
        .await
        .map_err(|err| status_from_app_error(err, "Failed to calculate statistics"))?;

    Ok(Json(GetStatisticsResponse {
        stats: stats.into(),
    }))
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
