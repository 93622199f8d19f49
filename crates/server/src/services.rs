use api_types::expense::{CreateExpense, ExpenseCreated};
use axum::{Json, extract::State};
use engine::Connector;

use crate::{ServerError, server::ServerState};

pub async fn create_expense<K: Connector>(
    State(state): State<ServerState<K>>,
    Json(payload): Json<CreateExpense>,
) -> Result<Json<ExpenseCreated>, ServerError> {
    let created = state.actions.create_expense(payload).await?;
    Ok(Json(created))
}
