//! Configuration entry endpoints.

use api_types::entry::{EntryListResponse, EntryNew, EntryOptions, EntryView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Connector, Entry};

use crate::{ServerError, server::ServerState};

fn map_entry(entry: Entry) -> EntryView {
    EntryView {
        entry_id: entry.entry_id,
        group_id: entry.group_id,
        base_url: entry.base_url,
        title: entry.title,
    }
}

pub async fn list<K: Connector>(State(state): State<ServerState<K>>) -> Json<EntryListResponse> {
    let entries = state
        .registry
        .entries()
        .await
        .into_iter()
        .map(map_entry)
        .collect();
    Json(EntryListResponse { entries })
}

pub async fn create<K: Connector>(
    State(state): State<ServerState<K>>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = state
        .registry
        .setup(&payload.group_id, payload.base_url.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(map_entry(entry))))
}

pub async fn remove<K: Connector>(
    State(state): State<ServerState<K>>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.registry.teardown(&entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_options<K: Connector>(
    State(state): State<ServerState<K>>,
    Path(entry_id): Path<String>,
    Json(payload): Json<EntryOptions>,
) -> Result<Json<EntryView>, ServerError> {
    if payload.base_url.trim().is_empty() {
        return Err(ServerError::Generic("provide base_url".to_string()));
    }

    let entry = state
        .registry
        .update_options(&entry_id, &payload.base_url)
        .await?;
    Ok(Json(map_entry(entry)))
}
