use serde_json::json;

use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::repo::RepoError;
use crate::session::SessionUser;
use crate::store::{DataStore, StoreError};

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn open_store<'a>(state: &'a AppState, req: &Request) -> Result<&'a DataStore, serde_json::Value> {
    state
        .store
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a data directory first", None))
}

/// Gate for every method behind login: reads `params.token` and resolves it
/// against the session store.
pub fn require_session<'a>(
    state: &'a AppState,
    req: &Request,
) -> Result<&'a SessionUser, serde_json::Value> {
    let token = req
        .params
        .get("token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| err(&req.id, "unauthorized", "missing token", None))?;
    state
        .sessions
        .get(token)
        .ok_or_else(|| err(&req.id, "unauthorized", "invalid or expired session", None))
}

/// Maps repository failures onto envelope codes: missing student is a
/// not-found response, storage failures keep their read/write distinction.
pub fn repo_err(id: &str, e: RepoError) -> serde_json::Value {
    match e {
        RepoError::StudentNotFound => err(id, "not_found", "Student not found", None),
        RepoError::Store(StoreError::Write { path, source }) => err(
            id,
            "store_write_failed",
            source.to_string(),
            Some(json!({ "path": path.to_string_lossy() })),
        ),
        RepoError::Store(StoreError::Read { path, source }) => err(
            id,
            "store_read_failed",
            source.to_string(),
            Some(json!({ "path": path.to_string_lossy() })),
        ),
        RepoError::Store(StoreError::Corrupt { path, source }) => err(
            id,
            "store_read_failed",
            source.to_string(),
            Some(json!({ "path": path.to_string_lossy() })),
        ),
    }
}
