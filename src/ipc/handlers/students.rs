use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, require_session, required_str};
use crate::ipc::types::{AppState, Request};
use crate::models::NewStudent;
use crate::repo::StudentRepo;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match StudentRepo::new(store).list() {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => repo_err(&req.id, e),
    }
}

fn handle_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let draft: NewStudent = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    match StudentRepo::new(store).add(draft.into()) {
        Ok(()) => ok(&req.id, json!({ "success": true })),
        Err(e) => repo_err(&req.id, e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let student_id = match required_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match StudentRepo::new(store).delete(&student_id) {
        Ok(()) => ok(&req.id, json!({ "success": true })),
        Err(e) => repo_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.add" => Some(handle_add(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
