use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, require_session, required_str};
use crate::ipc::types::{AppState, Request};
use crate::models::NewFee;
use crate::repo::FeeRepo;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match FeeRepo::new(store).list() {
        Ok(fees) => ok(&req.id, json!({ "fees": fees })),
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
    let draft: NewFee = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    match FeeRepo::new(store).add(draft) {
        Ok(fee) => ok(&req.id, json!({ "success": true, "fee": fee })),
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
    let fee_id = match required_str(req, "feeId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match FeeRepo::new(store).delete(&fee_id) {
        Ok(()) => ok(&req.id, json!({ "success": true })),
        Err(e) => repo_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.list" => Some(handle_list(state, req)),
        "fees.add" => Some(handle_add(state, req)),
        "fees.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
