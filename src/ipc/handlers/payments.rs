use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, require_session};
use crate::ipc::types::{AppState, Request};
use crate::models::NewPayment;
use crate::repo::PaymentRepo;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match PaymentRepo::new(store).list() {
        Ok(payments) => ok(&req.id, json!({ "payments": payments })),
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
    let draft: NewPayment = match serde_json::from_value(req.params.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
    };
    match PaymentRepo::new(store).add(draft) {
        Ok(payment) => ok(&req.id, json!({ "success": true, "payment": payment })),
        Err(e) => repo_err(&req.id, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "payments.list" => Some(handle_list(state, req)),
        "payments.add" => Some(handle_add(state, req)),
        _ => None,
    }
}
