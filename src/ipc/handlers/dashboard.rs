use serde_json::json;

use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::helpers::{open_store, repo_err, require_session};
use crate::ipc::types::{AppState, Request};
use crate::repo::{FeeRepo, PaymentRepo, StudentRepo};

fn handle_metrics(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    // Three independent snapshots, same as three separate file reads.
    let students = match StudentRepo::new(store).list() {
        Ok(v) => v,
        Err(e) => return repo_err(&req.id, e),
    };
    let fees = match FeeRepo::new(store).list() {
        Ok(v) => v,
        Err(e) => return repo_err(&req.id, e),
    };
    let payments = match PaymentRepo::new(store).list() {
        Ok(v) => v,
        Err(e) => return repo_err(&req.id, e),
    };

    let today = chrono::Local::now().date_naive();
    let stats = calc::dashboard_metrics(&students, &fees, &payments, today);
    ok(&req.id, json!(stats))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.metrics" => Some(handle_metrics(state, req)),
        _ => None,
    }
}
