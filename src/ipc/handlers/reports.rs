use serde_json::json;

use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, require_session, required_str};
use crate::ipc::types::{AppState, Request};
use crate::receipt::currency;
use crate::repo::{FeeRepo, PaymentRepo, StudentRepo};

fn handle_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let kind = match required_str(req, "type") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

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

    let mut model = match calc::report(&kind, &students, &fees, &payments) {
        Ok(m) => m,
        Err(e) => return err(&req.id, &e.code, e.message, e.details),
    };

    // The engine keeps amounts numeric; currency display is applied here,
    // at the delivery boundary, on the columns the model marks as money.
    for row in &mut model.rows {
        for &col in model.money_cols {
            if let Some(amount) = row.get(col).and_then(|v| v.as_f64()) {
                row[col] = json!(currency(amount));
            }
        }
    }

    ok(&req.id, json!(model))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.generate" => Some(handle_generate(state, req)),
        _ => None,
    }
}
