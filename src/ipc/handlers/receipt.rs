use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, require_session, required_str};
use crate::ipc::types::{AppState, Request};
use crate::receipt;
use crate::repo::PaymentRepo;

fn handle_render(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_session(state, req) {
        return resp;
    }
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let payment_id = match required_str(req, "paymentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let payments = match PaymentRepo::new(store).list() {
        Ok(v) => v,
        Err(e) => return repo_err(&req.id, e),
    };
    let Some(payment) = payments.iter().find(|p| p.payment_id == payment_id) else {
        return err(&req.id, "not_found", "Receipt not found", None);
    };

    let model = receipt::receipt_model(payment);
    let text = receipt::render_text(&model);
    ok(&req.id, json!({ "receipt": model, "text": text }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "receipt.render" => Some(handle_render(state, req)),
        _ => None,
    }
}
