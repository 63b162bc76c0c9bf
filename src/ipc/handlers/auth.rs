use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{open_store, repo_err, required_str};
use crate::ipc::types::{AppState, Request};
use crate::repo::UserRepo;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match open_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let username = match required_str(req, "username") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password = match required_str(req, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let user = match UserRepo::new(store).find(&username, &password) {
        Ok(v) => v,
        Err(e) => return repo_err(&req.id, e),
    };
    let Some(user) = user else {
        tracing::debug!(username = %username, "login rejected");
        return err(&req.id, "unauthorized", "Invalid credentials", None);
    };

    let token = state.sessions.issue(&user);
    ok(&req.id, json!({ "token": token, "role": user.role }))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let token = match required_str(req, "token") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let revoked = state.sessions.revoke(&token);
    ok(&req.id, json!({ "revoked": revoked }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        _ => None,
    }
}
