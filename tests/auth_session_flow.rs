use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_daemon() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_feeledgerd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn feeledgerd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

#[test]
fn auth_session_flow() {
    let data_dir = temp_dir("feeledger-auth");
    let (mut child, mut stdin, mut reader) = spawn_daemon();

    let selected = request(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": data_dir.to_string_lossy() }),
    );
    assert_eq!(selected["ok"], json!(true));

    // No token at all.
    let denied = request(&mut stdin, &mut reader, "2", "students.list", json!({}));
    assert_eq!(denied["ok"], json!(false));
    assert_eq!(denied["error"]["code"], json!("unauthorized"));

    // Wrong password against the seeded admin record.
    let rejected = request(
        &mut stdin,
        &mut reader,
        "3",
        "auth.login",
        json!({ "username": "admin", "password": "nope" }),
    );
    assert_eq!(rejected["ok"], json!(false));
    assert_eq!(rejected["error"]["code"], json!("unauthorized"));
    assert_eq!(rejected["error"]["message"], json!("Invalid credentials"));

    let login = request(
        &mut stdin,
        &mut reader,
        "4",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    );
    assert_eq!(login["ok"], json!(true));
    assert_eq!(login["result"]["role"], json!("admin"));
    let token = login["result"]["token"].as_str().expect("token").to_string();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    let listed = request(
        &mut stdin,
        &mut reader,
        "5",
        "students.list",
        json!({ "token": token }),
    );
    assert_eq!(listed["ok"], json!(true));
    assert_eq!(listed["result"]["students"], json!([]));

    // A made-up token is not accepted.
    let forged = request(
        &mut stdin,
        &mut reader,
        "6",
        "students.list",
        json!({ "token": "0".repeat(64) }),
    );
    assert_eq!(forged["ok"], json!(false));
    assert_eq!(forged["error"]["code"], json!("unauthorized"));

    // Logout revokes the session; the token stops working.
    let logout = request(
        &mut stdin,
        &mut reader,
        "7",
        "auth.logout",
        json!({ "token": token }),
    );
    assert_eq!(logout["result"]["revoked"], json!(true));

    let after = request(
        &mut stdin,
        &mut reader,
        "8",
        "students.list",
        json!({ "token": token }),
    );
    assert_eq!(after["ok"], json!(false));
    assert_eq!(after["error"]["code"], json!("unauthorized"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn methods_require_a_selected_data_directory() {
    let (mut child, mut stdin, mut reader) = spawn_daemon();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["ok"], json!(true));
    assert_eq!(health["result"]["dataDir"], json!(null));

    let login = request(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    );
    assert_eq!(login["ok"], json!(false));
    assert_eq!(login["error"]["code"], json!("no_workspace"));

    let unknown = request(&mut stdin, &mut reader, "3", "nope.nothing", json!({}));
    assert_eq!(unknown["ok"], json!(false));
    assert_eq!(unknown["error"]["code"], json!("not_implemented"));

    drop(stdin);
    let _ = child.wait();
}
