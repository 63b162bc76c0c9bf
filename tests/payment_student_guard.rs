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

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        id,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn payment_against_missing_student_is_rejected() {
    let data_dir = temp_dir("feeledger-payguard");
    let (mut child, mut stdin, mut reader) = spawn_daemon();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": data_dir.to_string_lossy() }),
    );
    let token = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    )["token"]
        .as_str()
        .expect("token")
        .to_string();

    let resp = request(
        &mut stdin,
        &mut reader,
        "2",
        "payments.add",
        json!({
            "token": token,
            "studentId": "S404",
            "feeType": "Tuition",
            "amount": 100.0,
            "paymentDate": "2025-01-01",
            "paymentMethod": "Cash"
        }),
    );
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("not_found"));
    assert_eq!(resp["error"]["message"], json!("Student not found"));

    // The failed add must not have appended anything.
    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "payments.list",
        json!({ "token": token }),
    );
    assert_eq!(listed["payments"].as_array().expect("payments").len(), 0);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data_dir);
}

#[test]
fn recorded_payment_snapshots_name_and_renders_receipt() {
    let data_dir = temp_dir("feeledger-receipt");
    let (mut child, mut stdin, mut reader) = spawn_daemon();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": data_dir.to_string_lossy() }),
    );
    let token = request_ok(
        &mut stdin,
        &mut reader,
        "login",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    )["token"]
        .as_str()
        .expect("token")
        .to_string();

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.add",
        json!({
            "token": token,
            "studentId": "S1",
            "name": "Asha Rao",
            "email": "asha@example.edu",
            "phone": "555-0100",
            "course": "CS",
            "year": "1"
        }),
    );
    let added = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "payments.add",
        json!({
            "token": token,
            "studentId": "S1",
            "feeType": "Tuition",
            "amount": 400.0,
            "paymentDate": "2025-01-15",
            "paymentMethod": "Cheque"
        }),
    );
    assert_eq!(added["payment"]["payment_id"], json!("PAY000001"));
    assert_eq!(added["payment"]["student_name"], json!("Asha Rao"));
    assert_eq!(added["payment"]["status"], json!("Paid"));

    // Receipt reads the stored record, even after the student is deleted.
    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.delete",
        json!({ "token": token, "studentId": "S1" }),
    );
    let rendered = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "receipt.render",
        json!({ "token": token, "paymentId": "PAY000001" }),
    );
    assert_eq!(rendered["receipt"]["receiptNo"], json!("PAY000001"));
    assert_eq!(rendered["receipt"]["studentName"], json!("Asha Rao"));
    assert_eq!(rendered["receipt"]["paymentMethod"], json!("Cheque"));
    let text = rendered["text"].as_str().expect("text");
    assert!(text.contains("PAYMENT RECEIPT"));
    assert!(text.contains("Asha Rao"));

    let missing = request(
        &mut stdin,
        &mut reader,
        "6",
        "receipt.render",
        json!({ "token": token, "paymentId": "PAY999999" }),
    );
    assert_eq!(missing["ok"], json!(false));
    assert_eq!(missing["error"]["code"], json!("not_found"));
    assert_eq!(missing["error"]["message"], json!("Receipt not found"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(data_dir);
}
