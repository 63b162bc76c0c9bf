use serde::Serialize;

use crate::models::Payment;

/// Currency display used at the delivery boundary. Whole amounts print
/// without a decimal part, matching how the stored integers historically
/// rendered.
pub fn currency(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("\u{20b9}{}", amount as i64)
    } else {
        format!("\u{20b9}{}", amount)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptModel {
    pub receipt_no: String,
    pub payment_date: String,
    pub student_id: String,
    pub student_name: String,
    pub fee_type: String,
    pub payment_method: &'static str,
    pub amount: f64,
    pub amount_display: String,
}

pub fn receipt_model(payment: &Payment) -> ReceiptModel {
    ReceiptModel {
        receipt_no: payment.payment_id.clone(),
        payment_date: payment.payment_date.clone(),
        student_id: payment.student_id.clone(),
        student_name: payment.student_name.clone(),
        fee_type: payment.fee_type.clone(),
        payment_method: payment.payment_method.as_str(),
        amount: payment.amount,
        amount_display: currency(payment.amount),
    }
}

/// Plain-text printable view of a single payment.
pub fn render_text(r: &ReceiptModel) -> String {
    let mut out = String::new();
    let line = "=".repeat(46);
    out.push_str(&line);
    out.push('\n');
    out.push_str("                PAYMENT RECEIPT\n");
    out.push_str(&line);
    out.push('\n');
    for (label, value) in [
        ("Receipt No", r.receipt_no.as_str()),
        ("Date", r.payment_date.as_str()),
        ("Student ID", r.student_id.as_str()),
        ("Student Name", r.student_name.as_str()),
        ("Fee Type", r.fee_type.as_str()),
        ("Payment Method", r.payment_method),
    ] {
        out.push_str(&format!("{:<16}{}\n", format!("{}:", label), value));
    }
    out.push_str(&"-".repeat(46));
    out.push('\n');
    out.push_str(&format!("{:<16}{}\n", "Amount Paid:", r.amount_display));
    out.push_str(&line);
    out.push('\n');
    out.push_str("Thank you for your payment!\n");
    out
}
