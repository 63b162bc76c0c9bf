use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::models::{Fee, Payment, Student};

#[derive(Debug, Clone, Serialize)]
pub struct CalcError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CalcError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Round to 2 decimal places, used for the collection rate percentage.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_collected: f64,
    /// Crude aggregate: sum of every fee-structure amount times the student
    /// head count, ignoring which structures apply to which student. The
    /// historical definition, kept on purpose.
    pub total_fees_nominal: f64,
    /// Nominal total minus collected; may go negative and is not clamped.
    pub pending_amount: f64,
    pub defaulter_count: usize,
    pub recent_payments: Vec<Payment>,
    pub collection_rate: f64,
    pub avg_fee_per_student: f64,
    pub month_collection: f64,
}

/// Pure computation over already-loaded snapshots; `today` supplies the
/// month window for `month_collection`.
pub fn dashboard_metrics(
    students: &[Student],
    fees: &[Fee],
    payments: &[Payment],
    today: NaiveDate,
) -> DashboardStats {
    let total_students = students.len();
    let total_collected: f64 = payments.iter().map(|p| p.amount).sum();
    let total_fees_nominal = fees.iter().map(|f| f.amount).sum::<f64>() * total_students as f64;
    let pending_amount = total_fees_nominal - total_collected;

    let paid_ids: HashSet<&str> = payments.iter().map(|p| p.student_id.as_str()).collect();
    let defaulter_count = students
        .iter()
        .filter(|s| !paid_ids.contains(s.student_id.as_str()))
        .count();

    // Lexical descending sort on ISO dates; stable, so same-day payments
    // keep their stored relative order.
    let mut recent_payments: Vec<Payment> = payments.to_vec();
    recent_payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
    recent_payments.truncate(5);

    let collection_rate = if total_fees_nominal > 0.0 {
        round2(total_collected / total_fees_nominal * 100.0)
    } else {
        0.0
    };
    let avg_fee_per_student = if total_students > 0 {
        (total_collected / total_students as f64).round()
    } else {
        0.0
    };

    // String-prefix month match, not calendar parsing; malformed dates
    // simply never match.
    let month_prefix = today.format("%Y-%m").to_string();
    let month_collection = payments
        .iter()
        .filter(|p| p.payment_date.starts_with(&month_prefix))
        .map(|p| p.amount)
        .sum();

    DashboardStats {
        total_students,
        total_collected,
        total_fees_nominal,
        pending_amount,
        defaulter_count,
        recent_payments,
        collection_rate,
        avg_fee_per_student,
        month_collection,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    pub title: String,
    pub headers: Vec<&'static str>,
    /// Amounts stay numeric here; currency formatting belongs to the
    /// delivery boundary, which uses `money_cols` to find them.
    pub rows: Vec<Vec<serde_json::Value>>,
    #[serde(skip)]
    pub money_cols: &'static [usize],
}

pub fn report(
    kind: &str,
    students: &[Student],
    fees: &[Fee],
    payments: &[Payment],
) -> Result<ReportModel, CalcError> {
    match kind {
        "defaulters" => Ok(defaulters_report(students, payments)),
        "collected" => Ok(collected_report(payments)),
        "pending" => Ok(pending_report(students, fees, payments)),
        "course" => Ok(course_report(students, payments)),
        _ => Err(CalcError::new("bad_params", "Invalid report type")),
    }
}

fn defaulters_report(students: &[Student], payments: &[Payment]) -> ReportModel {
    let paid_ids: HashSet<&str> = payments.iter().map(|p| p.student_id.as_str()).collect();
    let rows = students
        .iter()
        .filter(|s| !paid_ids.contains(s.student_id.as_str()))
        .map(|s| {
            vec![
                json!(s.student_id),
                json!(s.name),
                json!(s.course),
                json!(s.year),
                json!(s.phone),
            ]
        })
        .collect();
    ReportModel {
        title: "Defaulters Report".to_string(),
        headers: vec!["Student ID", "Name", "Course", "Year", "Contact"],
        rows,
        money_cols: &[],
    }
}

fn collected_report(payments: &[Payment]) -> ReportModel {
    // A raw listing, one row per payment, reading the stored name snapshot.
    let rows = payments
        .iter()
        .map(|p| {
            vec![
                json!(p.student_id),
                json!(p.student_name),
                json!(p.fee_type),
                json!(p.amount),
                json!(p.payment_date),
            ]
        })
        .collect();
    ReportModel {
        title: "Collection Report".to_string(),
        headers: vec!["Student ID", "Student Name", "Fee Type", "Amount", "Date"],
        rows,
        money_cols: &[3],
    }
}

fn pending_report(students: &[Student], fees: &[Fee], payments: &[Payment]) -> ReportModel {
    // Unlike the dashboard's nominal total, owed is computed per student
    // from the fee structures that actually match their course and year
    // (year compared through its string key).
    let mut rows = Vec::new();
    for student in students {
        let year_key = student.year.key();
        let owed: f64 = fees
            .iter()
            .filter(|f| f.course == student.course && f.year.key() == year_key)
            .map(|f| f.amount)
            .sum();
        let paid: f64 = payments
            .iter()
            .filter(|p| p.student_id == student.student_id)
            .map(|p| p.amount)
            .sum();
        if paid < owed {
            rows.push(vec![
                json!(student.student_id),
                json!(student.name),
                json!(owed),
                json!(paid),
                json!(owed - paid),
            ]);
        }
    }
    ReportModel {
        title: "Pending Payments Report".to_string(),
        headers: vec!["Student ID", "Name", "Total Fees", "Paid", "Pending"],
        rows,
        money_cols: &[2, 3, 4],
    }
}

fn course_report(students: &[Student], payments: &[Payment]) -> ReportModel {
    // Groups by the student's *current* course, looked up at report time.
    // A payment whose student has since been deleted is silently skipped.
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for payment in payments {
        let Some(student) = students.iter().find(|s| s.student_id == payment.student_id) else {
            continue;
        };
        if !totals.contains_key(&student.course) {
            order.push(student.course.clone());
        }
        *totals.entry(student.course.clone()).or_insert(0.0) += payment.amount;
    }

    let rows = order
        .iter()
        .map(|course| {
            let count = students.iter().filter(|s| &s.course == course).count();
            vec![json!(course), json!(totals[course]), json!(count)]
        })
        .collect();
    ReportModel {
        title: "Course-wise Collection Report".to_string(),
        headers: vec!["Course", "Total Collection", "Student Count"],
        rows,
        money_cols: &[1],
    }
}
