use serde::{Deserialize, Serialize};

/// Course year as found in stored data. Older records carry it as a bare
/// integer, the admin form submits it as a string; both shapes round-trip
/// unchanged and compare through `key()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Num(i64),
    Text(String),
}

impl Year {
    pub fn key(&self) -> String {
        match self {
            Year::Num(n) => n.to_string(),
            Year::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub year: Year,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    pub id: String,
    pub fee_type: String,
    pub course: String,
    pub year: Year,
    pub amount: f64,
    pub due_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Online,
    Cheque,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Online => "Online",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Card => "Card",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    pub student_id: String,
    /// Snapshot of the student's name at payment time. Deliberately never
    /// re-synced; the collection report reads this even after the student
    /// record changes or disappears.
    pub student_name: String,
    pub fee_type: String,
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: PaymentMethod,
    /// Always "Paid" on creation. Nothing reads it, but it is part of the
    /// stored record shape and must survive round-trips.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// IPC-side drafts. Params arrive camelCase like every other method payload;
/// the repositories turn them into stored records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub year: Year,
}

impl From<NewStudent> for Student {
    fn from(d: NewStudent) -> Self {
        Student {
            student_id: d.student_id,
            name: d.name,
            email: d.email,
            phone: d.phone,
            course: d.course,
            year: d.year,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFee {
    pub fee_type: String,
    pub course: String,
    pub year: Year,
    pub amount: f64,
    pub due_date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub student_id: String,
    pub fee_type: String,
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: PaymentMethod,
}
