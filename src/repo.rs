use crate::models::{Fee, NewFee, NewPayment, Payment, Student, User};
use crate::store::{DataStore, StoreError, FEES, PAYMENTS, STUDENTS, USERS};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Student not found")]
    StudentNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Typed accessors over the record store. Each call loads the whole
/// collection, mutates in memory and writes the whole collection back;
/// there is no locking, so concurrent writers can lose updates.
pub struct StudentRepo<'a> {
    store: &'a DataStore,
}

impl<'a> StudentRepo<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        StudentRepo { store }
    }

    pub fn list(&self) -> Result<Vec<Student>, RepoError> {
        Ok(self.store.load(STUDENTS)?)
    }

    /// Appends the record as-is. `student_id` is caller-supplied and not
    /// checked for uniqueness; duplicate ids are legal and counted as
    /// distinct rows downstream.
    pub fn add(&self, student: Student) -> Result<(), RepoError> {
        let mut students = self.list()?;
        students.push(student);
        self.store.save(STUDENTS, &students)?;
        Ok(())
    }

    /// Removes every row with the given id. Succeeds even when no row
    /// matches.
    pub fn delete(&self, student_id: &str) -> Result<(), RepoError> {
        let mut students = self.list()?;
        students.retain(|s| s.student_id != student_id);
        self.store.save(STUDENTS, &students)?;
        Ok(())
    }
}

pub struct FeeRepo<'a> {
    store: &'a DataStore,
}

impl<'a> FeeRepo<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        FeeRepo { store }
    }

    pub fn list(&self) -> Result<Vec<Fee>, RepoError> {
        Ok(self.store.load(FEES)?)
    }

    /// Assigns `FEE` + zero-padded 4-digit sequence derived from the current
    /// collection size, not from a persisted counter. Known defect kept for
    /// compatibility with existing stored data: deleting a fee and adding a
    /// new one reuses an id already handed out.
    pub fn add(&self, draft: NewFee) -> Result<Fee, RepoError> {
        let mut fees = self.list()?;
        let fee = Fee {
            id: format!("FEE{:04}", fees.len() + 1),
            fee_type: draft.fee_type,
            course: draft.course,
            year: draft.year,
            amount: draft.amount,
            due_date: draft.due_date,
        };
        fees.push(fee.clone());
        self.store.save(FEES, &fees)?;
        Ok(fee)
    }

    pub fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut fees = self.list()?;
        fees.retain(|f| f.id != id);
        self.store.save(FEES, &fees)?;
        Ok(())
    }
}

pub struct PaymentRepo<'a> {
    store: &'a DataStore,
}

impl<'a> PaymentRepo<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        PaymentRepo { store }
    }

    pub fn list(&self) -> Result<Vec<Payment>, RepoError> {
        Ok(self.store.load(PAYMENTS)?)
    }

    /// Fails without touching the collection when `student_id` matches no
    /// current student. On success copies the student's name into the
    /// record (a deliberate snapshot, never re-synced) and stamps
    /// `status = "Paid"`. The id carries the same count-derived collision
    /// hazard as fee ids.
    pub fn add(&self, draft: NewPayment) -> Result<Payment, RepoError> {
        let mut payments = self.list()?;
        let students: Vec<Student> = self.store.load(STUDENTS)?;

        let student = students
            .iter()
            .find(|s| s.student_id == draft.student_id)
            .ok_or(RepoError::StudentNotFound)?;

        let payment = Payment {
            payment_id: format!("PAY{:06}", payments.len() + 1),
            student_id: draft.student_id,
            student_name: student.name.clone(),
            fee_type: draft.fee_type,
            amount: draft.amount,
            payment_date: draft.payment_date,
            payment_method: draft.payment_method,
            status: "Paid".to_string(),
        };
        payments.push(payment.clone());
        self.store.save(PAYMENTS, &payments)?;
        Ok(payment)
    }
}

pub struct UserRepo<'a> {
    store: &'a DataStore,
}

impl<'a> UserRepo<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        UserRepo { store }
    }

    /// Exact username+password match against stored records, plaintext for
    /// compatibility with historical user files.
    pub fn find(&self, username: &str, password: &str) -> Result<Option<User>, RepoError> {
        let users: Vec<User> = self.store.load(USERS)?;
        Ok(users
            .into_iter()
            .find(|u| u.username == username && u.password == password))
    }
}
