//! Persistence boundary for staff records.
//!
//! The service only sees [`StaffStore`]; the binary injects the SQLite
//! implementation and tests may wrap it.

pub mod schema;
pub mod sqlite;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::Staff;

pub use sqlite::SqliteStaffStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("staff {0} not found")]
    NotFound(i64),

    #[error("backend: {0}")]
    Backend(String),
}

/// A full record ready to be written, minus the store-assigned id.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub contact_information: Option<String>,
    pub phone_number: Option<String>,
    pub mailing_address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub qualifications: Option<String>,
    pub availability: Option<String>,
}

/// The subset of columns a partial update writes. `None` leaves a column as is.
///
/// Nullable columns are doubly optional: `Some(None)` writes NULL.
#[derive(Debug, Clone, Default)]
pub struct StaffChanges {
    pub name: Option<String>,
    pub last_name: Option<Option<String>>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub contact_information: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub mailing_address: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub gender: Option<Option<String>>,
    pub qualifications: Option<Option<String>>,
    pub availability: Option<Option<String>>,
}

impl StaffChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.contact_information.is_none()
            && self.phone_number.is_none()
            && self.mailing_address.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.qualifications.is_none()
            && self.availability.is_none()
    }
}

/// Single-table store keyed by integer id.
///
/// Every write is one atomic row operation that yields the resulting record.
pub trait StaffStore: Send + Sync {
    fn find(&self, id: i64) -> Result<Staff, StoreError>;

    fn list(&self) -> Result<Vec<Staff>, StoreError>;

    fn insert(&self, staff: &NewStaff) -> Result<Staff, StoreError>;

    /// Overwrite every column of an existing record.
    fn replace(&self, id: i64, staff: &NewStaff) -> Result<Staff, StoreError>;

    /// Write only the columns present in `changes`.
    fn merge(&self, id: i64, changes: &StaffChanges) -> Result<Staff, StoreError>;

    /// Set `password_hash` to `new_hash` only if it still equals `expected`.
    ///
    /// Returns `Ok(false)` when the record exists but holds a different hash.
    fn swap_password_hash(&self, id: i64, expected: &str, new_hash: &str)
        -> Result<bool, StoreError>;

    /// Remove a record, returning what was deleted.
    fn delete(&self, id: i64) -> Result<Staff, StoreError>;
}
