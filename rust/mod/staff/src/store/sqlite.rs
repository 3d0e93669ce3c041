use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::model::Staff;
use crate::store::schema::init_schema;
use crate::store::{NewStaff, StaffChanges, StaffStore, StoreError};

/// Every column, in the order `staff_from_row` reads them.
const COLUMNS: &str = "staff_id, name, last_name, email, password_hash, \
    contact_information, phone_number, mailing_address, date_of_birth, \
    gender, qualifications, availability";

/// Columns written by insert and full replace, in `record_params` order.
const WRITABLE: [&str; 11] = [
    "name",
    "last_name",
    "email",
    "password_hash",
    "contact_information",
    "phone_number",
    "mailing_address",
    "date_of_birth",
    "gender",
    "qualifications",
    "availability",
];

/// StaffStore backed by rusqlite (bundled SQLite).
pub struct SqliteStaffStore {
    conn: Mutex<Connection>,
}

impl SqliteStaffStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;

        // WAL lets readers proceed while a write is in flight.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(backend)?;

        Self::with_connection(conn)
    }

    /// Create an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn staff_from_row(row: &Row<'_>) -> rusqlite::Result<Staff> {
    Ok(Staff {
        id: row.get("staff_id")?,
        name: row.get("name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        contact_information: row.get("contact_information")?,
        phone_number: row.get("phone_number")?,
        mailing_address: row.get("mailing_address")?,
        date_of_birth: row.get("date_of_birth")?,
        gender: row.get("gender")?,
        qualifications: row.get("qualifications")?,
        availability: row.get("availability")?,
    })
}

fn record_params(staff: &NewStaff) -> Vec<&dyn ToSql> {
    vec![
        &staff.name,
        &staff.last_name,
        &staff.email,
        &staff.password_hash,
        &staff.contact_information,
        &staff.phone_number,
        &staff.mailing_address,
        &staff.date_of_birth,
        &staff.gender,
        &staff.qualifications,
        &staff.availability,
    ]
}

fn changed<'a, T: ToSql>(
    column: &'static str,
    value: &'a Option<T>,
) -> (&'static str, Option<&'a dyn ToSql>) {
    (column, value.as_ref().map(|v| v as &dyn ToSql))
}

impl StaffStore for SqliteStaffStore {
    fn find(&self, id: i64) -> Result<Staff, StoreError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM staff WHERE staff_id = ?1", COLUMNS);
        conn.query_row(&sql, [id], staff_from_row)
            .optional()
            .map_err(backend)?
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<Staff>, StoreError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM staff ORDER BY staff_id", COLUMNS);
        let mut stmt = conn.prepare(&sql).map_err(backend)?;
        let rows = stmt.query_map([], staff_from_row).map_err(backend)?;

        let mut staff = Vec::new();
        for row in rows {
            staff.push(row.map_err(backend)?);
        }
        Ok(staff)
    }

    fn insert(&self, staff: &NewStaff) -> Result<Staff, StoreError> {
        let conn = self.lock()?;
        let placeholders: Vec<String> = (1..=WRITABLE.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO staff ({}) VALUES ({}) RETURNING {}",
            WRITABLE.join(", "),
            placeholders.join(", "),
            COLUMNS,
        );

        let values = record_params(staff);
        conn.query_row(&sql, values.as_slice(), staff_from_row)
            .map_err(backend)
    }

    fn replace(&self, id: i64, staff: &NewStaff) -> Result<Staff, StoreError> {
        let conn = self.lock()?;
        let sets: Vec<String> = WRITABLE
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE staff SET {} WHERE staff_id = ?{} RETURNING {}",
            sets.join(", "),
            WRITABLE.len() + 1,
            COLUMNS,
        );

        let mut values = record_params(staff);
        values.push(&id);
        conn.query_row(&sql, values.as_slice(), staff_from_row)
            .optional()
            .map_err(backend)?
            .ok_or(StoreError::NotFound(id))
    }

    fn merge(&self, id: i64, changes: &StaffChanges) -> Result<Staff, StoreError> {
        if changes.is_empty() {
            return self.find(id);
        }

        let candidates = [
            changed("name", &changes.name),
            changed("last_name", &changes.last_name),
            changed("email", &changes.email),
            changed("password_hash", &changes.password_hash),
            changed("contact_information", &changes.contact_information),
            changed("phone_number", &changes.phone_number),
            changed("mailing_address", &changes.mailing_address),
            changed("date_of_birth", &changes.date_of_birth),
            changed("gender", &changes.gender),
            changed("qualifications", &changes.qualifications),
            changed("availability", &changes.availability),
        ];

        let mut sets = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        for (col, value) in candidates {
            if let Some(value) = value {
                values.push(value);
                sets.push(format!("{} = ?{}", col, values.len()));
            }
        }

        let id_idx = values.len() + 1;
        values.push(&id);

        let sql = format!(
            "UPDATE staff SET {} WHERE staff_id = ?{} RETURNING {}",
            sets.join(", "),
            id_idx,
            COLUMNS,
        );

        let conn = self.lock()?;
        conn.query_row(&sql, values.as_slice(), staff_from_row)
            .optional()
            .map_err(backend)?
            .ok_or(StoreError::NotFound(id))
    }

    fn swap_password_hash(
        &self,
        id: i64,
        expected: &str,
        new_hash: &str,
    ) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let affected = conn
            .execute(
                "UPDATE staff SET password_hash = ?1 WHERE staff_id = ?2 AND password_hash = ?3",
                params![new_hash, id, expected],
            )
            .map_err(backend)?;
        if affected > 0 {
            return Ok(true);
        }

        // Nothing matched: tell a vanished row apart from a changed hash.
        let exists = conn
            .query_row("SELECT 1 FROM staff WHERE staff_id = ?1", [id], |_| Ok(()))
            .optional()
            .map_err(backend)?
            .is_some();
        if exists {
            Ok(false)
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    fn delete(&self, id: i64) -> Result<Staff, StoreError> {
        let conn = self.lock()?;
        let sql = format!("DELETE FROM staff WHERE staff_id = ?1 RETURNING {}", COLUMNS);
        conn.query_row(&sql, [id], staff_from_row)
            .optional()
            .map_err(backend)?
            .ok_or(StoreError::NotFound(id))
    }
}
