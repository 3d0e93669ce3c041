use rusqlite::Connection;

use crate::store::StoreError;

/// Create the staff table if it does not exist yet.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS staff (
            staff_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            last_name TEXT,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            contact_information TEXT,
            phone_number TEXT,
            mailing_address TEXT,
            date_of_birth TEXT,
            gender TEXT,
            qualifications TEXT,
            availability TEXT
        )",
        "CREATE INDEX IF NOT EXISTS idx_staff_email ON staff(email)",
    ];

    for stmt in &statements {
        conn.execute(stmt, [])
            .map_err(|e| StoreError::Backend(e.to_string()))?;
    }

    Ok(())
}
