use tracing::info;

use crate::model::{Staff, StaffInput, StaffPatch};
use crate::service::{StaffError, StaffService, normalize_date};
use crate::store::{NewStaff, StaffChanges};

impl StaffService {
    /// Every staff record, ordered by id.
    pub fn list_staff(&self) -> Result<Vec<Staff>, StaffError> {
        Ok(self.store.list()?)
    }

    /// Get a staff record by id.
    pub fn get_staff(&self, id: i64) -> Result<Staff, StaffError> {
        Ok(self.store.find(id)?)
    }

    /// Create a staff record. The store assigns the id.
    pub async fn create_staff(&self, input: StaffInput) -> Result<Staff, StaffError> {
        let record = self.prepare(input).await?;
        let staff = self.store.insert(&record)?;
        info!(staff_id = staff.id, "staff created");
        Ok(staff)
    }

    /// Overwrite every field of an existing record, password included.
    pub async fn replace_staff(&self, id: i64, input: StaffInput) -> Result<Staff, StaffError> {
        let record = self.prepare(input).await?;
        let staff = self.store.replace(id, &record)?;
        info!(staff_id = id, "staff replaced");
        Ok(staff)
    }

    /// Merge the supplied fields into an existing record.
    ///
    /// Only supplied fields are recomputed: a date is normalized, a password
    /// is re-hashed, everything else is written as given. A supplied `null`
    /// clears the column.
    pub async fn update_staff(&self, id: i64, patch: StaffPatch) -> Result<Staff, StaffError> {
        let date_of_birth = match patch.date_of_birth {
            Some(raw) => Some(normalize_date(raw.as_deref())?),
            None => None,
        };
        let password_hash = match patch.password {
            Some(plaintext) => Some(self.hash_password(plaintext).await?),
            None => None,
        };

        let changes = StaffChanges {
            name: patch.name,
            last_name: patch.last_name,
            email: patch.email,
            password_hash,
            contact_information: patch.contact_information,
            phone_number: patch.phone_number,
            mailing_address: patch.mailing_address,
            date_of_birth,
            gender: patch.gender,
            qualifications: patch.qualifications,
            availability: patch.availability,
        };

        let rehashed = changes.password_hash.is_some();
        let staff = self.store.merge(id, &changes)?;
        info!(staff_id = id, rehashed, "staff updated");
        Ok(staff)
    }

    /// Delete a staff record, returning what was removed.
    pub fn delete_staff(&self, id: i64) -> Result<Staff, StaffError> {
        let staff = self.store.delete(id)?;
        info!(staff_id = id, "staff deleted");
        Ok(staff)
    }

    /// Normalize and hash an input into a writable record.
    ///
    /// The date is checked first so a bad date costs no hashing work.
    async fn prepare(&self, input: StaffInput) -> Result<NewStaff, StaffError> {
        let date_of_birth = normalize_date(input.date_of_birth.as_deref())?;
        let password_hash = self.hash_password(input.password).await?;

        Ok(NewStaff {
            name: input.name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            contact_information: input.contact_information,
            phone_number: input.phone_number,
            mailing_address: input.mailing_address,
            date_of_birth,
            gender: input.gender,
            qualifications: input.qualifications,
            availability: input.availability,
        })
    }
}
