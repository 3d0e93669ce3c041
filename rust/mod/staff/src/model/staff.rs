use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Assigned by the store on insert. Never changes afterwards.
    pub id: i64,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<String>,

    /// Calendar date, serialized as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    /// Argon2id PHC string. Hidden from the API.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Body of create (POST) and full replace (PUT).
///
/// The short field names used by older clients (`lname`, `phoneNo`,
/// snake_case) are accepted as aliases.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    pub name: String,
    #[serde(default, alias = "lname")]
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(default, alias = "contact_information")]
    pub contact_information: Option<String>,
    #[serde(default, alias = "phoneNo")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "mailing_address")]
    pub mailing_address: Option<String>,
    /// `YYYY-MM-DD`; empty or missing means no date.
    #[serde(default, alias = "date_of_birth")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

impl fmt::Debug for StaffInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Body of a partial update (PATCH). Absent fields are left untouched.
///
/// Optional fields distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the column. An empty `dateOfBirth`
/// also clears the stored date. `name`, `email` and `password` cannot be
/// cleared, so `null` there is a malformed body.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, alias = "lname", deserialize_with = "nullable")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub password: Option<String>,
    #[serde(default, alias = "contact_information", deserialize_with = "nullable")]
    pub contact_information: Option<Option<String>>,
    #[serde(default, alias = "phoneNo", deserialize_with = "nullable")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, alias = "mailing_address", deserialize_with = "nullable")]
    pub mailing_address: Option<Option<String>>,
    #[serde(default, alias = "date_of_birth", deserialize_with = "nullable")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub qualifications: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub availability: Option<Option<String>>,
}

/// A present key, `null` included. Absent keys fall back to `default`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A present key that must carry a value.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl fmt::Debug for StaffPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Body of the change-password endpoint.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}
