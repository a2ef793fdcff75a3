use chrono::{DateTime, NaiveDate};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::error::FieldError;

/// Request body for `POST /users` and `PUT /users/:Name`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPayload {
    pub name: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

/// Validated profile fields; the password is still plaintext here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Register,
    Update,
}

pub const MIN_NAME_LENGTH: usize = 4;

impl UserPayload {
    /// Run every rule and collect all failures in rule order.
    pub fn validate(&self, mode: Mode) -> Result<ValidUser, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = self.name.as_deref();
        let password = self.password.as_deref();
        let email = self.email.as_deref();

        if mode == Mode::Register && name.map_or(0, |n| n.chars().count()) < MIN_NAME_LENGTH {
            errors.push(FieldError::body("Name", name, "Name is required"));
        }
        if !name.is_some_and(is_alphanumeric) {
            errors.push(FieldError::body(
                "Name",
                name,
                "Name contains non alphanumeric characters - not allowed.",
            ));
        }
        if password.map_or(true, str::is_empty) {
            errors.push(FieldError::body("Password", password, "Password is required"));
        }
        if !email.is_some_and(EmailAddress::is_valid) {
            errors.push(FieldError::body("Email", email, "Email does not appear to be valid."));
        }

        let birthday = match self.birthday.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_birthday(raw) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::body("Birthday", Some(raw), "Birthday must be a valid date"));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidUser {
            name: self.name.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            birthday,
        })
    }
}

/// ASCII letters and digits only, at least one character.
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
