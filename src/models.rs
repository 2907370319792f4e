//! Domain models that mirror the `guestlist` table and get passed from the
//! persistence layer through to the front-ends and exporters. They stay plain
//! data holders; formatting for documents lives in `export`.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;

use crate::error::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the guest list.
pub struct Attendee {
    /// Primary key assigned by the database. Never reused, even after deletes.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
    pub email: String,
    /// Kept as text so leading zeros and `+` prefixes survive.
    pub phone: String,
    pub date_added: NaiveDateTime,
}

impl Attendee {
    /// `First Last`, used for search matching and confirmations.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Attendee {
    /// One-line summary shown in lists, e.g.
    /// `John Doe from Warsaw working at GDF, id 55`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} from {} working at {}, id {}",
            self.first_name, self.last_name, self.city, self.company, self.id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Attendee data as entered by the user, before the database assigns an id.
pub struct NewAttendee {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    /// When `None` the insert stamps the current local time.
    pub date_added: Option<NaiveDateTime>,
}

impl NewAttendee {
    /// Build from the six fields collected by a form, in table order.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            city: city.into(),
            company: company.into(),
            email: email.into(),
            phone: phone.into(),
            date_added: None,
        }
    }

    /// Pin the timestamp instead of letting the insert pick the current time.
    pub fn added_at(mut self, date_added: NaiveDateTime) -> Self {
        self.date_added = Some(date_added);
        self
    }

    /// The timestamp that will be written: the pinned one, or now.
    pub fn resolved_date_added(&self) -> NaiveDateTime {
        self.date_added
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Reject blank required fields and implausible email addresses.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("City", &self.city),
            ("Company", &self.company),
            ("Email", &self.email),
            ("Phone number", &self.phone),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(label));
            }
        }

        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }

    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            city: self.city.trim().to_string(),
            company: self.company.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date_added: self.date_added,
        }
    }
}
