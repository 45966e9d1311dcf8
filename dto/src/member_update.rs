use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Partial update of a user. Absent fields are left untouched by the backend,
/// hence they are not serialized at all.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct MemberUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
}

impl MemberUpdate {
    /// An empty phone number is considered absent.
    pub fn new(birth_date: Option<NaiveDate>, phone_number: Option<String>) -> Self {
        Self {
            birth_date,
            phone_number: phone_number.filter(|phone_number| !phone_number.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.birth_date.is_none() && self.phone_number.is_none()
    }
}
