use crate::completion::validation::{validate_birth_year, validate_phone_number};
use derive_getters::Getters;
use dto::member::{Member, UserId};
use log::debug;
use serde::Serialize;

/// The editable part of a member during completion.
///
/// Only the fields missing on the original member can be edited.
/// Invalid inputs are kept as typed, alongside the error message to display.
#[derive(Debug, Serialize, Getters, PartialEq, Clone)]
pub struct MemberDraft {
    user_id: UserId,
    name: String,
    #[getter(skip)]
    needs_birth_year: bool,
    #[getter(skip)]
    needs_phone_number: bool,
    birth_year_input: String,
    phone_number_input: String,
    birth_year_error: String,
    phone_number_error: String,
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            user_id: member.user_id().clone(),
            name: member.name().clone(),
            needs_birth_year: !member.has_birth_year(),
            needs_phone_number: !member.has_phone_number(),
            birth_year_input: String::new(),
            phone_number_input: String::new(),
            birth_year_error: String::new(),
            phone_number_error: String::new(),
        }
    }
}

impl MemberDraft {
    pub fn needs_birth_year(&self) -> bool {
        self.needs_birth_year
    }

    pub fn needs_phone_number(&self) -> bool {
        self.needs_phone_number
    }

    pub fn set_birth_year_input(&mut self, birth_year: String) {
        if !self.needs_birth_year {
            debug!("Birth year is already known, input ignored [user_id: {}]", self.user_id);
            return;
        }

        self.birth_year_error = validate_birth_year(&birth_year)
            .unwrap_or_default()
            .to_owned();
        self.birth_year_input = birth_year;
    }

    pub fn set_phone_number_input(&mut self, phone_number: String) {
        if !self.needs_phone_number {
            debug!("Phone number is already known, input ignored [user_id: {}]", self.user_id);
            return;
        }

        self.phone_number_error = validate_phone_number(&phone_number)
            .unwrap_or_default()
            .to_owned();
        self.phone_number_input = phone_number;
    }

    pub fn has_error(&self) -> bool {
        !self.birth_year_error.is_empty() || !self.phone_number_error.is_empty()
    }
}
