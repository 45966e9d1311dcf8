use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Identifier of a user on the attendance backend.
/// Depending on the endpoint, it is sent either as a number or as a string.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{id}"),
            UserId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// A member as listed in an organization roster.
///
/// The backend is not consistent regarding casing, so both `camelCase` and `snake_case`
/// names are read, the first filled one winning. Members are always written back in
/// `camelCase`. Any other property of the roster entry is kept as is,
/// so that a member can be stored and read back without losing anything.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
#[serde(rename_all = "camelCase", try_from = "RosterEntry")]
pub struct Member {
    user_id: UserId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_year: Option<String>,
    #[serde(rename = "birth_date", skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
    #[serde(flatten)]
    #[getter(skip)]
    other_properties: Map<String, Value>,
}

/// A roster entry as sent by the backend, each spelling in its own field.
#[derive(Deserialize)]
struct RosterEntry {
    #[serde(rename = "userId", default)]
    user_id: Option<UserId>,
    #[serde(rename = "user_id", default)]
    user_id_snake_case: Option<UserId>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    name: Option<String>,
    #[serde(rename = "birthYear", default, deserialize_with = "lenient_string::deserialize")]
    birth_year: Option<String>,
    #[serde(rename = "birth_year", default, deserialize_with = "lenient_string::deserialize")]
    birth_year_snake_case: Option<String>,
    #[serde(rename = "birth_date", default, deserialize_with = "lenient_string::deserialize")]
    birth_date: Option<String>,
    #[serde(rename = "birthDate", default, deserialize_with = "lenient_string::deserialize")]
    birth_date_camel_case: Option<String>,
    #[serde(rename = "phoneNumber", default, deserialize_with = "lenient_string::deserialize")]
    phone_number: Option<String>,
    #[serde(rename = "phone_number", default, deserialize_with = "lenient_string::deserialize")]
    phone_number_snake_case: Option<String>,
    #[serde(flatten)]
    other_properties: Map<String, Value>,
}

impl TryFrom<RosterEntry> for Member {
    type Error = String;

    fn try_from(entry: RosterEntry) -> Result<Self, Self::Error> {
        let user_id = entry
            .user_id
            .or(entry.user_id_snake_case)
            .ok_or_else(|| "missing field `userId`".to_owned())?;

        Ok(Self {
            user_id,
            name: entry.name.unwrap_or_default(),
            birth_year: first_filled(entry.birth_year, entry.birth_year_snake_case),
            birth_date: first_filled(entry.birth_date, entry.birth_date_camel_case),
            phone_number: first_filled(entry.phone_number, entry.phone_number_snake_case),
            other_properties: entry.other_properties,
        })
    }
}

/// The first non-empty value. When none is filled, the first present one is kept.
fn first_filled(first: Option<String>, second: Option<String>) -> Option<String> {
    match (first, second) {
        (Some(first), _) if !first.is_empty() => Some(first),
        (_, Some(second)) if !second.is_empty() => Some(second),
        (first, second) => first.or(second),
    }
}

impl Member {
    pub fn new(
        user_id: UserId,
        name: String,
        birth_year: Option<String>,
        birth_date: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            user_id,
            name,
            birth_year,
            birth_date,
            phone_number,
            other_properties: Map::new(),
        }
    }

    pub fn has_birth_year(&self) -> bool {
        is_filled(&self.birth_year)
    }

    pub fn has_phone_number(&self) -> bool {
        is_filled(&self.phone_number)
    }

    /// A member needs completion as soon as their birth year or their phone number is missing.
    pub fn needs_completion(&self) -> bool {
        !self.has_birth_year() || !self.has_phone_number()
    }
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}

/// Roster entries may carry numbers where strings are expected (e.g. `"birthYear": 95`).
mod lenient_string {
    use serde::{Deserialize, Deserializer, de};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(Value::Number(value)) => Ok(Some(value.to_string())),
            Some(value) => Err(de::Error::custom(format!(
                "expected a string or a number, got {value}"
            ))),
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    pub const MEMBER_NAME: &str = "Jon Doe";

    /// A member missing their birth year, but having a phone number.
    pub fn get_member_without_birth_year(id: u64) -> Member {
        Member::new(
            UserId::Number(id),
            format!("{MEMBER_NAME} {id}"),
            None,
            None,
            Some("010-1234-5678".to_owned()),
        )
    }

    /// A member missing their phone number, but having a birth year.
    pub fn get_member_without_phone_number(id: u64) -> Member {
        Member::new(
            UserId::Number(id),
            format!("{MEMBER_NAME} {id}"),
            Some("95".to_owned()),
            Some("1995-01-01".to_owned()),
            None,
        )
    }

    pub fn get_complete_member(id: u64) -> Member {
        Member::new(
            UserId::Number(id),
            format!("{MEMBER_NAME} {id}"),
            Some("95".to_owned()),
            Some("1995-01-01".to_owned()),
            Some("01012345678".to_owned()),
        )
    }

    #[test]
    fn should_deserialize_camel_case_member() {
        let json = r#"{"userId":42,"name":"Jon Doe","birthYear":"95","phoneNumber":"010-1234-5678"}"#;

        let member: Member = serde_json::from_str(json).unwrap();

        assert_eq!(&UserId::Number(42), member.user_id());
        assert_eq!("Jon Doe", member.name());
        assert_eq!(&Some("95".to_owned()), member.birth_year());
        assert_eq!(&Some("010-1234-5678".to_owned()), member.phone_number());
        assert!(!member.needs_completion());
    }

    #[test]
    fn should_deserialize_snake_case_member() {
        let json = r#"{"user_id":"abc","name":"Jon Doe","birth_year":"","birth_date":"1995-01-01","phone_number":null}"#;

        let member: Member = serde_json::from_str(json).unwrap();

        assert_eq!(&UserId::Text("abc".to_owned()), member.user_id());
        assert_eq!(&Some("".to_owned()), member.birth_year());
        assert_eq!(&Some("1995-01-01".to_owned()), member.birth_date());
        assert_eq!(&None, member.phone_number());
    }

    #[test]
    fn should_read_both_spellings_of_the_same_field() {
        let json = r#"{"userId":1,"name":"A","birthYear":"","birth_year":"95","phoneNumber":"01011112222","phone_number":"01033334444"}"#;

        let member: Member = serde_json::from_str(json).unwrap();

        assert_eq!(&Some("95".to_owned()), member.birth_year());
        assert_eq!(&Some("01011112222".to_owned()), member.phone_number());
        assert!(!member.needs_completion());
    }

    #[test]
    fn should_keep_empty_value_when_no_spelling_is_filled() {
        let json = r#"{"user_id":1,"birthYear":"","birth_year":null}"#;

        let member: Member = serde_json::from_str(json).unwrap();

        assert_eq!(&UserId::Number(1), member.user_id());
        assert_eq!("", member.name());
        assert_eq!(&Some("".to_owned()), member.birth_year());
        assert!(member.needs_completion());
    }

    #[parameterized(
        first = {None, Some(""), Some("95"), Some(""), None},
        second = {None, Some("99"), Some("99"), None, Some("")},
        expected_result = {None, Some("99"), Some("95"), Some(""), Some("")}
    )]
    fn should_keep_first_filled_value(
        first: Option<&str>,
        second: Option<&str>,
        expected_result: Option<&str>,
    ) {
        assert_eq!(
            expected_result.map(str::to_owned),
            first_filled(first.map(str::to_owned), second.map(str::to_owned))
        );
    }

    #[test]
    fn should_read_numbers_as_strings() {
        let json = r#"{"userId":1,"name":"Jon Doe","birthYear":95}"#;

        let member: Member = serde_json::from_str(json).unwrap();

        assert_eq!(&Some("95".to_owned()), member.birth_year());
    }

    #[test]
    fn should_not_deserialize_member_without_user_id() {
        let json = r#"{"name":"Jon Doe"}"#;

        let result: Result<Member, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn should_keep_other_properties() {
        let json = r#"{"userId":42,"name":"Jon Doe","role":"LEADER","organization":{"id":"7"}}"#;

        let member: Member = serde_json::from_str(json).unwrap();
        let serialized: Value = serde_json::to_value(&member).unwrap();

        assert_eq!("LEADER", serialized["role"]);
        assert_eq!("7", serialized["organization"]["id"]);
        assert_eq!(42, serialized["userId"]);
        let read_back: Member = serde_json::from_value(serialized).unwrap();
        assert_eq!(member, read_back);
    }

    #[parameterized(
        birth_year = {None, Some(""), Some("95"), None, Some("95")},
        phone_number = {Some("01012345678"), Some("01012345678"), None, None, Some("01012345678")},
        expected_result = {true, true, true, true, false}
    )]
    fn should_tell_whether_member_needs_completion(
        birth_year: Option<&str>,
        phone_number: Option<&str>,
        expected_result: bool,
    ) {
        let member = Member::new(
            UserId::Number(1),
            MEMBER_NAME.to_owned(),
            birth_year.map(str::to_owned),
            None,
            phone_number.map(str::to_owned),
        );

        assert_eq!(expected_result, member.needs_completion());
    }

    #[test]
    fn should_display_user_id() {
        assert_eq!("42", UserId::Number(42).to_string());
        assert_eq!("abc", UserId::Text("abc".to_owned()).to_string());
    }
}
