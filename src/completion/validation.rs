use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const BIRTH_YEAR_ERROR: &str = "두자리 숫자로만 적어주세요";
pub const PHONE_NUMBER_ERROR: &str = "010-0000-0000 또는 01000000000 형식으로 입력해주세요";

static BIRTH_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[0-9]{2}$").unwrap());
static HYPHENATED_PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^010-[0-9]{4}-[0-9]{4}$").unwrap());
static BARE_PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^010[0-9]{8}$").unwrap());

/// An empty birth year is valid: it just means "nothing to update".
/// Returns the error message to display, if any.
pub fn validate_birth_year(birth_year: &str) -> Option<&'static str> {
    if birth_year.is_empty() || BIRTH_YEAR_REGEX.is_match(birth_year) {
        None
    } else {
        Some(BIRTH_YEAR_ERROR)
    }
}

/// Either `010-0000-0000` or `01000000000`. An empty phone number is valid.
pub fn validate_phone_number(phone_number: &str) -> Option<&'static str> {
    if phone_number.is_empty()
        || HYPHENATED_PHONE_NUMBER_REGEX.is_match(phone_number)
        || BARE_PHONE_NUMBER_REGEX.is_match(phone_number)
    {
        None
    } else {
        Some(PHONE_NUMBER_ERROR)
    }
}

/// Turn a two-digit birth year into the first of January of that year.
/// A leading zero means the 2000s, anything else the 1900s.
pub fn parse_birth_year(birth_year: &str) -> Option<NaiveDate> {
    if !BIRTH_YEAR_REGEX.is_match(birth_year) {
        return None;
    }

    let year_in_century = birth_year.parse::<i32>().ok()?;
    let century = if birth_year.starts_with('0') {
        2000
    } else {
        1900
    };
    NaiveDate::from_ymd_opt(century + year_in_century, 1, 1)
}

pub fn parse_phone_number(phone_number: &str) -> String {
    phone_number.replace('-', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        birth_year = {"", "05", "95", "00", "5", "123", "ab", "9a", " 5", "٠٥"},
        expected_result = {None, None, None, None, Some(BIRTH_YEAR_ERROR), Some(BIRTH_YEAR_ERROR), Some(BIRTH_YEAR_ERROR), Some(BIRTH_YEAR_ERROR), Some(BIRTH_YEAR_ERROR), Some(BIRTH_YEAR_ERROR)}
    )]
    fn should_validate_birth_year(birth_year: &str, expected_result: Option<&str>) {
        assert_eq!(expected_result, validate_birth_year(birth_year));
    }

    #[parameterized(
        phone_number = {"", "010-1234-5678", "01012345678", "010-123-5678", "011-1234-5678", "0101234567", "010123456789", "010 1234 5678", "010-12345678", "+82-10-1234-5678"},
        expected_result = {None, None, None, Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR), Some(PHONE_NUMBER_ERROR)}
    )]
    fn should_validate_phone_number(phone_number: &str, expected_result: Option<&str>) {
        assert_eq!(expected_result, validate_phone_number(phone_number));
    }

    #[parameterized(
        birth_year = {"05", "00", "09", "10", "95", "99"},
        expected_date = {(2005, 1, 1), (2000, 1, 1), (2009, 1, 1), (1910, 1, 1), (1995, 1, 1), (1999, 1, 1)}
    )]
    fn should_parse_birth_year(birth_year: &str, expected_date: (i32, u32, u32)) {
        let (year, month, day) = expected_date;
        assert_eq!(
            NaiveDate::from_ymd_opt(year, month, day),
            parse_birth_year(birth_year)
        );
    }

    #[test]
    fn should_format_parsed_birth_year_as_iso_date() {
        assert_eq!(
            "2005-01-01",
            parse_birth_year("05").unwrap().format("%Y-%m-%d").to_string()
        );
        assert_eq!(
            "1995-01-01",
            parse_birth_year("95").unwrap().format("%Y-%m-%d").to_string()
        );
    }

    #[parameterized(birth_year = {"", "5", "123", "a5"})]
    fn should_not_parse_invalid_birth_year(birth_year: &str) {
        assert_eq!(None, parse_birth_year(birth_year));
    }

    #[parameterized(
        phone_number = {"010-1234-5678", "01012345678", "", "--", "0-1-0"},
        expected_result = {"01012345678", "01012345678", "", "", "010"}
    )]
    fn should_parse_phone_number(phone_number: &str, expected_result: &str) {
        let parsed = parse_phone_number(phone_number);

        assert_eq!(expected_result, parsed);
        assert_eq!(parsed, parse_phone_number(&parsed));
    }
}
