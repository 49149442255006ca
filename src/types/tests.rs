use super::{Date, FormatError, Money};
use anyhow::Result;
use std::str::FromStr;

#[test]
fn test_date_parses_and_renders_zero_padded_fields() -> Result<()> {
    let date = Date::from_str("3/7/2021")?;

    assert_eq!(date, Date::new(2021, 3, 7));
    assert_eq!(date.to_string(), "03/07/2021");

    Ok(())
}

#[test]
fn test_date_round_trips_every_valid_month_and_day() -> Result<()> {
    for year in [1000, 1999, 2021, 9999] {
        for month in 1..=12 {
            for day in 1..=31 {
                let date = Date::new(year, month, day);
                assert_eq!(Date::from_str(&date.to_string())?, date);
            }
        }
    }

    Ok(())
}

#[test]
fn test_date_accepts_days_past_the_end_of_the_month() -> Result<()> {
    assert_eq!(Date::from_str("02/30/2021")?, Date::new(2021, 2, 30));
    assert_eq!(Date::from_str("02/31/2023")?, Date::new(2023, 2, 31));

    Ok(())
}

#[test]
fn test_date_fails_to_parse_out_of_range_or_malformed_strings() {
    let invalid = ["13/01/2020", "00/01/2020", "01/32/2020", "01/00/2020", "01/01/999", "01/01/10000", "01/01", "01/01/2020/01", "", "aa/01/2020", "01-01-2020"];

    for value in invalid {
        assert_eq!(Date::from_str(value), Err(FormatError::invalid_date(value)), "{value:?} should not parse");
    }
}

#[test]
fn test_date_month_helpers() {
    let date = Date::new(2021, 1, 20);

    assert_eq!(date.first_of_month(), Date::new(2021, 1, 1));
    assert_eq!(date.with_day(5), Date::new(2021, 1, 5));
    assert!(date.same_month(&Date::new(2021, 1, 5)));
    assert!(!date.same_month(&Date::new(2022, 1, 20)));
    assert!(!date.same_month(&Date::new(2021, 2, 20)));
}

#[test]
fn test_money_zero_is_the_empty_string() -> Result<()> {
    assert_eq!(Money::ZERO.to_string(), "");
    assert_eq!(Money::from_str("")?, Money::ZERO);

    Ok(())
}

#[test]
fn test_money_renders_with_thousands_separators() {
    let test_cases = vec![
        (1, "$0.01"),
        (99, "$0.99"),
        (100, "$1.00"),
        (999, "$9.99"),
        (1000, "$10.00"),
        (123456, "$1,234.56"),
        (1234567, "$12,345.67"),
        (123456789, "$1,234,567.89"),
        (100000000, "$1,000,000.00"),
    ];

    for (cents, expected) in test_cases {
        assert_eq!(Money::from_cents(cents).to_string(), expected);
    }
}

#[test]
fn test_money_round_trips_positive_amounts() -> Result<()> {
    for cents in [1, 99, 100, 999, 1000, 1234567] {
        let money = Money::from_cents(cents);
        assert_eq!(Money::from_str(&money.to_string())?, money);
    }

    Ok(())
}

#[test]
fn test_money_parses_grouped_and_ungrouped_dollars() -> Result<()> {
    assert_eq!(Money::from_str("$1,234.56")?.cents(), 123456);
    assert_eq!(Money::from_str("$1234.56")?.cents(), 123456);
    assert_eq!(Money::from_str("$0.00")?, Money::ZERO);
    assert_eq!(Money::from_str("$1,000,000.01")?.cents(), 100000001);

    Ok(())
}

#[test]
fn test_money_fails_to_parse_invalid_strings() {
    let invalid = ["1.00", "$1.5", "$1.555", "-$1.00", "$-1.00", "$1", "$.50", "$12,34.00", "$,.00", " $1.00", "abc"];

    for value in invalid {
        assert_eq!(Money::from_str(value), Err(FormatError::invalid_money(value)), "{value:?} should not parse");
    }
}

#[test]
fn test_money_reports_overflow() {
    let value = "$99999999999999999999.00";

    assert!(matches!(Money::from_str(value), Err(FormatError::Overflow(_))));
}

#[test]
fn test_money_renders_negative_amounts_with_a_leading_sign() {
    let money = Money::from_cents(-123456);

    assert_eq!(money.to_string(), "-$1,234.56");
    assert!(Money::from_str(&money.to_string()).is_err());
}

#[test]
fn test_money_checked_add() {
    let total = Money::from_cents(150).checked_add(Money::from_cents(250));

    assert_eq!(total, Some(Money::from_cents(400)));
    assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
}
