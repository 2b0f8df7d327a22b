// src/common/input.rs
//
// Helpers de entrada compartilhados pelos payloads: números que chegam como
// número ou como texto, campos "ausente vs null" dos PATCH, e limpeza de strings.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::common::error::AppError;

/// O frontend manda valores numéricos ora como número, ora como string de formulário.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, AppError> {
        let raw = match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.trim().to_string(),
        };

        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map_err(|_| AppError::InvalidField {
                field,
                reason: "not_a_number",
            })
    }

    pub fn to_i32(&self, field: &'static str) -> Result<i32, AppError> {
        let value = self.to_decimal(field)?;
        if !value.fract().is_zero() {
            return Err(AppError::InvalidField {
                field,
                reason: "not_an_integer",
            });
        }
        value.to_i32().ok_or(AppError::InvalidField {
            field,
            reason: "not_an_integer",
        })
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value.into())
    }
}

pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::MissingField(field))
}

// Valores monetários são NUMERIC(14, 2): no máximo 12 dígitos inteiros.
// 1_000_000_000_000 = 0xE8_D4A5_1000 (Decimal::new não é const).
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

pub fn non_negative_decimal(input: &NumericInput, field: &'static str) -> Result<Decimal, AppError> {
    let value = input.to_decimal(field)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::InvalidField {
            field,
            reason: "must_be_non_negative",
        });
    }
    if value >= MAX_AMOUNT {
        return Err(AppError::InvalidField {
            field,
            reason: "out_of_range",
        });
    }
    Ok(value)
}

pub fn non_negative_i32(input: &NumericInput, field: &'static str) -> Result<i32, AppError> {
    let value = input.to_i32(field)?;
    if value < 0 {
        return Err(AppError::InvalidField {
            field,
            reason: "must_be_non_negative",
        });
    }
    Ok(value)
}

pub fn percentage(input: &NumericInput, field: &'static str) -> Result<Decimal, AppError> {
    let value = input.to_decimal(field)?;
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(AppError::InvalidField {
            field,
            reason: "out_of_range_0_100",
        });
    }
    Ok(value)
}

/// Trim; string vazia vira `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Texto obrigatório: presente e não vazio depois do trim.
pub fn required_text(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    clean(value).ok_or(AppError::MissingField(field))
}

pub fn parse_uuid(raw: &str, field: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidField {
        field,
        reason: "invalid_uuid",
    })
}

/// `id` obrigatório vindo do corpo ou da query string.
pub fn required_uuid(raw: Option<&str>, field: &'static str) -> Result<Uuid, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_uuid(raw, field),
        None => Err(AppError::MissingField(field)),
    }
}

/// Datas chegam como `YYYY-MM-DD`; string vazia = sem data.
pub fn parse_date(raw: Option<String>, field: &'static str) -> Result<Option<NaiveDate>, AppError> {
    match clean(raw) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::InvalidField {
                field,
                reason: "invalid_date",
            }),
    }
}

/// Para `Option<Option<T>>`: campo ausente = `None`, `null` = `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(v: serde_json::Value) -> NumericInput {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn numbers_and_numeric_strings_are_both_accepted() {
        assert_eq!(num(json!(45000)).to_decimal("total_amount").unwrap(), Decimal::from(45000));
        assert_eq!(
            num(json!("8.5")).to_decimal("commission_percentage").unwrap(),
            Decimal::new(85, 1)
        );
        assert_eq!(num(json!(" 12 ")).to_i32("target_missions").unwrap(), 12);
    }

    #[test]
    fn garbage_is_rejected_with_the_field_name() {
        let err = num(json!("abc")).to_decimal("total_amount").unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidField { field: "total_amount", reason: "not_a_number" }
        ));
    }

    #[test]
    fn fractional_counts_are_rejected() {
        assert!(num(json!(2.5)).to_i32("target_missions").is_err());
        assert_eq!(num(json!(3.0)).to_i32("target_missions").unwrap(), 3);
    }

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(percentage(&num(json!(0)), "p").is_ok());
        assert!(percentage(&num(json!(100)), "p").is_ok());
        assert!(percentage(&num(json!(100.01)), "p").is_err());
        assert!(percentage(&num(json!(-1)), "p").is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(non_negative_decimal(&num(json!(-10)), "total_amount").is_err());
        assert!(non_negative_decimal(&num(json!(0)), "total_amount").is_ok());
        assert!(non_negative_i32(&num(json!(-1)), "target_missions").is_err());
    }

    #[test]
    fn amounts_must_fit_the_money_column() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000i64));
        assert!(non_negative_decimal(&num(json!("999999999999.99")), "total_amount").is_ok());
        assert!(matches!(
            non_negative_decimal(&num(json!(10_000_000_000_000i64)), "total_amount"),
            Err(AppError::InvalidField { field: "total_amount", reason: "out_of_range" })
        ));
        assert!(non_negative_decimal(&num(json!("1e12")), "target_revenue").is_err());
    }

    #[test]
    fn clean_trims_and_drops_empty_strings() {
        assert_eq!(clean(Some("  Acme ".into())), Some("Acme".to_string()));
        assert_eq!(clean(Some("   ".into())), None);
        assert!(required_text(Some("".into()), "name").is_err());
    }

    #[test]
    fn ids_and_dates_are_parsed_with_field_errors() {
        assert!(required_uuid(None, "id").is_err());
        assert!(matches!(
            required_uuid(Some("nope"), "id"),
            Err(AppError::InvalidField { reason: "invalid_uuid", .. })
        ));
        let id = Uuid::new_v4();
        assert_eq!(required_uuid(Some(&id.to_string()), "id").unwrap(), id);

        assert_eq!(parse_date(Some("".into()), "deadline").unwrap(), None);
        assert_eq!(
            parse_date(Some("2025-03-31".into()), "deadline").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31)
        );
        assert!(parse_date(Some("31/03/2025".into()), "deadline").is_err());
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn absent_and_null_are_distinguished() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        let null: Patch = serde_json::from_value(json!({ "notes": null })).unwrap();
        let set: Patch = serde_json::from_value(json!({ "notes": "x" })).unwrap();

        assert_eq!(absent.notes, None);
        assert_eq!(null.notes, Some(None));
        assert_eq!(set.notes, Some(Some("x".to_string())));
    }
}
