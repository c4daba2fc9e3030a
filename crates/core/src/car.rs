//! Car records and drafts.
//!
//! A [`Car`] is the server-confirmed record; a [`CarDraft`] is the same shape
//! without the server-assigned id, as sent on create.

use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::CarId;

/// Maximum length of `make` and `model`, in characters.
pub const MAX_NAME_LEN: usize = 50;
/// Earliest accepted model year.
pub const MIN_YEAR: i32 = 1900;
/// Latest accepted model year.
pub const MAX_YEAR: i32 = 2100;
/// Prices are entered in steps of 0.01.
pub const PRICE_SCALE: u32 = 2;

/// A vehicle in the dealership inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub in_stock: bool,
}

impl Car {
    /// Drop the id, keeping every editable field.
    pub fn to_draft(&self) -> CarDraft {
        CarDraft {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            price: self.price,
            in_stock: self.in_stock,
        }
    }
}

/// A car record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub in_stock: bool,
}

impl CarDraft {
    /// Merge an existing id into the draft (the PUT body shape).
    pub fn with_id(self, id: CarId) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            in_stock: self.in_stock,
        }
    }

    /// Check the draft against the form's input constraints.
    pub fn validate(&self) -> DomainResult<()> {
        validate_name("make", &self.make)?;
        validate_name("model", &self.model)?;
        validate_year(self.year)?;
        validate_price(self.price)?;
        Ok(())
    }
}

pub(crate) fn validate_name(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_year(year: i32) -> DomainResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(year_out_of_range());
    }
    Ok(())
}

fn year_out_of_range() -> DomainError {
    DomainError::validation(format!("year must be between {MIN_YEAR} and {MAX_YEAR}"))
}

pub(crate) fn validate_price(price: Decimal) -> DomainResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::validation("price must not be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(DomainError::validation(
            "price must have at most two decimal places",
        ));
    }
    Ok(())
}

/// Parse raw year text as typed into a number input.
pub fn parse_year(text: &str) -> DomainResult<i32> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation("year is required"));
    }
    // Number inputs also accept "2020.0" and "2.02e3".
    let value = parse_number(text)
        .filter(|v| v.fract().is_zero())
        .ok_or_else(|| DomainError::validation(format!("year must be a whole number, got {text:?}")))?;
    let year = value.to_i32().ok_or_else(year_out_of_range)?;
    validate_year(year)?;
    Ok(year)
}

/// Parse raw price text as typed into a number input.
pub fn parse_price(text: &str) -> DomainResult<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation("price is required"));
    }
    let price = parse_number(text)
        .ok_or_else(|| DomainError::validation(format!("price must be a number, got {text:?}")))?;
    validate_price(price)?;
    Ok(price)
}

/// Plain or scientific notation.
fn parse_number(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
