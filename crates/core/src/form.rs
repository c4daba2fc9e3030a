//! Editable form state for the add/edit car form.
//!
//! `year` and `price` stay as raw text while the user types; they are only
//! parsed when the form is turned into a [`CarDraft`].

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::car::{self, Car, CarDraft};
use crate::error::{DomainError, DomainResult};

/// Draft form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub in_stock: bool,
}

impl FormData {
    /// Blank form: current year, empty price, in stock.
    pub fn defaults(current_year: i32) -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: current_year.to_string(),
            price: String::new(),
            in_stock: true,
        }
    }

    /// Mirror an existing record into the form.
    pub fn from_car(car: &Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: car.price.to_string(),
            in_stock: car.in_stock,
        }
    }

    /// Apply one input event to the named field.
    pub fn update_field(&mut self, field: FormField, input: FieldInput) {
        match field {
            FormField::Make => self.make = input.value,
            FormField::Model => self.model = input.value,
            FormField::Year => self.year = input.value,
            FormField::Price => self.price = input.value,
            FormField::InStock => self.in_stock = input.checked,
        }
    }

    /// Parse the form into a draft, enforcing the input constraints.
    pub fn to_draft(&self) -> DomainResult<CarDraft> {
        car::validate_name("make", &self.make)?;
        car::validate_name("model", &self.model)?;
        let year = car::parse_year(&self.year)?;
        let price = car::parse_price(&self.price)?;

        Ok(CarDraft {
            make: self.make.clone(),
            model: self.model.clone(),
            year,
            price,
            in_stock: self.in_stock,
        })
    }
}

/// Fields of [`FormData`], named as on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormField {
    Make,
    Model,
    Year,
    Price,
    InStock,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Make,
        FormField::Model,
        FormField::Year,
        FormField::Price,
        FormField::InStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Make => "make",
            FormField::Model => "model",
            FormField::Year => "year",
            FormField::Price => "price",
            FormField::InStock => "inStock",
        }
    }

    /// Checkbox-backed fields read the checked flag instead of the text value.
    pub fn is_boolean(&self) -> bool {
        matches!(self, FormField::InStock)
    }
}

impl core::fmt::Display for FormField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown form field: {s}")))
    }
}

/// The signal an input control delivers on change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    pub value: String,
    pub checked: bool,
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            value: String::new(),
            checked,
        }
    }
}
