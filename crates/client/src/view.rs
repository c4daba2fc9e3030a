//! Render-ready view of [`InventoryState`].
//!
//! The rendering layer (the Leptos frontend, or anything else) should only
//! need what is computed here: which list and form to show, and the text of
//! each table cell.

use dealership_core::{CarId, format_price, stock_label};

use crate::state::{FormMode, InventoryState};

pub const LOADING_TEXT: &str = "Loading cars…";
pub const EMPTY_TEXT: &str = "No cars in inventory. Add one to get started!";

/// One table row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRow {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub in_stock: bool,
    pub stock: &'static str,
    /// Highlight: this row is open in the edit form.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Rows(Vec<CarRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryView {
    pub list: ListView,
    pub form: FormMode,
    pub error: Option<String>,
    pub read_only: bool,
}

impl InventoryView {
    pub fn from_state(state: &InventoryState) -> Self {
        let list = if state.loading {
            ListView::Loading
        } else if state.cars.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(
                state
                    .cars
                    .iter()
                    .map(|car| CarRow {
                        id: car.id,
                        make: car.make.clone(),
                        model: car.model.clone(),
                        year: car.year.to_string(),
                        price: format_price(car.price),
                        in_stock: car.in_stock,
                        stock: stock_label(car.in_stock),
                        editing: state.is_editing(car.id),
                    })
                    .collect(),
            )
        };

        Self {
            list,
            form: state.form_mode(),
            error: state.error.clone(),
            read_only: state.read_only,
        }
    }

    pub fn form_title(&self) -> &'static str {
        match self.form {
            FormMode::Editing(_) => "Edit Car",
            _ => "Add New Car",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.form {
            FormMode::Editing(_) => "Update Car",
            _ => "Add Car",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.form {
            FormMode::Adding => "Cancel",
            _ => "Add New Car",
        }
    }

    pub fn list_message(&self) -> Option<&'static str> {
        match self.list {
            ListView::Loading => Some(LOADING_TEXT),
            ListView::Empty => Some(EMPTY_TEXT),
            ListView::Rows(_) => None,
        }
    }
}
