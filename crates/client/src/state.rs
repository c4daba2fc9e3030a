//! Client state owned by [`InventoryClient`](crate::InventoryClient).

use dealership_core::{Car, CarId, FormData};

/// Which form, if any, is on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormMode {
    Hidden,
    Adding,
    Editing(CarId),
}

/// Everything the rendering layer needs, as one cloneable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryState {
    /// Last successfully fetched list, in server order.
    pub cars: Vec<Car>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Last failure message, until the next attempt or dismissal.
    pub error: Option<String>,
    pub editing_car: Option<Car>,
    pub form: FormData,
    pub show_add_form: bool,
    pub read_only: bool,
}

impl InventoryState {
    pub fn new(current_year: i32, read_only: bool) -> Self {
        Self {
            cars: Vec::new(),
            loading: false,
            error: None,
            editing_car: None,
            form: FormData::defaults(current_year),
            show_add_form: false,
            read_only,
        }
    }

    /// Editing wins over adding; the two flags are kept exclusive by the client.
    pub fn form_mode(&self) -> FormMode {
        match (&self.editing_car, self.show_add_form) {
            (Some(car), _) => FormMode::Editing(car.id),
            (None, true) => FormMode::Adding,
            (None, false) => FormMode::Hidden,
        }
    }

    pub fn is_editing(&self, id: CarId) -> bool {
        self.editing_car.as_ref().is_some_and(|c| c.id == id)
    }

    /// Back to a blank, hidden form.
    pub(crate) fn reset_form(&mut self, current_year: i32) {
        self.form = FormData::defaults(current_year);
        self.editing_car = None;
        self.show_add_form = false;
    }
}
