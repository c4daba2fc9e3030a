//! `dealership-core`: inventory domain building blocks.
//!
//! This crate contains **pure domain** types (no I/O): car records, drafts,
//! the editable form and its input constraints, and table formatting.

pub mod car;
pub mod error;
pub mod form;
pub mod format;
pub mod id;

pub use car::{Car, CarDraft, MAX_NAME_LEN, MAX_YEAR, MIN_YEAR};
pub use error::{DomainError, DomainResult};
pub use form::{FieldInput, FormData, FormField};
pub use format::{format_price, stock_label};
pub use id::CarId;
