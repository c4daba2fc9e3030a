//! `dealership-client`
//!
//! **Responsibility:** keep a dealership's displayed car inventory in step
//! with the inventory REST API, and drive the add/edit/delete forms.
//!
//! This crate provides:
//! - `InventoryClient`, the controller owning list, form and view state
//! - `InventoryApi`, the network seam (HTTP and in-memory implementations)
//! - Render-ready view models and a state subscription for the UI
//! - A Leptos frontend when built for `wasm32`
//!
//! The API is the authority: every successful write is followed by a full
//! re-fetch, never a local patch.

pub mod api;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod state;
pub mod subscription;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use api::{HttpInventoryApi, InMemoryInventoryApi, InventoryApi};
pub use config::ClientConfig;
pub use confirm::Confirm;
pub use controller::{Deletion, InventoryClient};
pub use error::{ClientError, ClientResult, Operation};
pub use state::{FormMode, InventoryState};
pub use subscription::Subscription;
pub use view::{CarRow, InventoryView, ListView};
