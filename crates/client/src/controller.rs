//! The inventory controller.
//!
//! `InventoryClient` keeps the displayed car list consistent with the server
//! and mediates every create/update/delete:
//!
//! ```text
//! UI action → mutate local state → API call → reconcile (full re-fetch) → subscribers
//! ```
//!
//! The list is never patched locally. After any successful write the client
//! re-fetches and replaces `cars` wholesale, so the UI only ever shows
//! server-confirmed records.
//!
//! ## Errors
//!
//! Every operation both returns its `ClientResult` and records the failure
//! message in the state's single `error` slot. Nothing is fatal; the user may
//! dismiss the message or retry.
//!
//! ## Overlapping fetches
//!
//! Each fetch takes a ticket. Only the most recently issued fetch may apply
//! its outcome; responses of superseded fetches are dropped.

use std::cell::Cell;

use chrono::Datelike;
use dealership_core::{Car, CarDraft, CarId, FieldInput, FormData, FormField};
use tokio::sync::watch;

use crate::api::InventoryApi;
use crate::config::ClientConfig;
use crate::confirm::{Confirm, DELETE_PROMPT};
use crate::error::{ClientError, ClientResult, Operation};
use crate::state::{FormMode, InventoryState};
use crate::subscription::Subscription;

/// Outcome of [`InventoryClient::delete`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The user declined the confirmation prompt; nothing was sent.
    Cancelled,
}

/// Current calendar year in local time, used for blank forms.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub struct InventoryClient<A, C> {
    api: A,
    confirm: C,
    read_only: bool,
    state: watch::Sender<InventoryState>,
    fetch_ticket: Cell<u64>,
}

impl<A, C> InventoryClient<A, C>
where
    A: InventoryApi,
    C: Confirm,
{
    /// Full-CRUD client.
    pub fn new(api: A, confirm: C) -> Self {
        let (state, _) = watch::channel(InventoryState::new(current_year(), false));
        Self {
            api,
            confirm,
            read_only: false,
            state,
            fetch_ticket: Cell::new(0),
        }
    }

    /// Client whose capabilities follow `config`.
    pub fn from_config(api: A, confirm: C, config: &ClientConfig) -> Self {
        Self::new(api, confirm).read_only(config.is_read_only())
    }

    /// Toggle the read-only variant: listing only, every mutation refused.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self.state.send_modify(|s| s.read_only = read_only);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn subscribe(&self) -> Subscription<InventoryState> {
        Subscription::new(self.state.subscribe())
    }

    pub fn snapshot(&self) -> InventoryState {
        self.state.borrow().clone()
    }

    /// Initial load.
    pub async fn mount(&self) -> ClientResult<()> {
        let ticket = self.begin_mount();
        self.finish_fetch(ticket).await
    }

    /// Synchronous half of [`mount`](Self::mount): the list is marked as
    /// loading before the request is first polled.
    pub(crate) fn begin_mount(&self) -> u64 {
        tracing::info!(read_only = self.read_only, "mounting inventory client");
        self.start_fetch()
    }

    /// Replace `cars` with the server's list.
    ///
    /// `loading` is set for the duration of the request and cleared when it
    /// completes, whatever the outcome. A failure leaves `cars` untouched.
    pub async fn fetch_all(&self) -> ClientResult<()> {
        let ticket = self.start_fetch();
        self.finish_fetch(ticket).await
    }

    fn start_fetch(&self) -> u64 {
        let ticket = self.fetch_ticket.get() + 1;
        self.fetch_ticket.set(ticket);
        self.modify(|s| {
            s.loading = true;
            s.error = None;
        });
        ticket
    }

    pub(crate) async fn finish_fetch(&self, ticket: u64) -> ClientResult<()> {
        let result = self.api.list_cars().await;

        if self.fetch_ticket.get() != ticket {
            tracing::debug!(ticket, "dropping result of superseded fetch");
            return result.map(|_| ());
        }

        match result {
            Ok(cars) => {
                tracing::info!(count = cars.len(), "inventory fetched");
                self.modify(|s| {
                    s.cars = cars;
                    s.loading = false;
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "inventory fetch failed");
                self.modify(|s| {
                    s.error = Some(err.to_string());
                    s.loading = false;
                });
                Err(err)
            }
        }
    }

    /// Re-fetch after a successful write.
    ///
    /// A failed re-fetch is recorded in `error` but does not undo the write
    /// that triggered it.
    pub async fn reconcile(&self) {
        if let Err(err) = self.fetch_all().await {
            tracing::warn!(error = %err, "reconcile after write failed");
        }
    }

    /// POST a new car, then reconcile and close the form.
    ///
    /// On failure the form is left as is so the user can correct it.
    pub async fn create(&self, draft: CarDraft) -> ClientResult<()> {
        self.ensure_writable(Operation::Create)?;
        draft.validate().map_err(|e| self.fail(e.into()))?;

        self.api
            .create_car(&draft)
            .await
            .map_err(|e| self.fail(e))?;
        tracing::info!(make = %draft.make, model = %draft.model, "car created");

        self.reconcile().await;
        self.reset_form();
        Ok(())
    }

    /// PUT the draft under `id`, then reconcile and leave edit mode.
    ///
    /// On failure the edit form and the record being edited are left as is.
    pub async fn update(&self, id: CarId, draft: CarDraft) -> ClientResult<()> {
        self.ensure_writable(Operation::Update)?;
        draft.validate().map_err(|e| self.fail(e.into()))?;

        let car = draft.with_id(id);
        self.api.update_car(&car).await.map_err(|e| self.fail(e))?;
        tracing::info!(%id, "car updated");

        self.reconcile().await;
        self.reset_form();
        Ok(())
    }

    /// Ask for confirmation, then DELETE and reconcile.
    pub async fn delete(&self, id: CarId) -> ClientResult<Deletion> {
        self.ensure_writable(Operation::Delete)?;

        if !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(%id, "delete cancelled by user");
            return Ok(Deletion::Cancelled);
        }

        self.api.delete_car(id).await.map_err(|e| self.fail(e))?;
        tracing::info!(%id, "car deleted");

        self.reconcile().await;
        Ok(Deletion::Deleted)
    }

    /// Submit whichever form is open.
    ///
    /// The form text is checked against the input constraints first; a
    /// violation is reported without contacting the server.
    pub async fn submit(&self) -> ClientResult<()> {
        let state = self.snapshot();
        let operation = match state.form_mode() {
            FormMode::Hidden => return Err(self.fail(ClientError::NoActiveForm)),
            FormMode::Adding => Operation::Create,
            FormMode::Editing(_) => Operation::Update,
        };
        self.ensure_writable(operation)?;

        let draft = state.form.to_draft().map_err(|e| self.fail(e.into()))?;
        match state.form_mode() {
            FormMode::Editing(id) => self.update(id, draft).await,
            _ => self.create(draft).await,
        }
    }

    /// Open the edit form for `car`, closing the add form.
    pub fn begin_edit(&self, car: &Car) -> ClientResult<()> {
        self.ensure_writable(Operation::Update)?;
        tracing::debug!(id = %car.id, "editing car");
        self.modify(|s| {
            s.form = FormData::from_car(car);
            s.editing_car = Some(car.clone());
            s.show_add_form = false;
        });
        Ok(())
    }

    /// Blank form, no record being edited, nothing shown.
    pub fn reset_form(&self) {
        let year = current_year();
        self.modify(|s| s.reset_form(year));
    }

    /// The "Add New Car" / "Cancel" button.
    pub fn toggle_add_form(&self) -> ClientResult<()> {
        self.ensure_writable(Operation::Create)?;
        let year = current_year();
        self.modify(|s| {
            let open = !s.show_add_form;
            s.reset_form(year);
            s.show_add_form = open;
        });
        Ok(())
    }

    pub fn update_field(&self, field: FormField, input: FieldInput) {
        self.modify(|s| s.form.update_field(field, input));
    }

    pub fn dismiss_error(&self) {
        self.modify(|s| s.error = None);
    }

    fn modify(&self, f: impl FnOnce(&mut InventoryState)) {
        self.state.send_modify(f);
    }

    /// Record `err` in the state and hand it back for returning.
    fn fail(&self, err: ClientError) -> ClientError {
        let message = err.to_string();
        self.modify(|s| s.error = Some(message));
        err
    }

    fn ensure_writable(&self, operation: Operation) -> ClientResult<()> {
        if self.read_only {
            return Err(self.fail(ClientError::ReadOnly(operation)));
        }
        Ok(())
    }
}
