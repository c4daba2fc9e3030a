//! The inventory REST API as seen by the client.
//!
//! `InventoryApi` is the seam between the controller and the network:
//! - [`HttpInventoryApi`] talks to the real service over HTTP.
//! - [`InMemoryInventoryApi`] keeps records in memory for tests/dev.
//!
//! Futures are not required to be `Send`: the client runs on a single
//! cooperative event loop (the browser's, or a current-thread runtime).

pub mod http;
pub mod in_memory;

use dealership_core::{Car, CarDraft, CarId};

use crate::error::ClientResult;

pub use http::HttpInventoryApi;
pub use in_memory::{ApiCall, InMemoryInventoryApi};

#[async_trait::async_trait(?Send)]
pub trait InventoryApi {
    /// `GET /api/cars`
    async fn list_cars(&self) -> ClientResult<Vec<Car>>;

    /// `POST /api/cars` with a record that has no id yet.
    async fn create_car(&self, draft: &CarDraft) -> ClientResult<()>;

    /// `PUT /api/cars/{id}` with the full record, id included.
    async fn update_car(&self, car: &Car) -> ClientResult<()>;

    /// `DELETE /api/cars/{id}`
    async fn delete_car(&self, id: CarId) -> ClientResult<()>;
}

#[async_trait::async_trait(?Send)]
impl<T> InventoryApi for std::rc::Rc<T>
where
    T: InventoryApi + ?Sized,
{
    async fn list_cars(&self) -> ClientResult<Vec<Car>> {
        (**self).list_cars().await
    }

    async fn create_car(&self, draft: &CarDraft) -> ClientResult<()> {
        (**self).create_car(draft).await
    }

    async fn update_car(&self, car: &Car) -> ClientResult<()> {
        (**self).update_car(car).await
    }

    async fn delete_car(&self, id: CarId) -> ClientResult<()> {
        (**self).delete_car(id).await
    }
}
