use std::cell::{RefCell, RefMut};
use std::collections::{HashMap, VecDeque};

use dealership_core::{Car, CarDraft, CarId};

use crate::api::InventoryApi;
use crate::error::{ClientError, ClientResult, Operation};

/// A request observed by [`InMemoryInventoryApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(CarDraft),
    Update(Car),
    Delete(CarId),
}

impl ApiCall {
    pub fn operation(&self) -> Operation {
        match self {
            ApiCall::List => Operation::Fetch,
            ApiCall::Create(_) => Operation::Create,
            ApiCall::Update(_) => Operation::Update,
            ApiCall::Delete(_) => Operation::Delete,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    cars: Vec<Car>,
    next_id: i64,
    calls: Vec<ApiCall>,
    failures: HashMap<Operation, VecDeque<u16>>,
}

/// In-memory inventory service.
///
/// Intended for tests/dev. Ids are assigned like a server would, every call
/// is recorded, and failures can be queued per operation. Single-threaded,
/// like the client driving it.
#[derive(Debug, Default)]
pub struct InMemoryInventoryApi {
    inner: RefCell<Inner>,
}

impl InMemoryInventoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the service; new ids continue after the highest seeded id.
    pub fn with_cars(cars: Vec<Car>) -> Self {
        let next_id = cars.iter().map(|c| c.id.get()).max().unwrap_or(0);
        Self {
            inner: RefCell::new(Inner {
                cars,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Make the next `operation` answer with `status` instead of succeeding.
    pub fn fail_next(&self, operation: Operation, status: u16) {
        self.inner_mut()
            .failures
            .entry(operation)
            .or_default()
            .push_back(status);
    }

    /// Server-side records.
    pub fn cars(&self) -> Vec<Car> {
        self.inner_mut().cars.clone()
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner_mut().calls.clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.inner_mut()
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    fn inner_mut(&self) -> RefMut<'_, Inner> {
        self.inner.borrow_mut()
    }

    /// Record the call and pop a queued failure for it, if any.
    fn begin(inner: &mut Inner, call: ApiCall) -> ClientResult<()> {
        let operation = call.operation();
        inner.calls.push(call);

        match inner.failures.get_mut(&operation).and_then(VecDeque::pop_front) {
            Some(status) => Err(ClientError::http(operation, status)),
            None => Ok(()),
        }
    }

    fn position(inner: &Inner, id: CarId) -> Option<usize> {
        inner.cars.iter().position(|c| c.id == id)
    }
}

#[async_trait::async_trait(?Send)]
impl InventoryApi for InMemoryInventoryApi {
    async fn list_cars(&self) -> ClientResult<Vec<Car>> {
        let mut inner = self.inner_mut();
        Self::begin(&mut inner, ApiCall::List)?;
        Ok(inner.cars.clone())
    }

    async fn create_car(&self, draft: &CarDraft) -> ClientResult<()> {
        let mut inner = self.inner_mut();
        Self::begin(&mut inner, ApiCall::Create(draft.clone()))?;

        inner.next_id += 1;
        let car = draft.clone().with_id(CarId::new(inner.next_id));
        inner.cars.push(car);
        Ok(())
    }

    async fn update_car(&self, car: &Car) -> ClientResult<()> {
        let mut inner = self.inner_mut();
        Self::begin(&mut inner, ApiCall::Update(car.clone()))?;

        let idx = Self::position(&inner, car.id)
            .ok_or_else(|| ClientError::http(Operation::Update, 404))?;
        inner.cars[idx] = car.clone();
        Ok(())
    }

    async fn delete_car(&self, id: CarId) -> ClientResult<()> {
        let mut inner = self.inner_mut();
        Self::begin(&mut inner, ApiCall::Delete(id))?;

        let idx = Self::position(&inner, id)
            .ok_or_else(|| ClientError::http(Operation::Delete, 404))?;
        inner.cars.remove(idx);
        Ok(())
    }
}
