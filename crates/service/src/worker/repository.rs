use async_trait::async_trait;

use common::types::{Page, Worker, WorkerInput, WorkerQuery};

use crate::errors::ServiceError;

/// Repository abstraction for worker persistence.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn list(&self, query: &WorkerQuery) -> Result<Page<Worker>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Worker>, ServiceError>;
    async fn create(&self, input: &WorkerInput) -> Result<Worker, ServiceError>;
    /// `None` when no row has this id.
    async fn update(&self, id: i32, input: &WorkerInput) -> Result<Option<Worker>, ServiceError>;
    /// `false` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count_shifts(&self, id: i32) -> Result<u64, ServiceError>;

    async fn by_email_domain(&self, domain: &str) -> Result<Vec<Worker>, ServiceError>;
    /// `area_code` holds digits only.
    async fn by_phone_area_code(&self, area_code: &str) -> Result<Vec<Worker>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::query::page_of;

    #[derive(Default)]
    pub struct MockWorkerRepository {
        rows: Mutex<BTreeMap<i32, Worker>>,
        shift_counts: Mutex<HashMap<i32, u64>>, // key: worker_id
        calls: AtomicUsize,
    }

    impl MockWorkerRepository {
        /// Pretend `worker_id` is referenced by `n` shifts.
        pub fn set_shift_count(&self, worker_id: i32, n: u64) {
            self.shift_counts.lock().unwrap().insert(worker_id, n);
        }

        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn contains(haystack: Option<&str>, needle: &str) -> bool {
        haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
    }

    #[async_trait]
    impl WorkerRepository for MockWorkerRepository {
        async fn list(&self, query: &WorkerQuery) -> Result<Page<Worker>, ServiceError> {
            self.hit();
            let rows = self.rows.lock().unwrap();
            let items: Vec<Worker> = rows
                .values()
                .filter(|w| query.worker_id.map_or(true, |id| w.worker_id == id))
                .filter(|w| query.name.as_deref().map_or(true, |n| contains(Some(&w.name), n)))
                .filter(|w| {
                    query.search.as_deref().map_or(true, |s| {
                        contains(Some(&w.name), s) || contains(w.email.as_deref(), s) || contains(w.phone_number.as_deref(), s)
                    })
                })
                .cloned()
                .collect();
            Ok(page_of(items, query.page()))
        }

        async fn get(&self, id: i32) -> Result<Option<Worker>, ServiceError> {
            self.hit();
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, input: &WorkerInput) -> Result<Worker, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            let worker_id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let w = Worker {
                worker_id,
                name: input.name.clone(),
                email: input.email.clone(),
                phone_number: input.phone_number.clone(),
            };
            rows.insert(worker_id, w.clone());
            Ok(w)
        }

        async fn update(&self, id: i32, input: &WorkerInput) -> Result<Option<Worker>, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.get_mut(&id).map(|w| {
                w.name = input.name.clone();
                w.email = input.email.clone();
                w.phone_number = input.phone_number.clone();
                w.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.hit();
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn count_shifts(&self, id: i32) -> Result<u64, ServiceError> {
            self.hit();
            Ok(self.shift_counts.lock().unwrap().get(&id).copied().unwrap_or(0))
        }

        async fn by_email_domain(&self, domain: &str) -> Result<Vec<Worker>, ServiceError> {
            self.hit();
            let suffix = format!("@{}", domain.to_lowercase());
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .filter(|w| w.email.as_deref().is_some_and(|e| e.to_lowercase().ends_with(&suffix)))
                .cloned()
                .collect())
        }

        async fn by_phone_area_code(&self, area_code: &str) -> Result<Vec<Worker>, ServiceError> {
            self.hit();
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .filter(|w| {
                    w.phone_number
                        .as_deref()
                        .is_some_and(|p| models::worker::phone_digits(p).starts_with(area_code))
                })
                .cloned()
                .collect())
        }
    }
}
