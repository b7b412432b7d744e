use async_trait::async_trait;
use chrono::NaiveDateTime;

use common::types::{Page, Shift, ShiftInput, ShiftQuery};

use crate::errors::ServiceError;

/// Repository abstraction for shift persistence.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn list(&self, query: &ShiftQuery) -> Result<Page<Shift>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Shift>, ServiceError>;
    async fn create(&self, input: &ShiftInput) -> Result<Shift, ServiceError>;
    async fn update(&self, id: i32, input: &ShiftInput) -> Result<Option<Shift>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;

    async fn worker_exists(&self, worker_id: i32) -> Result<bool, ServiceError>;
    async fn location_exists(&self, location_id: i32) -> Result<bool, ServiceError>;

    /// Shifts of the same worker at the same location intersecting
    /// `[start, end)`, ignoring `exclude`.
    async fn find_overlapping(
        &self,
        worker_id: i32,
        location_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<i32>,
    ) -> Result<Vec<Shift>, ServiceError>;

    /// Shifts starting at/after `start` and ending at/before `end`, by start time.
    async fn by_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Shift>, ServiceError>;
    async fn by_worker(&self, worker_id: i32) -> Result<Vec<Shift>, ServiceError>;
    async fn by_location(&self, location_id: i32) -> Result<Vec<Shift>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::query::page_of;

    #[derive(Default)]
    pub struct MockShiftRepository {
        rows: Mutex<BTreeMap<i32, Shift>>,
        workers: Mutex<HashSet<i32>>,
        locations: Mutex<HashSet<i32>>,
        calls: AtomicUsize,
    }

    impl MockShiftRepository {
        /// Repository where the given workers and locations exist.
        pub fn with_refs(workers: &[i32], locations: &[i32]) -> Self {
            let repo = Self::default();
            repo.workers.lock().unwrap().extend(workers);
            repo.locations.lock().unwrap().extend(locations);
            repo
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn matching(&self, f: impl Fn(&Shift) -> bool) -> Vec<Shift> {
            let mut v: Vec<Shift> = self.rows.lock().unwrap().values().filter(|s| f(s)).cloned().collect();
            v.sort_by_key(|s| (s.start_time, s.shift_id));
            v
        }
    }

    fn row(shift_id: i32, input: &ShiftInput) -> Shift {
        Shift {
            shift_id,
            worker_id: input.worker_id,
            location_id: input.location_id,
            start_time: input.start_time,
            end_time: input.end_time,
        }
    }

    #[async_trait]
    impl ShiftRepository for MockShiftRepository {
        async fn list(&self, query: &ShiftQuery) -> Result<Page<Shift>, ServiceError> {
            self.hit();
            let rows = self.rows.lock().unwrap();
            let items: Vec<Shift> = rows
                .values()
                .filter(|s| query.shift_id.map_or(true, |id| s.shift_id == id))
                .filter(|s| query.worker_id.map_or(true, |id| s.worker_id == id))
                .filter(|s| query.location_id.map_or(true, |id| s.location_id == id))
                .filter(|s| query.start_date.map_or(true, |d| s.start_time >= d))
                .filter(|s| query.end_date.map_or(true, |d| s.end_time <= d))
                .cloned()
                .collect();
            Ok(page_of(items, query.page()))
        }

        async fn get(&self, id: i32) -> Result<Option<Shift>, ServiceError> {
            self.hit();
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, input: &ShiftInput) -> Result<Shift, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let s = row(id, input);
            rows.insert(id, s.clone());
            Ok(s)
        }

        async fn update(&self, id: i32, input: &ShiftInput) -> Result<Option<Shift>, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.get_mut(&id).map(|s| {
                *s = row(id, input);
                s.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.hit();
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn worker_exists(&self, worker_id: i32) -> Result<bool, ServiceError> {
            self.hit();
            Ok(self.workers.lock().unwrap().contains(&worker_id))
        }

        async fn location_exists(&self, location_id: i32) -> Result<bool, ServiceError> {
            self.hit();
            Ok(self.locations.lock().unwrap().contains(&location_id))
        }

        async fn find_overlapping(
            &self,
            worker_id: i32,
            location_id: i32,
            start: NaiveDateTime,
            end: NaiveDateTime,
            exclude: Option<i32>,
        ) -> Result<Vec<Shift>, ServiceError> {
            self.hit();
            Ok(self.matching(|s| {
                s.worker_id == worker_id
                    && s.location_id == location_id
                    && Some(s.shift_id) != exclude
                    && models::shift::overlaps(s.start_time, s.end_time, start, end)
            }))
        }

        async fn by_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Shift>, ServiceError> {
            self.hit();
            Ok(self.matching(|s| s.start_time >= start && s.end_time <= end))
        }

        async fn by_worker(&self, worker_id: i32) -> Result<Vec<Shift>, ServiceError> {
            self.hit();
            Ok(self.matching(|s| s.worker_id == worker_id))
        }

        async fn by_location(&self, location_id: i32) -> Result<Vec<Shift>, ServiceError> {
            self.hit();
            Ok(self.matching(|s| s.location_id == location_id))
        }
    }
}
