use async_trait::async_trait;

use common::types::{Location, LocationInput, LocationQuery, Page};

use crate::errors::ServiceError;

/// Repository abstraction for location persistence.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self, query: &LocationQuery) -> Result<Page<Location>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Location>, ServiceError>;
    async fn create(&self, input: &LocationInput) -> Result<Location, ServiceError>;
    async fn update(&self, id: i32, input: &LocationInput) -> Result<Option<Location>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn count_shifts(&self, id: i32) -> Result<u64, ServiceError>;

    /// Exact, case-insensitive.
    async fn by_country(&self, country: &str) -> Result<Vec<Location>, ServiceError>;
    /// Exact, case-insensitive.
    async fn by_county(&self, county: &str) -> Result<Vec<Location>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::query::page_of;

    #[derive(Default)]
    pub struct MockLocationRepository {
        rows: Mutex<BTreeMap<i32, Location>>,
        shift_counts: Mutex<HashMap<i32, u64>>, // key: location_id
        calls: AtomicUsize,
    }

    impl MockLocationRepository {
        pub fn set_shift_count(&self, location_id: i32, n: u64) {
            self.shift_counts.lock().unwrap().insert(location_id, n);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn matching(&self, f: impl Fn(&Location) -> bool) -> Vec<Location> {
            self.rows.lock().unwrap().values().filter(|l| f(l)).cloned().collect()
        }
    }

    fn row(location_id: i32, input: &LocationInput) -> Location {
        Location {
            location_id,
            name: input.name.clone(),
            address: input.address.clone(),
            town: input.town.clone(),
            county: input.county.clone(),
            post_code: input.post_code.clone(),
            country: input.country.clone(),
        }
    }

    #[async_trait]
    impl LocationRepository for MockLocationRepository {
        async fn list(&self, query: &LocationQuery) -> Result<Page<Location>, ServiceError> {
            self.hit();
            let needle = query.search.as_deref().map(str::to_lowercase);
            let items = self.matching(|l| {
                query.location_id.map_or(true, |id| l.location_id == id)
                    && needle.as_deref().map_or(true, |s| {
                        [&l.name, &l.address, &l.town, &l.county, &l.post_code, &l.country]
                            .iter()
                            .any(|v| v.to_lowercase().contains(s))
                    })
            });
            Ok(page_of(items, query.page()))
        }

        async fn get(&self, id: i32) -> Result<Option<Location>, ServiceError> {
            self.hit();
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, input: &LocationInput) -> Result<Location, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let l = row(id, input);
            rows.insert(id, l.clone());
            Ok(l)
        }

        async fn update(&self, id: i32, input: &LocationInput) -> Result<Option<Location>, ServiceError> {
            self.hit();
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.get_mut(&id).map(|l| {
                *l = row(id, input);
                l.clone()
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

        async fn by_country(&self, country: &str) -> Result<Vec<Location>, ServiceError> {
            self.hit();
            Ok(self.matching(|l| l.country.eq_ignore_ascii_case(country)))
        }

        async fn by_county(&self, county: &str) -> Result<Vec<Location>, ServiceError> {
            self.hit();
            Ok(self.matching(|l| l.county.eq_ignore_ascii_case(county)))
        }
    }
}
