use std::sync::Arc;

use tracing::{info, instrument, warn};

use common::types::{Location, LocationInput, LocationQuery, Page};

use super::repository::LocationRepository;
use crate::errors::ServiceError;

pub struct LocationService<R: LocationRepository> {
    repo: Arc<R>,
}

fn required<'a>(what: &str, value: &'a str) -> Result<&'a str, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", what)));
    }
    Ok(v)
}

impl<R: LocationRepository> LocationService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, query))]
    pub async fn list(&self, query: LocationQuery) -> Result<Page<Location>, ServiceError> {
        self.repo.list(&query.normalized()).await
    }

    pub async fn get(&self, id: i32) -> Result<Location, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("location", id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: LocationInput) -> Result<Location, ServiceError> {
        let input = input.normalized();
        models::location::validate(&input)?;
        let l = self.repo.create(&input).await?;
        info!(location_id = l.location_id, "location_created");
        Ok(l)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: i32, input: LocationInput) -> Result<Location, ServiceError> {
        let input = input.normalized();
        models::location::validate(&input)?;
        let l = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::not_found("location", id))?;
        info!(location_id = id, "location_updated");
        Ok(l)
    }

    /// Refused while any shift still takes place at the location.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("location", id));
        }
        let shifts = self.repo.count_shifts(id).await?;
        if shifts > 0 {
            warn!(location_id = id, shifts, "location_delete_blocked");
            return Err(ServiceError::Validation(format!(
                "cannot delete location {}: it has {} associated shift(s)",
                id, shifts
            )));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("location", id));
        }
        info!(location_id = id, "location_deleted");
        Ok(())
    }

    pub async fn by_country(&self, country: &str) -> Result<Vec<Location>, ServiceError> {
        let country = required("country", country)?;
        self.repo.by_country(country).await
    }

    pub async fn by_county(&self, county: &str) -> Result<Vec<Location>, ServiceError> {
        let county = required("county", county)?;
        self.repo.by_county(county).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::repository::mock::MockLocationRepository;

    fn depot() -> LocationInput {
        LocationInput {
            name: "Depot".into(),
            address: "1 High Street".into(),
            town: "Leeds".into(),
            county: "West Yorkshire".into(),
            post_code: "LS1 4AP".into(),
            country: "United Kingdom".into(),
        }
    }

    fn svc() -> (Arc<MockLocationRepository>, LocationService<MockLocationRepository>) {
        let repo = Arc::new(MockLocationRepository::default());
        (repo.clone(), LocationService::new(repo))
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_repository() {
        let (repo, svc) = svc();
        let mut bad = depot();
        bad.post_code = "X".into();
        bad.town = " ".into();
        let err = svc.create(bad).await.unwrap_err();
        assert!(err.detail().contains("town is required"));
        assert!(err.detail().contains("post_code must be between 3 and 20 characters"));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (_, svc) = svc();
        let l = svc.create(depot()).await.unwrap();
        let mut changed = depot();
        changed.town = "  Bradford ".into();
        let updated = svc.update(l.location_id, changed).await.unwrap();
        assert_eq!(updated.town, "Bradford");
        assert!(matches!(svc.update(42, depot()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_guarded_by_shift_count() {
        let (repo, svc) = svc();
        let l = svc.create(depot()).await.unwrap();
        repo.set_shift_count(l.location_id, 1);
        let err = svc.delete(l.location_id).await.unwrap_err();
        assert_eq!(err.detail(), "cannot delete location 1: it has 1 associated shift(s)");

        repo.set_shift_count(l.location_id, 0);
        svc.delete(l.location_id).await.unwrap();
        assert!(svc.get(l.location_id).await.is_err());
    }

    #[tokio::test]
    async fn lookups_require_a_value() {
        let (_, svc) = svc();
        assert!(matches!(svc.by_country("  ").await, Err(ServiceError::Validation(_))));
        svc.create(depot()).await.unwrap();
        assert_eq!(svc.by_county(" west yorkshire ").await.unwrap().len(), 1);
    }
}
