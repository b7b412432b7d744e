use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

use common::datetime;
use common::types::{Page, Shift, ShiftInput, ShiftQuery};

use super::repository::ShiftRepository;
use crate::errors::ServiceError;

/// Shift business service: field rules, reference checks, overlap detection.
pub struct ShiftService<R: ShiftRepository> {
    repo: Arc<R>,
}

fn describe(shifts: &[Shift]) -> String {
    shifts
        .iter()
        .map(|s| format!("#{} ({} - {})", s.shift_id, datetime::format(&s.start_time), datetime::format(&s.end_time)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl<R: ShiftRepository> ShiftService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, query))]
    pub async fn list(&self, query: ShiftQuery) -> Result<Page<Shift>, ServiceError> {
        self.repo.list(&query.normalized()).await
    }

    pub async fn get(&self, id: i32) -> Result<Shift, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("shift", id))
    }

    /// Create a shift once it passes field rules, reference checks and the
    /// overlap check.
    ///
    /// # Examples
    /// ```
    /// use service::shift::{service::ShiftService, repository::mock::MockShiftRepository};
    /// use common::{datetime, types::ShiftInput};
    /// use std::sync::Arc;
    /// let svc = ShiftService::new(Arc::new(MockShiftRepository::with_refs(&[1], &[1])));
    /// let input = ShiftInput {
    ///     worker_id: 1,
    ///     location_id: 1,
    ///     start_time: datetime::parse("01-01-2025 09:00").unwrap(),
    ///     end_time: datetime::parse("01-01-2025 17:00").unwrap(),
    /// };
    /// let s = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(s.shift_id, 1);
    /// ```
    #[instrument(skip(self, input), fields(worker_id = input.worker_id, location_id = input.location_id))]
    pub async fn create(&self, input: ShiftInput) -> Result<Shift, ServiceError> {
        models::shift::validate(&input)?;
        self.check_references(&input).await?;
        self.check_overlap(&input, None).await?;
        let s = self.repo.create(&input).await?;
        info!(shift_id = s.shift_id, "shift_created");
        Ok(s)
    }

    #[instrument(skip(self, input), fields(worker_id = input.worker_id, location_id = input.location_id))]
    pub async fn update(&self, id: i32, input: ShiftInput) -> Result<Shift, ServiceError> {
        models::shift::validate(&input)?;
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("shift", id));
        }
        self.check_references(&input).await?;
        self.check_overlap(&input, Some(id)).await?;
        let s = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::not_found("shift", id))?;
        info!(shift_id = id, "shift_updated");
        Ok(s)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("shift", id));
        }
        info!(shift_id = id, "shift_deleted");
        Ok(())
    }

    pub async fn by_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Shift>, ServiceError> {
        if end < start {
            return Err(ServiceError::Validation("end_date must not be before start_date".into()));
        }
        self.repo.by_date_range(start, end).await
    }

    pub async fn by_worker(&self, worker_id: i32) -> Result<Vec<Shift>, ServiceError> {
        self.repo.by_worker(worker_id).await
    }

    pub async fn by_location(&self, location_id: i32) -> Result<Vec<Shift>, ServiceError> {
        self.repo.by_location(location_id).await
    }

    async fn check_references(&self, input: &ShiftInput) -> Result<(), ServiceError> {
        let mut missing = Vec::new();
        if !self.repo.worker_exists(input.worker_id).await? {
            missing.push(format!("worker {} does not exist", input.worker_id));
        }
        if !self.repo.location_exists(input.location_id).await? {
            missing.push(format!("location {} does not exist", input.location_id));
        }
        if !missing.is_empty() {
            return Err(ServiceError::Validation(missing.join("; ")));
        }
        Ok(())
    }

    async fn check_overlap(&self, input: &ShiftInput, exclude: Option<i32>) -> Result<(), ServiceError> {
        let clashes = self
            .repo
            .find_overlapping(input.worker_id, input.location_id, input.start_time, input.end_time, exclude)
            .await?;
        if clashes.is_empty() {
            debug!("no overlapping shifts");
            return Ok(());
        }
        warn!(clashes = clashes.len(), "shift_overlap_rejected");
        Err(ServiceError::Validation(format!(
            "shift overlaps existing shift(s) for worker {} at location {}: {}",
            input.worker_id,
            input.location_id,
            describe(&clashes)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::repository::mock::MockShiftRepository;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn input(w: i32, l: i32, from: u32, to: u32) -> ShiftInput {
        ShiftInput { worker_id: w, location_id: l, start_time: at(from), end_time: at(to) }
    }

    fn svc() -> (Arc<MockShiftRepository>, ShiftService<MockShiftRepository>) {
        let repo = Arc::new(MockShiftRepository::with_refs(&[1, 2], &[1, 2]));
        (repo.clone(), ShiftService::new(repo))
    }

    #[tokio::test]
    async fn touching_shift_accepted_overlapping_rejected() {
        let (repo, svc) = svc();
        svc.create(input(1, 1, 9, 17)).await.unwrap();
        svc.create(input(1, 1, 17, 18)).await.unwrap();

        let err = svc.create(input(1, 1, 16, 19)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(err.detail().contains("overlaps"), "{}", err.detail());
        assert!(err.detail().contains("#1 (01-01-2025 09:00 - 01-01-2025 17:00)"));
        assert!(err.detail().contains("#2"));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn other_worker_or_location_may_share_the_slot() {
        let (_, svc) = svc();
        svc.create(input(1, 1, 9, 17)).await.unwrap();
        svc.create(input(2, 1, 9, 17)).await.unwrap();
        svc.create(input(1, 2, 9, 17)).await.unwrap();
    }

    #[tokio::test]
    async fn bad_times_rejected_before_any_repository_call() {
        let (repo, svc) = svc();
        let err = svc.create(input(1, 1, 17, 9)).await.unwrap_err();
        assert_eq!(err.detail(), "end_time must be after start_time");
        let err = svc.update(1, input(1, 1, 9, 9)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_references_rejected() {
        let (repo, svc) = svc();
        let err = svc.create(input(7, 8, 9, 10)).await.unwrap_err();
        assert_eq!(err.detail(), "worker 7 does not exist; location 8 does not exist");
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn update_ignores_its_own_interval() {
        let (_, svc) = svc();
        let s = svc.create(input(1, 1, 9, 17)).await.unwrap();
        let moved = svc.update(s.shift_id, input(1, 1, 10, 18)).await.unwrap();
        assert_eq!(moved.start_time, at(10));

        svc.create(input(1, 1, 6, 8)).await.unwrap();
        let err = svc.update(s.shift_id, input(1, 1, 7, 12)).await.unwrap_err();
        assert!(err.detail().contains("overlaps"));
        assert_eq!(svc.get(s.shift_id).await.unwrap().start_time, at(10));
    }

    #[tokio::test]
    async fn update_and_delete_missing() {
        let (_, svc) = svc();
        assert!(matches!(svc.update(5, input(1, 1, 9, 10)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(5).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn date_range_must_be_ordered() {
        let (_, svc) = svc();
        svc.create(input(1, 1, 9, 12)).await.unwrap();
        assert!(svc.by_date_range(at(12), at(9)).await.is_err());
        assert_eq!(svc.by_date_range(at(8), at(12)).await.unwrap().len(), 1);
        assert!(svc.by_date_range(at(10), at(12)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_query_lists_first_page() {
        let (_, svc) = svc();
        for h in 0..12 {
            svc.create(input(1, 1, h, h + 1)).await.unwrap();
        }
        let page = svc.list(ShiftQuery::default()).await.unwrap();
        assert_eq!(page.total_count, 12);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].shift_id, 1);
    }
}
