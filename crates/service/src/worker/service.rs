use std::sync::Arc;

use tracing::{info, instrument, warn};

use common::types::{Page, Worker, WorkerInput, WorkerQuery};

use super::repository::WorkerRepository;
use crate::errors::ServiceError;

/// Worker business service independent of web framework
pub struct WorkerService<R: WorkerRepository> {
    repo: Arc<R>,
}

impl<R: WorkerRepository> WorkerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, query))]
    pub async fn list(&self, query: WorkerQuery) -> Result<Page<Worker>, ServiceError> {
        self.repo.list(&query.normalized()).await
    }

    pub async fn get(&self, id: i32) -> Result<Worker, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("worker", id))
    }

    /// Validate and store a new worker.
    ///
    /// # Examples
    /// ```
    /// use service::worker::{service::WorkerService, repository::mock::MockWorkerRepository};
    /// use common::types::WorkerInput;
    /// use std::sync::Arc;
    /// let svc = WorkerService::new(Arc::new(MockWorkerRepository::default()));
    /// let input = WorkerInput { name: "Ann Lee".into(), email: Some("ann@example.com".into()), phone_number: None };
    /// let w = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(w.worker_id, 1);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: WorkerInput) -> Result<Worker, ServiceError> {
        let input = input.normalized();
        models::worker::validate(&input)?;
        let w = self.repo.create(&input).await?;
        info!(worker_id = w.worker_id, "worker_created");
        Ok(w)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: i32, input: WorkerInput) -> Result<Worker, ServiceError> {
        let input = input.normalized();
        models::worker::validate(&input)?;
        let w = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::not_found("worker", id))?;
        info!(worker_id = id, "worker_updated");
        Ok(w)
    }

    /// Refused while any shift still references the worker.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("worker", id));
        }
        let shifts = self.repo.count_shifts(id).await?;
        if shifts > 0 {
            warn!(worker_id = id, shifts, "worker_delete_blocked");
            return Err(ServiceError::Validation(format!(
                "cannot delete worker {}: it has {} associated shift(s)",
                id, shifts
            )));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("worker", id));
        }
        info!(worker_id = id, "worker_deleted");
        Ok(())
    }

    /// Workers whose email ends with `@domain`; a leading `@` is ignored.
    pub async fn by_email_domain(&self, domain: &str) -> Result<Vec<Worker>, ServiceError> {
        let domain = domain.trim().trim_start_matches('@');
        if domain.is_empty() {
            return Err(ServiceError::Validation("domain is required".into()));
        }
        if !domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
            return Err(ServiceError::Validation(
                "domain may only contain letters, digits, dots and dashes".into(),
            ));
        }
        self.repo.by_email_domain(domain).await
    }

    /// Workers whose phone number, formatting stripped, starts with `code`.
    pub async fn by_phone_area_code(&self, code: &str) -> Result<Vec<Worker>, ServiceError> {
        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::Validation("area code must be one or more digits".into()));
        }
        self.repo.by_phone_area_code(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::repository::mock::MockWorkerRepository;

    fn svc() -> (Arc<MockWorkerRepository>, WorkerService<MockWorkerRepository>) {
        let repo = Arc::new(MockWorkerRepository::default());
        (repo.clone(), WorkerService::new(repo))
    }

    fn ann() -> WorkerInput {
        WorkerInput { name: "Ann Lee".into(), email: Some("ann@example.com".into()), phone_number: None }
    }

    #[tokio::test]
    async fn missing_contact_rejected_without_touching_repository() {
        let (repo, svc) = svc();
        let input = WorkerInput { name: "Ann".into(), email: Some("  ".into()), phone_number: None };
        let err = svc.create(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert!(err.detail().contains("contact method"));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn create_stores_normalized_input() {
        let (_, svc) = svc();
        let input = WorkerInput { name: "  Ann Lee ".into(), email: Some("".into()), phone_number: Some("0123456789".into()) };
        let w = svc.create(input).await.unwrap();
        assert_eq!(w.name, "Ann Lee");
        assert_eq!(w.email, None);
        assert_eq!(svc.get(w.worker_id).await.unwrap(), w);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_, svc) = svc();
        let err = svc.update(7, ann()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.detail(), "worker 7 not found");
    }

    #[tokio::test]
    async fn delete_blocked_while_shifts_reference_worker() {
        let (repo, svc) = svc();
        let w = svc.create(ann()).await.unwrap();
        repo.set_shift_count(w.worker_id, 2);
        let err = svc.delete(w.worker_id).await.unwrap_err();
        assert_eq!(err.detail(), "cannot delete worker 1: it has 2 associated shift(s)");
        assert!(svc.get(w.worker_id).await.is_ok());

        repo.set_shift_count(w.worker_id, 0);
        svc.delete(w.worker_id).await.unwrap();
        assert!(matches!(svc.get(w.worker_id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_, svc) = svc();
        assert!(matches!(svc.delete(3).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn lookup_arguments_checked() {
        let (repo, svc) = svc();
        assert!(svc.by_email_domain(" @ ").await.is_err());
        assert!(svc.by_email_domain("a%b.com").await.is_err());
        assert!(svc.by_phone_area_code("02x").await.is_err());
        assert_eq!(repo.calls(), 0);

        svc.create(ann()).await.unwrap();
        assert_eq!(svc.by_email_domain("@EXAMPLE.com").await.unwrap().len(), 1);
    }
}
