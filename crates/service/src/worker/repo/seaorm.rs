use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use common::types::{Page, Worker, WorkerInput, WorkerQuery};
use models::{shift, worker};

use crate::errors::ServiceError;
use crate::query::{fetch_page, icontains, iends_with, resolve_sort};
use crate::worker::repository::WorkerRepository;

pub struct SeaOrmWorkerRepository {
    pub db: DatabaseConnection,
}

fn sort_column(key: &str) -> Option<worker::Column> {
    match key {
        "workerid" | "id" => Some(worker::Column::WorkerId),
        "name" => Some(worker::Column::Name),
        "email" => Some(worker::Column::Email),
        "phonenumber" | "phone" => Some(worker::Column::PhoneNumber),
        _ => None,
    }
}

#[async_trait::async_trait]
impl WorkerRepository for SeaOrmWorkerRepository {
    async fn list(&self, q: &WorkerQuery) -> Result<Page<Worker>, ServiceError> {
        let mut select = worker::Entity::find();
        if let Some(id) = q.worker_id {
            select = select.filter(worker::Column::WorkerId.eq(id));
        }
        if let Some(name) = &q.name {
            select = select.filter(icontains(worker::Column::Name, name));
        }
        if let Some(email) = &q.email {
            select = select.filter(icontains(worker::Column::Email, email));
        }
        if let Some(phone) = &q.phone_number {
            select = select.filter(icontains(worker::Column::PhoneNumber, phone));
        }
        if let Some(s) = &q.search {
            select = select.filter(
                Condition::any()
                    .add(icontains(worker::Column::Name, s))
                    .add(icontains(worker::Column::Email, s))
                    .add(icontains(worker::Column::PhoneNumber, s)),
            );
        }
        let (col, ord) = resolve_sort(q.sort_by.as_deref(), q.sort_order, worker::Column::WorkerId, sort_column);
        let select = select.order_by(col, ord).order_by_asc(worker::Column::WorkerId);
        Ok(fetch_page(select, &self.db, q.page()).await?.map(Worker::from))
    }

    async fn get(&self, id: i32) -> Result<Option<Worker>, ServiceError> {
        let row = worker::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Worker::from))
    }

    async fn create(&self, input: &WorkerInput) -> Result<Worker, ServiceError> {
        let created = worker::Entity::insert(worker::new_active(input))
            .exec_with_returning(&self.db)
            .await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: &WorkerInput) -> Result<Option<Worker>, ServiceError> {
        let Some(existing) = worker::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let updated = worker::Entity::update(worker::apply(existing, input)).exec(&self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = worker::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_shifts(&self, id: i32) -> Result<u64, ServiceError> {
        let n = shift::Entity::find().filter(shift::Column::WorkerId.eq(id)).count(&self.db).await?;
        Ok(n)
    }

    async fn by_email_domain(&self, domain: &str) -> Result<Vec<Worker>, ServiceError> {
        let rows = worker::Entity::find()
            .filter(iends_with(worker::Column::Email, &format!("@{}", domain)))
            .order_by_asc(worker::Column::WorkerId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Worker::from).collect())
    }

    async fn by_phone_area_code(&self, area_code: &str) -> Result<Vec<Worker>, ServiceError> {
        // stored numbers keep their formatting, so match on extracted digits
        let rows = worker::Entity::find()
            .filter(worker::Column::PhoneNumber.is_not_null())
            .order_by_asc(worker::Column::WorkerId)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .filter(|w| w.phone_number.as_deref().is_some_and(|p| worker::phone_digits(p).starts_with(area_code)))
            .map(Worker::from)
            .collect())
    }
}
