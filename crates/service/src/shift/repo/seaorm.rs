use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use common::types::{Page, Shift, ShiftInput, ShiftQuery};
use models::{location, shift, worker};

use crate::errors::ServiceError;
use crate::query::{fetch_page, icontains, resolve_sort};
use crate::shift::repository::ShiftRepository;

pub struct SeaOrmShiftRepository {
    pub db: DatabaseConnection,
}

fn sort_column(key: &str) -> Option<shift::Column> {
    match key {
        "shiftid" | "id" => Some(shift::Column::ShiftId),
        "workerid" => Some(shift::Column::WorkerId),
        "locationid" => Some(shift::Column::LocationId),
        "starttime" | "start" => Some(shift::Column::StartTime),
        "endtime" | "end" => Some(shift::Column::EndTime),
        _ => None,
    }
}

impl SeaOrmShiftRepository {
    async fn all_where(&self, cond: Condition) -> Result<Vec<Shift>, ServiceError> {
        let rows = shift::Entity::find()
            .filter(cond)
            .order_by_asc(shift::Column::StartTime)
            .order_by_asc(shift::Column::ShiftId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Shift::from).collect())
    }
}

#[async_trait::async_trait]
impl ShiftRepository for SeaOrmShiftRepository {
    async fn list(&self, q: &ShiftQuery) -> Result<Page<Shift>, ServiceError> {
        let mut select = shift::Entity::find();
        if let Some(id) = q.shift_id {
            select = select.filter(shift::Column::ShiftId.eq(id));
        }
        if let Some(id) = q.worker_id {
            select = select.filter(shift::Column::WorkerId.eq(id));
        }
        if let Some(id) = q.location_id {
            select = select.filter(shift::Column::LocationId.eq(id));
        }
        if let Some(start) = q.start_date {
            select = select.filter(shift::Column::StartTime.gte(start));
        }
        if let Some(end) = q.end_date {
            select = select.filter(shift::Column::EndTime.lte(end));
        }
        if let Some(s) = &q.search {
            // matches on the names of the referenced worker and location
            select = select
                .join(JoinType::InnerJoin, shift::Relation::Worker.def())
                .join(JoinType::InnerJoin, shift::Relation::Location.def())
                .filter(
                    Condition::any()
                        .add(icontains(worker::Column::Name, s))
                        .add(icontains(location::Column::Name, s)),
                );
        }
        let (col, ord) = resolve_sort(q.sort_by.as_deref(), q.sort_order, shift::Column::ShiftId, sort_column);
        let select = select.order_by(col, ord).order_by_asc(shift::Column::ShiftId);
        Ok(fetch_page(select, &self.db, q.page()).await?.map(Shift::from))
    }

    async fn get(&self, id: i32) -> Result<Option<Shift>, ServiceError> {
        let row = shift::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Shift::from))
    }

    async fn create(&self, input: &ShiftInput) -> Result<Shift, ServiceError> {
        let created = shift::Entity::insert(shift::new_active(input)).exec_with_returning(&self.db).await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: &ShiftInput) -> Result<Option<Shift>, ServiceError> {
        let Some(existing) = shift::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let updated = shift::Entity::update(shift::apply(existing, input)).exec(&self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = shift::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn worker_exists(&self, worker_id: i32) -> Result<bool, ServiceError> {
        let n = worker::Entity::find_by_id(worker_id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn location_exists(&self, location_id: i32) -> Result<bool, ServiceError> {
        let n = location::Entity::find_by_id(location_id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn find_overlapping(
        &self,
        worker_id: i32,
        location_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<i32>,
    ) -> Result<Vec<Shift>, ServiceError> {
        // existing.start < end && start < existing.end
        let mut cond = Condition::all()
            .add(shift::Column::WorkerId.eq(worker_id))
            .add(shift::Column::LocationId.eq(location_id))
            .add(shift::Column::StartTime.lt(end))
            .add(shift::Column::EndTime.gt(start));
        if let Some(id) = exclude {
            cond = cond.add(shift::Column::ShiftId.ne(id));
        }
        self.all_where(cond).await
    }

    async fn by_date_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Shift>, ServiceError> {
        self.all_where(
            Condition::all()
                .add(shift::Column::StartTime.gte(start))
                .add(shift::Column::EndTime.lte(end)),
        )
        .await
    }

    async fn by_worker(&self, worker_id: i32) -> Result<Vec<Shift>, ServiceError> {
        self.all_where(Condition::all().add(shift::Column::WorkerId.eq(worker_id))).await
    }

    async fn by_location(&self, location_id: i32) -> Result<Vec<Shift>, ServiceError> {
        self.all_where(Condition::all().add(shift::Column::LocationId.eq(location_id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::repo::SeaOrmLocationRepository;
    use crate::location::repository::LocationRepository;
    use crate::worker::repo::SeaOrmWorkerRepository;
    use crate::worker::repository::WorkerRepository;
    use chrono::NaiveDate;
    use common::types::{LocationInput, SortOrder, WorkerInput};

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn shift_input(w: i32, l: i32, day: u32, from: u32, to: u32) -> ShiftInput {
        ShiftInput { worker_id: w, location_id: l, start_time: at(day, from), end_time: at(day, to) }
    }

    async fn seeded() -> SeaOrmShiftRepository {
        let db = crate::test_support::get_db().await.unwrap();
        let workers = SeaOrmWorkerRepository { db: db.clone() };
        for (name, email) in [("Ann Lee", "ann@example.com"), ("Raj Patel", "raj@example.com")] {
            let input = WorkerInput { name: name.into(), email: Some(email.into()), phone_number: None };
            workers.create(&input).await.unwrap();
        }
        let locations = SeaOrmLocationRepository { db: db.clone() };
        for name in ["Harbour Cafe", "Mill Bakery"] {
            let input = LocationInput {
                name: name.into(),
                address: "2 Quay Road".into(),
                town: "Hull".into(),
                county: "East Yorkshire".into(),
                post_code: "HU1 1AA".into(),
                country: "United Kingdom".into(),
            };
            locations.create(&input).await.unwrap();
        }
        let repo = SeaOrmShiftRepository { db };
        for s in [
            shift_input(1, 1, 3, 9, 17),
            shift_input(2, 2, 3, 6, 14),
            shift_input(1, 2, 4, 8, 12),
            shift_input(2, 1, 5, 18, 23),
        ] {
            repo.create(&s).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn overlap_query_excludes_touching_and_self() {
        let repo = seeded().await;
        assert!(repo.find_overlapping(1, 1, at(3, 17), at(3, 18), None).await.unwrap().is_empty());
        assert!(repo.find_overlapping(1, 1, at(3, 6), at(3, 9), None).await.unwrap().is_empty());
        let hit = repo.find_overlapping(1, 1, at(3, 16), at(3, 19), None).await.unwrap();
        assert_eq!(hit.iter().map(|s| s.shift_id).collect::<Vec<_>>(), vec![1]);
        assert!(repo.find_overlapping(1, 1, at(3, 10), at(3, 11), Some(1)).await.unwrap().is_empty());
        // another location does not count
        assert!(repo.find_overlapping(1, 2, at(3, 10), at(3, 11), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_uses_joined_names() {
        let repo = seeded().await;
        let q = ShiftQuery { search: Some("bakery".into()), ..Default::default() };
        let page = repo.list(&q).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|s| s.location_id == 2));

        let q = ShiftQuery { search: Some("RAJ".into()), sort_by: Some("start_time".into()), ..Default::default() };
        let ids: Vec<i32> = repo.list(&q).await.unwrap().items.iter().map(|s| s.shift_id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn date_bounds_and_sorting() {
        let repo = seeded().await;
        let q = ShiftQuery {
            start_date: Some(at(3, 0)),
            end_date: Some(at(4, 23)),
            sort_by: Some("StartTime".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let ids: Vec<i32> = repo.list(&q).await.unwrap().items.iter().map(|s| s.shift_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn range_requires_full_containment() {
        let repo = seeded().await;
        let inside = repo.by_date_range(at(3, 7), at(3, 20)).await.unwrap();
        assert_eq!(inside.iter().map(|s| s.shift_id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(repo.by_worker(2).await.unwrap().len(), 2);
        assert_eq!(repo.by_location(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reference_checks() {
        let repo = seeded().await;
        assert!(repo.worker_exists(2).await.unwrap());
        assert!(!repo.worker_exists(9).await.unwrap());
        assert!(repo.location_exists(1).await.unwrap());
        assert!(!repo.location_exists(0).await.unwrap());
    }
}
