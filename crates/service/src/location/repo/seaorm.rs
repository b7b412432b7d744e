use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use common::types::{Location, LocationInput, LocationQuery, Page};
use models::{location, shift};

use crate::errors::ServiceError;
use crate::location::repository::LocationRepository;
use crate::query::{fetch_page, icontains, ieq, resolve_sort};

pub struct SeaOrmLocationRepository {
    pub db: DatabaseConnection,
}

const TEXT_COLUMNS: [location::Column; 6] = [
    location::Column::Name,
    location::Column::Address,
    location::Column::Town,
    location::Column::County,
    location::Column::PostCode,
    location::Column::Country,
];

fn sort_column(key: &str) -> Option<location::Column> {
    match key {
        "locationid" | "id" => Some(location::Column::LocationId),
        "name" => Some(location::Column::Name),
        "address" => Some(location::Column::Address),
        "town" => Some(location::Column::Town),
        "county" => Some(location::Column::County),
        "postcode" => Some(location::Column::PostCode),
        "country" => Some(location::Column::Country),
        _ => None,
    }
}

impl SeaOrmLocationRepository {
    async fn all_where(&self, cond: Condition) -> Result<Vec<Location>, ServiceError> {
        let rows = location::Entity::find()
            .filter(cond)
            .order_by_asc(location::Column::LocationId)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Location::from).collect())
    }
}

#[async_trait::async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn list(&self, q: &LocationQuery) -> Result<Page<Location>, ServiceError> {
        let mut select = location::Entity::find();
        if let Some(id) = q.location_id {
            select = select.filter(location::Column::LocationId.eq(id));
        }
        let filters = [&q.name, &q.address, &q.town, &q.county, &q.post_code, &q.country];
        for (col, value) in TEXT_COLUMNS.into_iter().zip(filters) {
            if let Some(v) = value {
                select = select.filter(icontains(col, v));
            }
        }
        if let Some(s) = &q.search {
            let any = TEXT_COLUMNS.into_iter().fold(Condition::any(), |c, col| c.add(icontains(col, s)));
            select = select.filter(any);
        }
        let (col, ord) = resolve_sort(q.sort_by.as_deref(), q.sort_order, location::Column::LocationId, sort_column);
        let select = select.order_by(col, ord).order_by_asc(location::Column::LocationId);
        Ok(fetch_page(select, &self.db, q.page()).await?.map(Location::from))
    }

    async fn get(&self, id: i32) -> Result<Option<Location>, ServiceError> {
        let row = location::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Location::from))
    }

    async fn create(&self, input: &LocationInput) -> Result<Location, ServiceError> {
        let created = location::Entity::insert(location::new_active(input))
            .exec_with_returning(&self.db)
            .await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: &LocationInput) -> Result<Option<Location>, ServiceError> {
        let Some(existing) = location::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let updated = location::Entity::update(location::apply(existing, input)).exec(&self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = location::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_shifts(&self, id: i32) -> Result<u64, ServiceError> {
        let n = shift::Entity::find().filter(shift::Column::LocationId.eq(id)).count(&self.db).await?;
        Ok(n)
    }

    async fn by_country(&self, country: &str) -> Result<Vec<Location>, ServiceError> {
        self.all_where(Condition::all().add(ieq(location::Column::Country, country))).await
    }

    async fn by_county(&self, county: &str) -> Result<Vec<Location>, ServiceError> {
        self.all_where(Condition::all().add(ieq(location::Column::County, county))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use common::types::SortOrder;

    fn input(name: &str, town: &str, county: &str, country: &str) -> LocationInput {
        LocationInput {
            name: name.into(),
            address: "1 Main Street".into(),
            town: town.into(),
            county: county.into(),
            post_code: "AB1 2CD".into(),
            country: country.into(),
        }
    }

    async fn seeded() -> SeaOrmLocationRepository {
        let repo = SeaOrmLocationRepository { db: get_db().await.unwrap() };
        for l in [
            input("Leeds Depot", "Leeds", "West Yorkshire", "United Kingdom"),
            input("Cork Office", "Cork", "County Cork", "Ireland"),
            input("York Store", "York", "North Yorkshire", "united kingdom"),
        ] {
            repo.create(&l).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let repo = seeded().await;
        let q = LocationQuery { county: Some("yorkshire".into()), town: Some("york".into()), ..Default::default() };
        let page = repo.list(&q).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "York Store");
    }

    #[tokio::test]
    async fn search_hits_any_text_column() {
        let repo = seeded().await;
        let q = LocationQuery { search: Some("IRELAND".into()), ..Default::default() };
        let page = repo.list(&q).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].town, "Cork");
    }

    #[tokio::test]
    async fn sort_by_town_and_unknown_field() {
        let repo = seeded().await;
        let q = LocationQuery { sort_by: Some("Town".into()), sort_order: Some(SortOrder::Desc), ..Default::default() };
        let towns: Vec<String> = repo.list(&q).await.unwrap().items.into_iter().map(|l| l.town).collect();
        assert_eq!(towns, vec!["York", "Leeds", "Cork"]);

        let q = LocationQuery { sort_by: Some("rating".into()), sort_order: Some(SortOrder::Desc), ..Default::default() };
        let ids: Vec<i32> = repo.list(&q).await.unwrap().items.into_iter().map(|l| l.location_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn country_and_county_match_exactly_ignoring_case() {
        let repo = seeded().await;
        assert_eq!(repo.by_country("UNITED KINGDOM").await.unwrap().len(), 2);
        assert!(repo.by_country("United").await.unwrap().is_empty());
        let cork = repo.by_county("county cork").await.unwrap();
        assert_eq!(cork.len(), 1);
        assert_eq!(cork[0].name, "Cork Office");
    }
}
