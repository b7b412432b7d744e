//! Entity mapping tests against a migrated in-memory SQLite database.

use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait};

use common::types::{LocationInput, ShiftInput, WorkerInput};

use crate::{db, location, shift, worker};

async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn location_input() -> LocationInput {
    LocationInput {
        name: "North Store".into(),
        address: "12 Market Street".into(),
        town: "York".into(),
        county: "North Yorkshire".into(),
        post_code: "YO1 7HH".into(),
        country: "United Kingdom".into(),
    }
}

#[tokio::test]
async fn insert_and_relate_rows() -> anyhow::Result<()> {
    let db = setup_test_db().await?;

    let w = worker::new_active(&WorkerInput { name: "Ann".into(), email: Some("ann@example.com".into()), phone_number: None })
        .insert(&db)
        .await?;
    let l = location::new_active(&location_input()).insert(&db).await?;
    assert!(w.worker_id > 0);
    assert!(l.location_id > 0);

    let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let s = shift::new_active(&ShiftInput {
        worker_id: w.worker_id,
        location_id: l.location_id,
        start_time: day.and_hms_opt(9, 0, 0).unwrap(),
        end_time: day.and_hms_opt(17, 0, 0).unwrap(),
    })
    .insert(&db)
    .await?;

    let shifts = w.find_related(shift::Entity).all(&db).await?;
    assert_eq!(shifts, vec![s.clone()]);
    let owner = s.find_related(worker::Entity).one(&db).await?;
    assert_eq!(owner.map(|o| o.name), Some("Ann".to_string()));
    Ok(())
}

#[tokio::test]
async fn apply_overwrites_every_column() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let l = location::new_active(&location_input()).insert(&db).await?;
    let mut changed = location_input();
    changed.town = "Harrogate".into();
    changed.post_code = "HG1 1AA".into();
    let updated = location::apply(l.clone(), &changed).update(&db).await?;
    assert_eq!(updated.location_id, l.location_id);
    assert_eq!(updated.town, "Harrogate");
    let reloaded = location::Entity::find_by_id(l.location_id).one(&db).await?;
    assert_eq!(reloaded, Some(updated));
    Ok(())
}

#[tokio::test]
async fn restricts_deleting_a_referenced_worker() -> anyhow::Result<()> {
    let db = setup_test_db().await?;
    let w = worker::new_active(&WorkerInput { name: "Bob".into(), email: None, phone_number: Some("0123456789".into()) })
        .insert(&db)
        .await?;
    let l = location::new_active(&location_input()).insert(&db).await?;
    let day = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    shift::new_active(&ShiftInput {
        worker_id: w.worker_id,
        location_id: l.location_id,
        start_time: day.and_hms_opt(8, 0, 0).unwrap(),
        end_time: day.and_hms_opt(12, 0, 0).unwrap(),
    })
    .insert(&db)
    .await?;

    assert!(worker::Entity::delete_by_id(w.worker_id).exec(&db).await.is_err());
    assert!(worker::Entity::find_by_id(w.worker_id).one(&db).await?.is_some());
    Ok(())
}
