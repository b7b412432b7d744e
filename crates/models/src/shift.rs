use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use common::types::{Shift, ShiftInput};

use crate::errors::ModelError;
use crate::validation::{check_positive_id, Violations};
use crate::{location, worker};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shift")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub shift_id: i32,
    pub worker_id: i32,
    pub location_id: i32,
    pub start_time: DateTime,
    pub end_time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Worker,
    Location,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Worker => Entity::belongs_to(worker::Entity)
                .from(Column::WorkerId)
                .to(worker::Column::WorkerId)
                .into(),
            Relation::Location => Entity::belongs_to(location::Entity)
                .from(Column::LocationId)
                .to(location::Column::LocationId)
                .into(),
        }
    }
}

impl Related<worker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Worker.def()
    }
}

impl Related<location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Shift {
    fn from(m: Model) -> Self {
        Shift {
            shift_id: m.shift_id,
            worker_id: m.worker_id,
            location_id: m.location_id,
            start_time: m.start_time,
            end_time: m.end_time,
        }
    }
}

pub fn new_active(input: &ShiftInput) -> ActiveModel {
    ActiveModel {
        worker_id: Set(input.worker_id),
        location_id: Set(input.location_id),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        ..Default::default()
    }
}

pub fn apply(existing: Model, input: &ShiftInput) -> ActiveModel {
    let mut am: ActiveModel = existing.into();
    am.worker_id = Set(input.worker_id);
    am.location_id = Set(input.location_id);
    am.start_time = Set(input.start_time);
    am.end_time = Set(input.end_time);
    am
}

/// Half-open intervals `[a_start, a_end)` and `[b_start, b_end)` intersect.
/// Intervals that only touch at a boundary do not overlap.
pub fn overlaps(a_start: DateTime, a_end: DateTime, b_start: DateTime, b_end: DateTime) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn validate_times(start: DateTime, end: DateTime) -> Result<(), ModelError> {
    if end <= start {
        return Err(ModelError::Validation("end_time must be after start_time".into()));
    }
    Ok(())
}

/// Field rules only; referenced rows and overlaps are checked by the service.
pub fn validate(input: &ShiftInput) -> Result<(), ModelError> {
    let mut v = Violations::new();
    v.check(check_positive_id("worker_id", input.worker_id));
    v.check(check_positive_id("location_id", input.location_id));
    v.check(validate_times(input.start_time, input.end_time));
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32) -> DateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(t(9), t(17), t(17), t(18)));
        assert!(!overlaps(t(17), t(18), t(9), t(17)));
    }

    #[test]
    fn intersecting_and_nested_intervals_overlap() {
        assert!(overlaps(t(9), t(17), t(16), t(18)));
        assert!(overlaps(t(9), t(17), t(10), t(11)));
        assert!(overlaps(t(10), t(11), t(9), t(17)));
        assert!(overlaps(t(9), t(17), t(9), t(17)));
    }

    #[test]
    fn end_must_follow_start() {
        assert!(validate_times(t(9), t(9)).is_err());
        assert!(validate_times(t(10), t(9)).is_err());
        assert!(validate_times(t(9), t(10)).is_ok());
    }

    #[test]
    fn ids_must_be_positive() {
        let input = ShiftInput { worker_id: 0, location_id: -1, start_time: t(9), end_time: t(8) };
        let e = validate(&input).unwrap_err();
        assert_eq!(
            e.detail(),
            "worker_id must be greater than 0; location_id must be greater than 0; end_time must be after start_time"
        );
    }
}
