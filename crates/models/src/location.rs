use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use common::types::{Location, LocationInput};

use crate::errors::ModelError;
use crate::shift;
use crate::validation::{check_required_len, Violations};

static POST_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]*$").expect("post code pattern"));

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub location_id: i32,
    pub name: String,
    pub address: String,
    pub town: String,
    pub county: String,
    pub post_code: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Shift,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Shift => Entity::has_many(shift::Entity).into(),
        }
    }
}

impl Related<shift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shift.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Location {
    fn from(m: Model) -> Self {
        Location {
            location_id: m.location_id,
            name: m.name,
            address: m.address,
            town: m.town,
            county: m.county,
            post_code: m.post_code,
            country: m.country,
        }
    }
}

pub fn new_active(input: &LocationInput) -> ActiveModel {
    ActiveModel {
        name: Set(input.name.clone()),
        address: Set(input.address.clone()),
        town: Set(input.town.clone()),
        county: Set(input.county.clone()),
        post_code: Set(input.post_code.clone()),
        country: Set(input.country.clone()),
        ..Default::default()
    }
}

pub fn apply(existing: Model, input: &LocationInput) -> ActiveModel {
    let mut am: ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    am.address = Set(input.address.clone());
    am.town = Set(input.town.clone());
    am.county = Set(input.county.clone());
    am.post_code = Set(input.post_code.clone());
    am.country = Set(input.country.clone());
    am
}

pub fn validate_post_code(post_code: &str) -> Result<(), ModelError> {
    check_required_len("post_code", post_code, 3, 20)?;
    if !POST_CODE_RE.is_match(post_code) {
        return Err(ModelError::Validation(
            "post_code may only contain letters, digits, spaces and dashes".into(),
        ));
    }
    Ok(())
}

pub fn validate(input: &LocationInput) -> Result<(), ModelError> {
    let mut v = Violations::new();
    v.check(check_required_len("name", &input.name, 2, 100));
    v.check(check_required_len("address", &input.address, 3, 200));
    v.check(check_required_len("town", &input.town, 2, 100));
    v.check(check_required_len("county", &input.county, 2, 100));
    v.check(validate_post_code(&input.post_code));
    v.check(check_required_len("country", &input.country, 2, 100));
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationInput {
        LocationInput {
            name: "Central Depot".into(),
            address: "1 High Street".into(),
            town: "Leeds".into(),
            county: "West Yorkshire".into(),
            post_code: "LS1 4AP".into(),
            country: "United Kingdom".into(),
        }
    }

    #[test]
    fn accepts_complete_location() {
        assert!(validate(&sample()).is_ok());
    }

    #[test]
    fn address_window() {
        let mut l = sample();
        l.address = "ab".into();
        let e = validate(&l).unwrap_err();
        assert_eq!(e.detail(), "address must be between 3 and 200 characters");
    }

    #[test]
    fn post_code_charset_and_length() {
        assert!(validate_post_code("90210").is_ok());
        assert!(validate_post_code("SW1A-1AA").is_ok());
        assert!(validate_post_code("AB").is_err());
        assert!(validate_post_code("LS1#4AP").is_err());
        assert!(validate_post_code(&"1".repeat(21)).is_err());
    }

    #[test]
    fn every_field_required() {
        let e = validate(&LocationInput::default()).unwrap_err();
        for f in ["name", "address", "town", "county", "post_code", "country"] {
            assert!(e.detail().contains(&format!("{f} is required")), "missing {f}");
        }
    }
}
