use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use common::types::{Worker, WorkerInput};

use crate::errors::ModelError;
use crate::shift;
use crate::validation::{check_max_len, check_required_len, Violations};

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 254;
pub const PHONE_MAX: usize = 20;
pub const PHONE_MIN_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern"));

// digits plus the usual formatting characters
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9\s().\-]+$").expect("phone pattern"));

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "worker")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub worker_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
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

impl From<Model> for Worker {
    fn from(m: Model) -> Self {
        Worker { worker_id: m.worker_id, name: m.name, email: m.email, phone_number: m.phone_number }
    }
}

/// Insertable row for a validated input.
pub fn new_active(input: &WorkerInput) -> ActiveModel {
    ActiveModel {
        name: Set(input.name.clone()),
        email: Set(input.email.clone()),
        phone_number: Set(input.phone_number.clone()),
        ..Default::default()
    }
}

/// Overwrite every editable column of an existing row.
pub fn apply(existing: Model, input: &WorkerInput) -> ActiveModel {
    let mut am: ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    am.email = Set(input.email.clone());
    am.phone_number = Set(input.phone_number.clone());
    am
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    check_required_len("name", name, 1, NAME_MAX)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    check_max_len("email", email, EMAIL_MAX)?;
    if !EMAIL_RE.is_match(email) {
        return Err(ModelError::Validation("email must look like name@domain.tld".into()));
    }
    Ok(())
}

/// Digits of a phone number with formatting stripped.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_phone_number(phone: &str) -> Result<(), ModelError> {
    check_max_len("phone_number", phone, PHONE_MAX)?;
    if !PHONE_RE.is_match(phone) {
        return Err(ModelError::Validation(
            "phone_number may only contain digits, spaces and + - ( ) .".into(),
        ));
    }
    if phone_digits(phone).len() < PHONE_MIN_DIGITS {
        return Err(ModelError::Validation(format!(
            "phone_number must contain at least {PHONE_MIN_DIGITS} digits"
        )));
    }
    Ok(())
}

/// All worker rules; expects a [`WorkerInput::normalized`] input.
pub fn validate(input: &WorkerInput) -> Result<(), ModelError> {
    let mut v = Violations::new();
    v.check(validate_name(&input.name));
    if let Some(email) = &input.email {
        v.check(validate_email(email));
    }
    if let Some(phone) = &input.phone_number {
        v.check(validate_phone_number(phone));
    }
    if input.email.is_none() && input.phone_number.is_none() {
        v.push("at least one contact method (email or phone_number) is required");
    }
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: Option<&str>, phone: Option<&str>) -> WorkerInput {
        WorkerInput { name: name.into(), email: email.map(Into::into), phone_number: phone.map(Into::into) }
            .normalized()
    }

    #[test]
    fn accepts_email_only_and_phone_only() {
        assert!(validate(&input("Ann", Some("ann@example.com"), None)).is_ok());
        assert!(validate(&input("Bob", None, Some("+44 (0)20 7946-0958"))).is_ok());
    }

    #[test]
    fn requires_a_contact_method() {
        let e = validate(&input("Ann", Some(""), Some("  "))).unwrap_err();
        assert!(e.to_string().contains("contact method"));
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a b@c.com").is_err());
        let long = format!("{}@example.com", "x".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn phone_needs_ten_digits_and_fits_twenty_chars() {
        assert!(validate_phone_number("0123456789").is_ok());
        assert!(validate_phone_number("012-345-678").is_err());
        assert!(validate_phone_number("(012) 345 6789 ext").is_err());
        assert!(validate_phone_number("+1 (555) 010-0000 00 00").is_err());
        assert_eq!(phone_digits("+44 (020) 7946-0958"), "4402079460958");
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("").is_err());
        assert!(validate_name(&"n".repeat(100)).is_ok());
        assert!(validate_name(&"n".repeat(101)).is_err());
    }

    #[test]
    fn reports_every_violation() {
        let e = validate(&input("", Some("bad"), None)).unwrap_err();
        let msg = e.detail();
        assert!(msg.contains("name is required"));
        assert!(msg.contains("email must look like"));
    }
}
