use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{AddCustomerRequest, UpdateCustomerRequest};
use super::repo_types::{CustomerChanges, NewCustomer, SortOrder};
use crate::{
    error::AppError,
    payload::{non_blank, parse_date, require_id},
};

pub(crate) const NAME_AND_PHONE_REQUIRED: &str = "Name and phone are required";
pub(crate) const ID_REQUIRED: &str = "Customer ID is required";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn email_field(value: Option<String>) -> Result<Option<String>, AppError> {
    match non_blank(value) {
        Some(email) if !is_valid_email(&email) => {
            Err(AppError::validation(format!("Invalid email: {email}")))
        }
        other => Ok(other),
    }
}

/// Required text field on update: absent is fine, null or blank is not.
fn required_change(value: Option<Option<String>>) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(v) => non_blank(v)
            .map(Some)
            .ok_or_else(|| AppError::validation(NAME_AND_PHONE_REQUIRED)),
    }
}

pub fn validate_new(req: AddCustomerRequest) -> Result<NewCustomer, AppError> {
    let (Some(name), Some(phone)) = (non_blank(req.name), non_blank(req.phone)) else {
        return Err(AppError::validation(NAME_AND_PHONE_REQUIRED));
    };
    Ok(NewCustomer {
        name,
        phone,
        spouse_name: non_blank(req.spouse_name),
        email: email_field(req.email)?,
        birthday: parse_date("birthday", req.birthday)?,
        anniversary: parse_date("anniversary", req.anniversary)?,
        location: non_blank(req.location),
        city: non_blank(req.city),
        notes: non_blank(req.notes),
    })
}

pub fn validate_changes(req: UpdateCustomerRequest) -> Result<(i64, CustomerChanges), AppError> {
    let id = require_id(req.id.as_ref(), ID_REQUIRED)?;
    let changes = CustomerChanges {
        name: required_change(req.name)?,
        phone: required_change(req.phone)?,
        spouse_name: req.spouse_name.map(non_blank),
        email: req.email.map(email_field).transpose()?,
        birthday: req.birthday.map(|v| parse_date("birthday", v)).transpose()?,
        anniversary: req.anniversary.map(|v| parse_date("anniversary", v)).transpose()?,
        location: req.location.map(non_blank),
        city: req.city.map(non_blank),
        notes: req.notes.map(non_blank),
    };
    Ok((id, changes))
}

pub fn sort_order(raw: Option<&str>) -> SortOrder {
    match raw.map(str::trim) {
        Some(o) if o.eq_ignore_ascii_case("oldest") => SortOrder::Oldest,
        _ => SortOrder::Newest,
    }
}
