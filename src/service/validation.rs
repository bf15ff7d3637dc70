//! Request validation for contact bodies, listing queries, and path ids.
//!
//! Every check records into one `ValidationError` instead of stopping at the
//! first failure, so callers see all problems with a request at once.

use crate::error::{AppError, ValidationError};
use crate::model::{ContactFilter, ContactUpdate, NewContact, QueryOptions, SortBy, SortByError, SortField};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .unwrap_or_else(|e| panic!("email pattern is a valid regex: {e}"))
});

const CONTACT_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];
const LIST_KEYS: [&str; 6] = ["name", "email", "subject", "sortBy", "limit", "page"];

/// ASCII address, local part at most 64 bytes, whole address at most 254, non-numeric TLD.
pub fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    let tld_is_numeric = domain
        .rsplit('.')
        .next()
        .map_or(true, |tld| tld.chars().all(|c| c.is_ascii_digit()));
    s.len() <= 254 && local.len() <= 64 && !tld_is_numeric && EMAIL.is_match(s)
}

/// The four user-editable fields, each possibly absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Raw listing parameters before defaults and parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Public submission body: all four fields required.
    pub fn create_body(body: &Value) -> Result<NewContact, AppError> {
        let mut issues = ValidationError::default();
        let fields = contact_fields_from_json(body, NullField::Absent, &mut issues);
        Self::create(fields, None, issues)
    }

    /// Admin PATCH body: at least one field, each validated when present.
    pub fn update_body(body: &Value) -> Result<ContactUpdate, AppError> {
        let mut issues = ValidationError::default();
        let fields = contact_fields_from_json(body, NullField::Invalid, &mut issues);
        Self::update(fields, issues)
    }

    /// Listing query string. Unknown keys and non-integer paging values are rejected.
    pub fn list_query(params: &HashMap<String, String>) -> Result<(ContactFilter, QueryOptions), AppError> {
        let mut issues = ValidationError::default();
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();
        for k in keys {
            if !LIST_KEYS.contains(&k.as_str()) {
                issues.push(k.as_str(), "unknown", format!("\"{}\" is not allowed", k));
            }
        }
        let req = ListRequest {
            name: params.get("name").cloned(),
            email: params.get("email").cloned(),
            subject: params.get("subject").cloned(),
            sort_by: params.get("sortBy").cloned(),
            limit: parse_integer("limit", params.get("limit"), &mut issues),
            page: parse_integer("page", params.get("page"), &mut issues),
        };
        Self::list(req, issues)
    }

    /// Integer `contactId` from a path segment.
    pub fn contact_id_from_path(raw: &str) -> Result<i32, AppError> {
        let mut issues = ValidationError::default();
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::contact_id(n),
            Err(_) => {
                issues.push("contactId", "number", "\"contactId\" must be a number");
                Err(AppError::Validation(issues))
            }
        }
    }

    /// Range-check an id into the 32-bit key space.
    pub fn contact_id(n: i64) -> Result<i32, AppError> {
        i32::try_from(n).map_err(|_| {
            let mut issues = ValidationError::default();
            issues.push("contactId", "integer", "\"contactId\" must be a safe integer");
            AppError::Validation(issues)
        })
    }

    pub fn create(fields: ContactFields, user_id: Option<i32>, mut issues: ValidationError) -> Result<NewContact, AppError> {
        let name = required_text("name", fields.name, &mut issues);
        let email = required_text("email", fields.email, &mut issues);
        let subject = required_text("subject", fields.subject, &mut issues);
        let message = required_text("message", fields.message, &mut issues);
        if let Some(e) = &email {
            check_email(e, &mut issues);
        }
        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) if issues.is_empty() => Ok(NewContact {
                name,
                email,
                subject,
                message,
                user_id,
            }),
            _ => Err(AppError::Validation(issues)),
        }
    }

    pub fn update(fields: ContactFields, mut issues: ValidationError) -> Result<ContactUpdate, AppError> {
        let update = ContactUpdate {
            name: optional_text("name", fields.name, &mut issues),
            email: optional_text("email", fields.email, &mut issues),
            subject: optional_text("subject", fields.subject, &mut issues),
            message: optional_text("message", fields.message, &mut issues),
        };
        if let Some(e) = &update.email {
            check_email(e, &mut issues);
        }
        if update.is_empty() && !CONTACT_FIELDS.iter().any(|f| issues.has_field(f)) {
            issues.push("value", "min", "\"value\" must have at least 1 key");
        }
        issues.into_result(update)
    }

    pub fn list(req: ListRequest, mut issues: ValidationError) -> Result<(ContactFilter, QueryOptions), AppError> {
        let filter = ContactFilter {
            name: optional_text("name", req.name, &mut issues),
            email: optional_text("email", req.email, &mut issues),
            subject: optional_text("subject", req.subject, &mut issues),
        };
        let sort_by = match req.sort_by.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<SortBy>() {
                Ok(s) => Some(s),
                Err(SortByError::UnknownField(f)) => {
                    let allowed = SortField::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ");
                    issues.push(
                        "sortBy",
                        "sortField",
                        format!("\"sortBy\" cannot sort by '{}' (allowed: {})", f, allowed),
                    );
                    None
                }
                Err(SortByError::UnknownOrder(o)) => {
                    issues.push("sortBy", "sortOrder", format!("\"sortBy\" direction '{}' must be asc or desc", o));
                    None
                }
            },
        };
        let options = QueryOptions {
            sort_by,
            limit: positive("limit", req.limit, &mut issues),
            page: positive("page", req.page, &mut issues),
        };
        issues.into_result((filter, options))
    }
}

/// How a JSON `null` field value is read.
#[derive(Clone, Copy, PartialEq, Eq)]
enum NullField {
    /// As if the key were missing, so the required check reports it.
    Absent,
    /// As a type error.
    Invalid,
}

fn contact_fields_from_json(body: &Value, nulls: NullField, issues: &mut ValidationError) -> ContactFields {
    let mut fields = ContactFields::default();
    let Some(map) = body.as_object() else {
        issues.push("value", "object", "\"value\" must be of type object");
        return fields;
    };
    for (k, v) in map {
        let slot = match k.as_str() {
            "name" => &mut fields.name,
            "email" => &mut fields.email,
            "subject" => &mut fields.subject,
            "message" => &mut fields.message,
            _ => {
                issues.push(k.as_str(), "unknown", format!("\"{}\" is not allowed", k));
                continue;
            }
        };
        match v {
            Value::String(s) => *slot = Some(s.clone()),
            Value::Null if nulls == NullField::Absent => {}
            _ => issues.push(k.as_str(), "string", format!("\"{}\" must be a string", k)),
        }
    }
    fields
}

fn parse_integer(field: &'static str, raw: Option<&String>, issues: &mut ValidationError) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.push(field, "number", format!("\"{}\" must be a number", field));
            None
        }
    }
}

fn positive(field: &'static str, v: Option<i64>, issues: &mut ValidationError) -> Option<u32> {
    let n = v?;
    if n < 1 {
        issues.push(field, "min", format!("\"{}\" must be greater than or equal to 1", field));
        return None;
    }
    match u32::try_from(n) {
        Ok(n) => Some(n),
        Err(_) => {
            issues.push(field, "max", format!("\"{}\" must be less than or equal to {}", field, u32::MAX));
            None
        }
    }
}

fn required_text(field: &'static str, v: Option<String>, issues: &mut ValidationError) -> Option<String> {
    if issues.has_field(field) {
        return None;
    }
    match v {
        None => {
            issues.push(field, "required", format!("\"{}\" is required", field));
            None
        }
        Some(s) => optional_text(field, Some(s), issues),
    }
}

fn optional_text(field: &'static str, v: Option<String>, issues: &mut ValidationError) -> Option<String> {
    let s = v?;
    if s.is_empty() {
        issues.push(field, "empty", format!("\"{}\" is not allowed to be empty", field));
        return None;
    }
    Some(s)
}

fn check_email(s: &str, issues: &mut ValidationError) {
    if !is_valid_email(s) {
        issues.push("email", "email", "\"email\" must be a valid email");
    }
}
