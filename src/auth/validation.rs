//! Input checks run at the transport boundary before the service sees a
//! request. Every failing field is reported, not just the first.

use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::{
    dto::{FieldError, LoginRequest, RegisterRequest},
    errors::AuthError,
};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn not_blank(errors: &mut Vec<FieldError>, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: "cannot be empty".into(),
        });
        return false;
    }
    true
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if not_blank(errors, "email", email) && !is_valid_email(email.trim()) {
        errors.push(FieldError {
            field: "email",
            message: "must be a valid email address".into(),
        });
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), AuthError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::ValidationFailed(errors))
    }
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), AuthError> {
    let mut errors = Vec::new();
    check_email(&mut errors, &req.email);
    not_blank(&mut errors, "password", &req.password);
    not_blank(&mut errors, "firstName", &req.first_name);
    not_blank(&mut errors, "lastName", &req.last_name);
    finish(errors)
}

pub fn validate_login(req: &LoginRequest) -> Result<(), AuthError> {
    let mut errors = Vec::new();
    not_blank(&mut errors, "email", &req.email);
    not_blank(&mut errors, "password", &req.password);
    finish(errors)
}
