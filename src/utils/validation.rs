//! Validation utilities
//!
//! Registration inputs are checked field by field and every failure is
//! collected, so a caller can surface all of them in one round trip.

use bigdecimal::BigDecimal;

use crate::types::*;

fn check_required_text(field: &'static str, value: &str, max_len: usize) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::new(field, "Cannot be empty"));
    }
    if value.len() > max_len {
        return Some(FieldError::new(
            field,
            format!("Cannot exceed {} characters", max_len),
        ));
    }
    None
}

fn check_phone_number(phone: &str) -> Option<FieldError> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Some(FieldError::new(
            "phone_number",
            "Phone number must be exactly 10 digits",
        ));
    }
    None
}

fn check_positive(field: &'static str, amount: &BigDecimal) -> Option<FieldError> {
    if *amount <= BigDecimal::from(0) {
        return Some(FieldError::new(field, "Must be greater than zero"));
    }
    None
}

fn check_non_negative(field: &'static str, amount: &BigDecimal) -> Option<FieldError> {
    if *amount < BigDecimal::from(0) {
        return Some(FieldError::new(field, "Cannot be negative"));
    }
    None
}

/// Validate that a phone number is exactly 10 digits
pub fn validate_phone_number(phone: &str) -> LendingResult<()> {
    match check_phone_number(phone) {
        Some(error) => Err(LendingError::Validation(ValidationErrors(vec![error]))),
        None => Ok(()),
    }
}

/// Validate a registration input, reporting every failing field
pub fn validate_new_customer(input: &NewCustomer) -> LendingResult<()> {
    let mut errors = Vec::new();

    if let Some(number) = &input.customer_number {
        if let Some(error) = check_required_text("customer_number", number, 20) {
            errors.push(error);
        }
    }
    if let Some(error) = check_required_text("name", &input.name, 100) {
        errors.push(error);
    }
    if let Some(error) = check_required_text("area_name", &input.area_name, 100) {
        errors.push(error);
    }
    if let Some(error) = check_phone_number(&input.phone_number) {
        errors.push(error);
    }
    if let Some(error) = check_positive("amount_given", &input.amount_given) {
        errors.push(error);
    }
    if let Some(error) = check_non_negative("interest_amount", &input.interest_amount) {
        errors.push(error);
    }
    if let Some(error) = check_non_negative("document_charge", &input.document_charge) {
        errors.push(error);
    }
    if input.number_of_weeks == Some(0) {
        errors.push(FieldError::new(
            "number_of_weeks",
            "Must be at least one week",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LendingError::Validation(ValidationErrors(errors)))
    }
}

/// Validate a customer patch, reporting every failing field
pub fn validate_customer_patch(patch: &CustomerPatch) -> LendingResult<()> {
    let mut errors = Vec::new();

    if let Some(name) = &patch.name {
        if let Some(error) = check_required_text("name", name, 100) {
            errors.push(error);
        }
    }
    if let Some(area_name) = &patch.area_name {
        if let Some(error) = check_required_text("area_name", area_name, 100) {
            errors.push(error);
        }
    }
    if let Some(phone_number) = &patch.phone_number {
        if let Some(error) = check_phone_number(phone_number) {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LendingError::Validation(ValidationErrors(errors)))
    }
}
