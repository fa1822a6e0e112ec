//! Request payload validation.
//!
//! Every check runs so that a single response lists all offending fields.

use serde::Serialize;
use thiserror::Error;

use super::dto::{CreateResourceRequest, NewResource, UpdateResourceRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_capacity(capacity: Option<i32>, violations: &mut Vec<FieldViolation>) {
    if matches!(capacity, Some(c) if c < 0) {
        violations.push(FieldViolation::new("capacity", "Capacity must not be negative"));
    }
}

/// Validate a create payload and turn it into a [`NewResource`].
pub fn validate_create(request: CreateResourceRequest) -> Result<NewResource, ValidationError> {
    let mut violations = Vec::new();

    let name = request.name.filter(|n| !is_blank(n));
    if name.is_none() {
        violations.push(FieldViolation::new("name", "Resource name is required"));
    }
    if request.resource_type.is_none() {
        violations.push(FieldViolation::new("type", "Resource type is required"));
    }
    check_capacity(request.capacity, &mut violations);
    let owner_id = request.owner_id.filter(|o| !is_blank(o));
    if owner_id.is_none() {
        violations.push(FieldViolation::new("ownerId", "Owner ID is required"));
    }

    match (name, request.resource_type, owner_id) {
        (Some(name), Some(resource_type), Some(owner_id)) if violations.is_empty() => {
            Ok(NewResource {
                name,
                resource_type,
                description: request.description,
                location: request.location,
                capacity: request.capacity,
                owner_id,
                responsible_person: request.responsible_person,
            })
        }
        _ => Err(ValidationError { violations }),
    }
}

/// Validate the supplied fields of a partial update. Absent and null fields
/// are not checked because they leave the stored value untouched.
pub fn validate_update(request: &UpdateResourceRequest) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if request.name.value().is_some_and(|n| is_blank(n)) {
        violations.push(FieldViolation::new("name", "Resource name must not be blank"));
    }
    check_capacity(request.capacity.value().copied(), &mut violations);
    if request.owner_id.value().is_some_and(|o| is_blank(o)) {
        violations.push(FieldViolation::new("ownerId", "Owner ID must not be blank"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
