//! Domain error model.

use thiserror::Error;

use crate::id::{AisleId, LocationId, ProductId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Stable machine-readable code carried by every [`DomainError`].
///
/// The UI boundary maps codes to display resources; codes never change once
/// shipped, even if the human-readable messages do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    DuplicateLocationName,
    DuplicateProductName,
    DuplicateProduct,
    InvalidLocation,
    DeleteDefaultAisle,
    AisleMove,
    SampleDataCreation,
    Generic,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateLocationName => "duplicate-location-name",
            ErrorCode::DuplicateProductName => "duplicate-product-name",
            ErrorCode::DuplicateProduct => "duplicate-product",
            ErrorCode::InvalidLocation => "invalid-location",
            ErrorCode::DeleteDefaultAisle => "delete-default-aisle",
            ErrorCode::AisleMove => "aisle-move",
            ErrorCode::SampleDataCreation => "sample-data-creation",
            ErrorCode::Generic => "generic",
        }
    }
}

/// Domain-level error.
///
/// A closed set of deterministic business failures (uniqueness violations,
/// lifecycle protections), plus `Repository` as the catch-all for unexpected
/// storage-layer failures. Use cases validate *before* mutating, so a
/// returned error never leaves partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A location with this name already exists for the same location type.
    #[error("a location named '{name}' already exists for this location type")]
    DuplicateLocationName { name: String },

    /// A product with this name already exists (names are globally unique).
    #[error("a product named '{name}' already exists")]
    DuplicateProductName { name: String },

    /// A product with this id already exists (double-submission guard).
    #[error("product {id} already exists")]
    DuplicateProduct { id: ProductId },

    /// The referenced location does not exist.
    #[error("location {id} does not exist")]
    InvalidLocation { id: LocationId },

    /// Direct removal of a default aisle was attempted.
    #[error("the default aisle of location {location_id} cannot be removed")]
    DeleteDefaultAisle { location_id: LocationId },

    /// A product move crossed a location boundary.
    #[error("cannot move a product from aisle {from} to aisle {to}: different locations")]
    AisleMove { from: AisleId, to: AisleId },

    /// Sample data generation was attempted on a non-empty product set.
    #[error("sample data can only be generated into an empty database")]
    SampleDataCreation,

    /// A referenced row vanished mid-operation (maps to the generic code).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected storage-layer failure, wrapped without losing the message.
    #[error("repository failure: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn duplicate_location_name(name: impl Into<String>) -> Self {
        Self::DuplicateLocationName { name: name.into() }
    }

    pub fn duplicate_product_name(name: impl Into<String>) -> Self {
        Self::DuplicateProductName { name: name.into() }
    }

    pub fn invalid_location(id: LocationId) -> Self {
        Self::InvalidLocation { id }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Stable code for UI mapping.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::DuplicateLocationName { .. } => ErrorCode::DuplicateLocationName,
            DomainError::DuplicateProductName { .. } => ErrorCode::DuplicateProductName,
            DomainError::DuplicateProduct { .. } => ErrorCode::DuplicateProduct,
            DomainError::InvalidLocation { .. } => ErrorCode::InvalidLocation,
            DomainError::DeleteDefaultAisle { .. } => ErrorCode::DeleteDefaultAisle,
            DomainError::AisleMove { .. } => ErrorCode::AisleMove,
            DomainError::SampleDataCreation => ErrorCode::SampleDataCreation,
            DomainError::NotFound(_) | DomainError::Repository(_) => ErrorCode::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_stable_code() {
        let cases = [
            (
                DomainError::duplicate_location_name("Market"),
                "duplicate-location-name",
            ),
            (
                DomainError::duplicate_product_name("Milk"),
                "duplicate-product-name",
            ),
            (
                DomainError::DuplicateProduct {
                    id: ProductId::new(7),
                },
                "duplicate-product",
            ),
            (
                DomainError::invalid_location(LocationId::new(3)),
                "invalid-location",
            ),
            (
                DomainError::DeleteDefaultAisle {
                    location_id: LocationId::new(3),
                },
                "delete-default-aisle",
            ),
            (
                DomainError::AisleMove {
                    from: AisleId::new(1),
                    to: AisleId::new(2),
                },
                "aisle-move",
            ),
            (DomainError::SampleDataCreation, "sample-data-creation"),
            (DomainError::not_found("aisle product"), "generic"),
            (DomainError::repository("lock poisoned"), "generic"),
        ];

        for (err, code) in cases {
            assert_eq!(err.code().as_str(), code);
        }
    }

    #[test]
    fn messages_keep_the_offending_value() {
        let err = DomainError::duplicate_product_name("Milk");
        assert!(err.to_string().contains("Milk"));

        let err = DomainError::repository("disk on fire");
        assert!(err.to_string().contains("disk on fire"));
    }
}
