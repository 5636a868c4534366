//! Strongly-typed identifiers used across the domain.
//!
//! Ids are plain integers allocated by the storage layer (monotonic,
//! arena-style). A fresh entity carries [`UNASSIGNED`](LocationId::UNASSIGNED)
//! until its repository `add` call assigns a real id and returns the stored
//! row.

use serde::{Deserialize, Serialize};

macro_rules! impl_int_newtype {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(i64);

        impl $t {
            /// Sentinel for entities that have not been persisted yet.
            pub const UNASSIGNED: Self = Self(0);

            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> i64 {
                self.0
            }

            /// Whether a repository has assigned this id.
            pub const fn is_assigned(self) -> bool {
                self.0 != 0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_int_newtype!(
    /// Identifier of a [`Location`](crate::Location).
    LocationId
);
impl_int_newtype!(
    /// Identifier of an [`Aisle`](crate::Aisle).
    AisleId
);
impl_int_newtype!(
    /// Identifier of an [`AisleProduct`](crate::AisleProduct) mapping row.
    AisleProductId
);
impl_int_newtype!(
    /// Identifier of a [`Product`](crate::Product).
    ProductId
);
impl_int_newtype!(
    /// Identifier of a [`Note`](crate::Note).
    NoteId
);
impl_int_newtype!(
    /// Identifier of a [`LoyaltyCard`](crate::LoyaltyCard).
    LoyaltyCardId
);
