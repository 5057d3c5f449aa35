//! Seed-ID enums for the workflow lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in
//! `0002_seed_catalog.sql`. Lifecycle designations (the initial state, the
//! in-progress state, the default priority) address catalog rows through
//! these IDs rather than by name, so renaming a state in the catalog does
//! not silently change engine behaviour.

use faultdesk_core::types::DbId;

macro_rules! define_seed_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i64)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the seeded database row ID.
            pub fn id(self) -> DbId {
                self as DbId
            }
        }

        impl From<$name> for DbId {
            fn from(value: $name) -> Self {
                value as DbId
            }
        }
    };
}

define_seed_enum! {
    /// Report workflow state.
    StateSeed {
        Received = 1,
        InProcess = 2,
        Resolved = 3,
        Cancelled = 4,
    }
}

define_seed_enum! {
    /// Report priority.
    PrioritySeed {
        Low = 1,
        Medium = 2,
        High = 3,
    }
}
