//! Opaque id newtypes for arena-owned entities.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Id of a resolved parameter within a [`ComponentModel`](crate::ComponentModel).
    ParamId
);

define_id!(
    /// Id of a port within a [`ComponentModel`](crate::ComponentModel).
    PortId
);

define_id!(
    /// Id of a synthesized wire within a [`GeneratedModule`](crate::GeneratedModule).
    WireId
);
