//! Typed identifier newtypes backed by UUIDs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! uuid_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Access the inner UUID.
            #[must_use]
            pub fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a loaded [`Script`](crate::script::Script).
    ScriptId
);

uuid_id!(
    /// Unique identifier for an [`Event`](crate::event::Event).
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = ScriptId::new();
        let b = ScriptId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = EventId::new();
        let text = id.to_string();
        let parsed: EventId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let id = ScriptId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ScriptId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        let result = EventId::from_str("not-a-uuid");
        assert!(result.is_err());
    }

    #[test]
    fn should_wrap_an_existing_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let id = ScriptId::from(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }
}
