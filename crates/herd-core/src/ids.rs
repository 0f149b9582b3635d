//! Type-safe dimension identifiers.
//!
//! Zones, plants and weeks are all identified by the text that appears in the
//! input tables. Wrapping them in distinct newtypes keeps a plant name from
//! being passed where a zone is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! dimension_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

dimension_id!(
    /// A sourcing region.
    ZoneId
);
dimension_id!(
    /// A processing plant.
    PlantId
);
dimension_id!(
    /// A planning week.
    WeekId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_order_and_display() {
        let mut weeks = vec![WeekId::new("28.2025"), WeekId::new("27.2025")];
        weeks.sort();
        assert_eq!(weeks[0].as_str(), "27.2025");
        assert_eq!(weeks[1].to_string(), "28.2025");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let zone = ZoneId::from("LLANOS");
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, "\"LLANOS\"");
    }
}
