//! Integer identifier newtypes and coercion.
//!
//! Callers hand us ids as numbers or as numeric strings (chat platforms are
//! inconsistent about this). Every id is normalized to an `i64` before it
//! reaches a store, so `"42"` and `42` always address the same record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

/// Conversion of a caller-supplied identifier into a typed id.
///
/// Implemented for the id types themselves, the common integer widths and
/// string forms. Strings are trimmed and parsed as base-10.
pub trait IntoId<T> {
    fn into_id(self) -> Result<T, IdError>;
}

fn parse_i64(s: &str) -> Result<i64, IdError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| IdError::Invalid(s.to_string()))
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an id from its integer value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the integer value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_i64(s).map(Self)
            }
        }

        impl IntoId<$name> for $name {
            fn into_id(self) -> Result<$name, IdError> {
                Ok(self)
            }
        }

        impl IntoId<$name> for i64 {
            fn into_id(self) -> Result<$name, IdError> {
                Ok($name(self))
            }
        }

        impl IntoId<$name> for i32 {
            fn into_id(self) -> Result<$name, IdError> {
                Ok($name(i64::from(self)))
            }
        }

        impl IntoId<$name> for u32 {
            fn into_id(self) -> Result<$name, IdError> {
                Ok($name(i64::from(self)))
            }
        }

        impl IntoId<$name> for u64 {
            fn into_id(self) -> Result<$name, IdError> {
                i64::try_from(self)
                    .map($name)
                    .map_err(|_| IdError::OutOfRange(self))
            }
        }

        impl IntoId<$name> for &str {
            fn into_id(self) -> Result<$name, IdError> {
                self.parse()
            }
        }

        impl IntoId<$name> for &String {
            fn into_id(self) -> Result<$name, IdError> {
                self.parse()
            }
        }

        impl IntoId<$name> for String {
            fn into_id(self) -> Result<$name, IdError> {
                self.parse()
            }
        }
    };
}

integer_id! {
    /// Identifier of a user on the external platform.
    UserId
}

integer_id! {
    /// Identifier of a monitored channel on the external platform.
    ChannelId
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_string_and_integer_agree() {
        let from_str: UserId = "42".into_id().unwrap();
        let from_int: UserId = 42i64.into_id().unwrap();
        assert_eq!(from_str, from_int);
    }

    #[test]
    fn test_negative_and_padded_strings() {
        let id: ChannelId = "  -1001234567890 ".into_id().unwrap();
        assert_eq!(id.get(), -1_001_234_567_890);
    }

    #[test]
    fn test_invalid_string_rejected() {
        let err = IntoId::<UserId>::into_id("abc").unwrap_err();
        assert_eq!(err, IdError::Invalid("abc".to_string()));

        let err = IntoId::<UserId>::into_id("").unwrap_err();
        assert!(matches!(err, IdError::Invalid(_)));
    }

    #[test]
    fn test_u64_out_of_range() {
        let err = IntoId::<ChannelId>::into_id(u64::MAX).unwrap_err();
        assert_eq!(err, IdError::OutOfRange(u64::MAX));
    }

    #[test]
    fn test_display_and_debug() {
        let id = UserId::new(7);
        assert_eq!(format!("{}", id), "7");
        assert_eq!(format!("{:?}", id), "UserId(7)");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ChannelId(100)).unwrap();
        assert_eq!(json, "100");
    }

    proptest! {
        #[test]
        fn prop_string_form_matches_integer_form(n in any::<i64>()) {
            let a: UserId = n.to_string().into_id().unwrap();
            let b: UserId = n.into_id().unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
