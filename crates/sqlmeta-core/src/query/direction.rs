// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Order direction.

use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    value::{ToValue, Value}
};

/// Sort direction for `ORDER BY` terms.
///
/// Order fields may carry a `Direction` or a string naming one; both resolve
/// to the same variant (`"asc"`, `"ASC"` and [`Direction::Asc`] are
/// equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,

    /// Descending order (Z-A, 9-0, newest first).
    Desc
}

impl Direction {
    /// Convert to SQL keyword.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC"
        }
    }

    /// Resolve an order field value.
    ///
    /// [`Value::Null`] means the field does not order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDirection`] for strings other than `asc`/`desc` and for
    /// non-text values.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) => s.parse().map(Some),
            other => Err(Error::InvalidDirection(other.to_string()))
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(Error::InvalidDirection(s.to_owned()))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl ToValue for Direction {
    fn to_value(&self) -> Value {
        Value::Text(self.as_sql().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_as_sql() {
        assert_eq!(Direction::Asc.as_sql(), "ASC");
        assert_eq!(Direction::Desc.as_sql(), "DESC");
    }

    #[test]
    fn direction_default() {
        assert_eq!(Direction::default(), Direction::Asc);
    }

    #[test]
    fn parse_is_case_insensitive() {
        for text in ["ASC", "asc", "Asc", " asc "] {
            assert_eq!(text.parse::<Direction>().unwrap(), Direction::Asc);
        }
        assert_eq!("dEsC".parse::<Direction>().unwrap(), Direction::Desc);
    }

    #[test]
    fn enum_and_string_values_agree() {
        let typed = Direction::from_value(&Direction::Asc.to_value()).unwrap();
        let raw = Direction::from_value(&Value::from("asc")).unwrap();
        assert_eq!(typed, raw);
        assert_eq!(typed, Some(Direction::Asc));
    }

    #[test]
    fn null_value_does_not_order() {
        assert_eq!(Direction::from_value(&Value::Null).unwrap(), None);
    }

    #[test]
    fn unknown_direction_fails() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(matches!(err, Error::InvalidDirection(ref s) if s == "sideways"));
        assert!(Direction::from_value(&Value::Int(1)).is_err());
    }
}
