// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column rename rules for `#[entity(rename_all = "...")]`.
//!
//! A rule applies to every field without an explicit `#[column(name)]`.
//!
//! | Value | `first_name` becomes |
//! |-------|----------------------|
//! | `"snake_case"` | `first_name` |
//! | `"camelCase"` | `firstName` |
//! | `"PascalCase"` | `FirstName` |
//! | `"kebab-case"` | `first-name` |
//! | `"SCREAMING_SNAKE_CASE"` | `FIRST_NAME` |
//! | `"lowercase"` | `first_name` |
//! | `"UPPERCASE"` | `FIRST_NAME` |

use convert_case::{Case, Casing};
use darling::FromMeta;

/// Naming rule applied to field names to derive column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `snake_case`
    Snake,
    /// `camelCase`
    Camel,
    /// `PascalCase`
    Pascal,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// Lowercase every character.
    Lower,
    /// Uppercase every character.
    Upper
}

impl RenameRule {
    /// Apply the rule to a field name.
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Snake => name.to_case(Case::Snake),
            Self::Camel => name.to_case(Case::Camel),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::ScreamingSnake => name.to_case(Case::Snake).to_uppercase(),
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    /// Separators and letter case in the rule name are ignored, so
    /// `"snake_case"`, `"snakecase"` and `"SNAKE-CASE"` are equal.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "snakecase" | "snake" => Ok(Self::Snake),
            "camelcase" | "camel" => Ok(Self::Camel),
            "pascalcase" | "pascal" => Ok(Self::Pascal),
            "kebabcase" | "kebab" => Ok(Self::Kebab),
            "screamingsnakecase" | "screamingsnake" => Ok(Self::ScreamingSnake),
            "lowercase" | "lower" => Ok(Self::Lower),
            "uppercase" | "upper" => Ok(Self::Upper),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_meta_ignores_separators() {
        assert_eq!(
            RenameRule::from_string("snake_case").unwrap(),
            RenameRule::Snake
        );
        assert_eq!(
            RenameRule::from_string("camelCase").unwrap(),
            RenameRule::Camel
        );
        assert_eq!(
            RenameRule::from_string("SCREAMING_SNAKE_CASE").unwrap(),
            RenameRule::ScreamingSnake
        );
        assert_eq!(
            RenameRule::from_string("kebab-case").unwrap(),
            RenameRule::Kebab
        );
    }

    #[test]
    fn from_meta_unknown() {
        assert!(RenameRule::from_string("title case please").is_err());
    }

    #[test]
    fn apply_rules() {
        assert_eq!(RenameRule::Camel.apply("first_name"), "firstName");
        assert_eq!(RenameRule::Pascal.apply("first_name"), "FirstName");
        assert_eq!(RenameRule::Kebab.apply("first_name"), "first-name");
        assert_eq!(RenameRule::ScreamingSnake.apply("first_name"), "FIRST_NAME");
        assert_eq!(RenameRule::Snake.apply("first_name"), "first_name");
        assert_eq!(RenameRule::Upper.apply("age"), "AGE");
    }
}
