use crate::chess::Role;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A promotion specifier.
#[derive(
    Debug, Display, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[default]
    #[display(fmt = "q")]
    Queen,
}

impl Promotion {
    /// Interprets an optional promotion choice, falling back to [`Promotion::Queen`]
    /// when it is missing or invalid.
    pub fn normalize(choice: Option<&str>) -> Self {
        choice.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl From<Promotion> for Role {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "failed to parse promotion")]
pub struct ParsePromotionError;

/// Only the first character is significant, regardless of case.
impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('n') => Ok(Promotion::Knight),
            Some('b') => Ok(Promotion::Bishop),
            Some('r') => Ok(Promotion::Rook),
            Some('q') => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}
