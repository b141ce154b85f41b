use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::AppError;

/// Cuisine a restaurant is classified under.
///
/// Each variant is backed by a stable integer code, which is what gets
/// persisted and what external callers send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Brazilian,
    Italian,
    Arabic,
    Japanese,
    FastFood,
}

impl Cuisine {
    pub fn all() -> [Cuisine; 5] {
        [
            Cuisine::Brazilian,
            Cuisine::Italian,
            Cuisine::Arabic,
            Cuisine::Japanese,
            Cuisine::FastFood,
        ]
    }

    pub fn code(&self) -> i32 {
        match self {
            Cuisine::Brazilian => 1,
            Cuisine::Italian => 2,
            Cuisine::Arabic => 3,
            Cuisine::Japanese => 4,
            Cuisine::FastFood => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Brazilian => "brazilian",
            Cuisine::Italian => "italian",
            Cuisine::Arabic => "arabic",
            Cuisine::Japanese => "japanese",
            Cuisine::FastFood => "fast_food",
        }
    }

    /// Convert an integer code, failing on anything unmapped
    pub fn from_code(code: i32) -> Result<Self, AppError> {
        Self::all()
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| AppError::InvalidClassification(format!("Invalid cuisine code: {}", code)))
    }
}

impl TryFrom<i32> for Cuisine {
    type Error = AppError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Cuisine::from_code(code)
    }
}

impl From<Cuisine> for i32 {
    fn from(cuisine: Cuisine) -> Self {
        cuisine.code()
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
