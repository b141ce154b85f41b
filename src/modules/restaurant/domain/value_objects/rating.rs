use serde::{Deserialize, Serialize};

use crate::shared::validation::{Rules, Validate, ValidationResult};

pub const MIN_STARS_EXCLUSIVE: i32 = 0;
pub const MAX_STARS: i32 = 5;
pub const COMMENT_MAX_LEN: usize = 100;

/// A user's star rating and comment.
///
/// `stars` is kept as a plain integer so untrusted input (zero, negatives)
/// can be represented and rejected by validation instead of at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    stars: i32,
    comment: String,
}

impl Rating {
    pub fn new(stars: i32, comment: impl Into<String>) -> Self {
        Self {
            stars,
            comment: comment.into(),
        }
    }

    pub fn stars(&self) -> i32 {
        self.stars
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl Validate for Rating {
    fn validate(&self) -> ValidationResult {
        let result = Rules::greater_than_at_most(
            ValidationResult::valid(),
            "stars",
            "Stars",
            self.stars,
            MIN_STARS_EXCLUSIVE,
            MAX_STARS,
        );
        Rules::required_max_len(result, "comment", "Comment", &self.comment, COMMENT_MAX_LEN)
    }
}
