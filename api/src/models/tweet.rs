use serde::{Deserialize, Serialize};

use super::check_length;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Body of tweet create and update. The owner always comes from the token.
#[derive(Debug, Deserialize)]
pub struct TweetBody {
    pub content: String,
}

impl TweetBody {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("content", &self.content, 1, 256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bounds_count_characters() {
        let body = |content: String| TweetBody { content };

        assert!(body(String::new()).validate().is_err());
        assert!(body("The First Tweet".into()).validate().is_ok());
        assert!(body("é".repeat(256)).validate().is_ok());
        assert!(body("x".repeat(257)).validate().is_err());
    }
}
