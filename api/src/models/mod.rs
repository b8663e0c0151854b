pub mod auth;
pub mod tweet;
pub mod user;

use serde::Deserialize;

use crate::error::AppError;

pub const MAX_PAGE_SIZE: i64 = 100;

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.skip < 0 {
            return Err(AppError::Validation("skip must not be negative".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}
