use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::check_length;
use crate::error::AppError;

pub const MIN_AGE_YEARS: u32 = 18;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Body of signup and of a full profile update.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        check_length("first_name", &self.first_name, 1, 50)?;
        check_length("last_name", &self.last_name, 1, 50)?;
        if let Some(birth_date) = self.birth_date {
            validate_birth_date(birth_date, Utc::now().date_naive())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl LoginPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("email is not a valid address".into());

    if email.len() > 120 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    check_length("password", password, 8, 255)
}

pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    let cutoff = today
        .checked_sub_months(Months::new(MIN_AGE_YEARS * 12))
        .ok_or_else(|| AppError::Validation("birth_date is out of range".into()))?;
    if birth_date > cutoff {
        return Err(AppError::Validation(format!(
            "must be at least {MIN_AGE_YEARS} years old"
        )));
    }
    Ok(())
}
