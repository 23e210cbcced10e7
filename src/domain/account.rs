use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{app_error::AppError, models::UserToken};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Which of the two user roles a session is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Customer,
    Courier,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Customer => "customer",
            AccountType::Courier => "courier",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(AccountType::Customer),
            "courier" => Ok(AccountType::Courier),
            other => Err(AppError::InvalidInput(format!("unknown account type `{other}`"))),
        }
    }
}

/// Where a freshly logged-in user should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// The user holds both roles and must pick one.
    AccountSelection,
    CustomerApp,
    CourierApp,
}

impl UserToken {
    /// Landing target derived from the roles the token carries.
    pub fn landing(&self) -> Result<Landing, AppError> {
        match (self.customer_id, self.courier_id) {
            (Some(_), Some(_)) => Ok(Landing::AccountSelection),
            (Some(_), None) => Ok(Landing::CustomerApp),
            (None, Some(_)) => Ok(Landing::CourierApp),
            (None, None) => Err(AppError::InvalidInput(
                "no valid account type found".into(),
            )),
        }
    }

    /// Role-specific identifier for `account_type`.
    pub fn role_id(&self, account_type: AccountType) -> Option<u64> {
        match account_type {
            AccountType::Customer => self.customer_id,
            AccountType::Courier => self.courier_id,
        }
    }

    /// The only role this token holds, if it holds exactly one.
    pub fn sole_account_type(&self) -> Option<AccountType> {
        match self.landing() {
            Ok(Landing::CustomerApp) => Some(AccountType::Customer),
            Ok(Landing::CourierApp) => Some(AccountType::Courier),
            _ => None,
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // Applied to the digits-only form.
        let pattern = r"^(\d{3})(\d{3})(\d{4})$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Client-side checks performed before any login request is sent.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        return Err(AppError::InvalidInput(
            "Please enter a valid email address.".into(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long."
        )));
    }
    Ok(())
}

/// Strips everything but ASCII digits.
pub fn raw_phone_number(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Renders a ten digit number as `xxx-xxx-xxxx`; anything else is returned as given.
pub fn format_phone_number(phone: &str) -> String {
    let digits = raw_phone_number(phone);
    match phone_regex().captures(&digits) {
        Some(caps) => format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]),
        None => phone.to_string(),
    }
}
