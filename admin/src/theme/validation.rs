use crate::error::AppError;
use crate::theme::color::Rgb;
use crate::theme::types::ThemeMode;
use crate::validation::Validator;

/// Validation errors for user-supplied theme values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeValidationError {
    InvalidHexColor { value: String, reason: String },
    InvalidThemeMode { value: String },
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::InvalidHexColor { value, reason } => {
                format!(
                    "Invalid color: '{}'\n\n\
                    Reason: {}\n\n\
                    Please use a hex color such as '#b5072a' or '#abc'.",
                    value, reason
                )
            }
            ThemeValidationError::InvalidThemeMode { value } => {
                format!(
                    "Invalid theme mode: '{}'\n\n\
                    Please use one of: light, dark, system.",
                    value
                )
            }
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(error: ThemeValidationError) -> Self {
        AppError::Validation(error.user_message())
    }
}

/// Validator for accent colors entered by the user.
///
/// The color math itself is fail-soft (malformed input becomes black), so
/// entry points that take user input run this first.
pub struct HexColorValidator;

impl Validator<str> for HexColorValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ThemeValidationError::InvalidHexColor {
                value: input.to_string(),
                reason: "Color cannot be empty".to_string(),
            });
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeValidationError::InvalidHexColor {
                value: input.to_string(),
                reason: "Only hexadecimal digits are allowed".to_string(),
            });
        }

        if Rgb::parse(trimmed).is_none() {
            return Err(ThemeValidationError::InvalidHexColor {
                value: input.to_string(),
                reason: format!("Expected 3 or 6 digits, got {}", digits.len()),
            });
        }

        Ok(())
    }
}

pub struct ThemeModeValidator;

impl Validator<str> for ThemeModeValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        input
            .parse::<ThemeMode>()
            .map(|_| ())
            .map_err(|_| ThemeValidationError::InvalidThemeMode {
                value: input.to_string(),
            })
    }
}
