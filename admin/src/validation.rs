/// Core validation trait shared by user-input validators.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use admin::theme::validation::{HexColorValidator, ThemeModeValidator};
/// use admin::validation::Validator;
///
/// assert!(HexColorValidator.validate("#b5072a").is_ok());
/// assert!(HexColorValidator.validate("#12345").is_err());
/// assert!(ThemeModeValidator.validate("sepia").is_err());
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}
