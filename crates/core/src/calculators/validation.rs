use crate::errors::{CoreError, FieldError};

/// Collects field-level problems for one calculator input.
///
/// Checks never short-circuit, so the caller sees every bad field at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.push(FieldError::new(field, message));
    }

    fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.push(field, "must be a valid number".into());
            false
        }
    }

    /// Value must be strictly greater than zero.
    pub fn positive(mut self, field: &str, value: f64) -> Self {
        if self.finite(field, value) && value <= 0.0 {
            self.push(field, "must be greater than zero".into());
        }
        self
    }

    /// Value must be zero or greater.
    pub fn non_negative(mut self, field: &str, value: f64) -> Self {
        if self.finite(field, value) && value < 0.0 {
            self.push(field, "cannot be negative".into());
        }
        self
    }

    /// Value must lie in `min..=max`.
    pub fn range(mut self, field: &str, value: f64, min: f64, max: f64) -> Self {
        if self.finite(field, value) && !(min..=max).contains(&value) {
            self.push(field, format!("must be between {min} and {max}"));
        }
        self
    }

    /// Integer count must lie in `min..=max`.
    pub fn count(mut self, field: &str, value: u32, min: u32, max: u32) -> Self {
        if !(min..=max).contains(&value) {
            self.push(field, format!("must be between {min} and {max}"));
        }
        self
    }

    /// Arbitrary rule; `message` is recorded when `ok` is false.
    pub fn check(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.push(field, message.into());
        }
        self
    }

    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(self.errors))
        }
    }
}
