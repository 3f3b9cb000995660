use crate::FieldId;

/// What the host should render for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: FieldId,
    /// `false` if the field is in any error set.
    pub valid: bool,
    /// First failing message: rules in declaration order, then verifications.
    pub message: Option<String>,
    /// A verification of this field is debouncing or awaiting its response.
    pub in_flight: bool,
    /// The host should apply error styling.
    pub highlight: bool,
}

/// Information about a single failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Failing field.
    pub field: FieldId,
    /// Message to show.
    pub message: String,
}

/// Form-level validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// No field is failing.
    #[default]
    Valid,
    /// One or more fields are failing, in configuration order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the first invalid field (for focusing).
    pub fn first_invalid_field(&self) -> Option<&FieldId> {
        self.first_error().map(|e| &e.field)
    }
}
