use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    /// Widget bounds must have positive width and height
    InvalidSize { width: f32, height: f32 },
    /// Operation not allowed on a modal dialog
    ModalDialog(&'static str),
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiError::InvalidSize { width, height } => {
                write!(f, "Widget size must be positive, got {}x{}", width, height)
            }
            UiError::ModalDialog(op) => write!(f, "{} is not allowed on a modal dialog", op),
        }
    }
}

impl std::error::Error for UiError {}
