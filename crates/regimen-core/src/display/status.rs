//! One-line success and failure notices.

use std::fmt;

/// Status line for an operation whose outcome the user must notice, such as
/// a completion write that was rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Completion saved");
        assert_eq!(format!("{success}"), "Success: Completion saved\n");

        let failure = OperationStatus::failure(String::from("Completion rolled back"));
        assert_eq!(format!("{failure}"), "Error: Completion rolled back\n");
    }
}
