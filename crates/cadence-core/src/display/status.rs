//! Status and confirmation message types for operation feedback.

use std::fmt;

/// A one-line confirmation or failure message.
#[derive(Debug)]
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let paused = OperationStatus::success("Pattern 3 deactivated".to_string());
        assert_eq!(paused.to_string(), "Success: Pattern 3 deactivated\n");

        let failure = OperationStatus::failure("Pattern 3 not found".to_string());
        assert!(failure.to_string().starts_with("Error:"));
    }
}
