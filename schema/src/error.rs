//! Error types for the value model.

use std::fmt;

/// Returned when an operation would grow a [`crate::FixedVector`] past its
/// capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// The fixed capacity of the vector.
    pub capacity: usize,
    /// The length the operation would have produced.
    pub attempted: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "length {} exceeds fixed capacity {}",
            self.attempted, self.capacity
        )
    }
}

impl std::error::Error for CapacityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_both_lengths() {
        let err = CapacityError {
            capacity: 10,
            attempted: 11,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("11"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CapacityError>();
    }
}
