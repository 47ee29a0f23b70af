//! Result type alias for tma-export

use super::errors::TmaError;

/// Result type alias for tma-export operations
///
/// # Examples
///
/// ```
/// use tma_export::domain::result::Result;
/// use tma_export::domain::errors::TmaError;
///
/// fn failing_function() -> Result<()> {
///     Err(TmaError::Validation("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, TmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
