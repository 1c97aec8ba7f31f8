//! Error handling foundation for flowcanvas.
//!
//! Each crate defines its own domain error enum. Operations that cross a
//! layer boundary (controller, submitter, backend client, CLI commands)
//! return [`Result`], which wraps that enum in a rootcause `Report`;
//! in-layer helpers and collaborator traits return the bare enum.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, PartialEq, Eq)]
    enum LayerError {
        Refused,
    }

    impl fmt::Display for LayerError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused")
        }
    }

    impl std::error::Error for LayerError {}

    fn inner() -> std::result::Result<(), LayerError> {
        Err(LayerError::Refused)
    }

    fn outer() -> Result<(), LayerError> {
        inner()?;
        Ok(())
    }

    #[test]
    fn question_mark_lifts_domain_error_into_report() {
        let err = outer().expect_err("inner fails");
        assert_eq!(err.current_context(), &LayerError::Refused);
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn ok_values_pass_through() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }
}
