//! Macros for building [`crate::error::InvalidatorError`] values.

/// Creates an [`crate::error::InvalidatorError`] from a kind, a description and an optional detail.
#[macro_export]
macro_rules! invalidator_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::InvalidatorError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::InvalidatorError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Returns an [`crate::error::InvalidatorError`] from the current function.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return Err($crate::invalidator_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return Err($crate::invalidator_error!($kind, $desc, $detail))
    };
}
