//! Rules for choosing a new password.
//!
//! Shared by sign-up and the change-password form so both reject the same
//! input with the same message. Presence checks stay with the forms because
//! each form words its "missing field" error differently.

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a new password was rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
}

/// Check a new password against its confirmation.
///
/// Equality is checked before length, so a short password that also does
/// not match reports the mismatch.
///
/// # Errors
///
/// Returns [`PasswordError::Mismatch`] if the two differ, otherwise
/// [`PasswordError::TooShort`] if the password has fewer than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), PasswordError> {
    if password != confirm {
        return Err(PasswordError::Mismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_wins_over_length() {
        assert_eq!(check_new_password("abc", "abd"), Err(PasswordError::Mismatch));
        assert_eq!(
            check_new_password("longenough1", "longenough2"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_too_short() {
        let err = check_new_password("1234567", "1234567").unwrap_err();
        assert_eq!(err, PasswordError::TooShort { min: 8 });
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert!(check_new_password("ééééééé", "ééééééé").is_err());
        assert!(check_new_password("éééééééé", "éééééééé").is_ok());
    }

    #[test]
    fn test_accepts_exactly_minimum() {
        assert_eq!(check_new_password("12345678", "12345678"), Ok(()));
    }
}
