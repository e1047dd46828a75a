use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

// 3-20 characters, alphanumeric and underscores only
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("valid username regex"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("alice@example.com"));
        assert!(validate_email("a.b+tag@sub.domain.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!validate_email("alice"));
        assert!(!validate_email("alice@"));
        assert!(!validate_email("alice@example"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("alice@example.c"));
    }

    #[test]
    fn username_length_and_charset() {
        assert!(validate_username("bob"));
        assert!(validate_username("alice_99"));
        assert!(validate_username("a".repeat(20).as_str()));
        assert!(!validate_username("ab"));
        assert!(!validate_username("a".repeat(21).as_str()));
        assert!(!validate_username("spaced out"));
        assert!(!validate_username("dash-ed"));
        assert!(!validate_username(""));
    }

    #[test]
    fn password_policy() {
        assert!(validate_password("Passw0rd").is_ok());
        assert_eq!(
            validate_password("Pw0"),
            Err("Password must be at least 8 characters long")
        );
        assert_eq!(
            validate_password("password1"),
            Err("Password must contain at least one uppercase letter")
        );
        assert_eq!(
            validate_password("PASSWORD1"),
            Err("Password must contain at least one lowercase letter")
        );
        assert_eq!(
            validate_password("Password"),
            Err("Password must contain at least one digit")
        );
    }
}
