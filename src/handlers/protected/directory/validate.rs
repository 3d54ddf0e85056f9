use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+() #-]{1,20}$").expect("phone pattern compiles"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Digits, spaces and `+ ( ) # -`, at most 20 characters
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("101#22"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("12a"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("123456789012345678901"));
    }

    #[test]
    fn emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+hr@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a b@c.com"));
    }
}
