//! User account rules shared by the service and adapters.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Returns true when `email` has a plausible `local@domain.tld` shape.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
