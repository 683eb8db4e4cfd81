use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::repo_types::{ROLE_RECRUITER, ROLE_TUTOR};

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// At least 10 digits after stripping separators.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.len() >= 10
}

pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub struct UserRegistration<'a> {
    pub fullname: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

pub fn validate_user_registration(data: &UserRegistration<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_required(data.fullname) {
        errors.push("Full name is required".into());
    }
    if !is_valid_email(data.email) {
        errors.push("Valid email is required".into());
    }
    if !is_valid_phone_number(data.phone_number) {
        errors.push("Valid phone number is required".into());
    }
    if data.password.len() < 6 {
        errors.push("Password must be at least 6 characters".into());
    }
    // SuperAdmin cannot be self-registered
    if data.role != ROLE_TUTOR && data.role != ROLE_RECRUITER {
        errors.push("Valid role is required".into());
    }
    errors
}

pub struct OpportunityInput<'a> {
    pub title: &'a str,
    pub tuition_type: &'a str,
    pub location: &'a str,
    pub salary: i64,
    pub experience_level: i32,
    pub requirements: &'a [String],
}

pub const ALLOWED_TUITION_TYPES: [&str; 4] = ["Class 9", "SSC", "HSC", "Admission"];

pub fn validate_opportunity(data: &OpportunityInput<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_required(data.title) {
        errors.push("Title is required".into());
    }
    if !is_required(data.tuition_type) {
        errors.push("Tuition type is required".into());
    } else if !ALLOWED_TUITION_TYPES.contains(&data.tuition_type) {
        errors.push("Invalid tuition type. Must be one of: Class 9, SSC, HSC, Admission".into());
    }
    if !is_required(data.location) {
        errors.push("Location is required".into());
    }
    if data.salary <= 0 {
        errors.push("Valid salary is required".into());
    }
    if data.experience_level < 0 {
        errors.push("Experience level is required".into());
    }
    if data.requirements.is_empty() {
        errors.push("Requirements are required".into());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("tutor@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("tutor@example"));
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone_number("01700000000"));
        assert!(is_valid_phone_number("+880 1700-000000"));
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("phone"));
    }

    #[test]
    fn registration_rejects_superadmin_role() {
        let errors = validate_user_registration(&UserRegistration {
            fullname: "A Tutor",
            email: "a@b.com",
            phone_number: "01700000000",
            password: "secret1",
            role: "SuperAdmin",
        });
        assert_eq!(errors, vec!["Valid role is required".to_string()]);
    }

    #[test]
    fn registration_collects_first_error_first() {
        let errors = validate_user_registration(&UserRegistration {
            fullname: "",
            email: "bad",
            phone_number: "1",
            password: "x",
            role: "Clown",
        });
        assert_eq!(errors[0], "Full name is required");
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn opportunity_validation() {
        let reqs = vec!["BSc".to_string()];
        let ok = OpportunityInput {
            title: "Math tutor",
            tuition_type: "HSC",
            location: "Dhaka",
            salary: 5000,
            experience_level: 1,
            requirements: &reqs,
        };
        assert!(validate_opportunity(&ok).is_empty());

        let bad = OpportunityInput {
            title: "Math tutor",
            tuition_type: "Kindergarten",
            location: "Dhaka",
            salary: 0,
            experience_level: 1,
            requirements: &[],
        };
        let errors = validate_opportunity(&bad);
        assert!(errors
            .iter()
            .any(|e| e.starts_with("Invalid tuition type")));
        assert!(errors.contains(&"Valid salary is required".to_string()));
        assert!(errors.contains(&"Requirements are required".to_string()));
    }
}
