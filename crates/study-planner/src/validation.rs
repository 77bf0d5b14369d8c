//! Form checks run before anything is handed to the identity provider.

use crate::auth::{AuthError, IdentityProvider};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every failing field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn for_field(&self, field: &str) -> Vec<&'static str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message)
            .collect()
    }

    fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect();
        write!(f, "invalid form: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub const NAME_MIN: usize = 2;
    pub const NAME_MAX: usize = 50;
    pub const PASSWORD_MIN: usize = 6;

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name_len = self.name.trim().chars().count();
        if name_len < Self::NAME_MIN {
            errors.push("name", "Name must be at least 2 characters");
        } else if name_len > Self::NAME_MAX {
            errors.push("name", "Name must not exceed 50 characters");
        }

        check_email(&self.email, &mut errors);

        if self.password.chars().count() < Self::PASSWORD_MIN {
            errors.push("password", "Password must be at least 6 characters");
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("password", "Password must contain an uppercase letter");
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("password", "Password must contain a digit");
        }

        if self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordResetForm {
    pub email: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&self.email, &mut errors);
        errors.into_result()
    }
}

fn check_email(email: &str, errors: &mut ValidationErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Enter a valid email");
    }
}

/// `local@domain.tld` with no whitespace and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Provider(#[from] AuthError),
}

pub fn submit_registration<P: IdentityProvider + ?Sized>(
    provider: &P,
    form: &RegistrationForm,
) -> Result<(), SubmissionError> {
    form.validate()?;
    provider.register(form.name.trim(), form.email.trim(), &form.password)?;
    Ok(())
}

pub fn submit_login<P: IdentityProvider + ?Sized>(
    provider: &P,
    form: &LoginForm,
) -> Result<(), SubmissionError> {
    form.validate()?;
    provider.login(form.email.trim(), &form.password, form.remember_me)?;
    Ok(())
}

pub fn submit_password_reset<P: IdentityProvider + ?Sized>(
    provider: &P,
    form: &PasswordResetForm,
) -> Result<(), SubmissionError> {
    form.validate()?;
    provider.reset_password(form.email.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            name: "Ana Lopez".to_string(),
            email: "ana@example.com".to_string(),
            password: "Secret1".to_string(),
            confirm_password: "Secret1".to_string(),
        }
    }

    #[derive(Default)]
    struct FakeProvider {
        calls: Mutex<Vec<String>>,
        known_emails: Vec<&'static str>,
    }

    impl IdentityProvider for FakeProvider {
        fn login(&self, email: &str, _password: &str, remember_me: bool) -> Result<(), AuthError> {
            self.calls
                .lock()
                .expect("calls mutex poisoned")
                .push(format!("login:{email}:{remember_me}"));
            if self.known_emails.iter().any(|known| *known == email) {
                Ok(())
            } else {
                Err(AuthError::from_code("auth/user-not-found"))
            }
        }

        fn register(&self, _name: &str, email: &str, _password: &str) -> Result<(), AuthError> {
            self.calls
                .lock()
                .expect("calls mutex poisoned")
                .push(format!("register:{email}"));
            Ok(())
        }

        fn reset_password(&self, email: &str) -> Result<(), AuthError> {
            self.calls
                .lock()
                .expect("calls mutex poisoned")
                .push(format!("reset:{email}"));
            Ok(())
        }

        fn logout(&self) {}
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn registration_reports_every_failing_field() {
        let form = RegistrationForm {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "different".to_string(),
        };

        let errors = form.validate().expect_err("form invalid");
        let fields: Vec<&str> = errors.errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                "name",
                "email",
                "password",
                "password",
                "password",
                "confirm_password"
            ]
        );
        assert_eq!(errors.for_field("email"), vec!["Enter a valid email"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("student@uni.ac.uk"));
        assert!(!is_valid_email("student@uni"));
        assert!(!is_valid_email("@uni.edu"));
        assert!(!is_valid_email("stu dent@uni.edu"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn login_requires_password_and_email() {
        let errors = LoginForm::default().validate().expect_err("empty form");
        assert_eq!(errors.for_field("email"), vec!["Email is required"]);
        assert_eq!(errors.for_field("password"), vec!["Password is required"]);
    }

    #[test]
    fn invalid_forms_never_reach_provider() {
        let provider = FakeProvider::default();
        let form = PasswordResetForm {
            email: "nope".to_string(),
        };

        let err = submit_password_reset(&provider, &form).expect_err("invalid email");
        assert!(matches!(err, SubmissionError::Invalid(_)));
        assert!(provider.calls.lock().expect("calls mutex poisoned").is_empty());
    }

    #[test]
    fn provider_errors_are_surfaced() {
        let provider = FakeProvider {
            known_emails: vec!["ana@example.com"],
            ..FakeProvider::default()
        };

        submit_registration(&provider, &registration()).expect("registration forwarded");
        let ok = LoginForm {
            email: " ana@example.com ".to_string(),
            password: "Secret1".to_string(),
            remember_me: true,
        };
        submit_login(&provider, &ok).expect("known user signs in");

        let unknown = LoginForm {
            email: "bo@example.com".to_string(),
            password: "Secret1".to_string(),
            remember_me: false,
        };
        let err = submit_login(&provider, &unknown).expect_err("unknown user");
        assert_eq!(err.to_string(), "No account exists with this email");

        let calls = provider.calls.lock().expect("calls mutex poisoned").clone();
        assert_eq!(
            calls,
            vec![
                "register:ana@example.com".to_string(),
                "login:ana@example.com:true".to_string(),
                "login:bo@example.com:false".to_string(),
            ]
        );
    }
}
