use crate::utils::error::{DeaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// `true` when the key is non-blank and only letters and digits.
pub fn validate_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_api_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if !validate_key(key) {
        return Err(DeaError::ValidationError {
            message: format!("{} must contain only letters and digits", field_name),
        });
    }
    Ok(())
}

/// The service takes a bare host name; protocols, ports and paths make it
/// answer `fail_input_domain` at best.
pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    validate_non_empty_string(field_name, domain)?;

    if domain.contains("://") || domain.contains('/') || domain.contains(':') {
        return Err(DeaError::ValidationError {
            message: format!(
                "{} '{}' must not include a protocol, port or path (e.g. no http(s)://)",
                field_name, domain
            ),
        });
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(DeaError::ValidationError {
            message: format!("{} '{}' must not contain whitespace", field_name, domain),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DeaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DeaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DeaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeaError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("abcDEF123"));
        assert!(!validate_key(""));
        assert!(!validate_key("abc 123"));
        assert!(!validate_key("abc-123"));
        assert!(!validate_key("ключ"));
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("api_key", "abc123").is_ok());
        assert!(validate_api_key("api_key", "   ").is_err());
        assert!(matches!(
            validate_api_key("api_key", "abc/123"),
            Err(DeaError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("domain", "mailinator.com").is_ok());
        assert!(validate_domain("domain", "ok.bdea.cc").is_ok());
        assert!(validate_domain("domain", "").is_err());
        assert!(validate_domain("domain", "https://mailinator.com").is_err());
        assert!(validate_domain("domain", "mailinator.com:443").is_err());
        assert!(validate_domain("domain", "mailinator.com/inbox").is_err());
        assert!(validate_domain("domain", "mail inator.com").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("check_endpoint", "https://example.com").is_ok());
        assert!(validate_url("check_endpoint", "http://example.com").is_ok());
        assert!(validate_url("check_endpoint", "").is_err());
        assert!(validate_url("check_endpoint", "invalid-url").is_err());
        assert!(validate_url("check_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("abc".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("api_key", &present).unwrap(), "abc");
        assert!(matches!(
            validate_required_field("api_key", &missing),
            Err(DeaError::MissingConfigError { .. })
        ));
    }
}
