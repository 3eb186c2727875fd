//! Normalization and validation of migration submissions.
//!
//! A submission carries the remote host, the API token, and an optional
//! channel mapping. Host and token are normalized to canonical forms before
//! a migration row is created; the channel mapping is validated for shape
//! only.

/// Maximum length of the api_host and api_token fields.
pub const MAX_CREDENTIAL_LEN: usize = 255;

/// Normalize a submitted API host.
///
/// Prepends `https://` when the value has no scheme and strips a trailing
/// slash, so stored hosts can be concatenated with resource paths directly.
pub fn normalize_api_host(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("API host cannot be empty".to_string());
    }
    if trimmed.len() > MAX_CREDENTIAL_LEN {
        return Err(format!(
            "API host exceeds maximum length of {MAX_CREDENTIAL_LEN} characters"
        ));
    }

    let mut host = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    while host.ends_with('/') {
        host.pop();
    }

    Ok(host)
}

/// Normalize a submitted API token to the `Token <value>` header form.
pub fn normalize_api_token(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("API token cannot be empty".to_string());
    }
    if trimmed.len() > MAX_CREDENTIAL_LEN {
        return Err(format!(
            "API token exceeds maximum length of {MAX_CREDENTIAL_LEN} characters"
        ));
    }

    if trimmed.starts_with("Token ") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("Token {trimmed}"))
    }
}

/// Validate a channel mapping: a JSON object whose keys are source channel
/// UUIDs and whose values are non-empty local channel UUID strings.
///
/// `null` and the empty object are accepted and mean "no channels mapped".
pub fn validate_channel_map(channels: &serde_json::Value) -> Result<(), String> {
    if channels.is_null() {
        return Ok(());
    }

    let Some(map) = channels.as_object() else {
        return Err("Channels must be a JSON object".to_string());
    };

    for (source, destination) in map {
        if source.trim().is_empty() {
            return Err("Channel mapping has an empty source key".to_string());
        }
        match destination.as_str() {
            Some(value) if !value.trim().is_empty() => {}
            Some(_) => {
                return Err(format!(
                    "Channel mapping for '{source}' has an empty destination"
                ));
            }
            None => {
                return Err(format!(
                    "Channel mapping for '{source}' must be a string UUID"
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemeless_host_gets_https_prefix() {
        assert_eq!(
            normalize_api_host("app.example.com").unwrap(),
            "https://app.example.com"
        );
    }

    #[test]
    fn existing_scheme_preserved() {
        assert_eq!(
            normalize_api_host("http://app.example.com").unwrap(),
            "http://app.example.com"
        );
    }

    #[test]
    fn trailing_slash_stripped() {
        assert_eq!(
            normalize_api_host("https://app.example.com/").unwrap(),
            "https://app.example.com"
        );
    }

    #[test]
    fn empty_host_rejected() {
        assert!(normalize_api_host("  ").is_err());
    }

    #[test]
    fn oversized_host_rejected() {
        let long = "a".repeat(MAX_CREDENTIAL_LEN + 1);
        assert!(normalize_api_host(&long).is_err());
    }

    #[test]
    fn bare_token_gets_prefix() {
        assert_eq!(
            normalize_api_token("e674fa1230ee").unwrap(),
            "Token e674fa1230ee"
        );
    }

    #[test]
    fn prefixed_token_unchanged() {
        assert_eq!(
            normalize_api_token("Token e674fa1230ee").unwrap(),
            "Token e674fa1230ee"
        );
    }

    #[test]
    fn empty_token_rejected() {
        assert!(normalize_api_token("").is_err());
    }

    #[test]
    fn null_channels_accepted() {
        assert!(validate_channel_map(&serde_json::Value::Null).is_ok());
    }

    #[test]
    fn empty_object_accepted() {
        assert!(validate_channel_map(&serde_json::json!({})).is_ok());
    }

    #[test]
    fn valid_mapping_accepted() {
        let channels = serde_json::json!({
            "2f64b1a0-6bce-43a3-a5fc-c3b4eab467b2": "c2b9e0c6-8883-4b24-ba7b-b75b43881e4d"
        });
        assert!(validate_channel_map(&channels).is_ok());
    }

    #[test]
    fn empty_destination_rejected() {
        let channels = serde_json::json!({ "src-uuid": "" });
        assert!(validate_channel_map(&channels).is_err());
    }

    #[test]
    fn non_string_destination_rejected() {
        let channels = serde_json::json!({ "src-uuid": 42 });
        assert!(validate_channel_map(&channels).is_err());
    }

    #[test]
    fn non_object_rejected() {
        assert!(validate_channel_map(&serde_json::json!(["a", "b"])).is_err());
    }
}
