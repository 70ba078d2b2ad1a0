use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token claims.
///
/// Carries the registered `sub`, `iat` and `exp` claims plus private claims
/// via the `extra` map, which is flattened into the token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject expiring `lifetime` after now.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - `now + lifetime` is not a representable timestamp
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or(JwtError::ExpirationOutOfRange)?;

        Ok(Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(now.timestamp()),
            extra: HashMap::new(),
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field.
    ///
    /// A value that fails to serialize is skipped; use [`Claims::try_with_extra`]
    /// when the field must be present.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add a custom field, failing if the value cannot be serialized.
    ///
    /// # Errors
    /// * `EncodingFailed` - Value is not representable as JSON
    pub fn try_with_extra(
        mut self,
        key: impl ToString,
        value: impl Serialize,
    ) -> Result<Self, JwtError> {
        let json_value =
            serde_json::to_value(value).map_err(|e| JwtError::EncodingFailed(e.to_string()))?;
        self.extra.insert(key.to_string(), json_value);
        Ok(self)
    }

    /// Read a custom field as `T`.
    ///
    /// Returns `None` when the field is absent or does not deserialize into `T`.
    pub fn extra_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            exp: None,
            iat: None,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("user123");
        assert_eq!(claims.sub, Some("user123".to_string()));
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", Duration::hours(1)).unwrap();

        assert_eq!(claims.sub, Some("user123".to_string()));
        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 60 * 60);
    }

    #[test]
    fn test_for_subject_rejects_unrepresentable_expiry() {
        let result = Claims::for_subject("user123", Duration::MAX);

        assert!(matches!(result, Err(JwtError::ExpirationOutOfRange)));
    }

    #[test]
    fn test_try_with_extra_reports_unserializable_value() {
        // JSON object keys must be strings
        let mut value = HashMap::new();
        value.insert((1, 2), "pair");

        let result = Claims::new().try_with_extra("role", &value);
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));

        let claims = Claims::new().with_extra("role", &value);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_try_with_extra() {
        let claims = Claims::new().try_with_extra("role", "admin").unwrap();

        assert_eq!(claims.extra_as::<String>("role"), Some("admin".to_string()));
    }

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(1234567890)
            .with_issued_at(1234567800)
            .with_extra("role", "admin");

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.iat, Some(1234567800));
        assert_eq!(claims.extra_as::<String>("role"), Some("admin".to_string()));
    }

    #[test]
    fn test_extra_as_wrong_type() {
        let claims = Claims::new().with_extra("role", 42);

        assert_eq!(claims.extra_as::<String>("role"), None);
        assert_eq!(claims.extra_as::<String>("missing"), None);
    }

    #[test]
    fn test_extra_is_flattened() {
        let claims = Claims::new().with_subject("user123").with_extra("role", "user");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["sub"], "user123");
        assert_eq!(json["role"], "user");
        assert!(json.get("exp").is_none());
    }
}
