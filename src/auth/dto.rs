use serde::Deserialize;

/// Request body for user registration. Absent fields deserialize as empty
/// and are rejected by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// True when any field is empty after trimming whitespace.
pub(crate) fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"ann@x.com"}"#).unwrap();
        assert_eq!(req.email, "ann@x.com");
        assert!(req.name.is_empty());
        assert!(any_blank(&[&req.name, &req.email, &req.password]));
    }

    #[test]
    fn whitespace_counts_as_blank() {
        assert!(any_blank(&["Ann", "  \t", "secret1"]));
        assert!(!any_blank(&["Ann", "ann@x.com", "secret1"]));
    }
}
