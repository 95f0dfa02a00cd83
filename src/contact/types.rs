/// Contact form input and validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("static email pattern"));

/// Minimum digit count for a WhatsApp number (area code + subscriber)
pub const MIN_PHONE_DIGITS: usize = 10;

/// Channel the visitor wants to be answered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Whatsapp,
    Discord,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Whatsapp => "whatsapp",
            ContactMethod::Discord => "discord",
        }
    }
}

/// Raw request body; every field is checked by hand so wrong JSON types
/// surface as field messages instead of a decoding failure
#[derive(Debug, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub contact_method: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub discord: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub page_url: Option<Value>,
}

/// Request metadata stored alongside a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Validated row ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub contact_method: ContactMethod,
    pub phone: Option<String>,
    pub discord: Option<String>,
    pub message: String,
    pub page_url: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn non_empty(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl ContactSubmission {
    /// Check fields in form order and build the row
    ///
    /// Exactly one of phone/discord is kept, matching the chosen method.
    pub fn validate(self, meta: ClientMeta) -> Result<NewContactMessage, ValidationError> {
        let name = non_empty(&self.name).ok_or(ValidationError::new("name", "Please enter your name."))?;

        let email = non_empty(&self.email)
            .ok_or(ValidationError::new("email", "Please enter your email."))?
            .trim()
            .to_lowercase();
        if !EMAIL_SHAPE.is_match(&email) {
            return Err(ValidationError::new("email", "Invalid email address."));
        }

        let message =
            non_empty(&self.message).ok_or(ValidationError::new("message", "Please write a message."))?;

        let contact_method = match self.contact_method.as_ref().and_then(Value::as_str) {
            Some("whatsapp") => ContactMethod::Whatsapp,
            Some("discord") => ContactMethod::Discord,
            _ => return Err(ValidationError::new("contact_method", "Choose WhatsApp or Discord.")),
        };

        let (phone, discord) = match contact_method {
            ContactMethod::Whatsapp => {
                let raw = non_empty(&self.phone)
                    .ok_or(ValidationError::new("phone", "Please enter your WhatsApp number."))?;
                let digits = digits_only(raw);
                if digits.len() < MIN_PHONE_DIGITS {
                    return Err(ValidationError::new("phone", "WhatsApp number is incomplete."));
                }
                (Some(digits), None)
            }
            ContactMethod::Discord => {
                let handle = non_empty(&self.discord)
                    .ok_or(ValidationError::new("discord", "Please enter your Discord username or ID."))?;
                (None, Some(handle.trim().to_string()))
            }
        };

        Ok(NewContactMessage {
            name: name.trim().to_string(),
            email,
            contact_method,
            phone,
            discord,
            message: message.trim().to_string(),
            page_url: non_empty(&self.page_url).map(|u| u.trim().to_string()),
            user_agent: meta.user_agent,
            ip: meta.ip,
        })
    }
}

/// First `X-Forwarded-For` hop, else the peer address
pub fn client_ip(forwarded_for: Option<&str>, peer: Option<std::net::SocketAddr>) -> Option<String> {
    forwarded_for
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(body: Value) -> ContactSubmission {
        serde_json::from_value(body).expect("submission")
    }

    fn base() -> Value {
        json!({
            "name": "  Ana  ",
            "email": " Ana@Example.COM ",
            "message": " Hello there ",
            "contact_method": "whatsapp",
            "phone": "(11) 99999-8888",
        })
    }

    #[test]
    fn whatsapp_keeps_digits_only() {
        let row = submission(base()).validate(ClientMeta::default()).expect("valid");
        assert_eq!(row.phone.as_deref(), Some("11999998888"));
        assert_eq!(row.discord, None);
        assert_eq!(row.email, "ana@example.com");
        assert_eq!(row.name, "Ana");
        assert_eq!(row.message, "Hello there");
        assert_eq!(row.contact_method, ContactMethod::Whatsapp);
    }

    #[test]
    fn whatsapp_requires_phone() {
        let mut body = base();
        body.as_object_mut().expect("object").remove("phone");
        let err = submission(body).validate(ClientMeta::default()).unwrap_err();
        assert_eq!(err.field, "phone");
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut body = base();
        body["phone"] = json!("99-888");
        let err = submission(body).validate(ClientMeta::default()).unwrap_err();
        assert_eq!(err.message, "WhatsApp number is incomplete.");
    }

    #[test]
    fn discord_drops_phone_and_trims_handle() {
        let mut body = base();
        body["contact_method"] = json!("discord");
        body["discord"] = json!("  ana#1234 ");
        let row = submission(body).validate(ClientMeta::default()).expect("valid");
        assert_eq!(row.discord.as_deref(), Some("ana#1234"));
        assert_eq!(row.phone, None);
    }

    #[test]
    fn unknown_method_and_bad_email_are_rejected() {
        let mut body = base();
        body["contact_method"] = json!("email");
        assert_eq!(
            submission(body).validate(ClientMeta::default()).unwrap_err().field,
            "contact_method"
        );

        let mut body = base();
        body["email"] = json!("not-an-email");
        assert_eq!(
            submission(body).validate(ClientMeta::default()).unwrap_err().message,
            "Invalid email address."
        );
    }

    #[test]
    fn non_string_fields_count_as_missing() {
        let mut body = base();
        body["name"] = json!(42);
        assert_eq!(submission(body).validate(ClientMeta::default()).unwrap_err().field, "name");
    }

    #[test]
    fn metadata_and_page_url_are_carried() {
        let mut body = base();
        body["page_url"] = json!(" https://example.com/contato ");
        let meta = ClientMeta {
            user_agent: Some("curl/8".to_string()),
            ip: Some("203.0.113.7".to_string()),
        };
        let row = submission(body).validate(meta.clone()).expect("valid");
        assert_eq!(row.page_url.as_deref(), Some("https://example.com/contato"));
        assert_eq!(row.user_agent, meta.user_agent);
        assert_eq!(row.ip, meta.ip);
    }

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let peer: std::net::SocketAddr = "10.0.0.1:5555".parse().expect("addr");
        assert_eq!(
            client_ip(Some(" 203.0.113.7 , 10.0.0.2"), Some(peer)).as_deref(),
            Some("203.0.113.7")
        );
        assert_eq!(client_ip(Some("  "), Some(peer)).as_deref(), Some("10.0.0.1"));
        assert_eq!(client_ip(None, None), None);
    }
}
