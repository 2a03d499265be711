use serde::{Deserialize, Deserializer};
use std::fmt;
use validator::Validate;

pub const SYSTEM_NAME: &str = "Smart Complaint System";
pub const SUBJECT_PREFIX: &str = "Smart Complaint System - Account Setup";
const COPYRIGHT: &str = "© 2025 Smart Complaint System. All rights reserved.";

/// Body of `POST /send-email`.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountSetupRequest {
    #[validate(email(message = "Invalid recipient email address"))]
    pub to: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub role: String,
    #[serde(default, deserialize_with = "text")]
    pub username: String,
    #[serde(default, deserialize_with = "text")]
    pub password: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub batch: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub unique_id: String,
}

impl fmt::Debug for AccountSetupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSetupRequest")
            .field("to", &self.to)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("student_id", &self.student_id)
            .field("batch", &self.batch)
            .field("unique_id", &self.unique_id)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Accepts a string, a number or null. Null reads as empty text.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(TextOrNumber::into_string).unwrap_or_default())
}

/// Accepts a string, a number or null. Empty strings count as absent.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value
        .map(TextOrNumber::into_string)
        .filter(|s| !s.is_empty()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialLine<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

/// Structured account setup email. The HTML and plain-text bodies are both
/// rendered from [`AccountSetupEmail::credential_lines`].
#[derive(Debug, Clone, Copy)]
pub struct AccountSetupEmail<'a> {
    request: &'a AccountSetupRequest,
    contact_email: &'a str,
}

impl<'a> AccountSetupEmail<'a> {
    pub fn new(request: &'a AccountSetupRequest, contact_email: &'a str) -> Self {
        Self {
            request,
            contact_email,
        }
    }

    pub fn subject(&self) -> String {
        format!("{} ({})", SUBJECT_PREFIX, self.request.unique_id)
    }

    pub fn credential_lines(&self) -> Vec<CredentialLine<'a>> {
        let request = self.request;
        let mut lines = vec![
            CredentialLine {
                label: "Email",
                value: &request.username,
            },
            CredentialLine {
                label: "Password",
                value: &request.password,
            },
        ];

        if let Some(batch) = request.batch.as_deref() {
            lines.push(CredentialLine {
                label: "Batch",
                value: batch,
            });
        }
        if let Some(student_id) = request.student_id.as_deref() {
            lines.push(CredentialLine {
                label: "Student ID",
                value: student_id,
            });
        }

        lines
    }

    pub fn render_html(&self) -> String {
        let credentials = self
            .credential_lines()
            .iter()
            .map(|line| {
                format!(
                    "<p><strong>{}:</strong> {}</p>",
                    line.label,
                    escape_html(line.value)
                )
            })
            .collect::<Vec<_>>()
            .join("\n                    ");

        format!(
            r###"<!DOCTYPE html>
<html>
<head>
    <title>{subject_prefix}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <div style="text-align: center; border-bottom: 2px solid #0054a6; padding-bottom: 10px;">
            <h1 style="color: #0054a6; margin: 0;">{system}</h1>
        </div>

        <div style="padding: 20px 0;">
            <p>Dear {name},</p>

            <p>Your account for {system} has been set up as a {role}.</p>

            <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0;">
                <h3 style="margin-top: 0;">Login Credentials:</h3>
                    {credentials}
            </div>

            <p>Please log in to update your password and access the system.</p>

            <p>If you have any questions, please contact us at {contact}</p>

            <p>Best regards,<br>{system} Team</p>
        </div>

        <div style="text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666;">
            <p>{copyright}</p>
        </div>
    </div>
</body>
</html>
"###,
            subject_prefix = SUBJECT_PREFIX,
            system = SYSTEM_NAME,
            name = escape_html(&self.request.name),
            role = escape_html(&self.request.role),
            credentials = credentials,
            contact = escape_html(self.contact_email),
            copyright = COPYRIGHT,
        )
    }

    pub fn render_text(&self) -> String {
        let credentials = self
            .credential_lines()
            .iter()
            .map(|line| format!("{}: {}", line.label, line.value))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Hello {name},\n\n\
             Your account for {system} has been set up as a {role}.\n\n\
             Login Credentials:\n\
             {credentials}\n\n\
             Please log in to update your password and access the system.\n\
             Contact us at {contact} for assistance.\n\n\
             Best regards,\n\
             {system} Team\n\n\
             {copyright}\n",
            name = self.request.name,
            system = SYSTEM_NAME,
            role = self.request.role,
            credentials = credentials,
            contact = self.contact_email,
            copyright = COPYRIGHT,
        )
    }
}

/// Minimal HTML escaping for values interpolated into the HTML body.
///
/// The template is a single `format!` literal with no loops or partials, so
/// no template engine is pulled in; only text content and double-quoted
/// attribute values need escaping, and these five characters cover both.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
