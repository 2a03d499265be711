use service_core::config::{
    self as core_config, Lookup, get_env, get_flag, process_env, require_env,
};
use service_core::error::AppError;

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub common: core_config::Config,
    pub smtp: SmtpConfig,
    /// Contact address printed in the account setup email.
    pub support_email: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub enabled: bool,
}

impl NotificationConfig {
    /// Load configuration, failing fast when SMTP credentials are missing.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, &process_env)
    }

    pub fn from_lookup(common: core_config::Config, lookup: Lookup) -> Result<Self, AppError> {
        let smtp = SmtpConfig::from_lookup(lookup)?;
        let support_email = get_env(lookup, "SUPPORT_EMAIL", Some(smtp.from_email.as_str()))?;

        Ok(NotificationConfig {
            common,
            smtp,
            support_email,
        })
    }
}

impl SmtpConfig {
    pub fn from_lookup(lookup: Lookup) -> Result<Self, AppError> {
        let enabled = get_flag(lookup, "SMTP_ENABLED", true)?;

        // Credentials are only optional when the mock transport is selected.
        let (user, password, from_email) = if enabled {
            (
                require_env(lookup, "SMTP_USER")?,
                require_env(lookup, "SMTP_PASSWORD")?,
                require_env(lookup, "SMTP_FROM_EMAIL")?,
            )
        } else {
            (
                get_env(lookup, "SMTP_USER", Some(""))?,
                get_env(lookup, "SMTP_PASSWORD", Some(""))?,
                get_env(lookup, "SMTP_FROM_EMAIL", Some("noreply@example.com"))?,
            )
        };

        Ok(SmtpConfig {
            host: get_env(lookup, "SMTP_HOST", Some("smtp.gmail.com"))?,
            port: parse_port(&get_env(lookup, "SMTP_PORT", Some("587"))?)?,
            user,
            password,
            from_email,
            from_name: get_env(lookup, "SMTP_FROM_NAME", Some("Smart Complaint System"))?,
            enabled,
        })
    }
}

fn parse_port(value: &str) -> Result<u16, AppError> {
    value.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("SMTP_PORT '{}' is invalid: {}", value, e))
    })
}
