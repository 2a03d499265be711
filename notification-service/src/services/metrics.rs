//! Email outcome metrics for notification-service.

use metrics::counter;

/// Record the outcome of one account setup email.
pub fn record_email(provider: &'static str, status: &'static str) {
    counter!("account_emails_total", "provider" => provider, "status" => status).increment(1);
}
