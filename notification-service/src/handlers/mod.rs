//! HTTP handlers for notification-service.

pub mod email;
pub mod health;
pub mod metrics;

pub use email::{send_email, SendEmailResponse};
pub use health::health_check;
pub use metrics::metrics_endpoint;
