pub mod metrics;
pub mod providers;

pub use metrics::record_email;
pub use providers::{
    EmailMessage, EmailProvider, MockEmailProvider, ProviderError, ProviderResponse, SmtpProvider,
};
