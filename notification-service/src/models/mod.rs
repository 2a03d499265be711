pub mod account_setup;

pub use account_setup::{AccountSetupEmail, AccountSetupRequest, CredentialLine, SUBJECT_PREFIX};
