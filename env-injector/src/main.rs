use env_injector::{inject_placeholders, InjectError, InjectReport, InjectorConfig, PlaceholderSet};
use service_core::observability::init_tracing;
use std::process::ExitCode;

fn run() -> Result<InjectReport, InjectError> {
    let config = InjectorConfig::load()?;
    let set = PlaceholderSet::from_env(config.names.iter().cloned());

    inject_placeholders(&config.document_path, &set)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing("env-injector", "info");

    match run() {
        Ok(report) => {
            if !report.unset.is_empty() {
                tracing::warn!(
                    unset = ?report.unset,
                    "Environment variables not set, placeholders replaced with empty strings"
                );
            }
            tracing::info!(
                path = %report.path.display(),
                replaced = report.replaced,
                "Environment variables injected into {}",
                report.path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
