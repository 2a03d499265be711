#![allow(dead_code)]

use notification_service::config::{NotificationConfig, SmtpConfig};
use notification_service::services::{EmailProvider, MockEmailProvider};
use notification_service::startup::{AppState, Application};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const SUPPORT_EMAIL: &str = "support@example.org";

pub fn test_config() -> NotificationConfig {
    NotificationConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        smtp: SmtpConfig {
            host: "smtp.test.local".to_string(),
            port: 587,
            user: "test".to_string(),
            password: "test".to_string(),
            from_email: "sender@example.org".to_string(),
            from_name: "Test Service".to_string(),
            enabled: false, // Use mock
        },
        support_email: SUPPORT_EMAIL.to_string(),
    }
}

pub fn test_state(provider: Arc<MockEmailProvider>) -> AppState {
    AppState {
        config: test_config(),
        email_provider: provider,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub provider: Arc<MockEmailProvider>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockEmailProvider::recording()).await
    }

    pub async fn spawn_with(provider: MockEmailProvider) -> Self {
        let provider = Arc::new(provider);
        let email_provider: Arc<dyn EmailProvider> = provider.clone();

        let app = Application::build_with_provider(test_config(), email_provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            provider,
        }
    }

    pub async fn post_send_email(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/send-email", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn full_payload() -> serde_json::Value {
    serde_json::json!({
        "to": "new.student@example.com",
        "name": "Ayesha Khan",
        "role": "student",
        "username": "new.student@example.com",
        "password": "Temp#1234",
        "studentId": "STU-2024-001",
        "batch": "2024-A",
        "uniqueId": "REQ-7781"
    })
}
