use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::models::{AccountSetupEmail, AccountSetupRequest};
use crate::services::{record_email, EmailMessage};
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

/// `POST /send-email`: render the account setup email and hand it to the
/// configured transport. Delivery is attempted exactly once.
#[tracing::instrument(skip(state, payload))]
pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<AccountSetupRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed send-email body");
        rejection
    })?;

    request.validate().map_err(|errors| {
        tracing::warn!(error = %errors, "Rejected invalid send-email request");
        errors
    })?;

    let email = AccountSetupEmail::new(&request, &state.config.support_email);
    let message = EmailMessage {
        to: request.to.clone(),
        subject: email.subject(),
        body_text: email.render_text(),
        body_html: email.render_html(),
    };

    let provider = state.email_provider.name();

    match state.email_provider.send(&message).await {
        Ok(response) => {
            record_email(provider, "sent");
            tracing::info!(
                to = %request.to,
                unique_id = %request.unique_id,
                message_id = %response.provider_id,
                "Account setup email sent"
            );

            Ok(Json(SendEmailResponse {
                success: true,
                message_id: response.provider_id,
            }))
        }
        Err(e) => {
            record_email(provider, "failed");
            tracing::error!(
                to = %request.to,
                unique_id = %request.unique_id,
                error = %e,
                "Failed to send account setup email"
            );

            Err(AppError::EmailError(e.to_string()))
        }
    }
}
