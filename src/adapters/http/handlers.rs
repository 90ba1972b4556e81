//! HTTP handlers for the issuance API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::application::class_manager::WalletClassManager;
use crate::application::handlers::{
    ApplePassOutcome, DeleteClassHandler, EnsureClassCommand, EnsureClassHandler,
    IssuePassCommand, IssuePassHandler, ListClassesHandler, RosterRow, UploadRosterCommand,
    UploadRosterHandler,
};
use crate::domain::errors::IssuanceError;

use super::dto::{
    ApplePassDto, EnsureClassRequest, EnsureClassResponse, ErrorResponse, IssuePassRequest,
    IssuePassResponse, UploadRosterRequest, UploadRosterResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiHandlers {
    issue_handler: Arc<IssuePassHandler>,
    upload_handler: Arc<UploadRosterHandler>,
    class_manager: Arc<WalletClassManager>,
    issuer_id: Arc<str>,
}

impl ApiHandlers {
    pub fn new(
        issue_handler: Arc<IssuePassHandler>,
        upload_handler: Arc<UploadRosterHandler>,
        class_manager: Arc<WalletClassManager>,
        issuer_id: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            issue_handler,
            upload_handler,
            class_manager,
            issuer_id: issuer_id.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/issue-pass - Verify a claim and issue passes
pub async fn issue_pass(
    State(handlers): State<ApiHandlers>,
    Json(req): Json<IssuePassRequest>,
) -> Response {
    let command = IssuePassCommand {
        first_name: req.first_name,
        last_name: req.last_name,
        identifier: req.card_number,
        club_id: req.club,
    };

    match handlers.issue_handler.handle(command).await {
        Ok(result) => {
            let apple_pass = match result.apple_pass {
                ApplePassOutcome::Generated(bytes) => ApplePassDto::Generated {
                    data: BASE64.encode(bytes),
                },
                ApplePassOutcome::Skipped(reason) => ApplePassDto::Skipped { reason },
                ApplePassOutcome::Failed(message) => ApplePassDto::Failed { message },
            };
            let response = IssuePassResponse {
                google_save_url: result.google_save_url,
                member_id: result.member_id,
                apple_pass,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /api/clubs/:club_id/roster - Replace a club's roster
pub async fn upload_roster(
    State(handlers): State<ApiHandlers>,
    Path(club_id): Path<String>,
    Json(req): Json<UploadRosterRequest>,
) -> Response {
    let command = UploadRosterCommand {
        club_id,
        rows: req
            .rows
            .into_iter()
            .map(|row| RosterRow {
                name: row.name,
                identifier: row.card_number,
            })
            .collect(),
    };

    match handlers.upload_handler.handle(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(UploadRosterResponse {
                count: result.count,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/admin/classes - Create or update a wallet class
pub async fn ensure_class(
    State(handlers): State<ApiHandlers>,
    Json(req): Json<EnsureClassRequest>,
) -> Response {
    let handler = EnsureClassHandler::new(&handlers.class_manager);
    match handler
        .handle(EnsureClassCommand {
            class_id: req.id,
            template: req.template,
        })
        .await
    {
        Ok(class) => (
            StatusCode::OK,
            Json(EnsureClassResponse {
                id: class.id,
                class: class.body,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/admin/classes - List classes for the configured issuer
pub async fn list_classes(State(handlers): State<ApiHandlers>) -> Response {
    let handler = ListClassesHandler::new(&handlers.class_manager, &handlers.issuer_id);
    match handler.handle().await {
        Ok(classes) => (StatusCode::OK, Json(classes)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/admin/classes/:class_id - Always rejected by the platform
pub async fn delete_class(
    State(handlers): State<ApiHandlers>,
    Path(class_id): Path<String>,
) -> Response {
    let handler = DeleteClassHandler::new(&handlers.class_manager);
    match handler.handle(&class_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

fn error_response(error: IssuanceError) -> Response {
    let status = match &error {
        IssuanceError::Validation { .. } => StatusCode::BAD_REQUEST,
        IssuanceError::Verification => StatusCode::FORBIDDEN,
        IssuanceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        IssuanceError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        IssuanceError::Unsupported(_) => StatusCode::METHOD_NOT_ALLOWED,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "request failed");
    }

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
