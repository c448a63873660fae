//! Broadcast messaging route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use couplet_core::{MemberId, MessageTarget};

use crate::db::MessageRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, ensure_privilege};
use crate::models::GlobalMessage;
use crate::state::AppState;

use super::dashboard::AdminView;

/// Privilege guarding the messaging page.
const SEND_MESSAGES: &str = "send_messages";

/// Sent message view for templates.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub subject: String,
    pub target: String,
    pub sent_at: String,
}

impl From<&GlobalMessage> for MessageView {
    fn from(message: &GlobalMessage) -> Self {
        let target = match message.target_type {
            MessageTarget::All => "all members".to_owned(),
            MessageTarget::User | MessageTarget::Group => {
                let n = message.target_ids.as_ref().map_or(0, Vec::len);
                format!("{n} member(s)")
            }
        };
        Self {
            subject: message.subject.clone(),
            target,
            sent_at: message.sent_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Messaging page template.
#[derive(Template)]
#[template(path = "messages/index.html")]
struct MessagesIndexTemplate {
    admin: AdminView,
    current_path: String,
    sent: Vec<MessageView>,
    error: Option<String>,
    notice: Option<String>,
}

/// Build the messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(index))
        .route("/messages/send", post(send))
}

/// Query parameters carrying redirect feedback.
#[derive(Debug, Default, Deserialize)]
struct MessagesQuery {
    error: Option<String>,
    notice: Option<String>,
}

/// Messaging page: compose form plus sent history.
///
/// GET /messages
#[instrument(skip(admin, state))]
async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessagesQuery>,
) -> Result<Html<String>, AppError> {
    ensure_privilege(&admin, SEND_MESSAGES)?;

    let sent = MessageRepository::new(state.pool())
        .list(50)
        .await?
        .iter()
        .map(MessageView::from)
        .collect();

    let template = MessagesIndexTemplate {
        admin: AdminView::from(&admin),
        current_path: "/messages".to_string(),
        sent,
        error: query.error,
        notice: query.notice,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Compose form fields.
#[derive(Debug, Deserialize)]
struct SendForm {
    subject: String,
    content: String,
    target_type: String,
    /// Whitespace- or comma-separated member IDs (ignored for `all`).
    #[serde(default)]
    target_ids: String,
}

fn parse_target_ids(raw: &str) -> Result<Vec<MemberId>, AppError> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| AppError::BadRequest(format!("invalid member id: {s}")))
        })
        .collect()
}

/// Send a broadcast message.
///
/// POST /messages/send
#[instrument(skip(admin, state, form))]
async fn send(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    axum::Form(form): axum::Form<SendForm>,
) -> Result<Response, AppError> {
    ensure_privilege(&admin, SEND_MESSAGES)?;

    let subject = form.subject.trim();
    let content = form.content.trim();
    if subject.is_empty() || content.is_empty() {
        return Ok(Redirect::to("/messages?error=Subject+and+content+are+required")
            .into_response());
    }

    let target: MessageTarget = form
        .target_type
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let target_ids = match target {
        MessageTarget::All => vec![],
        MessageTarget::User | MessageTarget::Group => {
            let ids = parse_target_ids(&form.target_ids)?;
            if ids.is_empty() {
                return Ok(Redirect::to("/messages?error=No+recipients+given")
                    .into_response());
            }
            ids
        }
    };

    let repo = MessageRepository::new(state.pool());
    let message = repo
        .send(subject, content, target, &target_ids, admin.id)
        .await?;

    let recipients = repo.recipient_count(message.id).await.unwrap_or(0);
    tracing::info!(
        message_id = %message.id,
        admin_id = %admin.id,
        recipients,
        "broadcast message sent"
    );

    Ok(Redirect::to("/messages?notice=Message+sent").into_response())
}
