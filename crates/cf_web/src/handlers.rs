use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use cf_core::{Error, Notice, Session};
use cf_render::{Download, DownloadKind};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use crate::cookie::SessionId;
use crate::multipart::read_article_form;
use crate::page;
use crate::AppState;

fn back_home(session: SessionId) -> Response {
    session.attach(Redirect::to("/"))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Response {
    let render = |s: &mut Session| {
        let notice = s.take_notice();
        page::render(&state.connection_label, &state.themes, s, notice.as_ref())
    };
    let html = match state.with_existing_session(session.id, render).await {
        Some(html) => html,
        None => render(&mut Session::default()),
    };
    session.attach(Html(html))
}

pub async fn add_article(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    multipart: Multipart,
) -> Response {
    match read_article_form(multipart).await {
        Ok(form) => {
            // Image re-encoding is CPU bound; keep it off the runtime and
            // outside the session lock.
            let article = tokio::task::spawn_blocking(move || form.into_article())
                .await
                .unwrap_or_else(|e| Err(Error::Io(e.into())));
            // Validation failures are reported through the session notice.
            let _ = state
                .with_session(session.id, |s| s.record_article(article))
                .await;
        }
        Err(e) => {
            warn!("Rejected article form: {}", e);
            state
                .with_session(session.id, |s| s.notify(Notice::error(e.to_string())))
                .await;
        }
    }
    back_home(session)
}

pub async fn remove_article(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Path(index): Path<usize>,
) -> Response {
    state
        .with_session(session.id, |s| {
            if let Err(e) = s.remove_article(index) {
                s.notify(Notice::error(e.to_string()));
            }
        })
        .await;
    back_home(session)
}

pub async fn clear_queue(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Response {
    state.with_session(session.id, Session::clear_queue).await;
    back_home(session)
}

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub css: String,
}

pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Form(settings): Form<SettingsForm>,
) -> Response {
    state
        .with_session(session.id, |s| s.set_custom_css(&settings.css))
        .await;
    back_home(session)
}

/// Sends the queue to the workflow. The session lock is released while the
/// request is in flight; the submission runs in its own task so the session
/// is completed even if the browser goes away.
pub async fn process(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Response {
    let Some(payload) = state.with_session(session.id, Session::prepare_submission).await else {
        return back_home(session);
    };

    info!("🚀 Processing {} article(s) via {}", payload.articles.len(), state.webhook.name());
    let task_state = state.clone();
    let id = session.id;
    let task = tokio::spawn(async move {
        let outcome = task_state.webhook.submit(&payload).await;
        task_state
            .with_session(id, |s| s.complete_submission(outcome))
            .await;
    });
    if let Err(e) = task.await {
        warn!("Submission task failed: {}", e);
        state
            .with_session(id, |s| s.complete_submission(Err(Error::Io(e.into()))))
            .await;
    }
    back_home(session)
}

pub async fn new_batch(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Response {
    state.with_session(session.id, Session::new_batch).await;
    back_home(session)
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Path((article, kind)): Path<(usize, String)>,
) -> Response {
    let download = state
        .with_existing_session(session.id, |s| {
            let result = s.result.as_ref()?;
            let themes = state.themes.with_custom(s.custom_css.as_deref());
            let kind = DownloadKind::parse(&kind, &themes)?;
            Download::from_result(result, article, &kind, &themes).ok()
        })
        .await
        .flatten();

    match download {
        Some(download) => session.attach((
            [
                (
                    header::CONTENT_TYPE,
                    format!("{}; charset=utf-8", download.mime),
                ),
                (header::CONTENT_DISPOSITION, download.content_disposition()),
            ],
            download.body,
        )),
        None => session.attach((StatusCode::NOT_FOUND, "Download not found")),
    }
}

pub async fn session_snapshot(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> Response {
    let snapshot = state
        .with_existing_session(session.id, |s| s.clone())
        .await
        .unwrap_or_default();
    session.attach(Json(snapshot))
}
