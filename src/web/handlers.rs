use std::time::Duration;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::response::Html;
use serde::Serialize;

use super::state::WebState;
use crate::application::ports::{RelayApi, RelayApiError};
use crate::domain::SchematicImage;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MISSING_REPLY_TEXT: &str = "Нет ответа";

/// Everything the page template interpolates. One render covers both the
/// initial form and the post-analysis view.
#[derive(Serialize)]
struct PageContext {
    health_ok: bool,
    model: Option<String>,
    warning: Option<String>,
    error: Option<String>,
    reply: Option<String>,
    netlist: String,
    question: String,
    timeout: u64,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            health_ok: false,
            model: None,
            warning: None,
            error: None,
            reply: None,
            netlist: String::new(),
            question: String::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn index_handler<R>(State(state): State<WebState<R>>) -> Html<String>
where
    R: RelayApi + 'static,
{
    let mut page = PageContext::default();
    poll_health(&state, &mut page).await;
    render_page(&state, &page)
}

struct AnalyzeForm {
    netlist: String,
    question: String,
    timeout_secs: u64,
    image: Option<Vec<u8>>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<R>(
    State(state): State<WebState<R>>,
    multipart: Multipart,
) -> Html<String>
where
    R: RelayApi + 'static,
{
    let mut page = PageContext::default();
    poll_health(&state, &mut page).await;

    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read analyze form");
            page.error = Some(format!("Произошла ошибка: {}", e));
            return render_page(&state, &page);
        }
    };

    page.netlist = form.netlist.clone();
    page.question = form.question.clone();
    page.timeout = form.timeout_secs;

    if form.netlist.trim().is_empty() {
        page.warning = Some("Пожалуйста, введите netlist схемы".to_string());
        return render_page(&state, &page);
    }
    if form.question.trim().is_empty() {
        page.warning = Some("Пожалуйста, задайте вопрос о схеме".to_string());
        return render_page(&state, &page);
    }

    let prompt = format!(
        "Netlist схемы:\n{}\n\nВопрос: {}",
        form.netlist, form.question
    );
    let image = form.image.map(|bytes| SchematicImage::from_bytes(&bytes));

    match state
        .relay
        .ask(
            &prompt,
            image.as_ref().map(|i| i.as_base64()),
            Some(Duration::from_secs(form.timeout_secs)),
        )
        .await
    {
        Ok(reply) => {
            page.reply = Some(reply.reply.unwrap_or_else(|| MISSING_REPLY_TEXT.to_string()));
        }
        Err(RelayApiError::Upstream { status, body }) => {
            tracing::warn!(status, body = %body, "Relay rejected analysis request");
            page.error = Some(format!("Ошибка при анализе схемы: {}", body));
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis request failed");
            page.error = Some(format!("Произошла ошибка: {}", e));
        }
    }

    render_page(&state, &page)
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, MultipartError> {
    let mut form = AnalyzeForm {
        netlist: String::new(),
        question: String::new(),
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        image: None,
    };

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("netlist") => form.netlist = field.text().await?,
            Some("question") => form.question = field.text().await?,
            Some("timeout") => {
                form.timeout_secs = field
                    .text()
                    .await?
                    .trim()
                    .parse()
                    .unwrap_or(DEFAULT_TIMEOUT_SECS);
            }
            Some("image") => {
                let data = field.bytes().await?;
                // Browsers submit an empty part when no file was picked.
                if !data.is_empty() {
                    form.image = Some(data.to_vec());
                }
            }
            _ => {}
        }
    }

    form.timeout_secs = form.timeout_secs.clamp(1, 60);
    Ok(form)
}

async fn poll_health<R>(state: &WebState<R>, page: &mut PageContext)
where
    R: RelayApi,
{
    match state.relay.health().await {
        Ok(health) => {
            page.health_ok = true;
            page.model = Some(health.model);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Relay health check failed");
            page.health_ok = false;
        }
    }
}

fn render_page<R>(state: &WebState<R>, page: &PageContext) -> Html<String>
where
    R: RelayApi,
{
    let rendered = state
        .templates
        .get_template("page.html")
        .and_then(|t| t.render(page));
    match rendered {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!(error = %e, "Template render failed");
            Html("<!doctype html><p>Ошибка отображения страницы</p>".to_string())
        }
    }
}
