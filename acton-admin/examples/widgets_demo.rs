//! Serve an admin change form built from widgets
//!
//! ```sh
//! cargo run -p acton-admin --example widgets_demo
//! ```
//!
//! Then open <http://127.0.0.1:3000/>. Set `ACTON_ADMIN_STATIC_FILES__USE_CDN=true`
//! to see CDN asset URLs.

use std::sync::Arc;

use acton_admin::observability;
use acton_admin::prelude::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use chrono::Local;

struct Field {
    label: &'static str,
    name: &'static str,
    widget: Box<dyn Widget>,
    value: WidgetValue,
}

fn change_form() -> Vec<Field> {
    vec![
        Field {
            label: "Title",
            name: "title",
            widget: Box::new(AdminTextInputWidget::new(None)),
            value: "Release notes".into(),
        },
        Field {
            label: "Published",
            name: "published",
            widget: Box::new(AdminSplitDateTime::new(None)),
            value: Local::now().naive_local().into(),
        },
        Field {
            label: "Status",
            name: "status",
            widget: Box::new(
                AdminRadioSelect::new(Some(Attrs::new().with("inline", true)))
                    .with_choices([("draft", "Draft"), ("live", "Live")]),
            ),
            value: "draft".into(),
        },
        Field {
            label: "Tags",
            name: "tags",
            widget: Box::new(AdminCheckboxSelect::new(None).with_choices([
                ("rust", "Rust"),
                ("htmx", "HTMX"),
            ])),
            value: WidgetValue::List(vec!["rust".into()]),
        },
        Field {
            label: "Attachment",
            name: "attachment",
            widget: Box::new(AdminFileWidget::new(None)),
            value: FileRef::new("notes.pdf", "/media/notes.pdf").into(),
        },
        Field {
            label: "Body",
            name: "body",
            widget: Box::new(AdminTextareaWidget::new(None)),
            value: WidgetValue::Empty,
        },
    ]
}

fn render_form(env: &WidgetEnv) -> Result<SafeHtml, WidgetError> {
    let fields = change_form();
    let media = env.media_for(fields.iter().map(|f| f.widget.as_ref()))?;

    let mut html = media.render();
    html.push(&SafeHtml::new("<form method=\"post\">\n"));
    for field in &fields {
        let id = format!("id_{}", field.name);
        let attrs = Attrs::new().with("id", id.as_str());
        let widget = env.render(field.widget.as_ref(), field.name, &field.value, Some(&attrs))?;
        html.push(&SafeHtml::new(format!(
            "<div class=\"form-group\"><label for=\"{}\">{}</label>{}</div>\n",
            escape(&field.widget.id_for_label(&id)),
            escape(field.label),
            widget
        )));
    }
    html.push(&SafeHtml::new("</form>\n"));
    Ok(html)
}

async fn index(State(env): State<Arc<WidgetEnv>>) -> Result<SafeHtml, StatusCode> {
    render_form(&env).map_err(|e| {
        tracing::error!(error = %e, "failed to render change form");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init()?;

    let config = WidgetConfig::load_for_service("widgets-demo")?;
    let env = Arc::new(WidgetEnv::new(config)?);

    let app = Router::new().route("/", get(index)).with_state(env);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;

    Ok(())
}
