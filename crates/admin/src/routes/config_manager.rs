//! Configuration manager: backend key/value settings.
//!
//! `?add` opens an empty form and `?edit=KEY` opens the form on an existing
//! entry. The key is locked while editing since it identifies the entry.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use falcon_core::{ConfigEntry, EditableView, LoadTrigger, Screen, SubmitMode};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, TableCell, TableRow, config_table_config};
use crate::filters;
use crate::middleware::RequireSession;
use crate::resources::ConfigResource;
use crate::state::AppState;

use super::layout::{Shell, render};

const SAVED_NOTICE: &str = "Config saved";

/// The open add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFormView {
    pub heading: &'static str,
    pub mode: &'static str,
    pub key: String,
    pub value: String,
    pub key_locked: bool,
    pub error: Option<String>,
}

/// Config manager template.
#[derive(Template)]
#[template(path = "config_manager.html")]
struct ConfigManagerTemplate {
    shell: Shell,
    table: DataTableConfig,
    rows: Vec<TableRow>,
    show_table: bool,
    form: Option<ConfigFormView>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigParams {
    pub add: Option<String>,
    pub edit: Option<String>,
}

/// Submitted add/edit form.
#[derive(Debug, Deserialize)]
pub struct ConfigForm {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Build the config manager router.
pub fn router() -> Router<AppState> {
    Router::new().route("/configmanager", get(config_page).post(save_config))
}

fn edit_href(key: &str) -> String {
    format!(
        "{}?edit={}",
        Screen::ConfigManager.path(),
        urlencoding::encode(key)
    )
}

fn config_rows(entries: &[ConfigEntry]) -> Vec<TableRow> {
    entries
        .iter()
        .map(|entry| {
            TableRow::new(vec![
                TableCell::text(entry.key.as_str()),
                TableCell::link("Edit", edit_href(&entry.key)),
                TableCell::text(entry.value.as_str()),
            ])
        })
        .collect()
}

fn build_page(view: &EditableView<ConfigResource>, shell: Shell) -> ConfigManagerTemplate {
    let data = view.view().data();
    let form = view.form().map(|form| ConfigFormView {
        heading: match form.mode {
            SubmitMode::Create => "Add Config",
            SubmitMode::Update => "Edit Config",
        },
        mode: form.mode.as_form(),
        key: form.draft.key.clone(),
        value: form.draft.value.clone(),
        key_locked: form.mode == SubmitMode::Update,
        error: form.error.as_ref().map(ToString::to_string),
    });

    ConfigManagerTemplate {
        shell: shell.with_error(view.view().error()),
        table: config_table_config(),
        rows: data.map(|entries| config_rows(entries)).unwrap_or_default(),
        show_table: data.is_some(),
        form,
    }
}

/// GET /configmanager
#[instrument(skip(state, _gate))]
async fn config_page(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<ConfigParams>,
) -> Response {
    let mut view = EditableView::new(ConfigResource::new(state.api().clone()));
    view.load(LoadTrigger::Activation).await;

    if params.add.is_some() {
        view.open_create();
    } else if let Some(key) = params.edit {
        let entry = view
            .view()
            .data()
            .and_then(|entries| entries.iter().find(|e| e.key == key))
            .cloned();
        if let Some(entry) = entry {
            view.open_edit(entry);
        }
    }

    render(&build_page(&view, Shell::new(Screen::ConfigManager, true)))
}

/// POST /configmanager
#[instrument(skip(state, _gate, form), fields(mode = %form.mode, key = %form.key))]
async fn save_config(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Form(form): Form<ConfigForm>,
) -> Response {
    let mode = SubmitMode::from_form(&form.mode);
    let mut view = EditableView::new(ConfigResource::new(state.api().clone()));

    let mut shell = Shell::new(Screen::ConfigManager, true);
    if view
        .submit(mode, ConfigEntry::new(form.key, form.value))
        .await
        .is_ok()
    {
        shell = shell.with_notice(SAVED_NOTICE);
    }

    render(&build_page(&view, shell))
}
