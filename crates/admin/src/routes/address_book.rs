//! Address book: customer addresses keyed by mobile number.
//!
//! Same flow as the config manager. The mobile number is locked while
//! editing since it identifies the record.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use falcon_core::{Address, EditableView, LoadTrigger, Screen, SubmitMode};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, TableCell, TableRow, address_table_config};
use crate::filters;
use crate::middleware::RequireSession;
use crate::resources::AddressResource;
use crate::state::AppState;

use super::layout::{Shell, render};

const SAVED_NOTICE: &str = "Address saved";

/// The open add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFormView {
    pub heading: &'static str,
    pub mode: &'static str,
    pub mobile_number: String,
    pub name: String,
    pub address: String,
    pub mobile_locked: bool,
    pub error: Option<String>,
}

/// Address book template.
#[derive(Template)]
#[template(path = "address_book.html")]
struct AddressBookTemplate {
    shell: Shell,
    table: DataTableConfig,
    rows: Vec<TableRow>,
    show_table: bool,
    form: Option<AddressFormView>,
}

#[derive(Debug, Deserialize)]
pub struct AddressParams {
    pub add: Option<String>,
    pub edit: Option<String>,
}

/// Submitted add/edit form.
#[derive(Debug, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Build the address book router.
pub fn router() -> Router<AppState> {
    Router::new().route("/addressbook", get(address_page).post(save_address))
}

fn address_rows(addresses: &[Address]) -> Vec<TableRow> {
    addresses
        .iter()
        .map(|address| {
            TableRow::new(vec![
                TableCell::text(address.mobile_number.as_str()),
                TableCell::text(address.name.as_str()),
                TableCell::text(address.address.as_str()),
                TableCell::link(
                    "Edit",
                    format!(
                        "{}?edit={}",
                        Screen::AddressBook.path(),
                        urlencoding::encode(&address.mobile_number)
                    ),
                ),
            ])
        })
        .collect()
}

fn build_page(view: &EditableView<AddressResource>, shell: Shell) -> AddressBookTemplate {
    let data = view.view().data();
    let form = view.form().map(|form| AddressFormView {
        heading: match form.mode {
            SubmitMode::Create => "Add Address",
            SubmitMode::Update => "Edit Address",
        },
        mode: form.mode.as_form(),
        mobile_number: form.draft.mobile_number.clone(),
        name: form.draft.name.clone(),
        address: form.draft.address.clone(),
        mobile_locked: form.mode == SubmitMode::Update,
        error: form.error.as_ref().map(ToString::to_string),
    });

    AddressBookTemplate {
        shell: shell.with_error(view.view().error()),
        table: address_table_config(),
        rows: data.map(|addresses| address_rows(addresses)).unwrap_or_default(),
        show_table: data.is_some(),
        form,
    }
}

/// GET /addressbook
#[instrument(skip(state, _gate))]
async fn address_page(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Query(params): Query<AddressParams>,
) -> Response {
    let mut view = EditableView::new(AddressResource::new(state.api().clone()));
    view.load(LoadTrigger::Activation).await;

    if params.add.is_some() {
        view.open_create();
    } else if let Some(mobile) = params.edit {
        let record = view
            .view()
            .data()
            .and_then(|addresses| addresses.iter().find(|a| a.mobile_number == mobile))
            .cloned();
        if let Some(record) = record {
            view.open_edit(record);
        }
    }

    render(&build_page(&view, Shell::new(Screen::AddressBook, true)))
}

/// POST /addressbook
#[instrument(skip(state, _gate, form), fields(mode = %form.mode))]
async fn save_address(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    Form(form): Form<AddressForm>,
) -> Response {
    let mode = SubmitMode::from_form(&form.mode);
    let mut view = EditableView::new(AddressResource::new(state.api().clone()));
    let record = Address::new(form.mobile_number.trim(), form.name, form.address);

    let mut shell = Shell::new(Screen::AddressBook, true);
    if view.submit(mode, record).await.is_ok() {
        shell = shell.with_notice(SAVED_NOTICE);
    }

    render(&build_page(&view, shell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_backend_order() {
        let rows = address_rows(&[
            Address::new("55501234", "Ali", "Doha"),
            Address::new("55509876", "", "Al Wakrah"),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells[0].text, "55509876");
        assert_eq!(rows[1].cells[3].link.as_deref(), Some("/addressbook?edit=55509876"));
    }
}
