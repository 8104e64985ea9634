//! Spreadsheet upload and invoice commands.

use std::io::Write;
use std::path::Path;

use falcon_admin::resources::InvoiceSearchResource;
use falcon_core::{
    InvoiceLineItem, InvoiceRequest, LoadTrigger, RemoteView, RequestError, UploadKind,
    validate_search_query,
};

use super::{CommandError, Context, write_table};

const PDF_FAILURE_MESSAGE: &str = "Failed to generate the PDF.";

/// `upload bookings|cancellations FILE`
///
/// # Errors
///
/// Returns error if not logged in, the file name breaks the naming rules,
/// the file cannot be read, or the upload fails.
pub async fn upload<W: Write>(
    ctx: &Context,
    out: &mut W,
    kind: UploadKind,
    path: &Path,
) -> Result<(), CommandError> {
    ctx.require_session()?;

    let file_name = path.file_name().and_then(|name| name.to_str());
    kind.validate_file_name(file_name)?;
    let file_name = file_name.unwrap_or_default();

    let contents = tokio::fs::read(path).await?;
    if let Err(e) = ctx
        .api
        .upload_spreadsheet(kind, file_name, contents)
        .await
    {
        tracing::warn!(%kind, error = %e, "Spreadsheet upload failed");
        return Err(RequestError::new(kind.failure_message()).into());
    }

    writeln!(out, "{}", kind.success_message())?;
    Ok(())
}

async fn search(ctx: &Context, query: &str) -> Result<Vec<InvoiceLineItem>, CommandError> {
    validate_search_query(query)?;
    let mut view = RemoteView::new(InvoiceSearchResource::new(
        ctx.api.clone(),
        query.trim().to_owned(),
    ));
    view.load(LoadTrigger::UserAction).await;
    if let Some(error) = view.error() {
        return Err(error.clone().into());
    }
    Ok(view.into_data().unwrap_or_default())
}

fn write_items<W: Write>(out: &mut W, items: &[InvoiceLineItem]) -> std::io::Result<()> {
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.id.clone(),
                item.slotdate.clone(),
                item.slottime.clone(),
                item.slothours.to_string(),
                item.slotamount.fixed2(),
                item.bookingcode.clone(),
            ]
        })
        .collect();
    write_table(
        out,
        &["ID", "Date", "Time", "Hours", "Amount", "Booking Code"],
        &rows,
    )
}

/// `invoice search MOBILE`
///
/// # Errors
///
/// Returns error if not logged in, the query is blank, or the search fails.
pub async fn search_invoices<W: Write>(
    ctx: &Context,
    out: &mut W,
    query: &str,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let items = search(ctx, query).await?;
    write_items(out, &items)?;
    Ok(())
}

/// `invoice pdf MOBILE --select ID... --output FILE`
///
/// Searches again so the booking codes come from the backend, then writes
/// the PDF for the selected ids.
///
/// # Errors
///
/// Returns error if not logged in, nothing listed is selected, or a request
/// fails.
pub async fn generate_pdf<W: Write>(
    ctx: &Context,
    out: &mut W,
    query: &str,
    selected: &[String],
    output: &Path,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let items = search(ctx, query).await?;
    let request = InvoiceRequest::from_selection(query.trim(), &items, selected)?;

    let bytes = match ctx.api.generate_invoice_pdf(&request).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Invoice generation failed");
            return Err(RequestError::new(PDF_FAILURE_MESSAGE).into());
        }
    };

    tokio::fs::write(output, &bytes).await?;
    writeln!(
        out,
        "Wrote {} ({} bytes) for {}",
        output.display(),
        bytes.len(),
        request.records
    )?;
    Ok(())
}
