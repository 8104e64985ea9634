//! Config and address book commands.
//!
//! Writes go through the same [`EditableView`] as the admin panel: input is
//! validated before any request, and a successful write is followed by one
//! refresh whose result is printed.

use std::io::Write;

use falcon_admin::resources::{AddressResource, ConfigResource};
use falcon_core::{Address, ConfigEntry, EditableView, LoadTrigger, RemoteView, SubmitMode};

use super::{CommandError, Context, write_table};

fn config_rows(entries: &[ConfigEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| vec![e.key.clone(), e.value.clone()])
        .collect()
}

fn address_rows(addresses: &[Address]) -> Vec<Vec<String>> {
    addresses
        .iter()
        .map(|a| vec![a.mobile_number.clone(), a.name.clone(), a.address.clone()])
        .collect()
}

fn write_config<W: Write>(out: &mut W, entries: &[ConfigEntry]) -> std::io::Result<()> {
    write_table(out, &["Key", "Value"], &config_rows(entries))
}

fn write_addresses<W: Write>(out: &mut W, addresses: &[Address]) -> std::io::Result<()> {
    write_table(out, &["Mobile Number", "Name", "Address"], &address_rows(addresses))
}

/// `config list`
///
/// # Errors
///
/// Returns error if not logged in or the backend read fails.
pub async fn list_config<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CommandError> {
    ctx.require_session()?;
    let mut view = RemoteView::new(ConfigResource::new(ctx.api.clone()));
    view.load(LoadTrigger::Activation).await;
    if let Some(error) = view.error() {
        return Err(error.clone().into());
    }
    write_config(out, view.data().map(Vec::as_slice).unwrap_or_default())?;
    Ok(())
}

/// `config set KEY VALUE [--update]`
///
/// # Errors
///
/// Returns error if not logged in, the entry is incomplete, or the write
/// fails.
pub async fn set_config<W: Write>(
    ctx: &Context,
    out: &mut W,
    mode: SubmitMode,
    entry: ConfigEntry,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let mut view = EditableView::new(ConfigResource::new(ctx.api.clone()));
    view.submit(mode, entry).await?;

    writeln!(out, "Config saved")?;
    if let Some(entries) = view.view().data() {
        write_config(out, entries)?;
    }
    Ok(())
}

/// `address list`
///
/// # Errors
///
/// Returns error if not logged in or the backend read fails.
pub async fn list_addresses<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CommandError> {
    ctx.require_session()?;
    let mut view = RemoteView::new(AddressResource::new(ctx.api.clone()));
    view.load(LoadTrigger::Activation).await;
    if let Some(error) = view.error() {
        return Err(error.clone().into());
    }
    write_addresses(out, view.data().map(Vec::as_slice).unwrap_or_default())?;
    Ok(())
}

/// `address add|update MOBILE --name --address`
///
/// # Errors
///
/// Returns error if not logged in, the address is incomplete, or the write
/// fails.
pub async fn save_address<W: Write>(
    ctx: &Context,
    out: &mut W,
    mode: SubmitMode,
    address: Address,
) -> Result<(), CommandError> {
    ctx.require_session()?;
    let mut view = EditableView::new(AddressResource::new(ctx.api.clone()));
    view.submit(mode, address).await?;

    writeln!(out, "Address saved")?;
    if let Some(addresses) = view.view().data() {
        write_addresses(out, addresses)?;
    }
    Ok(())
}
