//! Session commands.

use std::io::Write;

use falcon_core::{LoginCredentials, RequestError};

use super::{CommandError, Context};

/// Check credentials with the backend and open the gate.
///
/// # Errors
///
/// Returns a [`RequestError`] with the login failure message if the backend
/// rejects the credentials, or a state file error if the flag cannot be
/// written.
pub async fn login<W: Write>(
    ctx: &mut Context,
    out: &mut W,
    username: &str,
    password: String,
) -> Result<(), CommandError> {
    let credentials = LoginCredentials::new(username.trim(), password);

    if let Err(e) = ctx.api.login(&credentials).await {
        tracing::warn!(error = %e, "Login rejected");
        return Err(RequestError::new(LoginCredentials::FAILURE_MESSAGE).into());
    }

    ctx.gate.login().await?;
    writeln!(out, "Logged in as {}", credentials.username)?;
    Ok(())
}

/// Close the gate.
///
/// # Errors
///
/// Returns error if the state file cannot be updated.
pub async fn logout<W: Write>(ctx: &mut Context, out: &mut W) -> Result<(), CommandError> {
    ctx.gate.logout().await?;
    writeln!(out, "Logged out")?;
    Ok(())
}

/// Report whether the gate is open.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn status<W: Write>(ctx: &Context, out: &mut W) -> Result<(), CommandError> {
    let state = if ctx.gate.is_authenticated() {
        "Logged in"
    } else {
        "Not logged in"
    };
    writeln!(
        out,
        "{state} (state file: {})",
        ctx.gate.store().path().display()
    )?;
    Ok(())
}
