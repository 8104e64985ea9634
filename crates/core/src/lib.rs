//! Falcon Sports Core - Shared domain library.
//!
//! This crate provides the pieces every Falcon Sports front end shares:
//! - `admin` - Server-rendered administration panel
//! - `cli` - Command-line client for the same backend operations
//!
//! # Architecture
//!
//! The core crate contains types, validation and view state only - no HTTP
//! clients and no storage. Backend access and flag persistence are supplied
//! by callers through the [`remote::RemoteResource`] and
//! [`session::FlagStore`] traits.
//!
//! # Modules
//!
//! - [`types`] - Records exchanged with the Falcon backend
//! - [`validation`] - Required-field checks run before any network call
//! - [`error`] - The two user-facing error kinds
//! - [`remote`] - The generic fetch/display/submit view
//! - [`session`] - The authentication gate
//! - [`navigation`] - Screen identifiers and route resolution

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod navigation;
pub mod remote;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{RequestError, ViewError};
pub use navigation::{Route, Screen};
pub use remote::{EditableView, LoadTrigger, RemoteResource, RemoteView, SubmitMode, WritableResource};
pub use session::{FlagStore, Session, SessionGate};
pub use types::*;
pub use validation::{Validate, ValidationError};
