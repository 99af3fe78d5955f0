//! Application state modules for the upload widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! State is plain data held in Leptos signals. Components read it through
//! signals handed down by the upload panel; the controller in `net::upload`
//! is the only writer.

pub mod upload;
