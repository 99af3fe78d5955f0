//! Networking modules for gateway uploads.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transfer` drives a single XHR upload and reports its events, and `upload`
//! is the controller that turns picked files into transfers and cards.

pub mod transfer;
pub mod upload;
