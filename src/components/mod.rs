//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Widgets take plain props and callbacks and never reach for the controller
//! directly; `upload_panel` is the one place they are wired together.

pub mod action_button;
pub mod file_picker;
pub mod upload_card;
pub mod upload_panel;
pub mod widget_style;
