//! Utility helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (clipboard, windows, stylesheet
//! fetches) and the single-flight cache from component logic so they can be
//! reused and tested without a DOM.

pub mod async_cache;
pub mod browser;
pub mod style;
