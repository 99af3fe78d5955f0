//! Multipart file transfer over `XMLHttpRequest`.
//!
//! `fetch` cannot report upload progress, so uploads go through XHR and its
//! DOM events are translated into [`TransferEvent`]s. Within one transfer,
//! progress events are followed by exactly one of `NetworkError`, `Loaded`,
//! or `Aborted`.
//!
//! The XHR driver is gated behind `#[cfg(feature = "csr")]`; the event model
//! is shared with native tests.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

#[cfg(feature = "csr")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
#[cfg(feature = "csr")]
use web_sys::{Event, FormData, ProgressEvent, XmlHttpRequest};

/// Something that happened to an in-flight transfer.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferEvent {
    /// Bytes sent so far out of the total request size.
    Progress { loaded: f64, total: f64 },
    /// The request failed at the network level.
    NetworkError,
    /// The gateway replied.
    Loaded { status: u16, body: String },
    /// The request was aborted locally.
    Aborted,
}

impl TransferEvent {
    /// `true` for the event that ends a transfer.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

/// Fraction of the body sent, or `None` when the total is unknown.
#[must_use]
pub fn progress_ratio(loaded: f64, total: f64) -> Option<f64> {
    if !(total.is_finite() && loaded.is_finite()) || total <= 0.0 {
        return None;
    }
    Some((loaded / total).clamp(0.0, 1.0))
}

/// A transfer could not be set up or controlled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("could not start upload: {0}")]
pub struct TransferError(pub String);

#[cfg(feature = "csr")]
impl From<JsValue> for TransferError {
    fn from(value: JsValue) -> Self {
        Self(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// An in-flight XHR upload and the listeners it reports through.
///
/// The listeners must outlive the request, so they are owned here and the
/// transfer is kept alive by the controller for the lifetime of its card.
#[cfg(feature = "csr")]
pub struct Transfer {
    xhr: XmlHttpRequest,
    _progress: Closure<dyn FnMut(ProgressEvent)>,
    _terminal: Vec<Closure<dyn FnMut(Event)>>,
}

#[cfg(feature = "csr")]
impl Transfer {
    /// POST `file` as the single multipart field to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] if the request cannot be built or sent.
    pub fn start(
        url: &str,
        file: &web_sys::File,
        on_event: impl Fn(TransferEvent) + 'static,
    ) -> Result<Self, TransferError> {
        use std::rc::Rc;

        let on_event = Rc::new(on_event);
        let xhr = XmlHttpRequest::new()?;
        xhr.open_with_async("POST", url, true)?;

        let progress = {
            let on_event = Rc::clone(&on_event);
            Closure::wrap(Box::new(move |ev: ProgressEvent| {
                on_event(TransferEvent::Progress {
                    loaded: ev.loaded(),
                    total: ev.total(),
                });
            }) as Box<dyn FnMut(ProgressEvent)>)
        };
        xhr.upload()?
            .add_event_listener_with_callback("progress", progress.as_ref().unchecked_ref())?;

        let on_error = {
            let on_event = Rc::clone(&on_event);
            Closure::wrap(Box::new(move |_: Event| on_event(TransferEvent::NetworkError))
                as Box<dyn FnMut(Event)>)
        };
        let on_abort = {
            let on_event = Rc::clone(&on_event);
            Closure::wrap(Box::new(move |_: Event| on_event(TransferEvent::Aborted))
                as Box<dyn FnMut(Event)>)
        };
        let on_load = {
            let on_event = Rc::clone(&on_event);
            let xhr = xhr.clone();
            Closure::wrap(Box::new(move |_: Event| {
                let status = xhr.status().unwrap_or_default();
                let body = xhr.response_text().unwrap_or_default().unwrap_or_default();
                on_event(TransferEvent::Loaded { status, body });
            }) as Box<dyn FnMut(Event)>)
        };
        xhr.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
        xhr.add_event_listener_with_callback("abort", on_abort.as_ref().unchecked_ref())?;
        xhr.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename(gateway::FILE_FIELD, file, &file.name())?;
        xhr.send_with_opt_form_data(Some(&form))?;

        Ok(Self {
            xhr,
            _progress: progress,
            _terminal: vec![on_error, on_abort, on_load],
        })
    }

    /// Abort the request. The `Aborted` event fires before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] if the browser rejects the call.
    pub fn abort(&self) -> Result<(), TransferError> {
        self.xhr.abort()?;
        Ok(())
    }
}
