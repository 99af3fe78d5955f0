//! Upload controller: picked files in, upload cards out.
//!
//! For every file the picker reports, the controller appends a card to the
//! shared [`UploadsState`], starts a [`Transfer`](super::transfer) to the
//! gateway, and folds the transfer's events back into that card. There is no
//! queue and no retry: every file starts immediately and each card tracks its
//! own transfer.
//!
//! ERROR HANDLING
//! ==============
//! Network failures, bad replies, and cancellation all end as a visible card
//! state. Nothing propagates past the card that owns the transfer.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use gateway::{
    GatewayConfig, GatewayError, SizeUnits, check_status, human_file_size, parse_add_response,
};
use leptos::prelude::*;
use uuid::Uuid;

use super::transfer::{TransferEvent, progress_ratio};
use crate::components::file_picker::SelectedFile;
use crate::state::upload::{CardAction, UploadCardState, UploadsState};
use crate::util::browser;

#[cfg(feature = "csr")]
use super::transfer::Transfer;
#[cfg(feature = "csr")]
use std::collections::HashMap;

/// Error text for a transfer that failed at the network level.
pub const TRANSFER_FAILED_MESSAGE: &str = "An error occurred while transferring the file.";

/// Card title: binary-unit size followed by the file name.
#[must_use]
pub fn upload_title(name: &str, size: u64) -> String {
    format!("[{}] {name}", human_file_size(size, SizeUnits::Binary))
}

/// Follow-up buttons for a finished upload.
#[must_use]
pub fn success_actions(config: &GatewayConfig, hash: &str) -> Vec<CardAction> {
    vec![
        CardAction::OpenFolder {
            url: config.content_url(hash),
        },
        CardAction::CopyHash {
            hash: hash.to_owned(),
        },
    ]
}

fn read_add_reply(status: u16, body: &str) -> Result<String, GatewayError> {
    check_status(status)?;
    Ok(parse_add_response(body)?.hash)
}

/// Fold one transfer event into the card that owns the transfer.
pub fn apply_transfer_event(
    card: &mut UploadCardState,
    event: TransferEvent,
    file_name: &str,
    config: &GatewayConfig,
) {
    match event {
        TransferEvent::Progress { loaded, total } => {
            log::debug!("sent {loaded} of {total} bytes for {file_name}");
            if let Some(ratio) = progress_ratio(loaded, total) {
                card.set_progress(ratio);
            }
        }
        TransferEvent::NetworkError => {
            if card.fail(TRANSFER_FAILED_MESSAGE) {
                log::warn!("upload of {file_name} failed in transit");
            }
        }
        TransferEvent::Aborted => {
            if card.cancel() {
                log::info!("upload of {file_name} cancelled");
            }
        }
        TransferEvent::Loaded { status, body } => match read_add_reply(status, &body) {
            Ok(hash) => {
                let link = config.file_url(&hash, file_name);
                if card.succeed(link, success_actions(config, &hash)) {
                    log::info!("uploaded {file_name} as {hash}");
                }
            }
            Err(err) => {
                if card.fail(&err.to_string()) {
                    log::warn!("upload of {file_name} rejected: {err}");
                }
            }
        },
    }
}

/// Run a card's follow-up action against the browser.
pub fn perform_action(action: &CardAction) {
    match action {
        CardAction::OpenFolder { url } => browser::open_in_new_tab(url),
        CardAction::CopyHash { hash } => browser::copy_to_clipboard(hash),
    }
}

/// Owns the upload list and the transfers behind it.
#[derive(Clone, Copy)]
pub struct UploadController {
    uploads: RwSignal<UploadsState>,
    config: StoredValue<GatewayConfig>,
    #[cfg(feature = "csr")]
    transfers: StoredValue<HashMap<Uuid, Transfer>, LocalStorage>,
}

impl UploadController {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            uploads: RwSignal::new(UploadsState::default()),
            config: StoredValue::new(config),
            #[cfg(feature = "csr")]
            transfers: StoredValue::new_local(HashMap::new()),
        }
    }

    /// Read-only view of the upload list.
    pub fn uploads(&self) -> ReadSignal<UploadsState> {
        self.uploads.read_only()
    }

    /// Add a card for `file` and start sending it.
    pub fn start(&self, file: SelectedFile) -> Uuid {
        let id = Uuid::new_v4();
        let title = upload_title(&file.name, file.size);
        log::info!("starting upload {id}: {title}");
        self.uploads.update(|uploads| uploads.insert(id, title));

        #[cfg(feature = "csr")]
        self.begin_transfer(id, &file);

        id
    }

    /// Abort a card's transfer and mark it cancelled.
    pub fn cancel(&self, id: Uuid) {
        #[cfg(feature = "csr")]
        self.transfers.with_value(|transfers| {
            if let Some(transfer) = transfers.get(&id) {
                if let Err(err) = transfer.abort() {
                    log::warn!("failed to abort upload {id}: {err}");
                }
            }
        });
        self.uploads.update(|uploads| {
            uploads.cancel(id);
        });
    }

    /// The picker was dismissed without choosing anything.
    pub fn clear(&self) {
        log::debug!("file selection cleared");
    }

    #[cfg(feature = "csr")]
    fn begin_transfer(&self, id: Uuid, file: &SelectedFile) {
        let uploads = self.uploads;
        let config = self.config.get_value();
        let url = config.add_url();
        let file_name = file.name.clone();
        let on_event = move |event: TransferEvent| {
            uploads.update(|state| {
                if let Some(card) = state.card_mut(id) {
                    apply_transfer_event(card, event, &file_name, &config);
                }
            });
        };

        match Transfer::start(&url, &file.handle, on_event) {
            Ok(transfer) => self.transfers.update_value(|transfers| {
                transfers.insert(id, transfer);
            }),
            Err(err) => {
                log::error!("upload {id} did not start: {err}");
                self.uploads.update(|state| {
                    state.fail(id, &err.to_string());
                });
            }
        }
    }
}
