//! Upload card state: one card per file transfer.
//!
//! DESIGN
//! ======
//! The card is a small state machine. It starts `Uploading`, accepts progress
//! and title updates, and ends in exactly one terminal phase. Once terminal,
//! progress and cancel requests are ignored, and a click on the card no longer
//! produces a cancel event. The controller decides outcomes; the card only
//! records them.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use uuid::Uuid;

/// Error text shown when the user cancels an upload.
pub const CANCELLED_MESSAGE: &str = "Cancelled";

/// Lifecycle phase of an upload card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardPhase {
    /// Transfer in flight.
    #[default]
    Uploading,
    /// Gateway accepted the file; link and actions are available.
    Succeeded,
    /// Transfer or response handling failed.
    Failed,
    /// User aborted the transfer.
    Cancelled,
}

impl CardPhase {
    /// `true` for every phase except `Uploading`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::Uploading
    }
}

/// Event a card emits toward its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEvent {
    /// The user asked to stop the transfer.
    Cancel,
}

/// Follow-up action attached to a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardAction {
    /// Open the wrapping directory in a new tab.
    OpenFolder { url: String },
    /// Copy the bare content identifier.
    CopyHash { hash: String },
}

impl CardAction {
    /// Button label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenFolder { .. } => "folder",
            Self::CopyHash { .. } => "copy_hash",
        }
    }
}

/// Visual state of one upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadCardState {
    phase: CardPhase,
    title: String,
    error: Option<String>,
    progress: f64,
    link: Option<String>,
    actions: Vec<CardAction>,
}

impl UploadCardState {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Completed fraction in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress as a CSS percentage value.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    #[must_use]
    pub fn actions(&self) -> &[CardAction] {
        &self.actions
    }

    /// Replace the title. Returns `false` when the text is unchanged.
    pub fn set_title(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        title.clone_into(&mut self.title);
        true
    }

    /// Replace the error text. Returns `false` when the text is unchanged.
    pub fn set_error(&mut self, message: &str) -> bool {
        if self.error.as_deref() == Some(message) {
            return false;
        }
        self.error = Some(message.to_owned());
        true
    }

    /// Record transfer progress.
    ///
    /// Ignored once terminal, for non-finite input, and for values that would
    /// move the bar backwards. Input is clamped into `[0, 1]`.
    pub fn set_progress(&mut self, ratio: f64) -> bool {
        if self.is_terminal() || !ratio.is_finite() {
            return false;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        if ratio <= self.progress {
            return false;
        }
        self.progress = ratio;
        true
    }

    /// Finish successfully with a browse link and follow-up actions.
    pub fn succeed(&mut self, link: String, actions: Vec<CardAction>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = CardPhase::Succeeded;
        self.progress = 1.0;
        self.link = Some(link);
        self.actions.extend(actions);
        true
    }

    /// Finish with an error message.
    pub fn fail(&mut self, message: &str) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = CardPhase::Failed;
        self.set_error(message);
        true
    }

    /// Finish as cancelled by the user.
    pub fn cancel(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = CardPhase::Cancelled;
        self.set_error(CANCELLED_MESSAGE);
        true
    }

    /// React to a click on the card.
    ///
    /// A non-terminal card asks its controller to cancel; the card itself does
    /// not change until the controller reports back.
    #[must_use]
    pub fn activate(&self) -> Option<CardEvent> {
        (!self.is_terminal()).then_some(CardEvent::Cancel)
    }
}

/// One card in the upload list.
#[derive(Clone, Debug, PartialEq)]
struct UploadEntry {
    pub id: Uuid,
    pub card: UploadCardState,
}

/// All cards on the page, in the order their files were picked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadsState {
    entries: Vec<UploadEntry>,
}

impl UploadsState {
    /// Append a fresh card.
    pub fn insert(&mut self, id: Uuid, title: impl Into<String>) {
        self.entries.push(UploadEntry {
            id,
            card: UploadCardState::new(title),
        });
    }

    #[must_use]
    pub fn card(&self, id: Uuid) -> Option<&UploadCardState> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.card)
    }

    pub fn card_mut(&mut self, id: Uuid) -> Option<&mut UploadCardState> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.card)
    }

    /// Card ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|e| e.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cards that have not reached a terminal phase.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.card.is_terminal()).count()
    }

    /// Cancel a card by id. Returns `false` for unknown or finished cards.
    pub fn cancel(&mut self, id: Uuid) -> bool {
        self.card_mut(id).is_some_and(UploadCardState::cancel)
    }

    /// Fail a card by id. Returns `false` for unknown or finished cards.
    pub fn fail(&mut self, id: Uuid, message: &str) -> bool {
        self.card_mut(id).is_some_and(|card| card.fail(message))
    }
}
