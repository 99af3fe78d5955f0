use super::*;

use crate::state::upload::{CANCELLED_MESSAGE, CardEvent, CardPhase};

fn config() -> GatewayConfig {
    GatewayConfig::default()
}

fn loaded(body: &str) -> TransferEvent {
    TransferEvent::Loaded {
        status: 200,
        body: body.to_owned(),
    }
}

fn progress(loaded: f64, total: f64) -> TransferEvent {
    TransferEvent::Progress { loaded, total }
}

// =============================================================
// Titles
// =============================================================

#[test]
fn title_uses_binary_size_and_name() {
    assert_eq!(upload_title("notes.txt", 500), "[500 B] notes.txt");
    assert_eq!(upload_title("cat.png", 1024), "[1.0 KiB] cat.png");
}

// =============================================================
// Progress
// =============================================================

#[test]
fn progress_events_update_ratio() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, progress(50.0, 200.0), "f", &config());
    assert!((card.progress() - 0.25).abs() < f64::EPSILON);
    apply_transfer_event(&mut card, progress(0.0, 0.0), "f", &config());
    assert!((card.progress() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn late_progress_after_failure_is_ignored() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, progress(10.0, 100.0), "f", &config());
    apply_transfer_event(&mut card, TransferEvent::NetworkError, "f", &config());
    apply_transfer_event(&mut card, progress(90.0, 100.0), "f", &config());
    assert!((card.progress() - 0.1).abs() < f64::EPSILON);
}

// =============================================================
// Completion
// =============================================================

#[test]
fn wrapped_reply_links_last_hash_and_file_name() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(
        &mut card,
        loaded("{\"Hash\":\"A\"}\n{\"Hash\":\"B\"}\n"),
        "photo.jpg",
        &config(),
    );
    assert_eq!(card.phase(), CardPhase::Succeeded);
    assert_eq!(card.link(), Some("https://ipfs.io/ipfs/B/photo.jpg"));
    assert_eq!(
        card.actions(),
        &[
            CardAction::OpenFolder {
                url: "https://ipfs.io/ipfs/B".to_owned()
            },
            CardAction::CopyHash {
                hash: "B".to_owned()
            },
        ]
    );
}

#[test]
fn malformed_reply_fails_with_parser_message() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, loaded("<html>rate limited</html>"), "f", &config());
    assert_eq!(card.phase(), CardPhase::Failed);
    assert!(card.error().is_some_and(|e| !e.is_empty()));
    assert!(card.link().is_none());
    assert!(card.actions().is_empty());
}

#[test]
fn reply_without_hash_fails() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, loaded("{\"Name\":\"f\"}"), "f", &config());
    assert_eq!(card.phase(), CardPhase::Failed);
    assert!(card.error().is_some_and(|e| e.contains("Hash")));
}

#[test]
fn error_status_fails_before_parsing() {
    let mut card = UploadCardState::new("f");
    let event = TransferEvent::Loaded {
        status: 401,
        body: "{\"Hash\":\"A\"}".to_owned(),
    };
    apply_transfer_event(&mut card, event, "f", &config());
    assert_eq!(card.phase(), CardPhase::Failed);
    assert_eq!(card.error(), Some("gateway responded with status 401"));
}

#[test]
fn network_error_uses_generic_message() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, TransferEvent::NetworkError, "f", &config());
    assert_eq!(card.phase(), CardPhase::Failed);
    assert_eq!(card.error(), Some(TRANSFER_FAILED_MESSAGE));
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn abort_cancels_card_and_makes_click_inert() {
    let mut card = UploadCardState::new("f");
    assert_eq!(card.activate(), Some(CardEvent::Cancel));
    apply_transfer_event(&mut card, TransferEvent::Aborted, "f", &config());
    assert_eq!(card.phase(), CardPhase::Cancelled);
    assert_eq!(card.error(), Some(CANCELLED_MESSAGE));
    assert_eq!(card.activate(), None);
}

#[test]
fn abort_after_success_keeps_success() {
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, loaded("{\"Hash\":\"Q\"}"), "f", &config());
    apply_transfer_event(&mut card, TransferEvent::Aborted, "f", &config());
    assert_eq!(card.phase(), CardPhase::Succeeded);
    assert!(card.error().is_none());
}

#[test]
fn custom_gateway_is_used_for_links() {
    let config = GatewayConfig {
        api_endpoint: "http://127.0.0.1:5001/api/v0/add".to_owned(),
        browse_base: "http://127.0.0.1:8080/ipfs".to_owned(),
    };
    let mut card = UploadCardState::new("f");
    apply_transfer_event(&mut card, loaded("{\"Hash\":\"Z\"}"), "a.bin", &config);
    assert_eq!(card.link(), Some("http://127.0.0.1:8080/ipfs/Z/a.bin"));
}

// =============================================================
// Controller
// =============================================================

#[cfg(not(feature = "csr"))]
mod controller {
    use super::*;

    fn picked(name: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_owned(),
            size,
        }
    }

    fn phase_of(controller: &UploadController, id: Uuid) -> Option<CardPhase> {
        controller
            .uploads()
            .with_untracked(|uploads| uploads.card(id).map(UploadCardState::phase))
    }

    #[test]
    fn start_appends_titled_cards_in_pick_order() {
        let controller = UploadController::new(config());
        let first = controller.start(picked("a.txt", 500));
        let second = controller.start(picked("b.bin", 2048));

        controller.uploads().with_untracked(|uploads| {
            assert_eq!(uploads.ids(), vec![first, second]);
            assert_eq!(uploads.card(first).map(UploadCardState::title), Some("[500 B] a.txt"));
            assert_eq!(uploads.card(second).map(UploadCardState::title), Some("[2.0 KiB] b.bin"));
            assert_eq!(uploads.card(first).map(UploadCardState::phase), Some(CardPhase::Uploading));
        });
    }

    #[test]
    fn cancel_marks_card_cancelled_and_click_inert() {
        let controller = UploadController::new(config());
        let id = controller.start(picked("a", 1));
        controller.cancel(id);

        controller.uploads().with_untracked(|uploads| {
            let card = uploads.card(id);
            assert_eq!(card.map(UploadCardState::phase), Some(CardPhase::Cancelled));
            assert_eq!(card.and_then(UploadCardState::error), Some(CANCELLED_MESSAGE));
            assert_eq!(card.and_then(UploadCardState::activate), None);
        });
    }

    #[test]
    fn cancel_leaves_finished_card_unchanged() {
        let controller = UploadController::new(config());
        let id = controller.start(picked("photo.jpg", 10));
        controller.uploads.update(|uploads| {
            if let Some(card) = uploads.card_mut(id) {
                apply_transfer_event(card, loaded("{\"Hash\":\"Q\"}"), "photo.jpg", &config());
            }
        });
        let before = controller.uploads().with_untracked(|uploads| uploads.card(id).cloned());

        controller.cancel(id);

        let after = controller.uploads().with_untracked(|uploads| uploads.card(id).cloned());
        assert_eq!(after, before);
        assert_eq!(phase_of(&controller, id), Some(CardPhase::Succeeded));
    }

    #[test]
    fn cancel_only_touches_its_own_card() {
        let controller = UploadController::new(config());
        let first = controller.start(picked("a", 1));
        let second = controller.start(picked("b", 1));
        controller.cancel(first);

        assert_eq!(phase_of(&controller, first), Some(CardPhase::Cancelled));
        assert_eq!(phase_of(&controller, second), Some(CardPhase::Uploading));
    }
}
