// SPDX-License-Identifier: MPL-2.0
//! End-to-end engine scenarios, driven through raw host messages and a
//! paused clock.

use bulletin::config::Settings;
use bulletin::host::{DedupId, HostMessage};
use bulletin::surface::Position;
use bulletin::test_utils::{RecordingAudio, RecordingSurface, RecordingTransport, SurfaceOp};
use bulletin::ui::notifications::{Lifecycle, Manager};
use tokio::sync::mpsc;
use tokio::time::Duration;

type TestManager = Manager<RecordingSurface, RecordingTransport, RecordingAudio>;

fn manager() -> TestManager {
    Manager::new(
        Settings::default(),
        RecordingSurface::new(),
        RecordingTransport::new(),
        RecordingAudio::new(),
    )
}

/// Advances the paused clock in small steps, firing timers as the run loop
/// would.
async fn run_for(m: &mut TestManager, total_ms: u64) {
    let step = Duration::from_millis(10);
    let mut elapsed = 0;
    while elapsed < total_ms {
        tokio::time::advance(step).await;
        m.fire_due();
        elapsed += 10;
    }
}

fn standard(id: &str, timeout_ms: u64) -> String {
    format!(
        r#"{{"type": "standard", "id": "{id}", "message": "hello", "timeout": {timeout_ms}}}"#
    )
}

#[tokio::test(start_paused = true)]
async fn timed_toast_walks_the_full_exit_sequence() {
    let mut m = manager();
    m.handle_raw(&standard("ammo", 1000));

    assert_eq!(m.member_count(Position::TopRight), 1);
    let entity = m.find(&DedupId::from("ammo")).expect("admitted");
    assert_eq!(entity.state(), Lifecycle::Active);

    // Dismissal timer fires; the exit transition starts.
    run_for(&mut m, 1000).await;
    let entity = m.find(&DedupId::from("ammo")).expect("still attached");
    assert_eq!(entity.state(), Lifecycle::Hiding);
    assert!(m
        .surface()
        .ops()
        .iter()
        .any(|op| matches!(op, SurfaceOp::SetHiding { exit_animation, .. }
            if exit_animation == "fadeOut")));

    // Default AnimationTime (500ms) plus the settle delay (100ms).
    run_for(&mut m, 600).await;
    assert_eq!(m.member_count(Position::TopRight), 0);
    assert!(m.find(&DedupId::from("ammo")).is_none());
    assert!(m.surface().attached().is_empty());
    assert_eq!(m.transport().removed_ids(), vec!["ammo".to_string()]);
    assert_eq!(m.queue_count(Position::TopRight), 0);
    assert!(m.admission_open(Position::TopRight));
}

#[tokio::test(start_paused = true)]
async fn saturated_queue_defers_admission_until_a_full_drain() {
    let mut m = manager();
    let toast = |id: &str| {
        format!(
            r#"{{"type": "standard", "config": {{"Queue": 1}},
                "id": "{id}", "message": "hi", "timeout": 1000}}"#
        )
    };

    m.handle_raw(&toast("first"));
    assert_eq!(m.member_count(Position::TopRight), 1);
    assert!(!m.admission_open(Position::TopRight));

    m.handle_raw(&toast("second"));
    // Deferred: created but not admitted.
    assert_eq!(m.member_count(Position::TopRight), 1);
    assert!(m.find(&DedupId::from("second")).is_none());

    // The retry poll keeps deferring while the first entity lives out its
    // timeout (1000ms), exit transition (500ms) and settle delay (100ms).
    run_for(&mut m, 1550).await;
    assert_eq!(m.member_count(Position::TopRight), 1, "first still settling");
    assert!(m.find(&DedupId::from("second")).is_none());

    run_for(&mut m, 60).await;
    assert_eq!(m.transport().removed_ids(), vec!["first".to_string()]);
    assert!(m.admission_open(Position::TopRight), "drain reopens admission");

    // Next retry tick admits the waiting entity.
    run_for(&mut m, 250).await;
    let entity = m.find(&DedupId::from("second")).expect("admitted after drain");
    assert_eq!(entity.state(), Lifecycle::Active);
    assert_eq!(m.queue_count(Position::TopRight), 1);
    assert!(!m.admission_open(Position::TopRight), "quota of one refills");
}

#[tokio::test(start_paused = true)]
async fn members_stack_away_from_the_anchor_in_arrival_order() {
    let mut m = manager();
    m.handle_raw(&standard("a", 60_000));
    m.handle_raw(&standard("b", 60_000));
    m.handle_raw(&standard("c", 60_000));

    // Recorded height 60 + spacing 10 per slot; newest sits at the anchor.
    assert_eq!(m.find(&DedupId::from("c")).expect("c").vertical_offset(), 0);
    assert_eq!(m.find(&DedupId::from("b")).expect("b").vertical_offset(), 70);
    assert_eq!(m.find(&DedupId::from("a")).expect("a").vertical_offset(), 140);

    // The shift transition resolves to the same resting offsets.
    run_for(&mut m, 260).await;
    assert!(!m.animation_in_flight(Position::TopRight));
    let rest: Vec<i32> = m
        .surface()
        .ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::EndShift { offset_px, .. } => Some(*offset_px),
            _ => None,
        })
        .collect();
    assert!(rest.ends_with(&[0, 70, 140]));
}

#[tokio::test(start_paused = true)]
async fn gap_collapse_pulls_older_members_back_toward_the_anchor() {
    let mut m = manager();
    m.handle_raw(&standard("old", 60_000));
    m.handle_raw(&standard("young", 1000));

    // "young" sits at the anchor and leaves first; "old" slides back in.
    assert_eq!(m.find(&DedupId::from("old")).expect("old").vertical_offset(), 70);
    run_for(&mut m, 1700).await;
    assert_eq!(m.member_count(Position::TopRight), 1);
    assert_eq!(m.find(&DedupId::from("old")).expect("old").vertical_offset(), 0);
}

#[tokio::test(start_paused = true)]
async fn pinned_toasts_outlive_everything_until_unpinned() {
    let mut m = manager();
    m.handle_raw(
        r#"{"type": "advanced", "id": "bounty", "message": "wanted",
            "title": "Bounty", "subject": "Alive", "icon": "star.png",
            "pin_id": "bounty-1"}"#,
    );
    m.handle_raw(&standard("noise", 1000));

    run_for(&mut m, 5000).await;
    assert_eq!(m.member_count(Position::TopRight), 1, "timed toast is gone");
    assert!(m.has_pin("bounty-1"));

    m.handle_raw(r#"{"type": "unpin", "pin_id": "bounty-1"}"#);
    run_for(&mut m, 700).await;
    assert!(!m.has_pin("bounty-1"));
    assert_eq!(m.member_count(Position::TopRight), 0);
    assert_eq!(
        m.transport().removed_ids(),
        vec!["noise".to_string(), "bounty".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn unpin_accepts_an_ordered_list_of_pin_ids() {
    let mut m = manager();
    for (id, pin) in [("a", "pin-a"), ("b", "pin-b"), ("c", "pin-c")] {
        m.handle_raw(&format!(
            r#"{{"type": "standard", "id": "{id}", "message": "m", "pin_id": "{pin}"}}"#
        ));
    }
    assert_eq!(m.pinned_count(), 3);

    m.handle_raw(r#"{"type": "unpin", "pin_id": ["pin-a", "pin-c"]}"#);
    run_for(&mut m, 700).await;

    assert_eq!(m.pinned_count(), 1);
    assert!(m.has_pin("pin-b"));
    assert_eq!(m.member_count(Position::TopRight), 1);
}

#[tokio::test(start_paused = true)]
async fn update_pinned_rewrites_content_in_place() {
    let mut m = manager();
    m.handle_raw(
        r#"{"type": "advanced", "id": "score", "message": "0 points",
            "title": "Score", "subject": "Round 1", "icon": "trophy.png",
            "pin_id": "score-board"}"#,
    );

    m.handle_raw(
        r#"{"type": "update_pinned", "pin_id": "score-board",
            "options": {"message": "~h~10 points~", "subject": "Round 2",
                        "theme": "gold", "flash": true}}"#,
    );

    let entity = m.find(&DedupId::from("score")).expect("still pinned");
    assert_eq!(entity.message(), "~h~10 points~");
    assert_eq!(entity.theme(), "gold");
    assert!(entity.flash());
    let advanced = entity.advanced().expect("advanced payload");
    assert_eq!(advanced.subject, "Round 2");
    assert_eq!(advanced.title, "Score", "untouched fields survive");
}

#[tokio::test(start_paused = true)]
async fn markup_is_expanded_before_attachment() {
    let mut m = manager();
    m.handle_raw(
        r#"{"type": "standard", "id": "mk",
            "message": "~h~Warning~ low ~1~ammo~s~ left\nreload", "timeout": 1000}"#,
    );

    let html = m
        .surface()
        .ops()
        .iter()
        .find_map(|op| match op {
            SurfaceOp::Attach { html, .. } => Some(html.clone()),
            _ => None,
        })
        .expect("toast attached");
    assert!(html.contains("<span class='h'>Warning</span>"));
    assert!(html.contains("<span class='1'>ammo</span>"));
    assert!(html.contains("<br />"));
    assert!(!html.contains('~'));
}

#[tokio::test(start_paused = true)]
async fn run_loop_processes_messages_and_timers() {
    let (tx, rx) = mpsc::channel(8);
    let engine = manager();
    let handle = tokio::spawn(engine.run(rx));

    let raw = standard("loop", 1000);
    let message: HostMessage = serde_json::from_str(&raw).expect("valid message");
    tx.send(message).await.expect("engine is listening");

    // The paused clock auto-advances through the engine's own sleeps.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    drop(tx);

    let engine = handle.await.expect("engine task completes");
    assert_eq!(engine.member_count(Position::TopRight), 0);
    assert_eq!(engine.transport().removed_ids(), vec!["loop".to_string()]);
}
