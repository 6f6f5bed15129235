use std::sync::Arc;
use algocoach_lib::analytics::WeaknessReport;
use algocoach_lib::clock::{Clock, FixedClock};
use algocoach_lib::config::CoachConfig;
use algocoach_lib::problems::record::{Difficulty, GradedAttempt};
use algocoach_lib::problems::selector::{Focus, Recommendation};
use algocoach_lib::routes;
use algocoach_lib::scheduler::MS_PER_DAY;
use algocoach_lib::skills::weakness::{RemovalWindow, WeaknessChange};
use algocoach_lib::state::app::AppState;
use algocoach_lib::store::{MemoryStore, StateStore};

fn setup(window: RemovalWindow) -> (AppState, Arc<MemoryStore>, FixedClock) {
    let mut config = CoachConfig::default();
    config.weakness.removal_window = window;
    let store = Arc::new(MemoryStore::default());
    let clock = FixedClock::at_date("2024-06-01".parse().unwrap());
    let app = AppState::new(config, store.clone(), Arc::new(clock.clone()));
    (app, store, clock)
}

fn attempt(id: &str, topic: &str, score: f64) -> GradedAttempt {
    GradedAttempt::new(id, topic, Difficulty::Medium, score)
}

#[tokio::test]
async fn weak_topic_added_then_cleared_by_three_clean_records() {
    let (app, store, _clock) = setup(RemovalWindow::Strict);

    let out = routes::submit_attempt(&app, attempt("p1", "graphs", 5.0)).await.unwrap();
    assert_eq!(out.weakness, WeaknessChange::Added);
    assert!(out.lapsed);

    let out = routes::submit_attempt(&app, attempt("p2", "graphs", 9.0)).await.unwrap();
    assert_eq!(out.weakness, WeaknessChange::Unchanged);
    let out = routes::submit_attempt(&app, attempt("p3", "graphs", 9.0)).await.unwrap();
    // p1 still needs review and sits in the window
    assert_eq!(out.weakness, WeaknessChange::Unchanged);
    let out = routes::submit_attempt(&app, attempt("p4", "graphs", 9.0)).await.unwrap();
    assert_eq!(out.weakness, WeaknessChange::Removed);

    assert!(store.snapshot().weak_topics.is_empty());
}

#[tokio::test]
async fn middling_score_neither_clears_nor_blocks() {
    let (app, store, clock) = setup(RemovalWindow::Strict);

    routes::submit_attempt(&app, attempt("p1", "dp", 4.0)).await.unwrap();
    clock.set(clock.now_ms() + 1);
    // 6 still needs review and is below the clearing score
    let out = routes::submit_attempt(&app, attempt("p2", "dp", 6.0)).await.unwrap();
    assert_eq!(out.weakness, WeaknessChange::Unchanged);
    assert!(out.record.needs_review);

    let mut changes = Vec::new();
    for id in ["p3", "p4", "p5"] {
        clock.set(clock.now_ms() + 1);
        let out = routes::submit_attempt(&app, attempt(id, "dp", 9.0)).await.unwrap();
        assert!(!out.record.needs_review);
        changes.push(out.weakness);
    }

    // Cleared once p2 leaves the last-three window
    assert_eq!(
        changes,
        vec![WeaknessChange::Unchanged, WeaknessChange::Unchanged, WeaknessChange::Removed]
    );
    assert!(!store.snapshot().weak_topics.contains("dp"));
}

#[tokio::test]
async fn strict_and_vacuous_windows_differ_on_short_history() {
    for (window, expected) in [
        (RemovalWindow::Strict, WeaknessChange::Unchanged),
        (RemovalWindow::Vacuous, WeaknessChange::Removed),
    ] {
        let (app, _store, clock) = setup(window);
        routes::submit_attempt(&app, attempt("p1", "heaps", 3.0)).await.unwrap();
        clock.set(clock.now_ms() + 1);
        // Regrading the same problem leaves a single clean record on the topic
        let out = routes::submit_attempt(&app, attempt("p1", "heaps", 10.0)).await.unwrap();
        assert_eq!(out.weakness, expected, "window {:?}", window);
    }
}

#[tokio::test]
async fn due_queue_follows_schedule() {
    let (app, _store, clock) = setup(RemovalWindow::Strict);

    routes::submit_attempt(&app, attempt("a", "arrays", 10.0)).await.unwrap();
    clock.set(clock.now_ms() + 1);
    routes::submit_attempt(&app, attempt("b", "arrays", 2.0)).await.unwrap();

    assert!(routes::get_due_problems(&app, None).await.unwrap().is_empty());

    // Both intervals are one day; "a" was graded first so it is due first
    clock.advance_days(1);
    let due = routes::get_due_problems(&app, None).await.unwrap();
    let ids: Vec<_> = due.iter().map(|d| d.record.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    let limited = routes::get_due_problems(&app, Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn second_success_schedules_six_days_out() {
    let (app, _store, clock) = setup(RemovalWindow::Strict);

    routes::submit_attempt(&app, attempt("a", "arrays", 10.0)).await.unwrap();
    clock.advance_days(1);
    let out = routes::submit_attempt(&app, attempt("a", "arrays", 10.0)).await.unwrap();
    assert_eq!(out.record.interval, 6);
    assert_eq!(out.record.next_review, clock.now_ms() + 6 * MS_PER_DAY);
    assert_eq!(out.record.review_count, 2);
    assert_eq!(out.streak.streak, 2);
}

#[tokio::test]
async fn invalid_score_is_never_persisted() {
    let (app, store, _clock) = setup(RemovalWindow::Strict);
    routes::submit_attempt(&app, attempt("a", "arrays", 8.0)).await.unwrap();
    let before = store.snapshot();

    let err = routes::submit_attempt(&app, attempt("a", "arrays", f64::NAN)).await.unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn streak_decays_on_idle_session_start() {
    let (app, store, clock) = setup(RemovalWindow::Strict);

    routes::explain_concept(&app, "recursion").await.unwrap();
    clock.advance_days(1);
    routes::explain_concept(&app, "recursion").await.unwrap();
    assert_eq!(store.snapshot().streak.streak, 2);

    clock.advance_days(3);
    let streak = routes::start_session(&app).await.unwrap();
    assert_eq!(streak.streak, 0);
    assert_eq!(streak.last_study_date, Some("2024-06-02".parse::<chrono::NaiveDate>().unwrap()));

    routes::submit_attempt(&app, attempt("a", "arrays", 8.0)).await.unwrap();
    assert_eq!(store.snapshot().streak.streak, 1);
}

#[tokio::test]
async fn free_text_feedback_defaults_to_five() {
    let (app, _store, _clock) = setup(RemovalWindow::Strict);

    let out = routes::submit_feedback(
        &app,
        "a".into(),
        "strings".into(),
        Difficulty::Easy,
        "Nice work, but no score line here.",
    )
    .await
    .unwrap();
    assert_eq!(out.record.last_score, 5.0);
    assert!(out.lapsed);

    let out = routes::submit_feedback(&app, "b".into(), "strings".into(), Difficulty::Hard, "### Score: 9/10")
        .await
        .unwrap();
    assert_eq!(out.record.last_score, 9.0);
}

#[tokio::test]
async fn recommendation_and_analysis_without_history() {
    let (app, _store, _clock) = setup(RemovalWindow::Strict);
    assert_eq!(routes::get_recommendation(&app).await.unwrap(), Recommendation::NoData);
    assert_eq!(routes::analyze_weaknesses(&app).await.unwrap(), WeaknessReport::NoData);
}

#[tokio::test]
async fn recommendation_prefers_overdue_problem() {
    let (app, _store, clock) = setup(RemovalWindow::Strict);
    routes::submit_attempt(&app, attempt("a", "arrays", 9.0)).await.unwrap();
    clock.advance_days(3);

    match routes::get_recommendation(&app).await.unwrap() {
        Recommendation::Ready { focus, due, .. } => {
            assert_eq!(focus, Focus::Review { problem_id: "a".into() });
            assert_eq!(due[0].overdue_days, 2);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn topic_lookup_and_status() {
    let (app, store, _clock) = setup(RemovalWindow::Strict);
    routes::submit_attempt(&app, attempt("a", "trees", 9.0)).await.unwrap();
    routes::submit_attempt(&app, attempt("b", "tries", 9.0)).await.unwrap();

    let trees = routes::get_problems_by_topic(&app, "trees").await.unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].id, "a");

    let status = routes::get_status(&app).await.unwrap();
    assert_eq!(status, store.get().await.unwrap());
    assert_eq!(status.solved_problems.len(), 2);
}
