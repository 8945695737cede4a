//! Property-based tests for session reconciliation and dimension selection

use proptest::prelude::*;
use rpmgen::catalog::{GraduateDimension, PedagogicalPractice};
use rpmgen::form::{FormField, LessonPlanRequest, MAX_SESSIONS, MIN_SESSIONS};

fn practice() -> impl Strategy<Value = PedagogicalPractice> {
    prop::sample::select(PedagogicalPractice::ALL.to_vec())
}

fn dimension() -> impl Strategy<Value = GraduateDimension> {
    prop::sample::select(GraduateDimension::ALL.to_vec())
}

/// After reconciling to n, the keyed view covers exactly 1..=n.
#[test]
fn test_reconcile_key_set_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                MIN_SESSIONS..=MAX_SESSIONS,
                MIN_SESSIONS..=MAX_SESSIONS,
                prop::collection::vec(practice(), 0..10),
            ),
            |(first, n, practices)| {
                let mut request = LessonPlanRequest::new();
                request.reconcile_sessions(first);
                for (i, p) in practices.into_iter().enumerate() {
                    let _ = request.set_session_practice(i as u32 + 1, p);
                }

                request.reconcile_sessions(n);
                let keys: Vec<u32> = request.practice_map().keys().copied().collect();
                let expected: Vec<u32> = (1..=n).collect();
                prop_assert_eq!(keys, expected);
                prop_assert_eq!(request.sessions_count(), n);
                Ok(())
            },
        )
        .unwrap();
}

/// Reconciling twice to the same count changes nothing.
#[test]
fn test_reconcile_idempotent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                MIN_SESSIONS..=MAX_SESSIONS,
                prop::collection::vec(practice(), 1..=10),
            ),
            |(n, practices)| {
                let mut request = LessonPlanRequest::new();
                request.reconcile_sessions(MAX_SESSIONS);
                for (i, p) in practices.into_iter().enumerate() {
                    request.set_session_practice(i as u32 + 1, p).unwrap();
                }

                request.reconcile_sessions(n);
                let once = request.clone();
                request.reconcile_sessions(n);
                prop_assert_eq!(request, once);
                Ok(())
            },
        )
        .unwrap();
}

/// Any text for the session count lands within bounds with a matching map.
#[test]
fn test_session_count_text_always_in_range() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |text| {
            let mut request = LessonPlanRequest::new();
            request.set_field(FormField::SessionsCount, &text).unwrap();
            let count = request.sessions_count();
            prop_assert!((MIN_SESSIONS..=MAX_SESSIONS).contains(&count));
            prop_assert_eq!(request.session_practices().len(), count as usize);
            Ok(())
        })
        .unwrap();
}

/// Toggling the same dimension twice restores the selection, and the submit
/// gate passes exactly when something is selected.
#[test]
fn test_toggle_self_inverse_and_submit_gate() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(dimension(), 0..12), dimension()),
            |(initial, toggled)| {
                let mut request = LessonPlanRequest::new();
                for dim in initial {
                    request.toggle_dimension(dim);
                }
                let before = request.dimensions().clone();

                request.toggle_dimension(toggled);
                request.toggle_dimension(toggled);
                prop_assert_eq!(request.dimensions(), &before);

                prop_assert_eq!(
                    request.validate_for_submit().is_ok(),
                    !request.dimensions().is_empty()
                );
                Ok(())
            },
        )
        .unwrap();
}
