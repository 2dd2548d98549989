//! Tests for Timeline replay, availability and statistics
//!
//! Verifies that events are validated in time order against a clean
//! cooldown state, whatever order they were placed in.

use proptest::prelude::*;

use super::{EventKind, SkillKey, Timeline, TimelineError};
use crate::PlannerConfig;
use crate::skills::{AbilitySkill, GcdSkill, SkillId, SkillInfo};

/// Timeline with a single 2.5s GCD skill
fn gcd_timeline() -> (Timeline, SkillKey) {
    let mut timeline = Timeline::new();
    let fire = timeline.add_gcd_skill(GcdSkill::new(SkillInfo::new("Fire", 141).with_potency(180)));
    (timeline, fire)
}

/// Timeline with a single 60s, 2-charge ability
fn charge_timeline() -> (Timeline, SkillKey) {
    let mut timeline = Timeline::new();
    let skill = timeline.add_ability_skill(
        AbilitySkill::new(SkillInfo::new("Triplecast", 7421), 60.0).with_max_charges(2),
    );
    (timeline, skill)
}

fn key(timeline: &Timeline, name: &str) -> SkillKey {
    timeline.find_skill_by_name(name).expect("sample skill")
}

/// (time, executable, error) for every event in list order
fn outcomes(timeline: &Timeline) -> Vec<(f64, bool, Option<String>)> {
    timeline
        .events()
        .iter()
        .map(|e| (e.time(), e.is_executable(), e.error_message().map(String::from)))
        .collect()
}

#[test]
fn test_gcd_blocks_early_reuse() {
    let (mut timeline, fire) = gcd_timeline();

    assert!(timeline.add_skill_event(0.0, fire).unwrap().is_executable());

    let early = timeline.add_skill_event(2.0, fire).unwrap();
    assert!(!early.is_executable());
    assert_eq!(early.error_message(), Some("GCD remaining 0.50s"));

    let on_time = timeline.add_skill_event(2.5, fire).unwrap();
    assert!(on_time.is_executable());
    assert_eq!(on_time.error_message(), None);
}

#[test]
fn test_charge_recovery_scenario() {
    let (mut timeline, skill) = charge_timeline();

    timeline.add_skill_event(0.0, skill).unwrap();
    timeline.add_skill_event(10.0, skill).unwrap();
    timeline.add_skill_event(30.0, skill).unwrap();
    timeline.add_skill_event(65.0, skill).unwrap();

    let results = outcomes(&timeline);
    assert_eq!(results[0], (0.0, true, None));
    assert_eq!(results[1], (10.0, true, None));
    assert_eq!(
        results[2],
        (30.0, false, Some("recast remaining 30.00s".to_string()))
    );
    assert_eq!(results[3], (65.0, true, None));
}

#[test]
fn test_revalidate_is_idempotent() {
    let mut timeline = Timeline::with_sample_catalog();
    let fire = key(&timeline, "Fire");
    let swift = key(&timeline, "Swiftcast");

    for t in [0.0, 1.0, 2.5, 3.0, 5.0] {
        timeline.add_skill_event(t, fire).unwrap();
    }
    timeline.add_skill_event(1.0, swift).unwrap();
    timeline.add_skill_event(30.0, swift).unwrap();

    timeline.revalidate();
    let first = outcomes(&timeline);
    timeline.revalidate();
    assert_eq!(first, outcomes(&timeline));
}

#[test]
fn test_events_stay_sorted() {
    let (mut timeline, fire) = gcd_timeline();

    timeline.add_skill_event(10.0, fire).unwrap();
    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(5.0, fire).unwrap();

    let times: Vec<f64> = timeline.events().iter().map(|e| e.time()).collect();
    assert_eq!(times, vec![0.0, 5.0, 10.0]);
    assert!(timeline.events().iter().all(|e| e.is_executable()));
}

#[test]
fn test_earlier_placement_invalidates_later_event() {
    let (mut timeline, fire) = gcd_timeline();

    // Placed first, valid on its own
    let late = timeline.add_skill_event(1.0, fire).unwrap().id();
    // Placed second but earlier in time; the 1.0s event now collides
    timeline.add_skill_event(0.0, fire).unwrap();

    let late = timeline.event(late).unwrap();
    assert!(!late.is_executable());
    assert_eq!(late.error_message(), Some("GCD remaining 1.50s"));
}

#[test]
fn test_ties_keep_placement_order() {
    let (mut timeline, fire) = gcd_timeline();

    let first = timeline.add_skill_event(4.0, fire).unwrap().id();
    let second = timeline.add_skill_event(4.0, fire).unwrap().id();

    assert_eq!(timeline.events()[0].id(), first);
    assert!(timeline.event(first).unwrap().is_executable());
    assert!(!timeline.event(second).unwrap().is_executable());
    assert_eq!(
        timeline.event(second).unwrap().error_message(),
        Some("GCD remaining 2.50s")
    );
}

#[test]
fn test_remove_revalidates() {
    let (mut timeline, fire) = gcd_timeline();

    let first = timeline.add_skill_event(0.0, fire).unwrap().id();
    let second = timeline.add_skill_event(1.0, fire).unwrap().id();
    assert!(!timeline.event(second).unwrap().is_executable());

    let removed = timeline.remove_skill_event(first).unwrap();
    assert_eq!(removed.id(), first);
    assert!(timeline.event(second).unwrap().is_executable());

    assert!(timeline.remove_skill_event(first).is_none());
}

#[test]
fn test_move_replaces_event() {
    let (mut timeline, fire) = gcd_timeline();

    timeline.add_skill_event(0.0, fire).unwrap();
    let moved = timeline.add_skill_event(1.0, fire).unwrap().id();

    let event = timeline.move_skill_event(moved, 3.0).unwrap();
    assert_eq!(event.id(), moved);
    assert_eq!(event.time(), 3.0);
    assert!(event.is_executable());

    // Moving before the other event flips which one fails
    timeline.move_skill_event(moved, -1.0).unwrap();
    assert_eq!(timeline.events()[0].id(), moved);
    assert!(timeline.events()[0].is_executable());
    assert!(!timeline.events()[1].is_executable());

    assert!(timeline.move_skill_event(super::EventId(999), 0.0).is_none());
}

#[test]
fn test_clear_events() {
    let (mut timeline, fire) = gcd_timeline();
    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(1.0, fire).unwrap();

    timeline.clear_events();
    assert!(timeline.events().is_empty());
    assert_eq!(timeline.statistics().total_uses, 0);
}

#[test]
fn test_unknown_skill_key_is_rejected() {
    let big = Timeline::with_sample_catalog();
    let foreign = key(&big, "Manafont");

    let (mut small, _) = gcd_timeline();
    let err = small.add_skill_event(0.0, foreign).unwrap_err();
    assert_eq!(err, TimelineError::UnknownSkill(foreign.index()));
    assert!(small.events().is_empty());
}

#[test]
fn test_statistics_scenario() {
    let mut timeline = Timeline::with_sample_catalog();
    let fire = key(&timeline, "Fire");
    let fire2 = key(&timeline, "Fire II");

    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(0.0, fire2).unwrap();
    let failed = timeline.add_skill_event(1.0, fire).unwrap();
    assert!(!failed.is_executable());

    let stats = timeline.statistics();
    assert_eq!(stats.total_uses, 2);
    assert_eq!(stats.gcd_uses, 2);
    assert_eq!(stats.ability_uses, 0);
    assert_eq!(stats.total_potency, 440);
    assert!((stats.potency_per_second - 440.0 / 300.0).abs() < 1e-9);
    assert!((stats.potency_per_second - 1.467).abs() < 1e-3);
}

#[test]
fn test_statistics_without_duration() {
    let mut timeline = Timeline::with_sample_catalog();
    let swift = key(&timeline, "Swiftcast");
    timeline.add_skill_event(0.0, swift).unwrap();
    timeline.set_total_time(0.0);

    let stats = timeline.statistics();
    assert_eq!(stats.ability_uses, 1);
    assert_eq!(stats.potency_per_second, 0.0);
}

#[test]
fn test_marker_events_are_not_replayed() {
    let (mut timeline, fire) = gcd_timeline();

    timeline.add_skill_event(0.0, fire).unwrap();
    let marker = timeline
        .add_event_of_kind(1.0, fire, EventKind::GcdReady)
        .unwrap();
    assert!(marker.is_executable());
    assert_eq!(marker.kind(), EventKind::GcdReady);

    // The marker did not consume the GCD
    assert!(timeline.add_skill_event(2.5, fire).unwrap().is_executable());
    assert_eq!(timeline.statistics().total_uses, 2);
}

#[test]
fn test_spell_speed_change_revalidates() {
    let (mut timeline, fire) = gcd_timeline();

    timeline.add_skill_event(0.0, fire).unwrap();
    let second = timeline.add_skill_event(2.2, fire).unwrap().id();
    assert!(!timeline.event(second).unwrap().is_executable());

    // 2.5 * 0.8769 ≈ 2.19s
    timeline.set_spell_speed(2000);
    assert!(timeline.event(second).unwrap().is_executable());

    timeline.set_spell_speed(400);
    assert!(!timeline.event(second).unwrap().is_executable());
}

#[test]
fn test_new_gcd_skill_picks_up_spell_speed() {
    let mut timeline = Timeline::new();
    timeline.set_spell_speed(10_000);

    let key = timeline.add_gcd_skill(GcdSkill::new(SkillInfo::new("Fire", 141)));
    let gcd = timeline.skill(key).and_then(|s| s.as_gcd()).unwrap();
    assert_eq!(gcd.spell_speed_modifier(), 0.5);
    assert_eq!(gcd.actual_gcd_time(), 1.25);
}

#[test]
fn test_available_skills_replays_strictly_before() {
    let mut timeline = Timeline::with_sample_catalog();
    let fire = key(&timeline, "Fire");
    let swift = key(&timeline, "Swiftcast");

    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(1.0, swift).unwrap();

    // Nothing happens strictly before 0.0
    assert_eq!(timeline.available_skills(0.0).len(), 9);

    let available = timeline.available_skills(2.0);
    assert!(!available.contains(&fire));
    assert!(!available.contains(&swift));
    assert!(available.contains(&key(&timeline, "Blizzard")));
    assert!(available.contains(&key(&timeline, "Manafont")));
    assert_eq!(available.len(), 7);

    // GCD skills are listed before abilities
    let first_ability = available
        .iter()
        .position(|k| timeline.skill(*k).unwrap().as_ability().is_some())
        .unwrap();
    assert!(
        available[..first_ability]
            .iter()
            .all(|k| timeline.skill(*k).unwrap().as_gcd().is_some())
    );

    assert!(timeline.available_skills(2.5).contains(&fire));
    assert!(timeline.available_skills(61.0).contains(&swift));
}

#[test]
fn test_available_skills_tracks_charges() {
    let (mut timeline, skill) = charge_timeline();
    timeline.add_skill_event(0.0, skill).unwrap();
    timeline.add_skill_event(10.0, skill).unwrap();

    assert!(timeline.available_skills(5.0).contains(&skill));
    assert!(!timeline.available_skills(30.0).contains(&skill));
    assert!(timeline.available_skills(65.0).contains(&skill));

    assert!(!timeline.available_skills_snapshot(30.0).contains(&skill));
    assert!(timeline.available_skills_snapshot(65.0).contains(&skill));
}

#[test]
fn test_available_skills_leaves_skill_state() {
    let (mut timeline, fire) = gcd_timeline();
    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(10.0, fire).unwrap();

    timeline.available_skills(5.0);
    let gcd = timeline.skill(fire).and_then(|s| s.as_gcd()).unwrap();
    assert_eq!(gcd.last_use(), Some(0.0));

    // Diagnostics were never touched, and revalidation restores skill state
    assert!(timeline.events().iter().all(|e| e.is_executable()));
    timeline.revalidate();
    let gcd = timeline.skill(fire).and_then(|s| s.as_gcd()).unwrap();
    assert_eq!(gcd.last_use(), Some(10.0));
}

#[test]
fn test_available_snapshot_matches_live_query() {
    let mut timeline = Timeline::with_sample_catalog();
    let fire = key(&timeline, "Fire");
    let blizzard = key(&timeline, "Blizzard");
    let manafont = key(&timeline, "Manafont");

    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(0.5, blizzard).unwrap();
    timeline.add_skill_event(1.0, manafont).unwrap();

    for t in [0.0, 0.5, 1.0, 2.0, 2.5, 3.0, 50.0, 101.0] {
        let snapshot = timeline.available_skills_snapshot(t);
        // Snapshot leaves the catalog as the last revalidation left it
        let gcd = timeline.skill(fire).and_then(|s| s.as_gcd()).unwrap();
        assert_eq!(gcd.last_use(), Some(0.0));

        assert_eq!(snapshot, timeline.available_skills(t), "at {t}");
        timeline.revalidate();
    }
}

#[test]
fn test_non_finite_times_are_not_executable() {
    let (mut timeline, fire) = gcd_timeline();

    let nan = timeline.add_skill_event(f64::NAN, fire).unwrap();
    assert!(!nan.is_executable());
    assert_eq!(nan.error_message(), Some("invalid time NaN"));

    let inf = timeline.add_skill_event(f64::INFINITY, fire).unwrap();
    assert!(!inf.is_executable());
    assert_eq!(inf.error_message(), Some("invalid time inf"));

    // The refused uses never touched the GCD
    assert!(timeline.add_skill_event(0.0, fire).unwrap().is_executable());
    let gcd = timeline.skill(fire).and_then(|s| s.as_gcd()).unwrap();
    assert_eq!(gcd.last_use(), Some(0.0));

    let stats = timeline.statistics();
    assert_eq!(stats.total_uses, 1);
    assert_eq!(stats.total_potency, 180);
}

#[test]
fn test_move_to_non_finite_time_fails_event() {
    let (mut timeline, fire) = gcd_timeline();
    let first = timeline.add_skill_event(0.0, fire).unwrap().id();
    let second = timeline.add_skill_event(1.0, fire).unwrap().id();
    assert!(!timeline.event(second).unwrap().is_executable());

    let moved = timeline.move_skill_event(first, f64::NAN).unwrap();
    assert!(!moved.is_executable());
    assert_eq!(moved.error_message(), Some("invalid time NaN"));

    // With the 0.0s use gone, the 1.0s use goes through
    assert!(timeline.event(second).unwrap().is_executable());
    assert_eq!(timeline.statistics().total_uses, 1);
}

#[test]
fn test_available_skills_at_non_finite_time_is_empty() {
    let (mut timeline, fire) = gcd_timeline();
    timeline.add_skill_event(0.0, fire).unwrap();

    assert!(timeline.available_skills(f64::NAN).is_empty());
    assert!(timeline.available_skills_snapshot(f64::INFINITY).is_empty());
    assert!(timeline.available_skills(f64::NEG_INFINITY).is_empty());
}

#[test]
fn test_event_statuses_and_descriptions() {
    let mut timeline = Timeline::with_sample_catalog();
    let fire = key(&timeline, "Fire");
    timeline.add_skill_event(0.0, fire).unwrap();
    timeline.add_skill_event(1.0, fire).unwrap();

    let statuses = timeline.event_statuses();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[1].skill_name, "Fire");
    assert_eq!(statuses[1].error_message.as_deref(), Some("GCD remaining 1.50s"));

    let lines: Vec<String> = timeline
        .events()
        .iter()
        .map(|e| timeline.describe_event(e))
        .collect();
    assert_eq!(lines, ["0.00s: ✓ Fire", "1.00s: ✗ Fire (GCD remaining 1.50s)"]);
}

#[test]
fn test_catalog_lookup() {
    let timeline = Timeline::with_sample_catalog();
    assert_eq!(timeline.skills().len(), 9);
    assert_eq!(timeline.skill_keys().len(), 9);

    let fire = timeline.find_skill(SkillId(141)).unwrap();
    assert_eq!(timeline.skill(fire).unwrap().name(), "Fire");
    assert_eq!(timeline.find_skill_by_name("fire"), Some(fire));
    assert!(timeline.find_skill(SkillId(0)).is_none());
}

#[test]
fn test_from_config() {
    let config = PlannerConfig {
        spell_speed: 1700,
        total_time_secs: 120.0,
        load_sample_catalog: false,
    };
    let timeline = Timeline::from_config(&config);
    assert_eq!(timeline.spell_speed(), 1700);
    assert_eq!(timeline.total_time(), 120.0);
    assert!(timeline.skills().is_empty());

    let timeline = Timeline::from_config(&PlannerConfig::default());
    assert_eq!(timeline.skills().len(), 9);
    assert_eq!(timeline.spell_speed_modifier(), 1.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_timeline_serializes_mutation() {
    let shared = Timeline::with_sample_catalog().into_shared();
    let fire = key(&*shared.lock().await, "Fire");

    let mut handles = Vec::new();
    for i in 0..20u32 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            let mut timeline = shared.lock().await;
            timeline.add_skill_event(f64::from(i) * 2.5, fire).unwrap();
            let _ = timeline.available_skills(f64::from(i));
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut timeline = shared.lock().await;
    timeline.revalidate();
    assert_eq!(timeline.events().len(), 20);
    assert!(timeline.events().iter().all(|e| e.is_executable()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

/// Sample catalog plus a 3-charge ability so charge replay is exercised
fn property_timeline() -> Timeline {
    let mut timeline = Timeline::with_sample_catalog();
    timeline.add_ability_skill(
        AbilitySkill::new(SkillInfo::new("Charged", 9999), 30.0).with_max_charges(3),
    );
    timeline
}

/// Place `(half_seconds, skill_index)` pairs and return sorted outcomes
fn place_all(placements: &[(u16, usize)]) -> Vec<(u16, usize, bool)> {
    let mut timeline = property_timeline();
    let keys = timeline.skill_keys();
    for &(half_secs, skill) in placements {
        timeline
            .add_skill_event(f64::from(half_secs) / 2.0, keys[skill])
            .unwrap();
    }

    let mut results: Vec<_> = timeline
        .events()
        .iter()
        .map(|e| ((e.time() * 2.0) as u16, e.skill().index(), e.is_executable()))
        .collect();
    results.sort();
    results
}

proptest! {
    #[test]
    fn outcome_is_independent_of_placement_order(
        placements in prop::collection::vec((0u16..240, 0usize..10), 1..24)
    ) {
        let mut reversed = placements.clone();
        reversed.reverse();
        prop_assert_eq!(place_all(&placements), place_all(&reversed));
    }

    #[test]
    fn revalidation_is_idempotent(
        placements in prop::collection::vec((0u16..240, 0usize..10), 1..24)
    ) {
        let mut timeline = property_timeline();
        let keys = timeline.skill_keys();
        for (half_secs, skill) in placements {
            timeline.add_skill_event(f64::from(half_secs) / 2.0, keys[skill]).unwrap();
        }

        let before = outcomes(&timeline);
        timeline.revalidate();
        prop_assert_eq!(before, outcomes(&timeline));
    }
}
