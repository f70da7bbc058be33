// Host-side tests for the mode state machine and the flows that tie the
// drawing, store and glow animator together.

mod common;

use asterism_core::drawing::Toggle;
use asterism_core::glow::GlowFrame;
use asterism_core::*;
use common::*;
use glam::Vec2;

const EMPTY_SKY: Vec2 = Vec2::new(20.0, 20.0);

fn create_with(session: &mut TestSession, stars: &[usize]) {
    session.switch_mode(Mode::Create);
    for &i in stars {
        assert!(matches!(click_star(session, i, 0.0), ClickOutcome::Toggled(Toggle::Added, _)));
    }
}

/// Save a shape and run its replay to the end.
fn saved(session: &mut TestSession, name: &str, stars: &[usize]) -> Constellation {
    create_with(session, stars);
    let c = session.save_current(name, 0.0, 1).unwrap();
    while session.tick(GLOW_DURATION_MS).is_some() {}
    c
}

#[test]
fn starts_in_explore_with_nothing_drawn() {
    let s = new_session();
    assert_eq!(s.mode(), Mode::Explore);
    assert_eq!(s.scene().live_count(), 0);
    assert_eq!(s.star_count_label(), "Stars selected: 0");
    assert_eq!(s.layers().iter().map(|l| l.len()).sum::<usize>(), 5);
}

#[test]
fn switching_to_the_current_mode_is_a_no_op() {
    let mut s = new_session();
    let rev = s.list_revision();
    s.switch_mode(Mode::Explore);
    assert_eq!(s.list_revision(), rev);
}

#[test]
fn create_click_toggles_star_under_cursor() {
    let mut s = new_session();
    s.switch_mode(Mode::Create);
    assert_eq!(click_star(&mut s, 2, 0.0), ClickOutcome::Toggled(Toggle::Added, 2));
    assert_eq!(s.drawing().selection().indices(), vec![2]);
    assert_eq!(s.star_count_label(), "Stars selected: 1");
    assert_eq!(click_star(&mut s, 2, 10.0), ClickOutcome::Toggled(Toggle::Removed, 2));
    assert!(s.drawing().selection().is_empty());
}

#[test]
fn create_click_on_empty_sky_is_ignored() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1]);
    assert_eq!(s.primary_click(EMPTY_SKY, 0.0), ClickOutcome::Missed);
    assert_eq!(s.drawing().selection().len(), 2);
}

#[test]
fn secondary_and_reset_key_clear_in_create() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1]);
    s.secondary_action();
    assert!(s.drawing().selection().is_empty());
    assert_eq!(s.scene().live_count(), 0);

    create_with(&mut s, &[0, 1, 2]);
    s.reset_key();
    assert!(s.drawing().selection().is_empty());
    assert_eq!(s.scene().live_count(), 0);
}

#[test]
fn reset_key_does_nothing_in_explore() {
    let mut s = new_session();
    let c = saved(&mut s, "Arc", &[0, 1]);
    s.display_constellation(&c.id, 5000.0);
    let live = s.scene().live_count();
    s.reset_key();
    assert_eq!(s.scene().live_count(), live);
}

#[test]
fn switching_to_explore_clears_three_markers_and_the_polyline() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1, 2]);
    assert_eq!(s.scene().markers.len(), 3);
    assert_eq!(s.scene().lines.len(), 1);

    s.switch_mode(Mode::Explore);
    assert!(s.scene().markers.is_empty());
    assert!(s.scene().lines.is_empty());
    assert!(s.drawing().selection().is_empty());
    assert!(s.drawing().polyline().is_none());
}

#[test]
fn reentering_create_resumes_the_shape() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1]);
    s.switch_mode(Mode::Create);
    assert_eq!(s.drawing().selection().len(), 2);
}

#[test]
fn can_save_tracks_selection_and_name() {
    let mut s = new_session();
    create_with(&mut s, &[0]);
    assert!(!s.can_save("Arc"));
    click_star(&mut s, 1, 0.0);
    assert!(s.can_save("Arc"));
    assert!(!s.can_save("  "));
}

#[test]
fn save_persists_switches_to_explore_and_replays() {
    let mut s = new_session();
    create_with(&mut s, &[3, 0, 1]);
    let color = s.drawing().selection().color().unwrap();
    let rev = s.list_revision();

    let c = s.save_current("  Harp ", 0.0, 99).unwrap();
    assert_eq!(c.name, "Harp");
    assert_eq!(c.star_indices, vec![3, 0, 1]);
    assert_eq!(c.color, color);
    assert!(c.id.starts_with("con_99_"));

    assert_eq!(s.mode(), Mode::Explore);
    assert!(s.list_revision() > rev);
    assert!(s.drawing().selection().is_empty());
    assert!(s.is_animating());
    assert_eq!(s.animating_id(), Some(c.id.as_str()));
    assert_eq!(s.highlighted(), Some(c.id.as_str()));
    assert_eq!(s.scene().markers.len(), 3);

    let msgs = &s.notifier().messages;
    assert_eq!(msgs[0].1, Severity::Success);
    assert!(msgs[0].0.contains("'Harp' saved successfully!"));
    assert_eq!(msgs[1], ("Displaying 'Harp'".to_string(), Severity::Info));
}

#[test]
fn save_errors_leave_everything_alone() {
    let mut s = new_session();
    saved(&mut s, "Orion", &[0, 1]);
    create_with(&mut s, &[2, 3]);

    assert_eq!(
        s.save_current("ORION", 0.0, 2),
        Err(SaveError::DuplicateName("ORION".into()))
    );
    assert_eq!(s.save_current("", 0.0, 2), Err(SaveError::InvalidInput));
    assert_eq!(s.mode(), Mode::Create);
    assert_eq!(s.drawing().selection().len(), 2);
    assert_eq!(s.constellations().len(), 1);

    s.reset_drawing();
    click_star(&mut s, 2, 0.0);
    assert_eq!(s.save_current("Lonely", 0.0, 3), Err(SaveError::InvalidInput));
    assert_eq!(s.constellations().len(), 1);
}

#[test]
fn replay_finishes_and_clears_markers_in_explore() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1, 2]);
    s.save_current("Tri", 1000.0, 1).unwrap();

    assert_eq!(s.tick(1000.0), Some(GlowFrame::Running));
    assert_eq!(s.tick(1750.0), Some(GlowFrame::Running));
    assert_eq!(s.scene().lines.len(), 1);
    assert_eq!(s.scene().markers.len(), 3);

    assert_eq!(s.tick(2500.0), Some(GlowFrame::Finished));
    assert!(!s.is_animating());
    assert_eq!(s.scene().live_count(), 0);
    assert_eq!(s.tick(2600.0), None);
}

#[test]
fn clicks_are_ignored_while_replaying() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1]);
    s.save_current("Pair", 0.0, 1).unwrap();
    assert_eq!(s.primary_click(EMPTY_SKY, 10.0), ClickOutcome::Ignored);
    assert_eq!(click_star(&mut s, 3, 10.0), ClickOutcome::Ignored);
    assert_eq!(s.scene().markers.len(), 2);
}

#[test]
fn explore_click_on_empty_sky_clears_the_display() {
    let mut s = new_session();
    let c = saved(&mut s, "Pair", &[0, 1]);
    s.display_constellation(&c.id, 10_000.0);
    assert_eq!(s.primary_click(EMPTY_SKY, 10_001.0), ClickOutcome::Ignored);
    while s.tick(12_000.0).is_some() {}

    assert_eq!(s.primary_click(EMPTY_SKY, 12_100.0), ClickOutcome::Cleared);
    assert_eq!(s.scene().live_count(), 0);
    assert!(s.drawing().markers().is_empty());
}

#[test]
fn explore_star_click_has_no_effect() {
    let mut s = new_session();
    assert_eq!(click_star(&mut s, 1, 0.0), ClickOutcome::StarInExplore(1));
    assert!(s.drawing().selection().is_empty());
    assert_eq!(s.scene().live_count(), 0);
}

#[test]
fn secondary_in_explore_stops_replay_and_clears_highlight() {
    let mut s = new_session();
    let c = saved(&mut s, "Pair", &[0, 1]);
    s.display_constellation(&c.id, 5000.0);
    s.tick(5700.0);
    assert!(s.is_animating());

    s.secondary_action();
    assert!(!s.is_animating());
    assert_eq!(s.highlighted(), None);
    assert_eq!(s.scene().live_count(), 0);
    assert_eq!(s.tick(5800.0), None);
}

#[test]
fn deleting_the_replayed_constellation_tears_down_immediately() {
    let mut s = new_session();
    let c = saved(&mut s, "Doomed", &[0, 1, 2]);
    s.display_constellation(&c.id, 5000.0);
    s.tick(5700.0);
    assert_eq!(s.scene().lines.len(), 1);

    assert!(s.delete_constellation(&c.id));
    assert!(!s.is_animating());
    assert!(s.scene().lines.is_empty());
    assert!(s.scene().markers.is_empty());
    assert_eq!(s.highlighted(), None);
    assert!(s.constellations().is_empty());
    assert_eq!(s.tick(5800.0), None);
}

#[test]
fn deleting_another_constellation_keeps_the_replay() {
    let mut s = new_session();
    let a = saved(&mut s, "A", &[0, 1]);
    let b = saved(&mut s, "B", &[2, 3]);
    s.display_constellation(&a.id, 5000.0);
    assert!(s.delete_constellation(&b.id));
    assert_eq!(s.animating_id(), Some(a.id.as_str()));
    assert!(!s.delete_constellation(&b.id));
}

#[test]
fn displaying_replaces_the_previous_replay() {
    let mut s = new_session();
    let a = saved(&mut s, "A", &[0, 1]);
    let b = saved(&mut s, "B", &[2, 3, 1]);
    s.display_constellation(&a.id, 5000.0);
    s.tick(5700.0);
    s.display_constellation(&b.id, 6000.0);
    assert_eq!(s.animating_id(), Some(b.id.as_str()));
    assert_eq!(s.scene().markers.len(), 3);
    assert!(s.scene().lines.is_empty());
    assert_eq!(s.highlighted(), Some(b.id.as_str()));
}

#[test]
fn display_unknown_id_changes_nothing() {
    let mut s = new_session();
    assert_eq!(s.display_constellation("con_nope", 0.0), DisplayOutcome::NotFound);
    assert!(s.notifier().messages.is_empty());
    assert!(!s.is_animating());
}

#[test]
fn display_skips_missing_stars_and_warns_below_two() {
    let mut storage = MemoryStore::new();
    storage
        .set(
            STORAGE_KEY,
            r##"[{"id":"con_1_a","name":"Ghost","starIndices":[0,404],"color":"#ffffff"},
                 {"id":"con_2_b","name":"Partial","starIndices":[0,404,1],"color":"#00ff00"}]"##,
        )
        .unwrap();
    let mut s = session_with(storage);

    assert_eq!(s.display_constellation("con_1_a", 0.0), DisplayOutcome::TooFewStars);
    assert!(!s.is_animating());
    assert_eq!(s.scene().live_count(), 0);
    let (msg, sev) = s.notifier().messages.last().unwrap().clone();
    assert_eq!(sev, Severity::Warning);
    assert_eq!(msg, "Constellation 'Ghost' needs at least 2 stars to display a line.");

    assert_eq!(s.display_constellation("con_2_b", 0.0), DisplayOutcome::Started);
    assert_eq!(s.scene().markers.len(), 2);
}

#[test]
fn entering_create_stops_replay_and_clears_highlight() {
    let mut s = new_session();
    let c = saved(&mut s, "Pair", &[0, 1]);
    s.display_constellation(&c.id, 5000.0);
    s.tick(5600.0);
    s.switch_mode(Mode::Create);
    assert!(!s.is_animating());
    assert!(s.scene().lines.is_empty());
    assert_eq!(s.highlighted(), None);
}

#[test]
fn clear_all_resets_the_drawing() {
    let mut s = new_session();
    create_with(&mut s, &[0, 1, 3]);
    s.clear_all();
    assert!(s.drawing().selection().is_empty());
    assert_eq!(s.scene().live_count(), 0);
}

#[test]
fn refresh_hook_rescales_markers_for_the_current_view() {
    let mut s = new_session();
    create_with(&mut s, &[0]);
    s.refresh_marker_scales(1000.0);
    let h = s.drawing().markers()[0].handle;
    let before = s.scene().markers[&h].scale;

    let mut cam = test_camera();
    cam.fovy_radians *= 0.5;
    s.set_view(&cam, test_viewport());
    s.refresh_marker_scales(1100.0);
    assert!(s.scene().markers[&h].scale < before);
}
