// Host-side tests for screen-space star picking.

mod common;

use asterism_core::catalog::StarLayer;
use asterism_core::geometry::project_to_screen;
use asterism_core::pick::*;
use asterism_core::HIT_RADIUS_PX;
use common::*;
use glam::Vec2;

#[test]
fn nearest_screen_point_hits_first_within_radius() {
    let points = [Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0)];
    let (i, d2) = nearest_screen_point(Vec2::new(108.0, 100.0), points).unwrap();
    assert_eq!(i, 0);
    assert_eq!(d2, 64.0);
    assert!(within_hit_radius(d2));
}

#[test]
fn nearest_screen_point_between_points_is_a_miss() {
    let points = [Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0)];
    let (_, d2) = nearest_screen_point(Vec2::new(150.0, 150.0), points).unwrap();
    assert!(!within_hit_radius(d2));
}

#[test]
fn nearest_screen_point_tie_keeps_first() {
    let points = [Vec2::new(90.0, 100.0), Vec2::new(110.0, 100.0)];
    let (i, _) = nearest_screen_point(Vec2::new(100.0, 100.0), points).unwrap();
    assert_eq!(i, 0);
}

#[test]
fn nearest_screen_point_empty() {
    assert!(nearest_screen_point(Vec2::ZERO, Vec::<Vec2>::new()).is_none());
}

#[test]
fn hit_radius_is_inclusive() {
    assert!(within_hit_radius(HIT_RADIUS_PX * HIT_RADIUS_PX));
    assert!(!within_hit_radius((HIT_RADIUS_PX + 0.01).powi(2)));
}

#[test]
fn find_nearest_star_across_layers() {
    let catalog = test_catalog();
    let layers = catalog.layers();
    let camera = test_camera();
    let vp = test_viewport();
    let b = project_to_screen(catalog.position(1).unwrap(), &camera, vp);

    let hit = find_nearest_star(b + Vec2::new(3.0, -2.0), &layers, &camera, vp).expect("hit");
    assert_eq!(hit.star.original_index, 1);
    assert_eq!(hit.star.record.name, "B");
    assert!(hit.distance <= HIT_RADIUS_PX);
    assert_eq!(hit.star.position, catalog.position(1).unwrap());
}

#[test]
fn find_nearest_star_misses_empty_sky() {
    let catalog = test_catalog();
    let layers = catalog.layers();
    assert!(find_nearest_star(Vec2::new(20.0, 20.0), &layers, &test_camera(), test_viewport()).is_none());
}

#[test]
fn find_nearest_star_ignores_points_behind_camera() {
    // A lone star straight behind the camera would mirror onto the centre.
    let mut layer = StarLayer::default();
    layer.push(glam::Vec3::new(0.0, 0.0, 100.0), record("behind", 90.0, 0.0));
    let hit = find_nearest_star(Vec2::new(400.0, 300.0), &[layer], &test_camera(), test_viewport());
    assert!(hit.is_none());
}

#[test]
fn find_nearest_star_with_no_layers() {
    assert!(find_nearest_star(Vec2::new(400.0, 300.0), &[], &test_camera(), test_viewport()).is_none());
}

/// World point (on the sky sphere) that projects to pixel `(px, py)` of the
/// shared test view.
fn star_at_pixel(px: f32, py: f32) -> glam::Vec3 {
    let vp = test_viewport();
    let ndc = glam::Vec3::new(px / vp.width * 2.0 - 1.0, 1.0 - py / vp.height * 2.0, 0.5);
    let on_ray = test_camera().view_projection().inverse().project_point3(ndc);
    on_ray.normalize() * 100.0
}

fn layer_of(stars: &[(usize, f32, f32)]) -> StarLayer {
    let mut layer = StarLayer::default();
    for &(index, px, py) in stars {
        let mut r = record(&format!("S{}", index), 0.0, 0.0);
        r.original_index = index;
        layer.push(star_at_pixel(px, py), r);
    }
    layer
}

#[test]
fn find_nearest_star_hits_within_radius_and_misses_between() {
    let layers = [layer_of(&[(0, 100.0, 100.0)]), layer_of(&[(1, 200.0, 200.0)])];
    let (camera, vp) = (test_camera(), test_viewport());

    let hit = find_nearest_star(Vec2::new(108.0, 100.0), &layers, &camera, vp).expect("hit");
    assert_eq!(hit.star.original_index, 0);
    assert!((hit.distance - 8.0).abs() < 0.01, "distance {}", hit.distance);

    assert!(find_nearest_star(Vec2::new(150.0, 150.0), &layers, &camera, vp).is_none());
}

#[test]
fn find_nearest_star_tie_across_layers_keeps_earlier_layer() {
    let layers = [layer_of(&[(5, 300.0, 300.0)]), layer_of(&[(9, 300.0, 300.0)])];
    let hit = find_nearest_star(Vec2::new(303.0, 300.0), &layers, &test_camera(), test_viewport())
        .expect("hit");
    assert_eq!(hit.star.original_index, 5);
}

#[test]
fn find_nearest_star_prefers_closer_star_in_later_layer() {
    let layers = [layer_of(&[(5, 300.0, 300.0)]), layer_of(&[(9, 306.0, 300.0)])];
    let hit = find_nearest_star(Vec2::new(305.0, 300.0), &layers, &test_camera(), test_viewport())
        .expect("hit");
    assert_eq!(hit.star.original_index, 9);
}
