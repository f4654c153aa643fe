// Host-side tests for the starfield engine.

use warpfield_core::*;

const W: f64 = 1000.0;
const H: f64 = 800.0;

fn make_starfield() -> Starfield {
    Starfield::new(W, H, StarfieldParams::default(), 42).unwrap()
}

fn star(x: f64, y: f64, z: f64, size: f64) -> Star {
    Star { x, y, z, size }
}

#[test]
fn new_scatters_200_stars_inside_the_surface() {
    let sf = make_starfield();
    assert_eq!(sf.width(), W);
    assert_eq!(sf.height(), H);
    assert_eq!(sf.params().count, STAR_COUNT);
    assert_eq!(sf.params().z_step, STAR_Z_STEP);
    assert_eq!(sf.stars().len(), STAR_COUNT);
    assert_eq!(STAR_COUNT, 200);
    for s in sf.stars() {
        assert!((0.0..W).contains(&s.x), "x out of range: {}", s.x);
        assert!((0.0..H).contains(&s.y), "y out of range: {}", s.y);
        assert!(s.z > 0.0 && s.z <= W, "z out of range: {}", s.z);
        assert!((0.0..STAR_MAX_SIZE).contains(&s.size), "size out of range: {}", s.size);
    }
}

#[test]
fn same_seed_gives_same_field() {
    let a = make_starfield();
    let b = make_starfield();
    assert_eq!(a.stars(), b.stars());
    let c = Starfield::new(W, H, StarfieldParams::default(), 7).unwrap();
    assert_ne!(a.stars(), c.stars());
}

#[test]
fn depth_stays_in_range_and_count_is_constant() {
    let mut sf = make_starfield();
    for frame in 0..2000 {
        sf.advance();
        assert_eq!(sf.stars().len(), 200, "count changed at frame {frame}");
        for s in sf.stars() {
            assert!(s.z > 0.0 && s.z <= W, "z={} at frame {frame}", s.z);
        }
    }
}

#[test]
fn every_star_recycles_within_500_steps_on_a_1000_wide_surface() {
    let mut sf = make_starfield();
    let initial: Vec<f64> = sf.stars().iter().map(|s| s.z).collect();
    assert!(initial.iter().all(|z| *z > 0.0 && *z <= W));
    for _ in 0..500 {
        sf.advance();
    }
    // 500 steps of 2 cover the full depth, so each star passed the viewer at least once
    assert!(sf.recycled_total() >= 200, "recycled {}", sf.recycled_total());
}

#[test]
fn recycled_star_respawns_on_the_far_plane() {
    let stars = vec![star(10.0, 20.0, 1.5, 1.0), star(500.0, 400.0, 600.0, 1.0)];
    let mut sf = Starfield::from_stars(W, H, StarfieldParams::default(), stars, 1).unwrap();
    let recycled = sf.advance();
    assert_eq!(recycled, 1);
    assert_eq!(sf.recycled_total(), 1);
    let s = sf.stars()[0];
    assert_eq!(s.z, W);
    assert!((0.0..W).contains(&s.x));
    assert!((0.0..H).contains(&s.y));
    assert_eq!(sf.stars()[1].z, 598.0);
}

#[test]
fn star_landing_exactly_on_zero_is_recycled_before_projection() {
    let stars = vec![star(100.0, 100.0, STAR_Z_STEP, 1.5)];
    let mut sf = Starfield::from_stars(W, H, StarfieldParams::default(), stars, 3).unwrap();
    let mut surface = RecordingSurface::new(W, H);
    assert_eq!(sf.frame(&mut surface), 1);
    let circles: Vec<_> = surface.circles().collect();
    assert_eq!(circles.len(), 1);
    let (center, radius, color) = circles[0];
    assert!(center.x.is_finite() && center.y.is_finite());
    assert_eq!(radius, 0.0);
    assert_eq!(color.a, 0.0);
}

#[test]
fn far_plane_star_is_invisible() {
    let sf = make_starfield();
    let p = sf.project(&star(123.0, 456.0, W, 1.9));
    assert_eq!(p.radius, 0.0);
    assert_eq!(p.alpha, 0.0);
    // width / z == 1, so the star sits at its unprojected position
    assert!((p.center.x - 123.0).abs() < 1e-9);
    assert!((p.center.y - 456.0).abs() < 1e-9);
}

#[test]
fn near_star_reaches_full_size_and_opacity() {
    let sf = make_starfield();
    let p = sf.project(&star(W / 2.0, H / 2.0, 1e-9, 1.5));
    assert!((p.radius - 1.5 * STAR_SIZE_SCALE).abs() < 1e-6);
    assert!((p.alpha - 1.0).abs() < 1e-9);
    // the exact center never moves regardless of depth
    assert!((p.center.x - W / 2.0).abs() < 1e-9);
    assert!((p.center.y - H / 2.0).abs() < 1e-9);
}

#[test]
fn projection_scales_both_axes_by_width_over_depth() {
    let p = project_star(&star(750.0, 375.0, 500.0, 1.0), 1000.0, 500.0, STAR_SIZE_SCALE);
    // scale = 1000 / 500 = 2 on both axes, even though the surface is 2:1
    assert!((p.center.x - 1000.0).abs() < 1e-9);
    assert!((p.center.y - 500.0).abs() < 1e-9);
    assert!((p.alpha - 0.5).abs() < 1e-12);
    assert!((p.radius - 1.5).abs() < 1e-12);
}

#[test]
fn frame_fades_then_draws_each_star_once() {
    let mut sf = make_starfield();
    let mut surface = RecordingSurface::new(W, H);
    sf.frame(&mut surface);
    match &surface.commands[0] {
        DrawCommand::FillRect {
            origin,
            size,
            color,
        } => {
            assert_eq!(origin.x, 0.0);
            assert_eq!(origin.y, 0.0);
            assert_eq!(size.x, W);
            assert_eq!(size.y, H);
            assert_eq!(*color, TRAIL_FADE);
            assert_eq!(color.a, 0.1);
        }
        other => panic!("expected fade rect first, got {other:?}"),
    }
    assert!(!surface.commands.iter().any(|c| *c == DrawCommand::Clear));
    assert_eq!(surface.circles().count(), 200);
    for (_, radius, color) in surface.circles() {
        assert!(radius >= 0.0);
        assert!((0.0..=1.0).contains(&color.a));
        assert_eq!((color.r, color.g, color.b), (255, 255, 255));
    }
}

#[test]
fn frame_matches_advance_then_paint() {
    let mut stepped = make_starfield();
    let mut framed = make_starfield();
    let mut a = RecordingSurface::new(W, H);
    let mut b = RecordingSurface::new(W, H);
    for _ in 0..50 {
        stepped.advance();
        stepped.paint(&mut a);
        framed.frame(&mut b);
    }
    assert_eq!(stepped.stars(), framed.stars());
    assert_eq!(a.commands, b.commands);
}

#[test]
fn paint_does_not_move_stars() {
    let sf = make_starfield();
    let before = sf.stars().to_vec();
    let mut surface = RecordingSurface::new(W, H);
    sf.paint(&mut surface);
    assert_eq!(sf.stars(), &before[..]);
}

#[test]
fn empty_or_invalid_surfaces_are_rejected() {
    let err = Starfield::new(0.0, H, StarfieldParams::default(), 1).err();
    assert_eq!(
        err,
        Some(EngineError::EmptySurface {
            width: 0.0,
            height: H
        })
    );
    assert!(Starfield::new(W, 0.0, StarfieldParams::default(), 1).is_err());
    assert!(Starfield::new(f64::NAN, H, StarfieldParams::default(), 1).is_err());

    let params = StarfieldParams {
        z_step: 0.0,
        ..StarfieldParams::default()
    };
    assert_eq!(
        Starfield::new(W, H, params, 1).err(),
        Some(EngineError::InvalidStep(0.0))
    );
}

#[test]
fn custom_count_is_respected() {
    let params = StarfieldParams {
        count: 5,
        ..StarfieldParams::default()
    };
    let mut sf = Starfield::new(W, H, params, 9).unwrap();
    for _ in 0..600 {
        sf.advance();
    }
    assert_eq!(sf.stars().len(), 5);
}

#[test]
fn fresh_field_paints_only_finite_circles() {
    for seed in 0..20 {
        let sf = Starfield::new(W, H, StarfieldParams::default(), seed).unwrap();
        let mut surface = RecordingSurface::new(W, H);
        sf.paint(&mut surface);
        for (center, radius, color) in surface.circles() {
            assert!(center.x.is_finite() && center.y.is_finite(), "seed {seed}");
            assert!(radius.is_finite() && radius >= 0.0);
            assert!((0.0..=1.0).contains(&color.a));
        }
    }
}

fn seeded(stars: Vec<Star>) -> Result<Starfield, EngineError> {
    Starfield::from_stars(W, H, StarfieldParams::default(), stars, 11)
}

fn rejected_field(stars: Vec<Star>) -> (usize, &'static str, f64) {
    match seeded(stars).err() {
        Some(EngineError::StarOutOfRange {
            index,
            field,
            value,
        }) => (index, field, value),
        other => panic!("expected out-of-range star, got {other:?}"),
    }
}

#[test]
fn from_stars_rejects_depth_outside_the_field() {
    let ok = star(500.0, 400.0, 300.0, 1.0);
    assert_eq!(rejected_field(vec![ok, star(10.0, 10.0, 0.0, 1.0)]), (1, "z", 0.0));
    assert_eq!(rejected_field(vec![star(10.0, 10.0, -3.0, 1.0)]), (0, "z", -3.0));
    assert_eq!(rejected_field(vec![star(10.0, 10.0, 5000.0, 1.0)]), (0, "z", 5000.0));
    let (_, field, _) = rejected_field(vec![star(10.0, 10.0, f64::NAN, 1.0)]);
    assert_eq!(field, "z");
    // the far plane itself is inside the field
    assert!(seeded(vec![star(10.0, 10.0, W, 1.0)]).is_ok());
}

#[test]
fn from_stars_rejects_lateral_position_outside_the_surface() {
    assert_eq!(rejected_field(vec![star(-1.0, 10.0, 50.0, 1.0)]), (0, "x", -1.0));
    assert_eq!(rejected_field(vec![star(W, 10.0, 50.0, 1.0)]), (0, "x", W));
    assert_eq!(rejected_field(vec![star(10.0, -0.5, 50.0, 1.0)]), (0, "y", -0.5));
    assert_eq!(rejected_field(vec![star(10.0, H, 50.0, 1.0)]), (0, "y", H));
}

#[test]
fn from_stars_rejects_size_outside_the_range() {
    assert_eq!(rejected_field(vec![star(10.0, 10.0, 50.0, -0.1)]), (0, "size", -0.1));
    assert_eq!(
        rejected_field(vec![star(10.0, 10.0, 50.0, STAR_MAX_SIZE)]),
        (0, "size", STAR_MAX_SIZE)
    );
}

#[test]
fn accepted_stars_paint_inside_alpha_range() {
    let sf = seeded(vec![star(0.0, 0.0, 1e-6, 1.9), star(999.0, 799.0, W, 0.0)]).unwrap();
    let mut surface = RecordingSurface::new(W, H);
    sf.paint(&mut surface);
    for (center, _, color) in surface.circles() {
        assert!(center.x.is_finite() && center.y.is_finite());
        assert!((0.0..=1.0).contains(&color.a));
    }
}
