//! End-to-end properties of the palette engine
//!
//! These tests exercise the whole core surface together: formula
//! evaluation, the share codec, randomize ranges, the animated
//! transition, FIFO sampling, and the store/debounce/persist pipeline
//! that ties a session together.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cospal_core::{
    Color, Debouncer, GradientRaster, Palette, Parameter, PaletteStore, RandomizeTransition,
    SampleList, RANDOMIZE_DURATION,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reference_palette() -> Palette {
    Palette::new(
        Parameter::new(0.5, 0.5, 0.5),
        Parameter::new(0.5, 0.5, 0.5),
        Parameter::new(1.0, 1.0, 1.0),
        Parameter::new(0.0, 0.0, 0.0),
    )
}

#[test]
fn evaluation_matches_the_cosine_formula() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..25 {
        let palette = Palette::zero().randomized(&mut rng);
        for i in 0..=20 {
            let x = f64::from(i) / 20.0;
            let color = palette.color_at(x);
            let params = [
                (palette.a.r, palette.b.r, palette.c.r, palette.d.r),
                (palette.a.g, palette.b.g, palette.c.g, palette.d.g),
                (palette.a.b, palette.b.b, palette.c.b, palette.d.b),
            ];
            for (ch, (a, b, c, d)) in params.iter().enumerate() {
                let expected = a + b * (std::f64::consts::TAU * (c * x + d)).cos();
                assert!((color[ch] - expected).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn share_codes_survive_a_full_round_trip() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let palette = Palette::zero().randomized(&mut rng);
        let code = palette.to_share();
        let decoded = Palette::from_share(&code).unwrap();
        for (orig, back) in [
            (palette.a, decoded.a),
            (palette.b, decoded.b),
            (palette.c, decoded.c),
            (palette.d, decoded.d),
        ] {
            for (o, r) in [(orig.r, back.r), (orig.g, back.g), (orig.b, back.b)] {
                assert!((o - r).abs() < 5e-4, "lost more than codec precision");
            }
        }
        // encoding is stable across one round trip
        assert_eq!(decoded.to_share(), code);
    }
}

#[test]
fn malformed_share_codes_never_decode() {
    for bad in [
        "",
        "0.5",
        "0.5c0.5c0.5",
        "0c0c0p0c0c0p0c0c0p0c0c0p0c0c0",
        "ac b cp0c0c0p0c0c0p0c0c0",
        "0c0cinfp0c0c0p0c0c0p0c0c0",
    ] {
        assert!(Palette::from_share(bad).is_err(), "accepted {bad:?}");
    }
}

#[test]
fn randomize_respects_per_parameter_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let palette = Palette::zero().randomized(&mut rng);
        for p in [palette.a, palette.b] {
            for v in [p.r, p.g, p.b] {
                assert!((-0.125..1.125).contains(&v));
            }
        }
        for v in [palette.c.r, palette.c.g, palette.c.b] {
            assert!((0.0..2.0).contains(&v));
        }
        for v in [palette.d.r, palette.d.g, palette.d.b] {
            assert!((0.0..1.0).contains(&v));
        }
    }
}

#[test]
fn transition_interpolates_monotonically_and_lands_on_target() {
    let mut rng = StdRng::seed_from_u64(4);
    let source = Palette::zero().randomized(&mut rng);
    let start = Instant::now();
    let transition = RandomizeTransition::new(&source, &mut rng, start);
    let target = *transition.target();

    let mut prev = source;
    for ms in (0..=500).step_by(10) {
        let now = start + Duration::from_millis(ms);
        let at = transition.palette_at(now);
        // every coefficient moves toward its target, never past it
        let fields = |p: &Palette| {
            [
                p.a.r, p.a.g, p.a.b, p.b.r, p.b.g, p.b.b, p.c.r, p.c.g, p.c.b, p.d.r, p.d.g,
                p.d.b,
            ]
        };
        for ((s, t), (p, v)) in fields(&source)
            .iter()
            .zip(fields(&target))
            .zip(fields(&prev).iter().zip(fields(&at)))
        {
            if t >= *s {
                assert!(v >= *p - 1e-12 && v <= t + 1e-12);
            } else {
                assert!(v <= *p + 1e-12 && v >= t - 1e-12);
            }
        }
        prev = at;
    }

    assert_eq!(transition.palette_at(start + RANDOMIZE_DURATION), target);
    assert!(transition.is_complete(start + RANDOMIZE_DURATION));
}

#[test]
fn clicking_the_gradient_samples_the_rendered_buffer() {
    let palette = reference_palette();
    let raster = GradientRaster::render(&palette, 200);
    let mut samples = SampleList::new();

    // click at the left edge, the middle, and in between
    for u in [0.0, 0.25, 0.5] {
        let color = raster.sample(u).unwrap();
        samples.push(color);
    }

    assert_eq!(samples.colors()[0], Color::rgb(255, 255, 255));
    assert_eq!(samples.colors()[2], Color::rgb(0, 0, 0));
    assert_eq!(samples.len(), 3);
}

#[test]
fn twenty_appends_keep_the_last_fifteen() {
    let mut samples = SampleList::new();
    for i in 0u8..20 {
        samples.push(Color::rgb(i, i, i));
    }
    assert_eq!(samples.len(), 15);
    let expected: Vec<Color> = (5u8..20).map(|i| Color::rgb(i, i, i)).collect();
    assert_eq!(samples.colors(), expected.as_slice());
}

#[test]
fn store_notifies_render_then_persist_with_settled_state() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut store = PaletteStore::new(Palette::zero());

    let render_log = Rc::clone(&log);
    store.subscribe(move |p| render_log.borrow_mut().push(("render", p.a.r)));
    let persist_log = Rc::clone(&log);
    store.subscribe(move |p| persist_log.borrow_mut().push(("persist", p.a.r)));

    store.update(|p| {
        p.a.r = 0.25;
        p.b.r = 0.75;
    });

    // both listeners saw the fully-applied change, render first
    assert_eq!(*log.borrow(), vec![("render", 0.25), ("persist", 0.25)]);
}

#[test]
fn debounced_persistence_fires_once_after_quiescence() {
    let mut debouncer = Debouncer::default();
    let t0 = Instant::now();

    // a burst of edits keeps pushing the deadline out
    for ms in [0u64, 100, 200, 300] {
        debouncer.poke(t0 + Duration::from_millis(ms));
        assert!(!debouncer.fire(t0 + Duration::from_millis(ms)));
    }
    assert!(!debouncer.fire(t0 + Duration::from_millis(700)));
    assert!(debouncer.fire(t0 + Duration::from_millis(800)));
    assert!(!debouncer.fire(t0 + Duration::from_millis(900)));
}

#[test]
fn session_state_survives_a_save_and_restore() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette");

    let mut rng = StdRng::seed_from_u64(6);
    let palette = Palette::zero().randomized(&mut rng);
    cospal_core::save_palette(&path, &palette).unwrap();

    let restored = cospal_core::load_palette(&path).unwrap().unwrap();
    // restored to codec precision, and byte-identical when re-encoded
    assert_eq!(restored.to_share(), palette.to_share());
}

#[test]
fn average_hue_theming_inputs_are_stable() {
    let raster = GradientRaster::render(&reference_palette(), 256);
    let avg = raster.average().unwrap();
    // a symmetric cosine averages to mid gray
    assert!((i32::from(avg.r) - 128).abs() <= 2);
    assert!((i32::from(avg.g) - 128).abs() <= 2);
    assert!((i32::from(avg.b) - 128).abs() <= 2);
    assert!(raster.average_hue().is_some());
}
