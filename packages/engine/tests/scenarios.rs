use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use sandfall_engine::core::grid::GridStore;
use sandfall_engine::systems::physics::step_physics;
use sandfall_engine::{
    Cell, FallCategory, Particle, ReplayToggle, SandConfig, SequenceSource, SimulationCore, Xorshift32,
};

fn gray(v: u8) -> Rgba<u8> {
    Rgba([v, v, v, 255])
}

#[test]
fn classification_picks_brightest_quarter_and_half() {
    // row-major brightness [10, 250, 130, 5]
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, gray(10));
    img.put_pixel(1, 0, gray(250));
    img.put_pixel(0, 1, gray(130));
    img.put_pixel(1, 1, gray(5));

    let config = SandConfig {
        top_threshold: 0.25,
        middle_threshold: 0.5,
        ..SandConfig::default()
    };
    let core = SimulationCore::from_prepared(img, config, Box::new(Xorshift32::new(9)));
    let grid = core.grid();

    let top = grid.particle(1, 0).unwrap();
    assert!(top.can_fall);
    assert!(matches!(top.fall_category, FallCategory::FastDown | FallCategory::Upward));

    let middle = grid.particle(0, 1).unwrap();
    assert_eq!(middle.fall_category, FallCategory::SlowDown);

    for (col, row) in [(0, 0), (1, 1)] {
        let p = grid.particle(col, row).unwrap();
        assert_eq!(p.fall_category, FallCategory::None);
        assert!(!p.can_fall);
    }
    assert_eq!(core.classification().falling(), 2);
}

#[test]
fn bright_faller_settles_through_darker_particle() {
    let mut grid = GridStore::new(1, 3);
    let faller = Particle::with_brightness(200, FallCategory::FastDown).revealed();
    let floor = Particle::with_brightness(50, FallCategory::SlowDown).revealed();
    grid.set(0, 0, Cell::Occupied(faller), 1);
    grid.set(0, 2, Cell::Occupied(floor), 1);

    let config = SandConfig::default();
    let mut rng = SequenceSource::new(vec![0]);

    step_physics(&mut grid, &config, &mut rng);
    assert_eq!(grid.particle(0, 1).map(|p| p.brightness), Some(200.0));
    assert_eq!(grid.fall_distance(0, 1), 2);
    assert!(grid.get(0, 0).is_empty());

    // 50 < 200: the faller swaps past the darker particle
    let outcome = step_physics(&mut grid, &config, &mut rng);
    assert_eq!(outcome.swapped, 1);
    assert_eq!(grid.particle(0, 2).map(|p| p.brightness), Some(200.0));
    assert_eq!(grid.particle(0, 1).map(|p| p.brightness), Some(50.0));

    // bottom of the column: nowhere left to go
    let before: Vec<Cell> = grid.cells().to_vec();
    step_physics(&mut grid, &config, &mut rng);
    let after: Vec<f32> = grid.cells().iter().map(Cell::brightness).collect();
    assert_eq!(after, before.iter().map(Cell::brightness).collect::<Vec<_>>());
}

#[test]
fn darker_faller_rests_on_brighter_particle() {
    let mut grid = GridStore::new(1, 2);
    let faller = Particle::with_brightness(40, FallCategory::SlowDown).revealed();
    let below = Particle::with_brightness(50, FallCategory::SlowDown).revealed();
    grid.set(0, 0, Cell::Occupied(faller), 1);
    grid.set(0, 1, Cell::Occupied(below), 1);

    let config = SandConfig::default();
    let mut rng = SequenceSource::new(vec![0]);
    for _ in 0..5 {
        let outcome = step_physics(&mut grid, &config, &mut rng);
        assert_eq!(outcome.moved, 0);
    }
    assert_eq!(grid.particle(0, 0).map(|p| p.brightness), Some(40.0));
    assert_eq!(grid.particle(0, 1).map(|p| p.brightness), Some(50.0));
}

#[test]
fn replay_loop_wraps_after_last_frame() {
    let img = RgbaImage::from_fn(4, 5, |x, y| gray((x * 60 + y * 7) as u8));
    let config = SandConfig { scan_speed: 1, ..SandConfig::default() };
    let mut core = SimulationCore::from_prepared(img, config, Box::new(Xorshift32::new(3)));

    let mut live = Vec::new();
    for _ in 0..5 {
        core.step();
        live.push(core.frame_pixels());
    }

    assert_eq!(core.toggle_replay(), ReplayToggle::Started);
    let mut order = Vec::new();
    for _ in 0..7 {
        core.step();
        let shown = core.frame_pixels();
        order.push(live.iter().position(|f| *f == shown).unwrap());
    }
    assert_eq!(order, vec![0, 1, 2, 3, 4, 0, 1]);
}

#[test]
fn encoded_image_runs_end_to_end() {
    let src = RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 90, 255]));
    let mut bytes = Vec::new();
    src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

    let config = SandConfig::from_json(r#"{"resolutionScale": 4, "enableScan": false}"#).unwrap();
    let mut core = SimulationCore::from_encoded(&bytes, config);
    // 2400 / 8 = 300 px long side, 4 px cells
    assert_eq!((core.cols(), core.rows()), (75, 56));

    let total = core.particle_count();
    for _ in 0..20 {
        core.step();
    }
    assert_eq!(core.particle_count(), total);
    assert_eq!(core.cached_frames(), 20);

    let png = core.export_png(Some(1)).unwrap();
    let still = image::load_from_memory(&png).unwrap();
    assert_eq!((still.width(), still.height()), (75 * 4, 56 * 4));
}
