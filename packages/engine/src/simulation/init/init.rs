use image::RgbaImage;

use crate::core::random::RandomSource;
use crate::domain::SandConfig;
use crate::systems::cache::FrameCache;
use crate::systems::classify::populate_grid;
use crate::systems::reveal::RevealScanner;

use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn create_core(prepared: RgbaImage, config: SandConfig, mut rng: Box<dyn RandomSource>) -> SimulationCore {
    let (grid, summary) = populate_grid(&prepared, &config, rng.as_mut());
    sand_log!(
        "sandfall grid {}x{} ({} falling of {})",
        grid.cols(),
        grid.rows(),
        summary.falling(),
        grid.size()
    );

    SimulationCore {
        scanner: RevealScanner::new(config.enable_scan),
        cache: FrameCache::new(),
        grid,
        rng,
        prepared,
        summary,
        config,
        frame: 0,
        physics_ticks: 0,
        started: false,
        replay_shown: None,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

/// Back to frame 0. The random source keeps running, so the new population
/// differs from the first one wherever the upward roll is involved.
pub(super) fn reset_core(core: &mut SimulationCore) {
    let (grid, summary) = populate_grid(&core.prepared, &core.config, core.rng.as_mut());
    core.grid = grid;
    core.summary = summary;
    core.scanner = RevealScanner::new(core.config.enable_scan);
    core.cache.clear();
    core.frame = 0;
    core.physics_ticks = 0;
    core.started = false;
    core.replay_shown = None;
    core.perf_stats.reset();
    sand_log!("sandfall reset");
}
