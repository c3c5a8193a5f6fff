use crate::systems::physics::{step_physics, PhysicsOutcome};

use super::{render_extract, PerfTimer, SimulationCore};

pub(super) fn step(core: &mut SimulationCore) {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    if core.cache.is_replaying() {
        core.replay_shown = core.cache.advance_replay();
    } else {
        step_live(core, perf_on);
    }

    if let Some(t0) = step_start {
        core.perf_stats.step_ms = t0.elapsed_ms();
        core.perf_stats.cached_frames = core.cache.len() as u32;
        core.perf_stats.physics_ticks = core.physics_ticks as u32;
    }
}

fn step_live(core: &mut SimulationCore, perf_on: bool) {
    // === REVEAL ===
    // The scan line keys off the frame counter before it is bumped
    let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
    if !core.started {
        core.started = true;
        core.scanner.start(&mut core.grid);
    }
    core.scanner.advance(&mut core.grid, core.frame, core.config.scan_speed);
    if let Some(t0) = t0 {
        core.perf_stats.reveal_ms = t0.elapsed_ms();
    }

    // === PHYSICS ===
    core.frame += 1;
    if core.frame % u64::from(core.config.simulation_speed.max(1)) == 0 {
        let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
        let outcome: PhysicsOutcome = step_physics(&mut core.grid, &core.config, core.rng.as_mut());
        core.physics_ticks += 1;
        if let Some(t0) = t0 {
            core.perf_stats.physics_ms = t0.elapsed_ms();
            core.perf_stats.particles_moved = outcome.moved;
            core.perf_stats.particles_dormant = outcome.dormant;
        }
    }

    // === CACHE ===
    if core.cache.is_caching() {
        let t0 = if perf_on { Some(PerfTimer::start()) } else { None };
        let pixels = render_extract::visible_pixels(&core.grid);
        if perf_on {
            core.perf_stats.visible_particles = pixels.len() as u32;
        }
        core.cache.record(pixels);
        if let Some(t0) = t0 {
            core.perf_stats.cache_ms = t0.elapsed_ms();
        }
    }
}
