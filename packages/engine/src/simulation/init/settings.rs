use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(core: &mut SimulationCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &SimulationCore) -> PerfStats {
    core.perf_stats.clone()
}
