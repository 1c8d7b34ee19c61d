use super::{ProcessIndex, ProcessRecord, Scheduler, Timeline};

/// Serves processes one after another in order of arrival.
///
/// By default service starts at time 0 and runs back-to-back, so a process
/// arriving after the CPU went idle is still charged as if it had been
/// waiting. `with_idle_gaps` starts each process no earlier than its arrival.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    idle_gaps: bool,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self { idle_gaps: false }
    }

    pub fn with_idle_gaps() -> Self {
        Self { idle_gaps: true }
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First-Come, First-Served";

    fn dispatch(&self, processes: &mut [ProcessRecord], _index: &ProcessIndex) -> Timeline {
        // Stable, so equal arrivals keep their input order
        processes.sort_by_key(ProcessRecord::arrival_time);

        let mut timeline = Timeline::new();
        let mut clock = 0;
        for process in processes.iter_mut() {
            if self.idle_gaps {
                clock = clock.max(process.arrival_time());
            }
            let waiting_time = if self.idle_gaps {
                clock - process.arrival_time()
            } else {
                clock
            };

            let start = clock;
            clock += process.burst_time();
            process.finish(waiting_time);
            timeline.push(process.pid(), start, clock);
            log::debug!("FCFS: P{} runs {}-{}", process.pid(), start, clock);
        }
        timeline
    }
}
