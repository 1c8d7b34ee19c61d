use super::{ProcessIndex, ProcessRecord, Scheduler, Timeline};

/// Non-preemptive priority scheduling with aging. A lower priority number
/// is more urgent, and every dispatch makes the processes left waiting one
/// step more urgent.
#[derive(Debug, Default)]
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn new() -> Self {
        Self
    }

    /// The most urgent process that has arrived and is not yet completed.
    /// Ties go to the earliest one in the list.
    fn poll_process(processes: &[ProcessRecord], now: u64) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| !process.is_completed() && process.has_arrived(now))
            .min_by_key(|&(index, process)| (process.priority(), index))
            .map(|(index, _)| index)
    }

    /// The earliest arrival among processes that are still waiting.
    fn next_arrival(processes: &[ProcessRecord]) -> Option<u64> {
        processes
            .iter()
            .filter(|process| !process.is_completed())
            .map(ProcessRecord::arrival_time)
            .min()
    }

    /// Runs the next process to completion and ages everyone left waiting.
    /// Returns false once every process has completed.
    fn dispatch_next(
        processes: &mut [ProcessRecord],
        current_time: &mut u64,
        timeline: &mut Timeline,
    ) -> bool {
        let selected = match PriorityScheduler::poll_process(processes, *current_time) {
            Some(selected) => selected,
            None => {
                // Nothing changes while the CPU idles, so skip to the next arrival
                let Some(arrival) = PriorityScheduler::next_arrival(processes) else {
                    return false;
                };
                *current_time = arrival;
                match PriorityScheduler::poll_process(processes, *current_time) {
                    Some(selected) => selected,
                    None => return false,
                }
            }
        };

        let process = &mut processes[selected];
        let start = *current_time;
        process.finish(start - process.arrival_time());
        *current_time += process.burst_time();
        timeline.push(process.pid(), start, *current_time);
        log::debug!(
            "Priority: P{} (priority {}) runs {}-{}",
            process.pid(),
            process.priority(),
            start,
            *current_time
        );

        let now = *current_time;
        for waiting in processes
            .iter_mut()
            .filter(|process| !process.is_completed() && process.has_arrived(now))
        {
            waiting.age();
            log::trace!("Priority: P{} aged to {}", waiting.pid(), waiting.priority());
        }
        true
    }
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "Priority Scheduling";

    fn dispatch(&self, processes: &mut [ProcessRecord], index: &ProcessIndex) -> Timeline {
        let mut timeline = Timeline::new();
        let mut current_time = 0;

        for _ in 0..index.len() {
            if !PriorityScheduler::dispatch_next(processes, &mut current_time, &mut timeline) {
                break;
            }
        }
        timeline
    }
}
