use super::{Pid, ProcessIndex, ProcessRecord, ScheduleError, Scheduler, Timeline};
use std::{collections::VecDeque, num::NonZeroU64};

/// Preemptive round robin over a ready queue and a holding queue.
///
/// Processes that used up a slice in the current sweep wait in the holding
/// queue, so they can't run again before everything already in the ready
/// queue has had its turn.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: u64) -> Result<Self, ScheduleError> {
        let quantum = NonZeroU64::new(quantum).ok_or(ScheduleError::InvalidQuantum(quantum))?;
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> u64 {
        self.quantum.get()
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn dispatch(&self, processes: &mut [ProcessRecord], index: &ProcessIndex) -> Timeline {
        let mut timeline = Timeline::new();
        let mut ready: VecDeque<Pid> = VecDeque::with_capacity(index.len());
        let mut holding: VecDeque<Pid> = VecDeque::with_capacity(index.len());
        let mut admitted = vec![false; processes.len()];
        let mut current_time = 0;

        while processes.iter().any(|process| process.remaining_time() > 0) {
            for (position, process) in processes.iter().enumerate() {
                if !admitted[position]
                    && process.has_arrived(current_time)
                    && process.remaining_time() > 0
                {
                    admitted[position] = true;
                    ready.push_back(process.pid());
                    log::trace!("Round Robin: P{} admitted at t={}", process.pid(), current_time);
                }
            }

            let mut dispatched = false;
            while let Some(pid) = ready.pop_front() {
                let Some(position) = index.position(pid) else {
                    continue;
                };
                let process = &mut processes[position];
                if process.remaining_time() == 0 {
                    continue;
                }

                dispatched = true;
                let start = current_time;
                current_time += process.serve(self.quantum.get());
                timeline.push(pid, start, current_time);
                log::debug!(
                    "Round Robin: P{} runs {}-{}, {} left",
                    pid,
                    start,
                    current_time,
                    process.remaining_time()
                );

                if process.remaining_time() == 0 {
                    let turnaround_time = current_time - process.arrival_time();
                    process.finish(turnaround_time - process.burst_time());
                } else {
                    holding.push_back(pid);
                }
            }

            ready.append(&mut holding);

            if !dispatched {
                // Nothing is runnable, so skip straight to the next arrival
                let next_arrival = processes
                    .iter()
                    .enumerate()
                    .filter(|&(position, process)| {
                        !admitted[position] && process.remaining_time() > 0
                    })
                    .map(|(_, process)| process.arrival_time())
                    .min();
                match next_arrival {
                    Some(arrival) => current_time = current_time.max(arrival),
                    None => break,
                }
            }
        }
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_workload() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::with_priority(1, 0, 5, 3),
            ProcessRecord::with_priority(2, 1, 3, 1),
            ProcessRecord::with_priority(3, 2, 8, 2),
            ProcessRecord::with_priority(4, 3, 6, 4),
        ]
    }

    #[test]
    fn test_zero_quantum() {
        assert_eq!(
            RoundRobinScheduler::new(0).unwrap_err(),
            ScheduleError::InvalidQuantum(0)
        );
        assert_eq!(RoundRobinScheduler::new(5).unwrap().quantum(), 5);
    }

    #[test]
    fn test_reference_workload() {
        let mut processes = reference_workload();
        let timeline = RoundRobinScheduler::new(3)
            .unwrap()
            .schedule(&mut processes)
            .unwrap();

        let first: Vec<_> = timeline
            .slices()
            .iter()
            .filter(|slice| slice.pid == 1)
            .map(|slice| slice.duration())
            .collect();
        assert_eq!(first, vec![3, 2]);

        let waiting: Vec<_> = processes.iter().filter_map(ProcessRecord::waiting_time).collect();
        let turnaround: Vec<_> = processes
            .iter()
            .filter_map(ProcessRecord::turnaround_time)
            .collect();
        assert_eq!(waiting, vec![0, 4, 12, 11]);
        assert_eq!(turnaround, vec![5, 7, 20, 17]);
        assert_eq!(
            timeline.to_string(),
            "| P1 0-3 | P1 3-5 | P2 5-8 | P3 8-11 | P4 11-14 | P3 14-17 | P4 17-20 | P3 20-22 |"
        );
    }

    #[test]
    fn test_service_matches_burst() {
        for quantum in 1..=9 {
            let mut processes = reference_workload();
            let timeline = RoundRobinScheduler::new(quantum)
                .unwrap()
                .schedule(&mut processes)
                .unwrap();

            for process in &processes {
                assert_eq!(process.remaining_time(), 0);
                assert_eq!(timeline.service_for(process.pid()), process.burst_time());
                assert_eq!(
                    process.turnaround_time(),
                    process.waiting_time().map(|waiting| waiting + process.burst_time())
                );
            }
            assert!(timeline.slices().iter().all(|slice| slice.duration() <= quantum));
            assert_eq!(timeline.end_time(), 22);
        }
    }

    #[test]
    fn test_idles_until_first_arrival() {
        let mut processes = vec![ProcessRecord::new(1, 3, 2), ProcessRecord::new(2, 6, 1)];
        let timeline = RoundRobinScheduler::new(4)
            .unwrap()
            .schedule(&mut processes)
            .unwrap();

        assert_eq!(timeline.to_string(), "| P1 3-5 | P2 6-7 |");
        assert_eq!(processes[0].waiting_time(), Some(0));
        assert_eq!(processes[1].waiting_time(), Some(0));
    }

    #[test]
    fn test_far_future_arrival() {
        let mut processes = vec![
            ProcessRecord::new(1, 0, 1),
            ProcessRecord::new(2, 1_000_000_000_000, 3),
        ];
        let timeline = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&mut processes)
            .unwrap();

        assert_eq!(
            timeline.to_string(),
            "| P1 0-1 | P2 1000000000000-1000000000002 | P2 1000000000002-1000000000003 |"
        );
        assert_eq!(processes[1].waiting_time(), Some(0));
        assert_eq!(processes[1].turnaround_time(), Some(3));
    }

    #[test]
    fn test_sparse_ids() {
        let mut processes = vec![
            ProcessRecord::new(40, 0, 4),
            ProcessRecord::new(7, 0, 2),
            ProcessRecord::new(1000, 1, 3),
        ];
        let timeline = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&mut processes)
            .unwrap();

        assert_eq!(
            timeline.to_string(),
            "| P40 0-2 | P7 2-4 | P40 4-6 | P1000 6-8 | P1000 8-9 |"
        );
        assert_eq!(processes[0].turnaround_time(), Some(6));
        assert_eq!(processes[1].turnaround_time(), Some(4));
        assert_eq!(processes[2].turnaround_time(), Some(8));
    }

    #[test]
    fn test_each_process_queued_once() {
        let mut processes = vec![ProcessRecord::new(1, 0, 6), ProcessRecord::new(2, 0, 6)];
        let timeline = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&mut processes)
            .unwrap();

        let order: Vec<_> = timeline.slices().iter().map(|slice| slice.pid).collect();
        assert_eq!(order, vec![1, 2, 1, 2, 1, 2]);
    }
}
