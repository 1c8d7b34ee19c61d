mod display;
mod error;
mod fcfs;
mod priority;
mod process;
mod round_robin;
mod runner;
mod timeline;

use std::fmt;

pub use error::ScheduleError;
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use process::{Pid, ProcessIndex, ProcessRecord};
pub use round_robin::RoundRobinScheduler;
pub use runner::{RunnerEvent, Simulation, SimulationRunner};
pub use timeline::{Slice, Timeline};

pub const DEFAULT_QUANTUM: u64 = 3;

pub trait Scheduler {
    const NAME: &'static str;

    /// Runs the policy to completion over records that are valid and fresh.
    fn dispatch(&self, processes: &mut [ProcessRecord], index: &ProcessIndex) -> Timeline;

    /// Schedules `processes` in place. Nothing is mutated unless every
    /// record is valid and fresh.
    fn schedule(&self, processes: &mut [ProcessRecord]) -> Result<Timeline, ScheduleError> {
        let index = ProcessIndex::build(processes)?;
        if let Some(stale) = processes.iter().find(|process| !process.is_fresh()) {
            return Err(ScheduleError::StaleState(stale.pid()));
        }

        let timeline = self.dispatch(processes, &index);
        log::info!(
            "{} finished {} processes at t={}",
            Self::NAME,
            processes.len(),
            timeline.end_time()
        );
        Ok(timeline)
    }

    /// Schedules a reset copy of `processes`, leaving the caller's list as is.
    fn run(&self, processes: &[ProcessRecord]) -> Result<Outcome, ScheduleError> {
        let mut processes = processes.to_vec();
        processes.iter_mut().for_each(ProcessRecord::reset);

        let timeline = self.schedule(&mut processes)?;
        Ok(Outcome {
            name: Self::NAME,
            processes,
            timeline,
        })
    }
}

pub fn run_fcfs(processes: &[ProcessRecord]) -> Result<Outcome, ScheduleError> {
    FcfsScheduler::new().run(processes)
}

pub fn run_priority(processes: &[ProcessRecord]) -> Result<Outcome, ScheduleError> {
    PriorityScheduler::new().run(processes)
}

pub fn run_round_robin(processes: &[ProcessRecord], quantum: u64) -> Result<Outcome, ScheduleError> {
    RoundRobinScheduler::new(quantum)?.run(processes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs { idle_gaps: bool },
    Priority,
    RoundRobin { quantum: u64 },
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs { .. } => FcfsScheduler::NAME,
            Algorithm::Priority => PriorityScheduler::NAME,
            Algorithm::RoundRobin { .. } => RoundRobinScheduler::NAME,
        }
    }

    pub fn run(&self, processes: &[ProcessRecord]) -> Result<Outcome, ScheduleError> {
        match *self {
            Algorithm::Fcfs { idle_gaps: false } => run_fcfs(processes),
            Algorithm::Fcfs { idle_gaps: true } => FcfsScheduler::with_idle_gaps().run(processes),
            Algorithm::Priority => run_priority(processes),
            Algorithm::RoundRobin { quantum } => run_round_robin(processes, quantum),
        }
    }
}

/// The records and dispatch history produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    name: &'static str,
    processes: Vec<ProcessRecord>,
    timeline: Timeline,
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(ProcessRecord::waiting_time)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(ProcessRecord::turnaround_time)
    }

    fn average(&self, metric: fn(&ProcessRecord) -> Option<u64>) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .processes
            .iter()
            .filter_map(metric)
            .map(|value| value as f64)
            .sum();
        total / self.processes.len() as f64
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for process in &self.processes {
            writeln!(
                f,
                "Process {}: Waiting Time = {}, Turnaround Time = {}, Priority = {}",
                process.pid(),
                process.waiting_time().unwrap_or_default(),
                process.turnaround_time().unwrap_or_default(),
                process.priority()
            )?;
        }
        writeln!(f, "Average Waiting Time = {:.2}", self.average_waiting())?;
        writeln!(f, "Average Turnaround Time = {:.2}", self.average_turnaround())?;
        write!(f, "Timeline: {}", self.timeline)
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
    fn test_run_leaves_input_untouched() {
        let processes = reference_workload();
        let outcome = run_priority(&processes).unwrap();

        assert_eq!(processes, reference_workload());
        assert!(outcome.processes().iter().all(ProcessRecord::is_completed));
        assert_eq!(outcome.process(2).and_then(ProcessRecord::waiting_time), Some(4));
        assert_eq!(outcome.process(9), None);
    }

    #[test]
    fn test_run_resets_stale_input() {
        let mut processes = reference_workload();
        FcfsScheduler::new().schedule(&mut processes).unwrap();

        let from_stale = run_round_robin(&processes, 3).unwrap();
        let from_fresh = run_round_robin(&reference_workload(), 3).unwrap();
        assert_eq!(from_stale, from_fresh);
    }

    #[test]
    fn test_schedule_rejects_stale_records() {
        let mut processes = reference_workload();
        PriorityScheduler::new().schedule(&mut processes).unwrap();
        let after_first_run = processes.clone();

        let result = RoundRobinScheduler::new(2).unwrap().schedule(&mut processes);
        assert_eq!(result.unwrap_err(), ScheduleError::StaleState(1));
        assert_eq!(processes, after_first_run);

        processes.iter_mut().for_each(ProcessRecord::reset);
        assert!(RoundRobinScheduler::new(2).unwrap().schedule(&mut processes).is_ok());
    }

    #[test]
    fn test_validation_failure_mutates_nothing() {
        let mut processes = reference_workload();
        processes.push(ProcessRecord::new(2, 9, 1));
        let before = processes.clone();

        let result = PriorityScheduler::new().schedule(&mut processes);
        assert_eq!(result.unwrap_err(), ScheduleError::DuplicateId(2));
        assert_eq!(processes, before);
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let processes = vec![ProcessRecord::new(1, 0, u64::MAX), ProcessRecord::new(2, 0, 1)];
        for algorithm in [
            Algorithm::Fcfs { idle_gaps: false },
            Algorithm::Fcfs { idle_gaps: true },
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 5 },
        ] {
            assert_eq!(
                algorithm.run(&processes).unwrap_err(),
                ScheduleError::TimeOverflow(2)
            );
        }

        let mut in_place = processes.clone();
        let result = FcfsScheduler::new().schedule(&mut in_place);
        assert_eq!(result.unwrap_err(), ScheduleError::TimeOverflow(2));
        assert_eq!(in_place, processes);
    }

    #[test]
    fn test_runs_up_to_the_last_representable_time() {
        let processes = vec![ProcessRecord::new(1, 0, 1), ProcessRecord::new(2, u64::MAX - 3, 2)];
        for algorithm in [
            Algorithm::Fcfs { idle_gaps: true },
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 1 },
        ] {
            let outcome = algorithm.run(&processes).unwrap();
            assert_eq!(outcome.process(2).and_then(ProcessRecord::waiting_time), Some(0));
            assert_eq!(outcome.timeline().end_time(), u64::MAX - 1);
        }
    }

    #[test]
    fn test_zero_quantum_rejected() {
        let processes = reference_workload();
        assert_eq!(
            run_round_robin(&processes, 0).unwrap_err(),
            ScheduleError::InvalidQuantum(0)
        );
        assert_eq!(
            Algorithm::RoundRobin { quantum: 0 }.run(&processes).unwrap_err(),
            ScheduleError::InvalidQuantum(0)
        );
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        for algorithm in [
            Algorithm::Fcfs { idle_gaps: false },
            Algorithm::Fcfs { idle_gaps: true },
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 4 },
        ] {
            let outcome = algorithm.run(&[]).unwrap();
            assert!(outcome.processes().is_empty());
            assert!(outcome.timeline().is_empty());
            assert_eq!(outcome.average_waiting(), 0.0);
        }
    }

    #[test]
    fn test_single_process_never_waits() {
        for algorithm in [
            Algorithm::Fcfs { idle_gaps: false },
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 2 },
        ] {
            let outcome = algorithm.run(&[ProcessRecord::new(1, 0, 7)]).unwrap();
            assert_eq!(outcome.processes()[0].waiting_time(), Some(0));
            assert_eq!(outcome.processes()[0].turnaround_time(), Some(7));
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let processes = reference_workload();
        for algorithm in [
            Algorithm::Fcfs { idle_gaps: false },
            Algorithm::Priority,
            Algorithm::RoundRobin { quantum: 1 },
            Algorithm::RoundRobin { quantum: 4 },
        ] {
            assert_eq!(algorithm.run(&processes), algorithm.run(&processes));
        }
    }

    #[test]
    fn test_report_format() {
        let outcome = run_fcfs(&reference_workload()).unwrap();
        let report = outcome.to_string();
        let mut lines = report.lines();

        assert_eq!(
            lines.next(),
            Some("Process 1: Waiting Time = 0, Turnaround Time = 5, Priority = 3")
        );
        assert_eq!(
            lines.nth(2),
            Some("Process 4: Waiting Time = 16, Turnaround Time = 22, Priority = 4")
        );
        assert_eq!(lines.next(), Some("Average Waiting Time = 7.25"));
        assert_eq!(lines.next(), Some("Average Turnaround Time = 12.75"));
        assert_eq!(
            lines.next(),
            Some("Timeline: | P1 0-5 | P2 5-8 | P3 8-16 | P4 16-22 |")
        );
    }
}
