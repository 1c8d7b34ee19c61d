use super::ScheduleError;
use std::collections::HashMap;

pub type Pid = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pid: Pid,
    arrival_time: u64,
    burst_time: u64,
    remaining_time: u64,
    priority: i32,
    base_priority: i32,
    waiting_time: Option<u64>,
    turnaround_time: Option<u64>,
    completed: bool,
}

impl ProcessRecord {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(pid: Pid, arrival_time: u64, burst_time: u64) -> Self {
        ProcessRecord::with_priority(pid, arrival_time, burst_time, Self::DEFAULT_PRIORITY)
    }

    pub fn with_priority(pid: Pid, arrival_time: u64, burst_time: u64, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            priority,
            base_priority: priority,
            waiting_time: None,
            turnaround_time: None,
            completed: false,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn waiting_time(&self) -> Option<u64> {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> Option<u64> {
        self.turnaround_time
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn has_arrived(&self, now: u64) -> bool {
        self.arrival_time <= now
    }

    /// True when no scheduler has touched this record since it was created
    /// or last reset.
    pub fn is_fresh(&self) -> bool {
        !self.completed
            && self.remaining_time == self.burst_time
            && self.priority == self.base_priority
            && self.waiting_time.is_none()
            && self.turnaround_time.is_none()
    }

    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.priority = self.base_priority;
        self.waiting_time = None;
        self.turnaround_time = None;
        self.completed = false;
    }

    /// Gives the process at most `quantum` units of service and returns the
    /// length of the slice actually used.
    pub(super) fn serve(&mut self, quantum: u64) -> u64 {
        let slice = self.remaining_time.min(quantum);
        self.remaining_time -= slice;
        slice
    }

    pub(super) fn finish(&mut self, waiting_time: u64) {
        self.remaining_time = 0;
        self.waiting_time = Some(waiting_time);
        self.turnaround_time = Some(waiting_time + self.burst_time);
        self.completed = true;
    }

    pub(super) fn age(&mut self) {
        self.priority = self.priority.saturating_sub(1);
    }
}

/// Maps each pid to its position in the slice being scheduled.
#[derive(Debug)]
pub struct ProcessIndex {
    positions: HashMap<Pid, usize>,
}

impl ProcessIndex {
    /// Rejects ids that are 0 or repeated, zero bursts, and workloads whose
    /// clock could pass `u64::MAX`. No run ends later than the last arrival
    /// plus every burst.
    pub fn build(processes: &[ProcessRecord]) -> Result<Self, ScheduleError> {
        let mut positions = HashMap::with_capacity(processes.len());
        let mut total_burst: u64 = 0;
        let mut last_arrival: Option<&ProcessRecord> = None;

        for (index, process) in processes.iter().enumerate() {
            if process.pid == 0 {
                return Err(ScheduleError::InvalidId(process.pid));
            }
            if process.burst_time == 0 {
                return Err(ScheduleError::ZeroBurst(process.pid));
            }
            if positions.insert(process.pid, index).is_some() {
                return Err(ScheduleError::DuplicateId(process.pid));
            }

            total_burst = total_burst
                .checked_add(process.burst_time)
                .ok_or(ScheduleError::TimeOverflow(process.pid))?;
            if last_arrival.map_or(true, |last| process.arrival_time > last.arrival_time) {
                last_arrival = Some(process);
            }
        }

        if let Some(last) = last_arrival {
            last.arrival_time
                .checked_add(total_burst)
                .ok_or(ScheduleError::TimeOverflow(last.pid))?;
        }

        Ok(Self { positions })
    }

    pub fn position(&self, pid: Pid) -> Option<usize> {
        self.positions.get(&pid).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
