use super::Pid;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    InvalidQuantum(u64),
    InvalidId(Pid),
    DuplicateId(Pid),
    ZeroBurst(Pid),
    StaleState(Pid),
    TimeOverflow(Pid),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidQuantum(quantum) => {
                write!(f, "invalid time quantum {quantum}, it must be at least 1")
            }
            ScheduleError::InvalidId(pid) => write!(f, "invalid process id {pid}"),
            ScheduleError::DuplicateId(pid) => write!(f, "process id {pid} is used more than once"),
            ScheduleError::ZeroBurst(pid) => write!(f, "process {pid} has a burst time of 0"),
            ScheduleError::StaleState(pid) => write!(
                f,
                "process {pid} was already scheduled, reset it before running another algorithm"
            ),
            ScheduleError::TimeOverflow(pid) => write!(
                f,
                "process {pid} would finish past the largest representable time"
            ),
        }
    }
}

impl Error for ScheduleError {}
