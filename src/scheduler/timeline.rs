use super::Pid;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub pid: Pid,
    pub start: u64,
    pub end: u64,
}

impl Slice {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

/// The dispatches of one run, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, pid: Pid, start: u64, end: u64) {
        self.slices.push(Slice { pid, start, end });
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn service_for(&self, pid: Pid) -> u64 {
        self.slices
            .iter()
            .filter(|slice| slice.pid == pid)
            .map(Slice::duration)
            .sum()
    }

    pub fn end_time(&self) -> u64 {
        self.slices.iter().map(|slice| slice.end).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slices.is_empty() {
            return write!(f, "(idle)");
        }
        for slice in &self.slices {
            write!(f, "| P{} {}-{} ", slice.pid, slice.start, slice.end)?;
        }
        write!(f, "|")
    }
}
