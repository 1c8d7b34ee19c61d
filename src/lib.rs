//! Simulates first-come-first-served, priority (with aging) and round robin
//! CPU scheduling over a fixed set of processes, and reports each process's
//! waiting and turnaround time.

pub mod config;
pub mod error;
pub mod logger;
pub mod scheduler;
pub mod workload;
