use crate::scheduler::ProcessRecord;
use std::{error::Error, fmt, fs, io, path::Path};

/// The four processes the simulator starts with when no workload file is given.
pub fn demo() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::with_priority(1, 0, 5, 3),
        ProcessRecord::with_priority(2, 1, 3, 1),
        ProcessRecord::with_priority(3, 2, 8, 2),
        ProcessRecord::with_priority(4, 3, 6, 4),
    ]
}

#[derive(Debug)]
pub enum WorkloadError {
    Io(io::Error),
    MissingField { line: usize, field: &'static str },
    InvalidField { line: usize, field: &'static str, value: String },
    TrailingField { line: usize, value: String },
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Io(err) => write!(f, "failed to read workload: {err}"),
            WorkloadError::MissingField { line, field } => {
                write!(f, "line {line}: missing {field}")
            }
            WorkloadError::InvalidField { line, field, value } => {
                write!(f, "line {line}: invalid {field} \"{value}\"")
            }
            WorkloadError::TrailingField { line, value } => {
                write!(f, "line {line}: unexpected trailing field \"{value}\"")
            }
        }
    }
}

impl Error for WorkloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkloadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkloadError {
    fn from(err: io::Error) -> Self {
        WorkloadError::Io(err)
    }
}

pub fn load(path: &Path) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let contents = fs::read_to_string(path)?;
    let processes = parse(&contents)?;
    log::info!("Loaded {} processes from {}", processes.len(), path.display());
    Ok(processes)
}

/// Parses one process per line as `pid arrival burst [priority]`.
/// Everything after a `#` is ignored, as are blank lines.
pub fn parse(contents: &str) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let mut processes = Vec::new();

    for (number, line) in contents.lines().enumerate() {
        let line_number = number + 1;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let pid = parse_field(fields.next(), line_number, "pid")?;
        let arrival_time = parse_field(fields.next(), line_number, "arrival time")?;
        let burst_time = parse_field(fields.next(), line_number, "burst time")?;
        let priority = match fields.next() {
            Some(value) => parse_field(Some(value), line_number, "priority")?,
            None => 0,
        };
        if let Some(value) = fields.next() {
            return Err(WorkloadError::TrailingField {
                line: line_number,
                value: value.to_owned(),
            });
        }

        processes.push(ProcessRecord::with_priority(
            pid,
            arrival_time,
            burst_time,
            priority,
        ));
    }
    Ok(processes)
}

fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    line: usize,
    field: &'static str,
) -> Result<T, WorkloadError> {
    let value = value.ok_or(WorkloadError::MissingField { line, field })?;
    value.parse().map_err(|_| WorkloadError::InvalidField {
        line,
        field,
        value: value.to_owned(),
    })
}
