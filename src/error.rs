use crate::{scheduler::ScheduleError, workload::WorkloadError};
use log::SetLoggerError;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Workload(WorkloadError),
    Schedule(ScheduleError),
    Logger(SetLoggerError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "terminal error: {err}"),
            AppError::Workload(err) => write!(f, "{err}"),
            AppError::Schedule(err) => write!(f, "scheduling failed: {err}"),
            AppError::Logger(err) => write!(f, "failed to set up logging: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Workload(err) => Some(err),
            AppError::Schedule(err) => Some(err),
            AppError::Logger(err) => Some(err),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<WorkloadError> for AppError {
    fn from(err: WorkloadError) -> Self {
        AppError::Workload(err)
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Schedule(err)
    }
}

impl From<SetLoggerError> for AppError {
    fn from(err: SetLoggerError) -> Self {
        AppError::Logger(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_logger_error_source() {
        // Only one logger can ever be installed, so the second call must fail
        let _ = crate::logger::init(LevelFilter::Off);
        let err: AppError = crate::logger::init(LevelFilter::Off).unwrap_err().into();

        assert!(matches!(err, AppError::Logger(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to set up logging"));
    }

    #[test]
    fn test_schedule_error_message() {
        let err = AppError::from(ScheduleError::TimeOverflow(4));
        assert_eq!(
            err.to_string(),
            "scheduling failed: process 4 would finish past the largest representable time"
        );
    }
}
