pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A configuration value is outside its accepted bounds, e.g. a zero page size or
    /// more frames than the simulator supports.
    Config(String),
    /// A process could not hold every page its memory requirement calls for.
    AllocationFailure {
        process_id: u32,
        resident: usize,
        needed: usize,
    },
    /// Invalid user input, which typically includes unknown process ids or malformed scenarios.
    InvalidInput(String),
    /// An IO error has occurred.
    IO(String),
    /// A numerical error has occurred, such as an integer overflow.
    ArithmeticOverflow,
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::AllocationFailure {
                process_id,
                resident,
                needed,
            } => write!(
                f,
                "Process {} could not be allocated due to insufficient memory ({} of {} pages resident)",
                process_id, resident, needed
            ),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::IO(msg) => write!(f, "IO error: {}", msg),
            Error::ArithmeticOverflow => write!(f, "Arithmetic overflow"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_message() {
        let err = Error::AllocationFailure {
            process_id: 3,
            resident: 1,
            needed: 4,
        };
        assert_eq!(
            "Process 3 could not be allocated due to insufficient memory (1 of 4 pages resident)",
            err.to_string()
        );
    }

    #[test]
    fn test_error_converts_into_result() {
        fn fails() -> Result<u8> {
            crate::errconfig!("page size must be positive, got {}", 0)
        }
        assert_eq!(
            Err(Error::Config("page size must be positive, got 0".to_string())),
            fails()
        );
    }

    #[test]
    fn test_parse_error_is_invalid_input() {
        let err: Error = "x".parse::<u32>().unwrap_err().into();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
