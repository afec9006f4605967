//! Error types for the lagframe crate.

/// The precondition that was missing when a [`SeriesError::State`] was returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MissingState {
    /// No observations have been loaded.
    NoData,
    /// The loaded series carry no variable names.
    NoNames,
    /// No dependent variables have been configured.
    NoDependent,
    /// Neither explicit independent variables nor a lag depth have been configured.
    NoIndependent,
}

impl std::fmt::Display for MissingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingState::NoData => write!(f, "no data loaded"),
            MissingState::NoNames => write!(f, "variables have no names"),
            MissingState::NoDependent => write!(f, "no dependent variable"),
            MissingState::NoIndependent => write!(f, "no independent variable"),
        }
    }
}

/// Error type for all fallible operations in the lagframe crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a count or shape does not fit the loaded series.
    #[error("{what} {expected}, got {actual}")]
    Dimension {
        /// The measured count and the rule it must satisfy, e.g. "data length must be a multiple of".
        what: &'static str,
        /// The expected count or divisor.
        expected: usize,
        /// The count that was provided.
        actual: usize,
    },

    /// Returned when an operation requires state that has not been set up yet.
    #[error("missing state: {0}")]
    State(MissingState),

    /// Returned when an index, lag, frequency or window bound is out of range.
    #[error("{what} {value} is out of range {min}..{max}")]
    Range {
        /// The quantity that was out of range.
        what: &'static str,
        /// The offending value.
        value: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Returned when a variable name cannot be resolved.
    #[error("no variable named {name:?}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_message() {
        let err = SeriesError::Dimension {
            what: "data length must be a multiple of",
            expected: 3,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "data length must be a multiple of 3, got 10"
        );
    }

    #[test]
    fn state_message() {
        let err = SeriesError::State(MissingState::NoNames);
        assert_eq!(err.to_string(), "missing state: variables have no names");
    }

    #[test]
    fn range_message() {
        let err = SeriesError::Range {
            what: "lag",
            value: 12,
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "lag 12 is out of range 0..10");
    }

    #[test]
    fn not_found_message() {
        let err = SeriesError::NotFound {
            name: "gdp".to_string(),
        };
        assert_eq!(err.to_string(), "no variable named \"gdp\"");
    }

    #[test]
    fn error_is_std_error_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
