use std::fmt;

/// Failure to compute an indicator from the supplied samples
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorError {
    InsufficientData {
        indicator: &'static str,
        required: usize,
        available: usize,
    },
    InvalidPeriod {
        indicator: &'static str,
        period: u32,
    },
    InvalidParameters(String),
}

impl IndicatorError {
    pub(crate) fn insufficient(indicator: &'static str, required: usize, available: usize) -> Self {
        IndicatorError::InsufficientData {
            indicator,
            required,
            available,
        }
    }
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorError::InsufficientData {
                indicator,
                required,
                available,
            } => write!(
                f,
                "{}: insufficient data ({} samples required, {} available)",
                indicator, required, available
            ),
            IndicatorError::InvalidPeriod { indicator, period } => {
                write!(f, "{}: invalid period {}", indicator, period)
            }
            IndicatorError::InvalidParameters(msg) => write!(f, "invalid parameters: {}", msg),
        }
    }
}

impl std::error::Error for IndicatorError {}

/// Reject a zero period and windows longer than the data
pub(crate) fn check_window(
    indicator: &'static str,
    period: u32,
    required: usize,
    available: usize,
) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    if available < required {
        return Err(IndicatorError::insufficient(indicator, required, available));
    }
    Ok(())
}
