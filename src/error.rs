//! Errors raised when a layout input violates a construction invariant.
//!
//! The layout pass itself never fails; these only guard the values that are
//! built before a pass starts (windows and configuration).

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    NonPositiveMonthWidth(f32),
    EmptyWindow,
    InvalidConfig { field: &'static str, reason: String },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveMonthWidth(w) => {
                write!(f, "month width must be positive, got {w}")
            }
            Self::EmptyWindow => write!(f, "timeline window must span at least one month"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid layout config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
