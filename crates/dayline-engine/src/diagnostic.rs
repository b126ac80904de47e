//! Per-event problems collected during a layout pass.

use serde::Serialize;

/// What went wrong with one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No visible portion, or not fully visible under the drop policy.
    OutsideAxis,
    /// Trimmed to the visible hours.
    Clipped,
    /// Starts and ends at the same instant.
    Degenerate,
    /// Starts on a different day than the one being laid out.
    OtherDay,
    /// Shares its id with an earlier event.
    DuplicateId,
}

impl DiagnosticKind {
    /// Whether an event with this problem was left out of the output.
    pub fn is_drop(self) -> bool {
        matches!(self, Self::OutsideAxis | Self::OtherDay | Self::DuplicateId)
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideAxis => write!(f, "outside_axis"),
            Self::Clipped => write!(f, "clipped"),
            Self::Degenerate => write!(f, "degenerate"),
            Self::OtherDay => write!(f, "other_day"),
            Self::DuplicateId => write!(f, "duplicate_id"),
        }
    }
}

/// A problem attached to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Id of the affected event.
    pub event_id: String,
    /// Category of the problem.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(
        event_id: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.event_id, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_kinds() {
        assert!(DiagnosticKind::OutsideAxis.is_drop());
        assert!(DiagnosticKind::DuplicateId.is_drop());
        assert!(!DiagnosticKind::Clipped.is_drop());
        assert!(!DiagnosticKind::Degenerate.is_drop());
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new("lunch", DiagnosticKind::Clipped, "ends after 9 PM");
        assert_eq!(diagnostic.to_string(), "[clipped] lunch: ends after 9 PM");
    }
}
