use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub color: u32,
    pub emoji: &'static str,
    pub label: &'static str,
}

const SUCCESS_STYLE: StatusStyle = StatusStyle {
    color: 0x28a745,
    emoji: "✅",
    label: "Success",
};

static STATUS_STYLES: LazyLock<HashMap<&'static str, StatusStyle>> = LazyLock::new(|| {
    HashMap::from([
        ("success", SUCCESS_STYLE),
        (
            "failure",
            StatusStyle {
                color: 0xdc3545,
                emoji: "❌",
                label: "Failed",
            },
        ),
        (
            "cancelled",
            StatusStyle {
                color: 0x6c757d,
                emoji: "⚠️",
                label: "Cancelled",
            },
        ),
        (
            "skipped",
            StatusStyle {
                color: 0xffc107,
                emoji: "⏭️",
                label: "Skipped",
            },
        ),
    ])
});

/// Styling for a raw job-status string. Unknown statuses get the success style.
pub fn status_styling(status: &str) -> StatusStyle {
    let normalized = status.trim().to_ascii_lowercase();
    STATUS_STYLES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(SUCCESS_STYLE)
}

/// Outcome of the job being reported. Parsing never fails: anything that is
/// not one of the four known outcomes is kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    #[default]
    Success,
    Failure,
    Cancelled,
    Skipped,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Success => "success",
            JobStatus::Failure => "failure",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Skipped => "skipped",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Success)
    }

    pub fn styling(&self) -> StatusStyle {
        status_styling(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let status = match value.trim().to_ascii_lowercase().as_str() {
            "success" => JobStatus::Success,
            "failure" => JobStatus::Failure,
            "cancelled" => JobStatus::Cancelled,
            "skipped" => JobStatus::Skipped,
            _ => JobStatus::Other(value.to_string()),
        };
        Ok(status)
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
