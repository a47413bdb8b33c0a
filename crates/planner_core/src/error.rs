use thiserror::Error;

/// Rejected user input, raised before anything is sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must not be negative, got {value:?}")]
    Negative { field: &'static str, value: String },
    #[error("{field} must be greater than zero, got {value:?}")]
    NotPositive { field: &'static str, value: String },
    #[error("{field} is out of range: {value:?}")]
    OutOfRange { field: &'static str, value: String },
    #[error("{field} contains an unknown value {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotANumber { field, .. }
            | Self::Negative { field, .. }
            | Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::UnknownValue { field, .. } => field,
        }
    }
}

/// Non-success HTTP status from the planning service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", status_line(.status, .detail))]
pub struct ServiceError {
    pub status: u16,
    /// `detail` from the error body, when the body could be parsed.
    pub detail: Option<String>,
}

impl ServiceError {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Human-readable text, falling back to a generic status line.
    pub fn message(&self) -> String {
        match &self.detail {
            Some(detail) => detail.clone(),
            None => format!("HTTP error, status={}", self.status),
        }
    }
}

fn status_line(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("status {status}: {detail}"),
        None => format!("HTTP error, status={status}"),
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no response from {endpoint}: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} failed with {error}")]
    Service {
        endpoint: &'static str,
        error: ServiceError,
    },
    #[error("malformed response body from {endpoint}: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("request to {endpoint} was cancelled")]
    Cancelled { endpoint: &'static str },
}

impl ClientError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Service { endpoint, .. }
            | Self::Parse { endpoint, .. }
            | Self::Cancelled { endpoint } => endpoint,
        }
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Outcome of a plan submission that did not produce a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid preferences: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("a meal plan request is already in flight")]
    InFlight,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid api base url {value:?}: {reason}")]
    BaseUrl { value: String, reason: String },
    #[error("invalid request timeout {value:?}")]
    Timeout { value: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
