use thiserror::Error;

pub(crate) const BODY_PREVIEW_LIMIT: usize = 512;

/// Failure of the single `GET /tasks` round trip, before any conversion.
#[derive(Error, Debug)]
pub enum TaskHttpError {
    #[error("GET {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url}: cannot reach backend: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Anything else the transport reports, including a body cut short.
    #[error("GET {url}: transport failure: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url} answered {status}: {preview}")]
    Status {
        url: String,
        status: u16,
        preview: String,
    },
    #[error("GET {url} answered {status} with {body_len} bytes that are not a task list: {source} | body={preview}")]
    Decode {
        url: String,
        status: u16,
        body_len: usize,
        preview: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskHttpError {
    pub(crate) fn from_reqwest(source: reqwest::Error, url: String) -> Self {
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else if source.is_connect() {
            Self::Connect { url, source }
        } else {
            Self::Transport { url, source }
        }
    }

    pub(crate) fn decode(status: u16, url: String, body: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url,
            status,
            body_len: body.len(),
            preview: preview_body(body),
            source,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Connect { url, .. }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }

    /// HTTP status, when the backend got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Timeout { source, .. }
            | Self::Connect { source, .. }
            | Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }

    /// True when the request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connect { .. } | Self::Transport { .. }
        )
    }
}

pub(crate) fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}
