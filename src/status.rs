/// How long a status message stays on screen.
pub const STATUS_TTL_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}
