//! Role-tagged chat messages sent to a completion provider.

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Instruction for the model; placed first.
    System(String),
    /// The templated prompt carrying the user's text.
    User(String),
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Wire name of the role (`system` / `user`).
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) => s,
        }
    }
}
