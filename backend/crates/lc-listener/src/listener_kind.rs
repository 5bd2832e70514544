use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Plaintext HTTP
    Plain,
    /// HTTP over TLS
    Encrypted,
}

impl ListenerKind {
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Plain => "http",
            Self::Encrypted => "https",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Encrypted => write!(f, "encrypted"),
        }
    }
}
