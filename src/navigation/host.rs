use std::fmt;

use async_trait::async_trait;

use super::page::Page;

/// Failures reported by the host navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Pop on an empty stack.
    EmptyStack,
    /// The host refused the operation (stack limit, page in use, ...).
    Rejected(String),
    /// The host is not able to navigate right now (no window, torn down).
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EmptyStack => write!(f, "navigation stack is empty"),
            HostError::Rejected(msg) => write!(f, "navigation rejected: {msg}"),
            HostError::Unavailable(msg) => write!(f, "navigation host unavailable: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

/// The host framework's navigation stack.
#[async_trait]
pub trait NavigationHost: Send + Sync {
    /// Name of the host, for logs.
    fn name(&self) -> &str;

    /// The host's page capability check. Pages failing it are never pushed.
    fn accepts(&self, _page: &dyn Page) -> bool {
        true
    }

    async fn push(&self, page: Box<dyn Page>, animated: bool) -> Result<(), HostError>;

    /// Removes and returns the top page.
    async fn pop(&self, animated: bool) -> Result<Box<dyn Page>, HostError>;
}
