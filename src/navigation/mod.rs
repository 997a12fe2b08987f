//! # Navigation
//!
//! Key-based page navigation over a host-owned navigation stack.
//!
//! ```text
//! NavigationService
//! ├── pages: HashMap<key, PageFactory>   // registered once, never removed
//! └── host: Arc<dyn NavigationHost>      // owns the actual stack
//!         ├── push(page, animated)
//!         └── pop(animated)
//! ```
//!
//! Every push/pop is awaited and its failure returned to the caller.

pub mod host;
pub mod page;
pub mod service;
pub mod stack;

pub use host::{HostError, NavigationHost};
pub use page::{NavigateOptions, Page, PageFactory};
pub use service::{NavigationError, NavigationService};
pub use stack::PageStack;
