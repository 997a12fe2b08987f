//! # Navigation Service
//!
//! Maps string keys to page factories and drives the host stack.
//! Registration happens once at startup; navigation calls then only read
//! the map, so a fully registered service can be shared behind an `Arc`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use super::host::{HostError, NavigationHost};
use super::page::{NavigateOptions, Page, PageFactory, default_factory};

/// Errors returned by [`NavigationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The key is already registered. The existing entry is kept.
    DuplicateKey(String),
    /// No page is registered under the key.
    UnknownKey(String),
    /// The factory produced no page, or the host refused the page.
    InvalidPageType(String),
    /// The operation is not supported.
    NotImplemented(&'static str),
    /// The host stack failed the push or pop.
    Host(HostError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::DuplicateKey(key) => write!(f, "page key already registered: {key}"),
            NavigationError::UnknownKey(key) => write!(f, "page key not registered: {key}"),
            NavigationError::InvalidPageType(msg) => write!(f, "invalid page: {msg}"),
            NavigationError::NotImplemented(what) => write!(f, "not implemented: {what}"),
            NavigationError::Host(e) => write!(f, "host error: {e}"),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::Host(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HostError> for NavigationError {
    fn from(e: HostError) -> Self {
        NavigationError::Host(e)
    }
}

pub struct NavigationService {
    host: Arc<dyn NavigationHost>,
    pages: HashMap<String, PageFactory>,
}

impl NavigationService {
    pub fn new(host: Arc<dyn NavigationHost>) -> Self {
        Self {
            host,
            pages: HashMap::new(),
        }
    }

    /// Registers `factory` under `key`. Fails if the key is taken.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F) -> Result<(), NavigationError>
    where
        F: Fn() -> Option<Box<dyn Page>> + Send + Sync + 'static,
    {
        match self.pages.entry(key.into()) {
            Entry::Occupied(entry) => {
                warn!("Refusing to re-register page key '{}'", entry.key());
                Err(NavigationError::DuplicateKey(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                debug!("Registered page key '{}'", entry.key());
                entry.insert(Arc::new(factory));
                Ok(())
            }
        }
    }

    /// Registers `P::default` under `key`.
    pub fn register_page<P>(&mut self, key: impl Into<String>) -> Result<(), NavigationError>
    where
        P: Page + Default + 'static,
    {
        let factory = default_factory::<P>();
        self.register(key, move || factory())
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn registered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Builds the page registered under `key` and pushes it.
    ///
    /// An unknown key fails before any factory runs or any push happens.
    pub async fn navigate_to(&self, key: &str, options: NavigateOptions) -> Result<(), NavigationError> {
        let Some(factory) = self.pages.get(key) else {
            warn!("Navigation to unregistered page key '{key}'");
            return Err(NavigationError::UnknownKey(key.to_string()));
        };
        info!("Navigating to '{key}'");
        self.navigate_with(|| factory(), options).await
    }

    /// Navigates to a `P::default()` page without registering it.
    pub async fn navigate_to_page<P>(&self, options: NavigateOptions) -> Result<(), NavigationError>
    where
        P: Page + Default + 'static,
    {
        self.navigate_with(|| Some(Box::new(P::default()) as Box<dyn Page>), options)
            .await
    }

    /// Runs `factory`, checks the result against the host, hands it the
    /// parameter and pushes it. Resolves once the host has finished the push.
    pub async fn navigate_with<F>(&self, factory: F, options: NavigateOptions) -> Result<(), NavigationError>
    where
        F: FnOnce() -> Option<Box<dyn Page>>,
    {
        let mut page = factory().ok_or_else(|| {
            NavigationError::InvalidPageType("factory did not produce a page".to_string())
        })?;

        if !self.host.accepts(page.as_ref()) {
            warn!("Host '{}' rejected page '{}'", self.host.name(), page.title());
            return Err(NavigationError::InvalidPageType(format!(
                "'{}' is not a page host '{}' can display",
                page.title(),
                self.host.name()
            )));
        }

        page.on_navigated_to(options.parameter.as_ref());
        debug!("Pushing '{}' (animated: {})", page.title(), options.animated);
        self.host.push(page, options.animated).await?;
        Ok(())
    }

    /// Pops the top page and returns it.
    pub async fn go_back(&self) -> Result<Box<dyn Page>, NavigationError> {
        let page = self.host.pop(true).await?;
        debug!("Went back from '{}'", page.title());
        Ok(page)
    }

    /// Forward navigation is not supported; this always fails.
    pub fn go_forward(&self) -> Result<(), NavigationError> {
        Err(NavigationError::NotImplemented("forward navigation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DetailPage, HomePage, RecordingHost, SettingsPage};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service(host: &Arc<RecordingHost>) -> NavigationService {
        NavigationService::new(host.clone())
    }

    #[test]
    fn test_duplicate_key_keeps_original() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register_page::<HomePage>("home").unwrap();

        let err = nav.register_page::<SettingsPage>("home").unwrap_err();
        assert_eq!(err, NavigationError::DuplicateKey("home".into()));
        assert_eq!(nav.registered_keys(), vec!["home"]);

        tokio_test::block_on(nav.navigate_to("home", NavigateOptions::default())).unwrap();
        assert_eq!(host.pushes(), vec![("Home".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_navigate_registered_key_pushes_once_animated() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register_page::<HomePage>("home").unwrap();

        nav.navigate_to("home", NavigateOptions::default()).await.unwrap();
        assert_eq!(host.pushes(), vec![("Home".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_unknown_key_constructs_nothing() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        nav.register("home", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(Box::new(HomePage::default()) as Box<dyn Page>)
        })
        .unwrap();

        let err = nav.navigate_to("missing", NavigateOptions::default()).await.unwrap_err();
        assert_eq!(err, NavigationError::UnknownKey("missing".into()));
        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert!(host.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_factory_without_page_is_invalid() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register("broken", || None).unwrap();

        let err = nav.navigate_to("broken", NavigateOptions::default()).await.unwrap_err();
        assert!(matches!(err, NavigationError::InvalidPageType(_)));
        assert!(host.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_host_rejected_page_is_invalid() {
        let host = Arc::new(RecordingHost::rejecting("Settings"));
        let mut nav = service(&host);
        nav.register_page::<SettingsPage>("settings").unwrap();

        let err = nav.navigate_to("settings", NavigateOptions::default()).await.unwrap_err();
        assert!(matches!(err, NavigationError::InvalidPageType(_)));
        assert!(host.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_parameter_reaches_page() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register_page::<DetailPage>("detail").unwrap();

        let options = NavigateOptions::with_parameter(json!({ "id": 42 })).animated(false);
        nav.navigate_to("detail", options).await.unwrap();
        assert_eq!(host.pushes(), vec![("Detail 42".to_string(), false)]);
    }

    #[tokio::test]
    async fn test_navigate_to_page_without_registration() {
        let host = Arc::new(RecordingHost::default());
        let nav = service(&host);
        nav.navigate_to_page::<SettingsPage>(NavigateOptions::default()).await.unwrap();
        assert_eq!(host.pushes(), vec![("Settings".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_push_failure_is_surfaced() {
        let host = Arc::new(RecordingHost::failing(HostError::Unavailable("no window".into())));
        let mut nav = service(&host);
        nav.register_page::<HomePage>("home").unwrap();

        let err = nav.navigate_to("home", NavigateOptions::default()).await.unwrap_err();
        assert_eq!(err, NavigationError::Host(HostError::Unavailable("no window".into())));
    }

    #[tokio::test]
    async fn test_go_back_pops_animated() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register_page::<HomePage>("home").unwrap();
        nav.navigate_to("home", NavigateOptions::default()).await.unwrap();

        let page = nav.go_back().await.unwrap();
        assert_eq!(page.title(), "Home");
        assert_eq!(host.pops(), vec![true]);
    }

    #[tokio::test]
    async fn test_go_back_on_empty_stack_fails() {
        let host = Arc::new(RecordingHost::default());
        let nav = service(&host);
        let err = nav.go_back().await.unwrap_err();
        assert_eq!(err, NavigationError::Host(HostError::EmptyStack));
    }

    #[test]
    fn test_go_forward_always_fails() {
        let host = Arc::new(RecordingHost::default());
        let nav = service(&host);
        assert_eq!(
            nav.go_forward().unwrap_err(),
            NavigationError::NotImplemented("forward navigation")
        );
    }

    #[test]
    fn test_registered_keys_sorted() {
        let host = Arc::new(RecordingHost::default());
        let mut nav = service(&host);
        nav.register_page::<SettingsPage>("settings").unwrap();
        nav.register_page::<HomePage>("home").unwrap();
        assert!(nav.is_registered("home"));
        assert!(!nav.is_registered("about"));
        assert_eq!(nav.registered_keys(), vec!["home", "settings"]);
    }
}
