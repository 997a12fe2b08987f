//! In-process navigation host.
//!
//! Holds pages in a `Vec` behind a tokio mutex. Useful for headless runs and
//! tests; a real UI host implements [`NavigationHost`] over its own stack.

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;

use super::host::{HostError, NavigationHost};
use super::page::Page;

#[derive(Debug, Default)]
pub struct PageStack {
    pages: Mutex<Vec<Box<dyn Page>>>,
    max_depth: Option<usize>,
}

impl PageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that rejects pushes beyond `max_depth` pages.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
            max_depth: Some(max_depth),
        }
    }

    pub async fn depth(&self) -> usize {
        self.pages.lock().await.len()
    }

    pub async fn top_title(&self) -> Option<String> {
        self.pages.lock().await.last().map(|p| p.title().to_string())
    }

    /// Titles from bottom to top.
    pub async fn titles(&self) -> Vec<String> {
        self.pages
            .lock()
            .await
            .iter()
            .map(|p| p.title().to_string())
            .collect()
    }
}

#[async_trait]
impl NavigationHost for PageStack {
    fn name(&self) -> &str {
        "page-stack"
    }

    async fn push(&self, page: Box<dyn Page>, animated: bool) -> Result<(), HostError> {
        let mut pages = self.pages.lock().await;
        if let Some(max) = self.max_depth
            && pages.len() >= max
        {
            return Err(HostError::Rejected(format!("stack is full ({max} pages)")));
        }
        debug!("push '{}' (animated: {animated}, depth: {})", page.title(), pages.len() + 1);
        pages.push(page);
        Ok(())
    }

    async fn pop(&self, animated: bool) -> Result<Box<dyn Page>, HostError> {
        let mut pages = self.pages.lock().await;
        let page = pages.pop().ok_or(HostError::EmptyStack)?;
        debug!("pop '{}' (animated: {animated}, depth: {})", page.title(), pages.len());
        Ok(page)
    }
}
