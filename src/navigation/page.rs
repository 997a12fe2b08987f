use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A unit of UI content the host stack can hold.
pub trait Page: Send + Sync + fmt::Debug {
    fn title(&self) -> &str;

    /// Called with the navigation parameter right before the page is pushed.
    fn on_navigated_to(&mut self, _parameter: Option<&Value>) {}
}

/// Builds a fresh page per navigation. `None` means the factory could not
/// produce a page.
pub type PageFactory = Arc<dyn Fn() -> Option<Box<dyn Page>> + Send + Sync>;

/// Factory for the parameterless-constructor convention.
pub fn default_factory<P>() -> PageFactory
where
    P: Page + Default + 'static,
{
    Arc::new(|| Some(Box::new(P::default()) as Box<dyn Page>))
}

/// Per-call navigation options.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigateOptions {
    pub parameter: Option<Value>,
    pub animated: bool,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            parameter: None,
            animated: true,
        }
    }
}

impl NavigateOptions {
    pub fn with_parameter(parameter: Value) -> Self {
        Self {
            parameter: Some(parameter),
            ..Self::default()
        }
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}
