//! XLabs application services: serialization, navigation and speech.

pub mod core;
pub mod navigation;
pub mod serialization;
pub mod speech;

#[cfg(test)]
pub mod test_support;
