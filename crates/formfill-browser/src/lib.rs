//! Browser automation for form filling.
//!
//! [`BrowserActions`] is the seam the filler drives; [`BrowserEngine`]
//! implements it on top of a single chromiumoxide page. Locators, control
//! classification and human-like pacing live alongside it.

pub mod actions;
pub mod control;
pub mod engine;
pub mod error;
pub mod locator;
pub mod pacing;

pub use actions::{resolve_form_url, BrowserActions};
pub use control::FormControl;
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use locator::Locator;
pub use pacing::HumanPacing;
