//! Styling support for Lume components.
//!
//! - **Scoped stylesheets**: each component instance gets its own sheet whose
//!   selectors are anchored to the instance class ([`ScopedStyleSheet`])
//! - **Sanitised values**: attribute text only reaches a stylesheet as a
//!   [`CssValue`], which is validated with the `cssparser` tokenizer
//! - **Themes**: [`ThemeMode`] and its [`Palette`]
//!
//! # Example
//!
//! ```
//! use lume_style::prelude::*;
//!
//! let palette = ThemeMode::Light.palette();
//! let mut sheet = ScopedStyleSheet::new("lume-form-abc123xyz");
//! sheet.rule("& .lume-form").decl("background", palette.surface);
//! assert!(sheet.to_css().starts_with(".lume-form-abc123xyz .lume-form"));
//! ```

pub mod sheet;
pub mod theme;
pub mod value;

mod error;

pub use error::{Error, Result};
pub use sheet::{Declaration, RuleBuilder, ScopedRule, ScopedStyleSheet};
pub use theme::{Palette, ThemeMode, status};
pub use value::{CssValue, MAX_VALUE_LEN, TrustedValue};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::sheet::ScopedStyleSheet;
    pub use crate::theme::{Palette, ThemeMode, status};
    pub use crate::value::{CssValue, TrustedValue};
}
