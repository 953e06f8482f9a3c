//! Attribute access with validation and defaults.
//!
//! Every widget reads its configuration from an [`AttributeStore`] on each
//! render pass. Reads never fail: a missing, empty or malformed value falls
//! back to the documented default, and malformed values are logged.
//!
//! Enumerated attributes are declared with [`attribute_enum!`], which produces
//! a plain Rust enum implementing [`AttributeEnum`]:
//!
//! ```ignore
//! attribute_enum! {
//!     /// Button size.
//!     pub enum ButtonSize {
//!         Small = "small",
//!         Medium = "medium",
//!         Large = "large",
//!     }
//!     default Medium
//! }
//!
//! let size: ButtonSize = attrs.get_enum("size");
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use lume_core::logging::targets;
use lume_style::{CssValue, ThemeMode};
use serde::de::DeserializeOwned;

/// An attribute whose value must be one of a fixed set of names.
pub trait AttributeEnum: Copy + Default + PartialEq + 'static {
    /// Allowed spellings and the variants they map to.
    const VALUES: &'static [(&'static str, Self)];

    /// Parse a raw attribute value (case-insensitive, surrounding whitespace ignored).
    fn from_attribute(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::VALUES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|(_, value)| *value)
    }

    /// The canonical spelling of this variant.
    fn as_attribute(self) -> &'static str {
        Self::VALUES
            .iter()
            .find(|(_, value)| *value == self)
            .map_or("", |(name, _)| name)
    }
}

/// Declare an enumerated attribute type.
macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $crate::attributes::AttributeEnum for $name {
            const VALUES: &'static [(&'static str, Self)] = &[$(($value, Self::$variant)),+];
        }

        impl $name {
            /// Attribute spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use attribute_enum;

impl AttributeEnum for ThemeMode {
    const VALUES: &'static [(&'static str, Self)] =
        &[("dark", ThemeMode::Dark), ("light", ThemeMode::Light)];
}

attribute_enum! {
    /// Where an activated link opens.
    pub enum LinkTarget {
        /// Same browsing context.
        SelfFrame = "_self",
        /// New tab or window.
        Blank = "_blank",
        /// Parent frame.
        Parent = "_parent",
        /// Top-level frame.
        Top = "_top",
    }
    default SelfFrame
}

/// The attributes of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    values: BTreeMap<String, String>,
}

impl AttributeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Remove an attribute, returning the previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Raw value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the attribute is present (with any value).
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value, or `default` when absent or blank.
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.non_empty(name).unwrap_or(default).to_string()
    }

    /// The value when present and not blank.
    pub fn get_opt(&self, name: &str) -> Option<String> {
        self.non_empty(name).map(str::to_string)
    }

    /// Parse an enumerated attribute, falling back to its default.
    pub fn get_enum<E: AttributeEnum>(&self, name: &str) -> E {
        let Some(raw) = self.non_empty(name) else {
            return E::default();
        };
        E::from_attribute(raw).unwrap_or_else(|| {
            let fallback = E::default();
            tracing::debug!(
                target: targets::ATTRIBUTE,
                attribute = name,
                value = raw,
                fallback = fallback.as_attribute(),
                "unrecognised value"
            );
            fallback
        })
    }

    /// Presence-based boolean: any value, including `"false"`, is `true`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.has(name)
    }

    /// Parse a JSON attribute, falling back to `default` when absent or malformed.
    pub fn get_json<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        let Some(raw) = self.non_empty(name) else {
            return default;
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(target: targets::ATTRIBUTE, attribute = name, error = %e, "malformed JSON, using default");
                default
            }
        }
    }

    /// A sanitised CSS value, or `default` when absent or rejected.
    pub fn get_style(&self, name: &str, default: impl Into<CssValue>) -> CssValue {
        self.get_style_opt(name).unwrap_or_else(|| default.into())
    }

    /// A sanitised CSS value when present and accepted.
    pub fn get_style_opt(&self, name: &str) -> Option<CssValue> {
        let raw = self.non_empty(name)?;
        match CssValue::parse(name, raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(target: targets::ATTRIBUTE, attribute = name, error = %e, "rejected style value");
                None
            }
        }
    }

    /// Parse a number, falling back to `default`.
    pub fn get_number<T: FromStr + Copy>(&self, name: &str, default: T) -> T {
        let Some(raw) = self.non_empty(name) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(target: targets::ATTRIBUTE, attribute = name, value = raw, "not a number");
            default
        })
    }

    /// Parse a pixel length such as `"768px"` or `"768"`.
    pub fn get_px(&self, name: &str, default: u32) -> u32 {
        let Some(raw) = self.non_empty(name) else {
            return default;
        };
        let digits = raw.trim().trim_end_matches("px").trim();
        digits.parse::<f64>().map_or_else(
            |_| {
                tracing::debug!(target: targets::ATTRIBUTE, attribute = name, value = raw, "not a pixel length");
                default
            },
            |px| px.max(0.0).round() as u32,
        )
    }

    /// All attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
