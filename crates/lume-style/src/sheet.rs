//! Instance-scoped stylesheets.
//!
//! Every component instance renders its own stylesheet. All selectors are
//! anchored to the instance class, so two instances of the same widget with
//! different overrides never affect each other.
//!
//! Selectors use `&` for the instance root:
//!
//! ```
//! use lume_style::{CssValue, ScopedStyleSheet};
//!
//! let mut sheet = ScopedStyleSheet::new("lume-btn-k3j9x0a1b");
//! sheet.base("& .lume-btn { display: inline-flex; }");
//! sheet
//!     .rule("& .lume-btn:hover")
//!     .decl("background", CssValue::parse("hover-bg-color", "#2563eb").unwrap());
//!
//! let css = sheet.to_css();
//! assert!(css.contains(".lume-btn-k3j9x0a1b .lume-btn:hover { background: #2563eb; }"));
//! ```

use std::fmt::Write as _;

use crate::value::CssValue;
use crate::{Error, Result};

/// A single property/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name.
    pub property: &'static str,
    /// Sanitised value.
    pub value: CssValue,
}

/// A selector and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRule {
    selector: String,
    declarations: Vec<Declaration>,
}

impl ScopedRule {
    /// The fully scoped selector.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Declarations in insertion order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

/// Builder returned by [`ScopedStyleSheet::rule`].
pub struct RuleBuilder<'a> {
    rule: &'a mut ScopedRule,
}

impl RuleBuilder<'_> {
    /// Add a declaration.
    pub fn decl(self, property: &'static str, value: impl Into<CssValue>) -> Self {
        self.rule.declarations.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    /// Add a declaration only when a value is present.
    pub fn decl_opt(self, property: &'static str, value: Option<&CssValue>) -> Self {
        match value {
            Some(value) => self.decl(property, value),
            None => self,
        }
    }
}

/// The stylesheet of one component instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedStyleSheet {
    scope: String,
    base: String,
    rules: Vec<ScopedRule>,
}

impl ScopedStyleSheet {
    /// Create an empty sheet scoped to the class `scope`.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            base: String::new(),
            rules: Vec::new(),
        }
    }

    /// The scope class (without the leading dot).
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The root selector, `.scope`.
    pub fn root_selector(&self) -> String {
        format!(".{}", self.scope)
    }

    /// Append static widget CSS written in source code, with `&` standing for
    /// the instance root.
    pub fn base(&mut self, css: &'static str) -> &mut Self {
        let root = self.root_selector();
        self.base.push_str(css.trim().replace('&', &root).as_str());
        self.base.push('\n');
        self
    }

    /// Start an override rule. `selector` is written in source code with `&`
    /// standing for the instance root; without `&` it is treated as a
    /// descendant of the root.
    pub fn rule(&mut self, selector: &'static str) -> RuleBuilder<'_> {
        let selector = self.scope_selector(selector);
        self.rules.push(ScopedRule {
            selector,
            declarations: Vec::new(),
        });
        let last = self.rules.len() - 1;
        RuleBuilder {
            rule: &mut self.rules[last],
        }
    }

    /// Start a rule from a runtime selector, validating it first.
    pub fn try_rule(&mut self, selector: &str) -> Result<RuleBuilder<'_>> {
        if selector.trim().is_empty() {
            return Err(Error::invalid_selector(selector, "selector is empty"));
        }
        if let Some(c) = selector
            .chars()
            .find(|c| matches!(c, '{' | '}' | ';' | '<' | '\\' | '@') || c.is_control())
        {
            return Err(Error::invalid_selector(
                selector,
                format!("character {c:?} is not allowed"),
            ));
        }
        let selector = self.scope_selector(selector);
        self.rules.push(ScopedRule {
            selector,
            declarations: Vec::new(),
        });
        let last = self.rules.len() - 1;
        Ok(RuleBuilder {
            rule: &mut self.rules[last],
        })
    }

    fn scope_selector(&self, selector: &str) -> String {
        let root = self.root_selector();
        selector
            .split(',')
            .map(|part| {
                let part = part.trim();
                if part.contains('&') {
                    part.replace('&', &root)
                } else {
                    format!("{root} {part}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Override rules in insertion order.
    pub fn rules(&self) -> &[ScopedRule] {
        &self.rules
    }

    /// Serialise the sheet. Rules with no declarations are omitted.
    pub fn to_css(&self) -> String {
        let mut css = self.base.clone();
        for rule in &self.rules {
            if rule.declarations.is_empty() {
                continue;
            }
            let _ = write!(css, "{} {{", rule.selector);
            for decl in &rule.declarations {
                let _ = write!(css, " {}: {};", decl.property, decl.value);
            }
            css.push_str(" }\n");
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: &str) -> CssValue {
        CssValue::parse("test", raw).unwrap()
    }

    #[test]
    fn test_rules_are_scoped() {
        let mut sheet = ScopedStyleSheet::new("lume-hero-abc");
        sheet.rule("&").decl("min-height", value("100vh"));
        sheet.rule(".lume-hero-title").decl("color", value("#fff"));
        sheet
            .rule("& .a:hover, .b")
            .decl("opacity", CssValue::trusted("0.8"));

        let css = sheet.to_css();
        assert!(css.contains(".lume-hero-abc { min-height: 100vh; }"));
        assert!(css.contains(".lume-hero-abc .lume-hero-title { color: #fff; }"));
        assert!(css.contains(".lume-hero-abc .a:hover, .lume-hero-abc .b { opacity: 0.8; }"));
    }

    #[test]
    fn test_empty_rules_are_omitted() {
        let mut sheet = ScopedStyleSheet::new("x");
        sheet.rule("& .unused").decl_opt("color", None);
        assert_eq!(sheet.to_css(), "");
    }

    #[test]
    fn test_two_instances_do_not_share_selectors() {
        let mut first = ScopedStyleSheet::new("lume-btn-aaaaaaaaa");
        let mut second = ScopedStyleSheet::new("lume-btn-bbbbbbbbb");
        first.rule("& .lume-btn").decl("background", value("red"));
        second.rule("& .lume-btn").decl("background", value("blue"));

        let first_css = first.to_css();
        let second_css = second.to_css();
        assert!(!first_css.contains("lume-btn-bbbbbbbbb"));
        assert!(!second_css.contains("lume-btn-aaaaaaaaa"));
        assert!(!first_css.contains("blue"));
    }

    #[test]
    fn test_runtime_selector_validation() {
        let mut sheet = ScopedStyleSheet::new("x");
        assert!(sheet.try_rule(".ok > .child").is_ok());
        assert!(sheet.try_rule("a { color: red }").is_err());
        assert!(sheet.try_rule("  ").is_err());
    }
}
