//! Button widget implementation.
//!
//! This module provides [`Button`], `<lume-button>`. The label comes from the
//! default slot. A button with an `href` renders as a link and records a
//! navigation on activation.
//!
//! # Example
//!
//! ```ignore
//! let doc = Document::new();
//! let button = Component::<Button>::create(&doc)
//!     .with_attribute("variant", "glow")
//!     .with_attribute("href", "/pricing")
//!     .with_children(vec![ChildNode::element("span").text("Pricing")]);
//! button.mount()?;
//!
//! button.notifications().connect(|n| println!("{}", n.name()));
//! button.dispatch("button", &DomEvent::key_down("Enter"));
//! assert_eq!(doc.navigations()[0].href, "/pricing");
//! ```
//!
//! # Activation
//!
//! A click (or Enter / Space while focused) on an enabled button:
//!
//! 1. starts a ripple, unless the variant is `link`
//! 2. runs the named `onclick-handler`; its failure is logged and ignored
//! 3. navigates to `href` unless the handler prevented the default
//! 4. emits [`Notification::ClickActivate`]
//!
//! Disabled and loading buttons swallow the event.

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicUsize, Ordering};

use lume_core::logging::targets;
use lume_core::{DomEvent, EventKind, Listener};
use lume_style::CssValue;

use crate::attributes::{AttributeStore, LinkTarget, attribute_enum};
use crate::component::{BindContext, Component, Widget};
use crate::document::HandlerCall;
use crate::notification::Notification;
use crate::render::{RenderContext, esc};
use crate::slot::ChildNode;

attribute_enum! {
    /// Visual style of a button.
    pub enum ButtonVariant {
        /// Filled accent button.
        Primary = "primary",
        /// Muted filled button.
        Secondary = "secondary",
        /// Transparent with an accent border.
        Outlined = "outlined",
        /// Transparent until hovered.
        Ghost = "ghost",
        /// Filled with a colored glow.
        Glow = "glow",
        /// Square icon-only button.
        IconBtn = "icon-btn",
        /// Looks like a text link; no ripple.
        Link = "link",
    }
    default Primary
}

attribute_enum! {
    /// Button size.
    pub enum ButtonSize {
        /// Compact.
        Small = "small",
        /// Default.
        Medium = "medium",
        /// Prominent.
        Large = "large",
    }
    default Medium
}

/// Typed attributes of a button.
#[derive(Debug, Clone)]
pub struct ButtonConfig {
    /// Visual style.
    pub variant: ButtonVariant,
    /// Size.
    pub size: ButtonSize,
    /// Ignores activation.
    pub disabled: bool,
    /// Shows a spinner and ignores activation.
    pub loading: bool,
    /// Stretches to the container width.
    pub full_width: bool,
    /// Destination; renders the button as a link.
    pub href: Option<String>,
    /// Browsing context for `href`.
    pub target: LinkTarget,
    /// Name of a handler registered on the document.
    pub handler: Option<String>,
    /// Text of the default slot.
    pub label: String,
    color: Option<CssValue>,
    bg_color: Option<CssValue>,
    hover_color: Option<CssValue>,
    hover_bg_color: Option<CssValue>,
    active_color: Option<CssValue>,
    active_bg_color: Option<CssValue>,
    border: Option<CssValue>,
    radius: Option<CssValue>,
    padding: Option<CssValue>,
    font_size: Option<CssValue>,
    font_weight: Option<CssValue>,
    width: Option<CssValue>,
    height: Option<CssValue>,
    glow_color: Option<CssValue>,
    shadow: Option<CssValue>,
}

impl ButtonConfig {
    /// Whether activation is currently ignored.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }
}

/// `<lume-button>`.
#[derive(Debug, Default)]
pub struct Button {
    ripples: AtomicUsize,
}

impl Widget for Button {
    const TAG: &'static str = "lume-button";
    const ID_PREFIX: &'static str = "lume-btn-";
    const OBSERVED: &'static [&'static str] = &[
        "variant",
        "size",
        "disabled",
        "href",
        "target",
        "color",
        "bg-color",
        "hover-color",
        "hover-bg-color",
        "active-color",
        "active-bg-color",
        "border",
        "radius",
        "padding",
        "font-size",
        "font-weight",
        "width",
        "height",
        "glow-color",
        "shadow",
        "onclick-handler",
        "loading",
        "full-width",
    ];

    type Config = ButtonConfig;

    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> ButtonConfig {
        let label = children
            .iter()
            .filter(|child| child.slot_name().is_none())
            .map(ChildNode::text_content)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ButtonConfig {
            variant: attrs.get_enum("variant"),
            size: attrs.get_enum("size"),
            disabled: attrs.get_bool("disabled"),
            loading: attrs.get_bool("loading"),
            full_width: attrs.get_bool("full-width"),
            href: attrs.get_opt("href"),
            target: attrs.get_enum("target"),
            handler: attrs.get_opt("onclick-handler"),
            label,
            color: attrs.get_style_opt("color"),
            bg_color: attrs.get_style_opt("bg-color"),
            hover_color: attrs.get_style_opt("hover-color"),
            hover_bg_color: attrs.get_style_opt("hover-bg-color"),
            active_color: attrs.get_style_opt("active-color"),
            active_bg_color: attrs.get_style_opt("active-bg-color"),
            border: attrs.get_style_opt("border"),
            radius: attrs.get_style_opt("radius"),
            padding: attrs.get_style_opt("padding"),
            font_size: attrs.get_style_opt("font-size"),
            font_weight: attrs.get_style_opt("font-weight"),
            width: attrs.get_style_opt("width"),
            height: attrs.get_style_opt("height"),
            glow_color: attrs.get_style_opt("glow-color"),
            shadow: attrs.get_style_opt("shadow"),
        }
    }

    fn render(&self, config: &ButtonConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        write_styles(config, ctx);

        let inert = config.is_inert();
        let element = if config.href.is_some() { "a" } else { "button" };
        let node = ctx.node("button");

        write!(
            ctx,
            "<{element} class=\"btn variant-{} size-{}{}{}{}\"",
            config.variant,
            config.size,
            if config.disabled { " disabled" } else { "" },
            if config.loading { " loading" } else { "" },
            if config.full_width { " full-width" } else { "" },
        )?;
        match &config.href {
            Some(href) => write!(
                ctx,
                " href=\"{}\" target=\"{}\" role=\"link\"",
                esc(href),
                config.target
            )?,
            None => write!(
                ctx,
                " type=\"button\" role=\"button\" aria-disabled=\"{inert}\"{}",
                if inert { " disabled" } else { "" }
            )?,
        }
        write!(ctx, " tabindex=\"{}\"", if inert { "-1" } else { "0" })?;
        if config.loading {
            ctx.push(" aria-busy=\"true\" aria-live=\"polite\"");
        }
        write!(ctx, "{node}><span class=\"btn-content\">")?;
        if config.loading {
            ctx.push("<span class=\"loading-spinner\" aria-hidden=\"true\"></span>");
        }
        write!(ctx, "{}</span>", esc(&config.label))?;
        for _ in 0..self.ripples.load(Ordering::Acquire) {
            ctx.push("<span class=\"ripple\"></span>");
        }
        write!(ctx, "</{element}>")
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("button", EventKind::Click, |button, _, event| {
            button.activate(event);
        });
        listeners.extend(cx.on("button", EventKind::KeyDown, |button, _, event| {
            if !matches!(event.key(), Some("Enter" | " ")) {
                return;
            }
            if button.config().is_some_and(|config| config.is_inert()) {
                return;
            }
            event.prevent_default();
            button.activate(&DomEvent::click());
        }));
        listeners
    }

    // Expiry timers were cancelled with the component's scope.
    fn unmounted(&self, _component: &Component<Self>) {
        self.ripples.store(0, Ordering::Release);
    }
}

fn write_styles(config: &ButtonConfig, ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet();
    sheet.base(
        "& .btn { position: relative; overflow: hidden; display: inline-flex; align-items: center; justify-content: center; cursor: pointer; text-decoration: none; border: 1px solid transparent; border-radius: 8px; font-weight: 500; }\n\
         & .btn.size-small { padding: 0.4rem 0.8rem; font-size: 0.875rem; }\n\
         & .btn.size-medium { padding: 0.6rem 1.2rem; font-size: 1rem; }\n\
         & .btn.size-large { padding: 0.8rem 1.6rem; font-size: 1.125rem; }\n\
         & .btn.variant-primary { background: #3b82f6; color: #ffffff; }\n\
         & .btn.variant-secondary { background: #64748b; color: #ffffff; }\n\
         & .btn.variant-outlined { background: transparent; color: #3b82f6; border-color: #3b82f6; }\n\
         & .btn.variant-ghost { background: transparent; color: inherit; }\n\
         & .btn.variant-glow { background: #3b82f6; color: #ffffff; box-shadow: 0 0 20px var(--glow-color, rgba(59, 130, 246, 0.5)); }\n\
         & .btn.variant-icon-btn { padding: 0.5rem; aspect-ratio: 1; }\n\
         & .btn.variant-link { background: none; color: #3b82f6; padding: 0; text-decoration: underline; }\n\
         & .btn.full-width { width: 100%; }\n\
         & .btn.disabled, & .btn.loading { opacity: 0.6; cursor: not-allowed; }\n\
         & .ripple { position: absolute; border-radius: 50%; background: rgba(255, 255, 255, 0.4); animation: ripple-animation 0.6s ease-out; }\n\
         & .loading-spinner { width: 1em; height: 1em; border: 2px solid currentColor; border-right-color: transparent; border-radius: 50%; }",
    );
    sheet
        .rule("& .btn")
        .decl_opt("color", config.color.as_ref())
        .decl_opt("background", config.bg_color.as_ref())
        .decl_opt("border", config.border.as_ref())
        .decl_opt("border-radius", config.radius.as_ref())
        .decl_opt("padding", config.padding.as_ref())
        .decl_opt("font-size", config.font_size.as_ref())
        .decl_opt("font-weight", config.font_weight.as_ref())
        .decl_opt("width", config.width.as_ref())
        .decl_opt("height", config.height.as_ref())
        .decl_opt("box-shadow", config.shadow.as_ref())
        .decl_opt("--glow-color", config.glow_color.as_ref());
    sheet
        .rule("& .btn:hover:not(.disabled)")
        .decl_opt("color", config.hover_color.as_ref())
        .decl_opt("background", config.hover_bg_color.as_ref());
    sheet
        .rule("& .btn:active:not(.disabled)")
        .decl_opt("color", config.active_color.as_ref())
        .decl_opt("background", config.active_bg_color.as_ref());
}

impl Component<Button> {
    /// Programmatic click. Does nothing while disabled or loading.
    pub fn click(&self) -> bool {
        if self.config().is_none_or(|config| config.is_inert()) {
            return false;
        }
        self.dispatch("button", &DomEvent::click())
    }

    /// Ripples still animating.
    pub fn ripple_count(&self) -> usize {
        self.widget().ripples.load(Ordering::Acquire)
    }

    fn activate(&self, event: &DomEvent) {
        let Some(config) = self.config() else {
            return;
        };
        if config.is_inert() {
            event.prevent_default();
            event.stop_propagation();
            tracing::trace!(target: targets::RENDER, id = self.id(), "inert button ignored activation");
            return;
        }

        if config.variant != ButtonVariant::Link {
            self.start_ripple();
        }

        if let Some(handler) = &config.handler {
            self.document().run_handler(
                handler,
                &HandlerCall {
                    event,
                    source: self.id(),
                },
            );
        }

        if let Some(href) = &config.href
            && !event.default_prevented()
        {
            event.prevent_default();
            self.document().navigate(href.as_str(), config.target);
        }

        self.emit(Notification::ClickActivate {
            variant: config.variant.as_str().to_string(),
            size: config.size.as_str().to_string(),
            href: config.href.clone(),
            source: self.id().to_string(),
        });
    }

    fn start_ripple(&self) {
        self.widget().ripples.fetch_add(1, Ordering::AcqRel);
        let handle = self.downgrade();
        self.timers()
            .start(self.document().config().ripple_duration(), move || {
                if let Some(button) = handle.upgrade() {
                    let _ = button.widget().ripples.fetch_update(
                        Ordering::AcqRel,
                        Ordering::Acquire,
                        |n| n.checked_sub(1),
                    );
                    button.refresh();
                }
            });
        self.refresh();
    }
}
