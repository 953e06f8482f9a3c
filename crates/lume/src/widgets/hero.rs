//! `<lume-hero>`: a full-width hero section with up to two calls to action.
//!
//! A call to action with an `href` renders as a link and only records the
//! navigation; one without renders as a button and emits
//! [`Notification::HeroPrimaryActivate`] or
//! [`Notification::HeroSecondaryActivate`].
//!
//! Text attributes set to an empty string hide their element.

use std::fmt::{self, Write as _};

use lume_core::{EventKind, Listener};
use lume_style::{CssValue, ThemeMode};

use super::button::{ButtonSize, ButtonVariant};
use crate::attributes::{AttributeEnum, AttributeStore, LinkTarget, attribute_enum};
use crate::component::{BindContext, Widget};
use crate::notification::Notification;
use crate::render::{NodeData, RenderContext, esc};
use crate::slot::ChildNode;

attribute_enum! {
    /// Placement of the hero content.
    pub enum HeroLayout {
        /// Centred column.
        Centered = "centered",
        /// Aligned left.
        Left = "left",
        /// Aligned right.
        Right = "right",
        /// Two columns.
        Split = "split",
    }
    default Centered
}

attribute_enum! {
    /// Horizontal alignment.
    pub enum Align {
        /// Start edge.
        Left = "left",
        /// Centre.
        Center = "center",
        /// End edge.
        Right = "right",
    }
    default Center
}

attribute_enum! {
    /// Vertical alignment.
    pub enum VerticalAlign {
        /// Top edge.
        Top = "top",
        /// Middle.
        Center = "center",
        /// Bottom edge.
        Bottom = "bottom",
    }
    default Center
}

attribute_enum! {
    /// Source of the hero background.
    pub enum BackgroundType {
        /// Solid color.
        Color = "color",
        /// Image under an overlay.
        Image = "image",
        /// CSS gradient.
        Gradient = "gradient",
    }
    default Color
}

impl Align {
    fn flex(self) -> CssValue {
        CssValue::from(match self {
            Self::Left => CssValue::trusted("flex-start"),
            Self::Center => CssValue::trusted("center"),
            Self::Right => CssValue::trusted("flex-end"),
        })
    }
}

impl VerticalAlign {
    fn flex(self) -> CssValue {
        CssValue::from(match self {
            Self::Top => CssValue::trusted("flex-start"),
            Self::Center => CssValue::trusted("center"),
            Self::Bottom => CssValue::trusted("flex-end"),
        })
    }
}

/// One call to action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    /// Visible text; empty hides the action.
    pub text: String,
    /// Destination; renders the action as a link.
    pub href: Option<String>,
    /// Browsing context for `href`.
    pub target: LinkTarget,
}

/// Typed attributes of a hero.
#[derive(Debug, Clone)]
pub struct HeroConfig {
    /// Content placement.
    pub layout: HeroLayout,
    /// Theme.
    pub theme: ThemeMode,
    /// Background source.
    pub background_type: BackgroundType,
    /// Main heading.
    pub heading: String,
    /// Secondary heading.
    pub subheading: String,
    /// Body text.
    pub description: String,
    /// Primary call to action.
    pub primary: CallToAction,
    /// Size class of the primary action.
    pub primary_size: ButtonSize,
    /// Secondary call to action.
    pub secondary: CallToAction,
    /// Variant class of the secondary action.
    pub secondary_variant: ButtonVariant,
    /// Fades the content in.
    pub animate: bool,
    /// Text alignment.
    pub text_align: Align,
    content_align: Align,
    vertical_align: VerticalAlign,
    height: CssValue,
    width: CssValue,
    padding: CssValue,
    margin: CssValue,
    max_width: CssValue,
    background_color: CssValue,
    background_image: Option<CssValue>,
    background_position: CssValue,
    background_size: CssValue,
    background_overlay: CssValue,
    background_overlay_opacity: CssValue,
    background_gradient: Option<CssValue>,
    heading_color: CssValue,
    heading_size: CssValue,
    heading_weight: CssValue,
    subheading_color: CssValue,
    subheading_size: CssValue,
    description_color: CssValue,
    description_size: CssValue,
    primary_color: Option<CssValue>,
    primary_bg_color: Option<CssValue>,
    primary_hover_color: Option<CssValue>,
    primary_hover_bg_color: Option<CssValue>,
    secondary_color: Option<CssValue>,
    secondary_bg_color: Option<CssValue>,
    secondary_hover_color: Option<CssValue>,
    secondary_hover_bg_color: Option<CssValue>,
    animation_delay: CssValue,
    animation_duration: CssValue,
}

/// `<lume-hero>`.
#[derive(Debug, Default)]
pub struct Hero;

/// Text attribute: absent gives `default`, present-but-empty hides the element.
fn text(attrs: &AttributeStore, name: &str, default: &str) -> String {
    attrs.get(name).unwrap_or(default).trim().to_string()
}

fn call_to_action(attrs: &AttributeStore, prefix: &str, default_text: &str) -> CallToAction {
    let attr = |suffix: &str| format!("{prefix}-button-{suffix}");
    CallToAction {
        text: text(attrs, &attr("text"), default_text),
        href: attrs.get_opt(&attr("href")),
        target: attrs.get_enum(&attr("target")),
    }
}

impl Widget for Hero {
    const TAG: &'static str = "lume-hero";
    const ID_PREFIX: &'static str = "lume-hero-";
    const OBSERVED: &'static [&'static str] = &[
        "theme",
        "layout",
        "height",
        "width",
        "padding",
        "margin",
        "background-type",
        "background-color",
        "background-image",
        "background-position",
        "background-size",
        "background-overlay",
        "background-overlay-opacity",
        "background-gradient",
        "content-align",
        "text-align",
        "vertical-align",
        "max-width",
        "heading-text",
        "heading-color",
        "heading-size",
        "heading-weight",
        "subheading-text",
        "subheading-color",
        "subheading-size",
        "description-text",
        "description-color",
        "description-size",
        "primary-button-text",
        "primary-button-color",
        "primary-button-bg-color",
        "primary-button-hover-color",
        "primary-button-hover-bg-color",
        "primary-button-href",
        "primary-button-target",
        "primary-button-size",
        "secondary-button-text",
        "secondary-button-color",
        "secondary-button-bg-color",
        "secondary-button-hover-color",
        "secondary-button-hover-bg-color",
        "secondary-button-href",
        "secondary-button-target",
        "secondary-button-variant",
        "animate",
        "animation-delay",
        "animation-duration",
    ];

    type Config = HeroConfig;

    fn configure(&self, attrs: &AttributeStore, _children: &[ChildNode]) -> HeroConfig {
        let theme: ThemeMode = attrs.get_enum("theme");
        let palette = theme.palette();
        let secondary_variant = attrs
            .get("secondary-button-variant")
            .and_then(ButtonVariant::from_attribute)
            .unwrap_or(ButtonVariant::Outlined);
        let primary_size = attrs
            .get("primary-button-size")
            .and_then(ButtonSize::from_attribute)
            .unwrap_or(ButtonSize::Large);

        HeroConfig {
            layout: attrs.get_enum("layout"),
            theme,
            background_type: attrs.get_enum("background-type"),
            heading: text(attrs, "heading-text", "Welcome to Our Platform"),
            subheading: text(attrs, "subheading-text", "Build amazing experiences"),
            description: text(
                attrs,
                "description-text",
                "Create beautiful, responsive websites with our modern component library.",
            ),
            primary: call_to_action(attrs, "primary", "Get Started"),
            primary_size,
            secondary: call_to_action(attrs, "secondary", "Learn More"),
            secondary_variant,
            animate: attrs.get_bool("animate"),
            text_align: attrs.get_enum("text-align"),
            content_align: attrs.get_enum("content-align"),
            vertical_align: attrs.get_enum("vertical-align"),
            height: attrs.get_style("height", CssValue::trusted("100vh")),
            width: attrs.get_style("width", CssValue::trusted("100%")),
            padding: attrs.get_style("padding", CssValue::trusted("2rem")),
            margin: attrs.get_style("margin", CssValue::trusted("0")),
            max_width: attrs.get_style("max-width", CssValue::trusted("800px")),
            background_color: attrs.get_style("background-color", palette.background),
            background_image: attrs.get_style_opt("background-image"),
            background_position: attrs.get_style("background-position", CssValue::trusted("center center")),
            background_size: attrs.get_style("background-size", CssValue::trusted("cover")),
            background_overlay: attrs.get_style("background-overlay", CssValue::trusted("rgba(0, 0, 0, 0.5)")),
            background_overlay_opacity: attrs.get_style("background-overlay-opacity", CssValue::trusted("0.5")),
            background_gradient: attrs.get_style_opt("background-gradient"),
            heading_color: attrs.get_style("heading-color", palette.text),
            heading_size: attrs.get_style("heading-size", CssValue::trusted("clamp(2.5rem, 8vw, 5rem)")),
            heading_weight: attrs.get_style("heading-weight", CssValue::trusted("800")),
            subheading_color: attrs.get_style("subheading-color", palette.muted),
            subheading_size: attrs.get_style("subheading-size", CssValue::trusted("clamp(1.25rem, 3vw, 1.75rem)")),
            description_color: attrs.get_style("description-color", palette.muted),
            description_size: attrs.get_style("description-size", CssValue::trusted("clamp(1rem, 2vw, 1.25rem)")),
            primary_color: attrs.get_style_opt("primary-button-color"),
            primary_bg_color: attrs.get_style_opt("primary-button-bg-color"),
            primary_hover_color: attrs.get_style_opt("primary-button-hover-color"),
            primary_hover_bg_color: attrs.get_style_opt("primary-button-hover-bg-color"),
            secondary_color: attrs.get_style_opt("secondary-button-color"),
            secondary_bg_color: attrs.get_style_opt("secondary-button-bg-color"),
            secondary_hover_color: attrs.get_style_opt("secondary-button-hover-color"),
            secondary_hover_bg_color: attrs.get_style_opt("secondary-button-hover-bg-color"),
            animation_delay: attrs.get_style("animation-delay", CssValue::trusted("0s")),
            animation_duration: attrs.get_style("animation-duration", CssValue::trusted("0.3s")),
        }
    }

    fn render(&self, config: &HeroConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        write_styles(config, ctx);

        write!(
            ctx,
            "<div class=\"hero-container layout-{} theme-{} background-{}{}\"><div class=\"content-wrapper\">",
            config.layout,
            config.theme,
            config.background_type,
            if config.animate { " animate" } else { "" }
        )?;
        if !config.heading.is_empty() {
            write!(ctx, "<h1 class=\"heading\">{}</h1>", esc(&config.heading))?;
        }
        if !config.subheading.is_empty() {
            write!(ctx, "<h2 class=\"subheading\">{}</h2>", esc(&config.subheading))?;
        }
        if !config.description.is_empty() {
            write!(ctx, "<p class=\"description\">{}</p>", esc(&config.description))?;
        }

        ctx.push("<div class=\"cta-buttons\">");
        write_action(
            ctx,
            &config.primary,
            "primary",
            &format!("primary-btn size-{}", config.primary_size),
        )?;
        write_action(
            ctx,
            &config.secondary,
            "secondary",
            &format!("secondary-btn variant-{}", config.secondary_variant),
        )?;
        ctx.push("</div></div></div>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("primary", EventKind::Click, |hero, _, _| {
            if let Some(config) = hero.config() {
                hero.emit(Notification::HeroPrimaryActivate {
                    text: config.primary.text.clone(),
                });
            }
        });
        listeners.extend(cx.on("secondary", EventKind::Click, |hero, _, _| {
            if let Some(config) = hero.config() {
                hero.emit(Notification::HeroSecondaryActivate {
                    text: config.secondary.text.clone(),
                });
            }
        }));
        listeners.extend(cx.on("link", EventKind::Click, |hero, data, event| {
            if event.default_prevented() {
                return;
            }
            if let Some(href) = data.get("href") {
                event.prevent_default();
                let target = data
                    .get("target")
                    .and_then(LinkTarget::from_attribute)
                    .unwrap_or_default();
                hero.document().navigate(href, target);
            }
        }));
        listeners
    }
}

fn write_action(
    ctx: &mut RenderContext<'_>,
    action: &CallToAction,
    role: &'static str,
    class: &str,
) -> fmt::Result {
    if action.text.is_empty() {
        return Ok(());
    }
    match &action.href {
        Some(href) => {
            let node = ctx.node_with(
                "link",
                NodeData::new()
                    .with("href", href.as_str())
                    .with("target", action.target.as_str())
                    .with("action", role),
            );
            write!(
                ctx,
                "<a href=\"{}\" target=\"{}\" class=\"{class}\"{node}>{}</a>",
                esc(href),
                action.target,
                esc(&action.text)
            )
        }
        None => {
            let node = ctx.node(role);
            write!(
                ctx,
                "<button type=\"button\" class=\"{class}\"{node}>{}</button>",
                esc(&action.text)
            )
        }
    }
}

fn write_styles(config: &HeroConfig, ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet();
    sheet.base(
        "& .hero-container { position: relative; display: flex; overflow: hidden; box-sizing: border-box; }\n\
         & .content-wrapper { position: relative; z-index: 2; width: 100%; }\n\
         & .layout-split .content-wrapper { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }\n\
         & .background-image::before { content: \"\"; position: absolute; inset: 0; z-index: 1; }\n\
         & .cta-buttons { display: flex; flex-wrap: wrap; gap: 1rem; margin-top: 2rem; }\n\
         & .primary-btn, & .secondary-btn { cursor: pointer; border-radius: 8px; text-decoration: none; border: 2px solid transparent; }\n\
         & .size-small { padding: 0.5rem 1rem; }\n\
         & .size-medium { padding: 0.75rem 1.5rem; }\n\
         & .size-large { padding: 1rem 2rem; font-size: 1.125rem; }\n\
         & .variant-outlined { background: transparent; border-color: currentColor; }\n\
         & .animate .content-wrapper { animation-name: hero-fade-in; animation-fill-mode: both; }",
    );
    sheet
        .rule("& .hero-container")
        .decl("height", &config.height)
        .decl("width", &config.width)
        .decl("padding", &config.padding)
        .decl("margin", &config.margin)
        .decl("justify-content", config.content_align.flex())
        .decl("align-items", config.vertical_align.flex())
        .decl("background-color", &config.background_color);
    match config.background_type {
        BackgroundType::Color => {}
        BackgroundType::Image => {
            sheet
                .rule("& .hero-container")
                .decl_opt("background-image", config.background_image.as_ref())
                .decl("background-position", &config.background_position)
                .decl("background-size", &config.background_size);
            sheet
                .rule("& .background-image::before")
                .decl("background", &config.background_overlay)
                .decl("opacity", &config.background_overlay_opacity);
        }
        BackgroundType::Gradient => {
            sheet
                .rule("& .hero-container")
                .decl_opt("background", config.background_gradient.as_ref());
        }
    }
    sheet
        .rule("& .content-wrapper")
        .decl("max-width", &config.max_width)
        .decl("text-align", CssValue::from(match config.text_align {
            Align::Left => CssValue::trusted("left"),
            Align::Center => CssValue::trusted("center"),
            Align::Right => CssValue::trusted("right"),
        }));
    sheet
        .rule("& .heading")
        .decl("color", &config.heading_color)
        .decl("font-size", &config.heading_size)
        .decl("font-weight", &config.heading_weight);
    sheet
        .rule("& .subheading")
        .decl("color", &config.subheading_color)
        .decl("font-size", &config.subheading_size);
    sheet
        .rule("& .description")
        .decl("color", &config.description_color)
        .decl("font-size", &config.description_size);
    sheet
        .rule("& .primary-btn")
        .decl_opt("color", config.primary_color.as_ref())
        .decl_opt("background", config.primary_bg_color.as_ref());
    sheet
        .rule("& .primary-btn:hover")
        .decl_opt("color", config.primary_hover_color.as_ref())
        .decl_opt("background", config.primary_hover_bg_color.as_ref());
    sheet
        .rule("& .secondary-btn")
        .decl_opt("color", config.secondary_color.as_ref())
        .decl_opt("background", config.secondary_bg_color.as_ref());
    sheet
        .rule("& .secondary-btn:hover")
        .decl_opt("color", config.secondary_hover_color.as_ref())
        .decl_opt("background", config.secondary_hover_bg_color.as_ref());
    if config.animate {
        sheet
            .rule("& .animate .content-wrapper")
            .decl("animation-delay", &config.animation_delay)
            .decl("animation-duration", &config.animation_duration);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lume_core::DomEvent;
    use parking_lot::Mutex;

    use super::*;
    use crate::Document;
    use crate::component::Component;

    #[test]
    fn test_button_actions_emit_text() {
        let doc = Document::new();
        let hero = Component::<Hero>::create(&doc).with_attribute("primary-button-text", "Try it");
        hero.mount().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        hero.notifications().connect(move |n| seen_clone.lock().push(n.clone()));

        hero.dispatch("primary", &DomEvent::click());
        hero.dispatch("secondary", &DomEvent::click());
        assert_eq!(
            *seen.lock(),
            vec![
                Notification::HeroPrimaryActivate { text: "Try it".into() },
                Notification::HeroSecondaryActivate { text: "Learn More".into() },
            ]
        );
    }

    #[test]
    fn test_link_action_navigates_without_notification() {
        let doc = Document::new();
        let hero = Component::<Hero>::create(&doc)
            .with_attribute("primary-button-href", "/start")
            .with_attribute("primary-button-target", "_blank");
        hero.mount().unwrap();
        assert!(hero.node("primary").is_none());
        assert!(hero.html().contains("<a href=\"/start\" target=\"_blank\" class=\"primary-btn size-large\""));

        hero.dispatch("link", &DomEvent::click());
        assert_eq!(doc.navigations()[0].href, "/start");
        assert_eq!(doc.navigations()[0].target, LinkTarget::Blank);
    }

    #[test]
    fn test_empty_text_hides_element() {
        let doc = Document::new();
        let hero = Component::<Hero>::create(&doc)
            .with_attribute("subheading-text", "")
            .with_attribute("secondary-button-text", "");
        hero.mount().unwrap();
        let output = hero.output();
        let markup = output.markup();
        assert!(!markup.contains("class=\"subheading\""));
        assert!(!markup.contains("secondary-btn"));
        assert!(markup.contains("Welcome to Our Platform"));
    }

    #[test]
    fn test_secondary_variant_default_is_outlined() {
        let doc = Document::new();
        let hero = Component::<Hero>::create(&doc).with_attribute("secondary-button-variant", "bogus");
        hero.mount().unwrap();
        assert_eq!(hero.config().unwrap().secondary_variant, ButtonVariant::Outlined);
    }
}
