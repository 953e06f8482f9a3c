//! `<lume-navbar>`: a responsive navigation bar.
//!
//! Links come from `a` elements inside the `links` slot and action buttons
//! from `button` / `a[role=button]` elements inside the `actions` slot. With
//! both slots empty a built-in set is shown.
//!
//! Below `mobile-breakpoint` the bar collapses behind a hamburger toggle. The
//! open menu closes on link or action activation, on a click anywhere outside
//! the navbar, and when the viewport grows past the breakpoint.

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};

use lume_core::logging::targets;
use lume_core::{EventKind, Listener};
use lume_style::{CssValue, ThemeMode};

use crate::attributes::{AttributeEnum, AttributeStore, LinkTarget, attribute_enum};
use crate::component::{BindContext, Component, Widget};
use crate::notification::{NavItemKind, Notification};
use crate::render::{NodeData, RenderContext, esc};
use crate::slot::{ChildNode, slotted};

const DEFAULT_BREAKPOINT_PX: u32 = 768;

attribute_enum! {
    /// Navbar look.
    pub enum NavbarVariant {
        /// Solid bar.
        Default = "default",
        /// Translucent blurred bar.
        Glassmorphism = "glassmorphism",
        /// Gradient background.
        Gradient = "gradient",
        /// Logo left, links centred, actions right.
        Split = "split",
        /// Vertical bar.
        Sidebar = "sidebar",
        /// Detached rounded bar.
        Floating = "floating",
        /// Wide drop-down menus.
        Mega = "mega",
        /// No background.
        Transparent = "transparent",
    }
    default Default
}

attribute_enum! {
    /// Where the collapsed menu appears.
    pub enum MobileMenuPosition {
        /// Drops down from the bar.
        Top = "top",
        /// Slides in from the left.
        Left = "left",
        /// Slides in from the right.
        Right = "right",
        /// Covers the page.
        Overlay = "overlay",
    }
    default Top
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Destination.
    pub href: String,
    /// Visible text.
    pub text: String,
    /// Browsing context.
    pub target: LinkTarget,
    /// Marks the current page.
    pub active: bool,
}

impl NavLink {
    /// A link opening in the same frame.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
            target: LinkTarget::default(),
            active: false,
        }
    }

    /// Mark as the current page.
    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    fn from_child(node: &ChildNode) -> Self {
        Self {
            href: node.attribute("href").filter(|h| !h.is_empty()).unwrap_or("#").to_string(),
            text: non_empty_or(node.text_content(), "Link"),
            target: node
                .attribute("target")
                .and_then(LinkTarget::from_attribute)
                .unwrap_or_default(),
            active: node.has_attribute("active"),
        }
    }

    fn to_child(&self) -> ChildNode {
        let node = ChildNode::element("a")
            .attr("href", self.href.as_str())
            .attr("target", self.target.as_str())
            .text(self.text.as_str());
        if self.active { node.attr("active", "") } else { node }
    }
}

/// An action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    /// Visible text.
    pub text: String,
    /// Destination, if the action navigates.
    pub href: Option<String>,
    /// Browsing context for `href`.
    pub target: LinkTarget,
    /// Style class, `primary` by default.
    pub variant: String,
}

impl NavButton {
    /// A primary action without a destination.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
            target: LinkTarget::default(),
            variant: "primary".to_string(),
        }
    }

    /// Navigate to `href` on activation.
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set the style class.
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    fn from_child(node: &ChildNode) -> Self {
        Self {
            text: non_empty_or(node.text_content(), "Button"),
            href: node.attribute("href").filter(|h| !h.is_empty()).map(str::to_string),
            target: node
                .attribute("target")
                .and_then(LinkTarget::from_attribute)
                .unwrap_or_default(),
            variant: node
                .attribute("variant")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or("primary")
                .to_string(),
        }
    }

    fn to_child(&self) -> ChildNode {
        let mut node = ChildNode::element("button")
            .attr("variant", self.variant.as_str())
            .attr("target", self.target.as_str())
            .text(self.text.as_str());
        if let Some(href) = &self.href {
            node = node.attr("href", href.as_str());
        }
        node
    }
}

fn non_empty_or(text: String, default: &str) -> String {
    if text.is_empty() { default.to_string() } else { text }
}

fn default_navigation() -> (Vec<NavLink>, Vec<NavButton>) {
    (
        vec![
            NavLink::new("Home", "#").active(),
            NavLink::new("About", "#"),
            NavLink::new("Services", "#"),
            NavLink::new("Contact", "#"),
        ],
        vec![NavButton::new("Get Started")],
    )
}

/// Typed attributes of a navbar.
#[derive(Debug, Clone)]
pub struct NavbarConfig {
    /// Look.
    pub variant: NavbarVariant,
    /// Theme.
    pub theme: ThemeMode,
    /// Brand text, also the logo's alt text.
    pub logo_text: String,
    /// Logo image.
    pub logo_src: Option<String>,
    /// Widest viewport, in pixels, that shows the collapsed menu.
    pub mobile_breakpoint: u32,
    /// Where the collapsed menu appears.
    pub mobile_menu_position: MobileMenuPosition,
    /// Stays at the top while scrolling.
    pub sticky: bool,
    /// Centres the links.
    pub center_links: bool,
    /// Swaps logo and actions.
    pub reverse_layout: bool,
    /// Links in render order.
    pub links: Vec<NavLink>,
    /// Actions in render order.
    pub buttons: Vec<NavButton>,
    brand_color: CssValue,
    bg_color: CssValue,
    text_color: CssValue,
    shadow: CssValue,
    border_bottom: CssValue,
    max_width: CssValue,
    container_padding: CssValue,
    height: Option<CssValue>,
    mobile_menu_bg: CssValue,
    animation_duration: CssValue,
    hamburger_color: CssValue,
    active_link_color: CssValue,
    hover_link_color: CssValue,
    button_bg: CssValue,
    button_color: CssValue,
    button_hover_bg: CssValue,
    button_radius: CssValue,
    button_padding: CssValue,
    logo_width: CssValue,
    logo_height: CssValue,
}

/// `<lume-navbar>`.
#[derive(Debug, Default)]
pub struct Navbar {
    open: AtomicBool,
}

impl Widget for Navbar {
    const TAG: &'static str = "lume-navbar";
    const ID_PREFIX: &'static str = "lume-navbar-";
    const OBSERVED: &'static [&'static str] = &[
        "variant",
        "theme",
        "logo-text",
        "logo-src",
        "logo-width",
        "logo-height",
        "brand-color",
        "bg-color",
        "text-color",
        "mobile-breakpoint",
        "sticky",
        "shadow",
        "blur-bg",
        "border-bottom",
        "height",
        "max-width",
        "container-padding",
        "mobile-menu-bg",
        "mobile-menu-position",
        "animation-duration",
        "hamburger-color",
        "active-link-color",
        "hover-link-color",
        "button-bg",
        "button-color",
        "button-hover-bg",
        "button-radius",
        "button-padding",
        "center-links",
        "reverse-layout",
    ];

    type Config = NavbarConfig;

    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> NavbarConfig {
        let theme: ThemeMode = attrs.get_enum("theme");
        let palette = theme.palette();

        let links: Vec<_> = slotted(children, "links", |node| node.tag() == "a")
            .into_iter()
            .map(NavLink::from_child)
            .collect();
        let buttons: Vec<_> = slotted(children, "actions", |node| {
            node.tag() == "button" || (node.tag() == "a" && node.attribute("role") == Some("button"))
        })
        .into_iter()
        .map(NavButton::from_child)
        .collect();
        let (links, buttons) = if links.is_empty() && buttons.is_empty() {
            default_navigation()
        } else {
            (links, buttons)
        };

        let brand_color = attrs.get_style("brand-color", palette.accent);
        let text_color = attrs.get_style("text-color", palette.text);
        NavbarConfig {
            variant: attrs.get_enum("variant"),
            theme,
            logo_text: attrs.get_or("logo-text", "Brand"),
            logo_src: attrs.get_opt("logo-src"),
            mobile_breakpoint: attrs.get_px("mobile-breakpoint", DEFAULT_BREAKPOINT_PX),
            mobile_menu_position: attrs.get_enum("mobile-menu-position"),
            sticky: attrs.get_bool("sticky"),
            center_links: attrs.get_bool("center-links"),
            reverse_layout: attrs.get_bool("reverse-layout"),
            links,
            buttons,
            bg_color: attrs.get_style("bg-color", palette.surface),
            shadow: attrs.get_style("shadow", CssValue::trusted("0 4px 20px rgba(0, 0, 0, 0.3)")),
            border_bottom: attrs.get_style("border-bottom", CssValue::trusted("1px solid rgba(255, 255, 255, 0.1)")),
            max_width: attrs.get_style("max-width", CssValue::trusted("1200px")),
            container_padding: attrs.get_style("container-padding", CssValue::trusted("1rem")),
            height: attrs.get_style_opt("height"),
            mobile_menu_bg: attrs.get_style("mobile-menu-bg", palette.surface),
            animation_duration: attrs.get_style("animation-duration", CssValue::trusted("0.3s")),
            hamburger_color: attrs.get_style("hamburger-color", &text_color),
            active_link_color: attrs.get_style("active-link-color", &brand_color),
            hover_link_color: attrs.get_style("hover-link-color", &brand_color),
            button_bg: attrs.get_style("button-bg", palette.accent),
            button_color: attrs.get_style("button-color", CssValue::trusted("#ffffff")),
            button_hover_bg: attrs.get_style("button-hover-bg", palette.accent_hover),
            button_radius: attrs.get_style("button-radius", CssValue::trusted("8px")),
            button_padding: attrs.get_style("button-padding", CssValue::trusted("0.5rem 1rem")),
            logo_width: attrs.get_style("logo-width", CssValue::trusted("auto")),
            logo_height: attrs.get_style("logo-height", CssValue::trusted("40px")),
            brand_color,
            text_color,
        }
    }

    fn render(&self, config: &NavbarConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        write_styles(config, ctx);
        let open = if self.open.load(Ordering::Acquire) { " open" } else { "" };

        write!(
            ctx,
            "<nav class=\"navbar variant-{}{}{}{}\"><div class=\"nav-container\"><a href=\"/\" class=\"logo\">",
            config.variant,
            if config.sticky { " sticky" } else { "" },
            if config.center_links { " center-links" } else { "" },
            if config.reverse_layout { " reverse-layout" } else { "" },
        )?;
        match &config.logo_src {
            Some(src) => write!(
                ctx,
                "<img src=\"{}\" alt=\"{}\" class=\"logo-image\">",
                esc(src),
                esc(&config.logo_text)
            )?,
            None => write!(ctx, "<span class=\"logo-text\">{}</span>", esc(&config.logo_text))?,
        }
        ctx.push("</a><div class=\"nav-content\"><div class=\"nav-links\">");
        write_links(ctx, &config.links, "nav-link")?;
        ctx.push("</div><div class=\"nav-actions\">");
        write_buttons(ctx, &config.buttons)?;
        ctx.push("</div></div>");

        let toggle = ctx.node("toggle");
        write!(
            ctx,
            "<button class=\"hamburger{open}\" aria-label=\"Toggle menu\" aria-expanded=\"{}\"{toggle}>\
             <div class=\"hamburger-line\"></div><div class=\"hamburger-line\"></div><div class=\"hamburger-line\"></div></button></div>",
            !open.is_empty()
        )?;

        write!(
            ctx,
            "<div class=\"mobile-menu position-{}{open}\"><div class=\"mobile-nav-content\"><div class=\"mobile-nav-links\">",
            config.mobile_menu_position
        )?;
        write_links(ctx, &config.links, "mobile-nav-link")?;
        ctx.push("</div><div class=\"mobile-nav-actions\">");
        write_buttons(ctx, &config.buttons)?;
        ctx.push("</div></div></div></nav>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("toggle", EventKind::Click, |navbar, _, event| {
            event.stop_propagation();
            navbar.toggle_menu();
        });
        listeners.extend(cx.on("link", EventKind::Click, |navbar, data, event| {
            let href = data.get("href").unwrap_or("#").to_string();
            navbar.emit(Notification::NavActivate {
                kind: NavItemKind::Link,
                href: Some(href.clone()),
                text: data.get("text").unwrap_or_default().to_string(),
            });
            if !event.default_prevented() {
                event.prevent_default();
                let target = data
                    .get("target")
                    .and_then(LinkTarget::from_attribute)
                    .unwrap_or_default();
                navbar.document().navigate(href, target);
            }
            navbar.close_menu();
        }));
        listeners.extend(cx.on("action", EventKind::Click, |navbar, data, _| {
            let href = data.get("href").map(str::to_string);
            navbar.emit(Notification::NavActivate {
                kind: NavItemKind::Button,
                href: href.clone(),
                text: data.get("text").unwrap_or_default().to_string(),
            });
            if let Some(href) = href {
                let target = data
                    .get("target")
                    .and_then(LinkTarget::from_attribute)
                    .unwrap_or_default();
                navbar.document().navigate(href, target);
            }
            navbar.close_menu();
        }));
        listeners
    }

    fn global_listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let document = cx.component().document();
        vec![
            cx.on_target(document.window(), EventKind::Resize, |navbar, event| {
                let Some(width) = event.width() else {
                    return;
                };
                let breakpoint = navbar
                    .config()
                    .map_or(DEFAULT_BREAKPOINT_PX, |config| config.mobile_breakpoint);
                if width > breakpoint {
                    navbar.close_menu();
                }
            }),
            cx.on_target(document.body(), EventKind::Click, |navbar, event| {
                if !event.path_contains(navbar.id()) {
                    navbar.close_menu();
                }
            }),
        ]
    }
}

fn write_links(ctx: &mut RenderContext<'_>, links: &[NavLink], class: &str) -> fmt::Result {
    for link in links {
        let node = ctx.node_with(
            "link",
            NodeData::new()
                .with("href", link.href.as_str())
                .with("text", link.text.as_str())
                .with("target", link.target.as_str()),
        );
        write!(
            ctx,
            "<a href=\"{}\" target=\"{}\" class=\"{class}{}\"{}{node}>{}</a>",
            esc(&link.href),
            link.target,
            if link.active { " active" } else { "" },
            if link.active { " aria-current=\"page\"" } else { "" },
            esc(&link.text)
        )?;
    }
    Ok(())
}

fn write_buttons(ctx: &mut RenderContext<'_>, buttons: &[NavButton]) -> fmt::Result {
    for button in buttons {
        let node = ctx.node_with(
            "action",
            NodeData::new()
                .with("text", button.text.as_str())
                .with_opt("href", button.href.as_deref())
                .with("target", button.target.as_str()),
        );
        write!(ctx, "<button class=\"nav-button {}\" type=\"button\"", esc(&button.variant))?;
        if let Some(href) = &button.href {
            write!(ctx, " data-href=\"{}\" data-target=\"{}\"", esc(href), button.target)?;
        }
        write!(ctx, "{node}>{}</button>", esc(&button.text))?;
    }
    Ok(())
}

fn write_styles(config: &NavbarConfig, ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet();
    sheet.base(
        "& .navbar { width: 100%; z-index: 1000; }\n\
         & .navbar.sticky { position: sticky; top: 0; }\n\
         & .nav-container { display: flex; align-items: center; justify-content: space-between; margin: 0 auto; }\n\
         & .reverse-layout .nav-container { flex-direction: row-reverse; }\n\
         & .nav-content { display: flex; align-items: center; gap: 2rem; }\n\
         & .center-links .nav-links { margin: 0 auto; }\n\
         & .nav-links { display: flex; gap: 1.5rem; }\n\
         & .nav-link, & .mobile-nav-link { text-decoration: none; color: inherit; }\n\
         & .nav-button { border: none; cursor: pointer; }\n\
         & .hamburger { display: none; background: none; border: none; cursor: pointer; }\n\
         & .hamburger-line { width: 24px; height: 2px; margin: 5px 0; }\n\
         & .mobile-menu { display: none; }\n\
         & .mobile-menu.open { display: block; }\n\
         & .variant-glassmorphism { backdrop-filter: blur(10px); }\n\
         & .variant-floating { margin: 1rem auto; border-radius: 16px; }\n\
         & .variant-transparent { background: transparent; box-shadow: none; }",
    );
    sheet
        .rule("& .navbar")
        .decl("background", &config.bg_color)
        .decl("color", &config.text_color)
        .decl("box-shadow", &config.shadow)
        .decl("border-bottom", &config.border_bottom)
        .decl_opt("height", config.height.as_ref())
        .decl("--brand-color", &config.brand_color);
    sheet
        .rule("& .nav-container")
        .decl("max-width", &config.max_width)
        .decl("padding", &config.container_padding);
    sheet
        .rule("& .logo-text")
        .decl("color", &config.brand_color);
    sheet
        .rule("& .logo-image")
        .decl("width", &config.logo_width)
        .decl("height", &config.logo_height);
    sheet
        .rule("& .nav-link.active, & .mobile-nav-link.active")
        .decl("color", &config.active_link_color);
    sheet
        .rule("& .nav-link:hover, & .mobile-nav-link:hover")
        .decl("color", &config.hover_link_color);
    sheet
        .rule("& .nav-button")
        .decl("background", &config.button_bg)
        .decl("color", &config.button_color)
        .decl("border-radius", &config.button_radius)
        .decl("padding", &config.button_padding);
    sheet
        .rule("& .nav-button:hover")
        .decl("background", &config.button_hover_bg);
    sheet
        .rule("& .hamburger-line")
        .decl("background", &config.hamburger_color);
    sheet
        .rule("& .mobile-menu")
        .decl("background", &config.mobile_menu_bg)
        .decl("transition-duration", &config.animation_duration);
}

impl Component<Navbar> {
    /// Whether the collapsed menu is open.
    pub fn is_open(&self) -> bool {
        self.widget().open.load(Ordering::Acquire)
    }

    /// Open the collapsed menu.
    pub fn open_menu(&self) {
        self.set_open(true);
    }

    /// Close the collapsed menu.
    pub fn close_menu(&self) {
        self.set_open(false);
    }

    /// Flip the collapsed menu.
    pub fn toggle_menu(&self) {
        self.set_open(!self.is_open());
    }

    fn set_open(&self, open: bool) {
        if self.widget().open.swap(open, Ordering::AcqRel) == open {
            return;
        }
        tracing::trace!(target: targets::RENDER, id = self.id(), open, "navbar menu toggled");
        self.refresh();
    }

    /// Links currently shown.
    pub fn links(&self) -> Vec<NavLink> {
        self.config().map(|c| c.links.clone()).unwrap_or_default()
    }

    /// Actions currently shown.
    pub fn buttons(&self) -> Vec<NavButton> {
        self.config().map(|c| c.buttons.clone()).unwrap_or_default()
    }

    /// Replace the slotted links and actions and re-render.
    pub fn update_navigation(&self, links: Vec<NavLink>, buttons: Vec<NavButton>) {
        let mut children: Vec<_> = self
            .children()
            .into_iter()
            .filter(|child| !matches!(child.slot_name(), Some("links" | "actions")))
            .collect();
        children.push(
            ChildNode::element("div")
                .slot("links")
                .children(links.iter().map(NavLink::to_child)),
        );
        children.push(
            ChildNode::element("div")
                .slot("actions")
                .children(buttons.iter().map(NavButton::to_child)),
        );
        self.set_children(children);
    }
}

#[cfg(test)]
mod tests {
    use lume_core::DomEvent;

    use super::*;
    use crate::Document;

    fn navbar(doc: &Document) -> Component<Navbar> {
        let navbar = Component::<Navbar>::create(doc);
        navbar.mount().unwrap();
        navbar
    }

    #[test]
    fn test_default_navigation_when_slots_empty() {
        let doc = Document::new();
        let nav = navbar(&doc);
        let texts: Vec<_> = nav.links().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, ["Home", "About", "Services", "Contact"]);
        assert!(nav.links()[0].active);
        assert_eq!(nav.buttons()[0].text, "Get Started");
        assert!(nav.html().contains("Brand"));
    }

    #[test]
    fn test_slotted_links_and_actions() {
        let doc = Document::new();
        let nav = Component::<Navbar>::create(&doc).with_children(vec![
            ChildNode::element("div").slot("links").children([
                ChildNode::element("a").attr("href", "/docs").text("Docs"),
                ChildNode::element("a").attr("target", "_blank"),
            ]),
            ChildNode::element("div").slot("actions").children([
                ChildNode::element("a").attr("role", "button").attr("href", "/login").text("Log in"),
                ChildNode::element("a").text("not an action"),
            ]),
        ]);
        nav.mount().unwrap();

        let links = nav.links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].href, "#");
        assert_eq!(links[1].text, "Link");
        assert_eq!(links[1].target, LinkTarget::Blank);
        let buttons = nav.buttons();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].href.as_deref(), Some("/login"));
        assert_eq!(buttons[0].variant, "primary");
    }

    #[test]
    fn test_toggle_and_action_close() {
        let doc = Document::new();
        let nav = navbar(&doc);
        nav.dispatch("toggle", &DomEvent::click());
        assert!(nav.is_open());
        assert!(nav.html().contains("mobile-menu position-top open"));

        nav.dispatch("action", &DomEvent::click());
        assert!(!nav.is_open());
        assert!(doc.navigations().is_empty());
    }

    #[test]
    fn test_update_navigation_rerenders() {
        let doc = Document::new();
        let nav = navbar(&doc);
        nav.update_navigation(
            vec![NavLink::new("Blog", "/blog").active()],
            vec![NavButton::new("Sign up").href("/signup").variant("secondary")],
        );
        assert_eq!(nav.links(), vec![NavLink::new("Blog", "/blog").active()]);
        assert_eq!(nav.buttons()[0].variant, "secondary");
        assert!(nav.html().contains("data-href=\"/signup\""));

        nav.dispatch("action", &DomEvent::click());
        assert_eq!(doc.navigations()[0].href, "/signup");
    }

    #[test]
    fn test_breakpoint_parsing() {
        let doc = Document::new();
        let nav = Component::<Navbar>::create(&doc).with_attribute("mobile-breakpoint", "1024px");
        nav.mount().unwrap();
        assert_eq!(nav.config().unwrap().mobile_breakpoint, 1024);
    }
}
