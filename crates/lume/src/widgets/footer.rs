//! `<lume-footer>`: brand, links, social icons and copyright.
//!
//! Links are given as `"Label|href"` pairs separated by commas. With
//! `layout="columns"` and a valid `columns` JSON array, link columns replace
//! the brand/links/social row.

use std::fmt::{self, Write as _};

use lume_core::{EventKind, Listener};
use lume_style::{CssValue, ThemeMode};
use serde::Deserialize;

use crate::attributes::{AttributeStore, LinkTarget, attribute_enum};
use crate::component::{BindContext, Widget};
use crate::notification::Notification;
use crate::render::{NodeData, RenderContext, esc};
use crate::slot::ChildNode;

attribute_enum! {
    /// Footer arrangement.
    pub enum FooterLayout {
        /// Everything centred in one column.
        Center = "center",
        /// Brand left, links centre, social right.
        Split = "split",
        /// Link columns from the `columns` attribute.
        Columns = "columns",
    }
    default Center
}

const DEFAULT_LINKS: &str = "Home|#,About|#,Contact|#";
const DEFAULT_COPYRIGHT: &str = "© 2025 LumeUI. All rights reserved.";

/// One footer link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    /// Visible text.
    pub label: String,
    /// Destination; `#` when not given.
    pub href: String,
}

/// One social icon link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialIcon {
    /// Lower-cased platform name.
    pub platform: String,
    /// Profile URL.
    pub href: String,
}

/// One link column in the `columns` layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FooterColumn {
    /// Column heading.
    pub title: String,
    /// `"Label|href"` entries.
    #[serde(default)]
    pub items: Vec<String>,
}

/// Split a comma-separated list of `first|href` pairs.
///
/// Entries with an empty first part are skipped; a missing href becomes `#`.
fn parse_pairs(list: &str) -> Vec<(String, String)> {
    list.split(',')
        .filter_map(|entry| {
            let mut parts = entry.splitn(2, '|');
            let first = parts.next().unwrap_or_default().trim();
            if first.is_empty() {
                return None;
            }
            let href = parts.next().map(str::trim).filter(|h| !h.is_empty()).unwrap_or("#");
            Some((first.to_string(), href.to_string()))
        })
        .collect()
}

/// Parse `"Label|href,Label|href"`.
pub fn parse_links(list: &str) -> Vec<FooterLink> {
    parse_pairs(list)
        .into_iter()
        .map(|(label, href)| FooterLink { label, href })
        .collect()
}

/// Parse `"platform|href,platform|href"`.
pub fn parse_social_icons(list: &str) -> Vec<SocialIcon> {
    parse_pairs(list)
        .into_iter()
        .map(|(platform, href)| SocialIcon {
            platform: platform.to_ascii_lowercase(),
            href,
        })
        .collect()
}

fn social_svg(platform: &str) -> &'static str {
    match platform {
        "facebook" => {
            "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M24 12.07C24 5.4 18.63 0 12 0S0 5.4 0 12.07c0 6 4.39 10.98 10.13 11.88v-8.4H7.08v-3.48h3.05V9.41c0-3.02 1.79-4.69 4.53-4.69 1.31 0 2.69.24 2.69.24v2.96h-1.51c-1.49 0-1.96.93-1.96 1.88v2.26h3.33l-.53 3.48h-2.8v8.4C19.61 23.05 24 18.07 24 12.07z\"/></svg>"
        }
        "twitter" => {
            "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M18.24 2.25h3.31l-7.23 8.26 8.5 11.24h-6.65l-5.21-6.82-5.97 6.82H1.68l7.73-8.84L1.25 2.25h6.83l4.71 6.23zm-1.16 17.52h1.83L7.08 4.13H5.12z\"/></svg>"
        }
        "linkedin" => {
            "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M20.45 20.45h-3.55v-5.57c0-1.33-.03-3.04-1.85-3.04-1.85 0-2.14 1.45-2.14 2.94v5.67H9.35V9h3.41v1.56h.05c.48-.9 1.64-1.85 3.37-1.85 3.6 0 4.27 2.37 4.27 5.46v6.28zM5.34 7.43a2.06 2.06 0 1 1 0-4.13 2.06 2.06 0 0 1 0 4.13zm1.78 13.02H3.56V9h3.56v11.45zM22.23 0H1.77C.79 0 0 .77 0 1.73v20.54C0 23.23.79 24 1.77 24h20.45c.98 0 1.78-.77 1.78-1.73V1.73C24 .77 23.2 0 22.22 0z\"/></svg>"
        }
        "github" => {
            "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M12 0C5.37 0 0 5.37 0 12c0 5.3 3.44 9.8 8.21 11.39.6.11.79-.26.79-.58v-2.23c-3.34.73-4.03-1.42-4.03-1.42-.55-1.39-1.33-1.76-1.33-1.76-1.09-.74.08-.73.08-.73 1.2.08 1.84 1.24 1.84 1.24 1.07 1.83 2.81 1.3 3.49 1 .11-.78.42-1.31.76-1.61-2.67-.3-5.47-1.33-5.47-5.93 0-1.31.47-2.38 1.24-3.22-.12-.3-.54-1.52.12-3.18 0 0 1-.32 3.3 1.23a11.5 11.5 0 0 1 6 0c2.29-1.55 3.3-1.23 3.3-1.23.65 1.65.24 2.87.12 3.18.77.84 1.23 1.91 1.23 3.22 0 4.61-2.81 5.62-5.48 5.92.43.37.82 1.1.82 2.22v3.29c0 .32.19.69.8.58A12 12 0 0 0 24 12c0-6.63-5.37-12-12-12z\"/></svg>"
        }
        "instagram" => {
            "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><path d=\"M12 2.16c3.2 0 3.58.01 4.85.07 3.25.15 4.77 1.69 4.92 4.92.06 1.27.07 1.65.07 4.85s-.01 3.58-.07 4.85c-.15 3.23-1.66 4.77-4.92 4.92-1.27.06-1.64.07-4.85.07s-3.58-.01-4.85-.07c-3.26-.15-4.77-1.7-4.92-4.92-.06-1.27-.07-1.64-.07-4.85s.01-3.58.07-4.85C2.38 3.92 3.9 2.38 7.15 2.23 8.42 2.17 8.8 2.16 12 2.16zM12 5.84a6.16 6.16 0 1 0 0 12.32 6.16 6.16 0 0 0 0-12.32zM12 16a4 4 0 1 1 0-8 4 4 0 0 1 0 8zm6.41-11.85a1.44 1.44 0 1 0 0 2.88 1.44 1.44 0 0 0 0-2.88z\"/></svg>"
        }
        _ => "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\"><circle cx=\"12\" cy=\"12\" r=\"10\"/></svg>",
    }
}

/// Typed attributes of a footer.
#[derive(Debug, Clone)]
pub struct FooterConfig {
    /// Arrangement.
    pub layout: FooterLayout,
    /// Theme.
    pub theme: ThemeMode,
    /// Brand name; empty hides it.
    pub brand_text: String,
    /// Logo image URL.
    pub logo_src: Option<String>,
    /// Logo alternative text; defaults to the brand name.
    pub logo_alt: String,
    /// Navigation links.
    pub links: Vec<FooterLink>,
    /// Social icon links.
    pub social_icons: Vec<SocialIcon>,
    /// Link columns, when given and valid.
    pub columns: Option<Vec<FooterColumn>>,
    /// Copyright line; empty hides it.
    pub copyright: String,
    width: CssValue,
    padding: CssValue,
    margin: CssValue,
    gap: CssValue,
    bg_color: CssValue,
    text_color: CssValue,
    link_color: CssValue,
    link_hover_color: CssValue,
    border_color: CssValue,
    border_width: CssValue,
    border_style: CssValue,
    brand_size: CssValue,
    logo_width: CssValue,
    logo_height: CssValue,
    link_gap: CssValue,
    link_size: CssValue,
    icon_size: CssValue,
    copyright_size: CssValue,
}

/// `<lume-footer>`.
#[derive(Debug, Default)]
pub struct Footer;

impl Widget for Footer {
    const TAG: &'static str = "lume-footer";
    const ID_PREFIX: &'static str = "lume-footer-";
    const OBSERVED: &'static [&'static str] = &[
        "layout",
        "theme",
        "width",
        "padding",
        "margin",
        "gap",
        "bg-color",
        "text-color",
        "link-color",
        "link-hover-color",
        "border-color",
        "border-width",
        "border-style",
        "brand-text",
        "brand-size",
        "logo-src",
        "logo-alt",
        "logo-width",
        "logo-height",
        "links",
        "link-gap",
        "link-size",
        "social-icons",
        "icon-size",
        "columns",
        "copyright-text",
        "copyright-size",
    ];

    type Config = FooterConfig;

    fn configure(&self, attrs: &AttributeStore, _children: &[ChildNode]) -> FooterConfig {
        let theme: ThemeMode = attrs.get_enum("theme");
        let palette = theme.palette();
        let brand_text = attrs.get("brand-text").unwrap_or("LumeUI").trim().to_string();
        let logo_alt = attrs.get_or("logo-alt", &brand_text);
        FooterConfig {
            layout: attrs.get_enum("layout"),
            theme,
            logo_src: attrs.get_opt("logo-src"),
            logo_alt,
            brand_text,
            links: parse_links(attrs.get("links").unwrap_or(DEFAULT_LINKS)),
            social_icons: parse_social_icons(attrs.get("social-icons").unwrap_or_default()),
            columns: attrs.get_json("columns", None),
            copyright: attrs.get("copyright-text").unwrap_or(DEFAULT_COPYRIGHT).trim().to_string(),
            width: attrs.get_style("width", CssValue::trusted("100%")),
            padding: attrs.get_style("padding", CssValue::trusted("1.5rem")),
            margin: attrs.get_style("margin", CssValue::trusted("0")),
            gap: attrs.get_style("gap", CssValue::trusted("1rem")),
            bg_color: attrs.get_style("bg-color", palette.background),
            text_color: attrs.get_style("text-color", palette.text),
            link_color: attrs.get_style("link-color", palette.muted),
            link_hover_color: attrs.get_style("link-hover-color", palette.text),
            border_color: attrs.get_style("border-color", palette.border),
            border_width: attrs.get_style("border-width", CssValue::trusted("1px")),
            border_style: attrs.get_style("border-style", CssValue::trusted("solid")),
            brand_size: attrs.get_style("brand-size", CssValue::trusted("1.25rem")),
            logo_width: attrs.get_style("logo-width", CssValue::trusted("32px")),
            logo_height: attrs.get_style("logo-height", CssValue::trusted("32px")),
            link_gap: attrs.get_style("link-gap", CssValue::trusted("1.5rem")),
            link_size: attrs.get_style("link-size", CssValue::trusted("0.875rem")),
            icon_size: attrs.get_style("icon-size", CssValue::trusted("20px")),
            copyright_size: attrs.get_style("copyright-size", CssValue::trusted("0.75rem")),
        }
    }

    fn render(&self, config: &FooterConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        write_styles(config, ctx);

        write!(
            ctx,
            "<footer class=\"footer layout-{} theme-{}\"><div class=\"footer-content\">",
            config.layout, config.theme
        )?;
        match (config.layout, &config.columns) {
            (FooterLayout::Columns, Some(columns)) => {
                ctx.push("<div class=\"columns-container\">");
                for column in columns {
                    write!(
                        ctx,
                        "<div class=\"column\"><h4 class=\"column-title\">{}</h4><div class=\"column-links\">",
                        esc(&column.title)
                    )?;
                    for link in parse_links(&column.items.join(",")) {
                        write_link(ctx, &link, "column-link")?;
                    }
                    ctx.push("</div></div>");
                }
                ctx.push("</div>");
            }
            _ => write_row(config, ctx)?,
        }
        if !config.copyright.is_empty() {
            write!(ctx, "<div class=\"copyright-section\">{}</div>", esc(&config.copyright))?;
        }
        ctx.push("</div></footer>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        cx.on("link", EventKind::Click, |footer, data, event| {
            event.prevent_default();
            let href = data.get("href").unwrap_or("#").to_string();
            let text = data.get("text").unwrap_or_default().to_string();
            footer.emit(Notification::FooterLinkActivate {
                href: href.clone(),
                text,
            });
            if href != "#" {
                footer.document().navigate(href, LinkTarget::SelfFrame);
            }
        })
    }
}

fn write_row(config: &FooterConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
    if config.logo_src.is_some() || !config.brand_text.is_empty() {
        ctx.push("<div class=\"brand-section\">");
        if let Some(src) = &config.logo_src {
            write!(
                ctx,
                "<img src=\"{}\" alt=\"{}\" class=\"brand-logo\">",
                esc(src),
                esc(&config.logo_alt)
            )?;
        }
        if !config.brand_text.is_empty() {
            write!(ctx, "<h2 class=\"brand-text\">{}</h2>", esc(&config.brand_text))?;
        }
        ctx.push("</div>");
    }
    if !config.links.is_empty() {
        ctx.push("<nav class=\"links-section\" role=\"navigation\" aria-label=\"Footer navigation\">");
        for link in &config.links {
            write_link(ctx, link, "footer-link")?;
        }
        ctx.push("</nav>");
    }
    if !config.social_icons.is_empty() {
        ctx.push("<div class=\"social-section\">");
        for icon in &config.social_icons {
            write!(
                ctx,
                "<a href=\"{}\" class=\"social-icon\" aria-label=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                esc(&icon.href),
                esc(&icon.platform),
                social_svg(&icon.platform)
            )?;
        }
        ctx.push("</div>");
    }
    Ok(())
}

fn write_link(ctx: &mut RenderContext<'_>, link: &FooterLink, class: &str) -> fmt::Result {
    let node = ctx.node_with(
        "link",
        NodeData::new()
            .with("href", link.href.as_str())
            .with("text", link.label.as_str()),
    );
    write!(
        ctx,
        "<a href=\"{}\" class=\"{class}\"{node}>{}</a>",
        esc(&link.href),
        esc(&link.label)
    )
}

fn write_styles(config: &FooterConfig, ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet();
    sheet.base(
        "& .footer { box-sizing: border-box; border-top-style: solid; }\n\
         & .footer-content { display: flex; flex-direction: column; align-items: center; text-align: center; }\n\
         & .layout-split .footer-content { display: grid; grid-template-columns: 1fr auto 1fr; align-items: center; text-align: left; }\n\
         & .layout-split .copyright-section { grid-column: 1 / -1; text-align: center; }\n\
         & .columns-container { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 2rem; width: 100%; }\n\
         & .column-links { display: flex; flex-direction: column; gap: 0.5rem; }\n\
         & .links-section, & .social-section { display: flex; flex-wrap: wrap; justify-content: center; }\n\
         & .footer-link, & .column-link, & .social-icon { text-decoration: none; transition: color 0.2s ease; }\n\
         & .brand-section { display: flex; align-items: center; gap: 0.5rem; }\n\
         & .copyright-section { opacity: 0.8; }",
    );
    sheet
        .rule("& .footer")
        .decl("width", &config.width)
        .decl("padding", &config.padding)
        .decl("margin", &config.margin)
        .decl("background", &config.bg_color)
        .decl("color", &config.text_color)
        .decl("border-top-color", &config.border_color)
        .decl("border-top-width", &config.border_width)
        .decl("border-top-style", &config.border_style);
    sheet.rule("& .footer-content").decl("gap", &config.gap);
    sheet.rule("& .brand-text").decl("font-size", &config.brand_size);
    sheet
        .rule("& .brand-logo")
        .decl("width", &config.logo_width)
        .decl("height", &config.logo_height);
    sheet.rule("& .links-section").decl("gap", &config.link_gap);
    sheet
        .rule("& .footer-link, & .column-link")
        .decl("color", &config.link_color)
        .decl("font-size", &config.link_size);
    sheet
        .rule("& .footer-link:hover, & .column-link:hover, & .social-icon:hover")
        .decl("color", &config.link_hover_color);
    sheet.rule("& .social-icon").decl("color", &config.link_color);
    sheet
        .rule("& .social-icon svg")
        .decl("width", &config.icon_size)
        .decl("height", &config.icon_size);
    sheet
        .rule("& .copyright-section")
        .decl("font-size", &config.copyright_size);
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
    fn test_parse_links_defaults_href() {
        assert_eq!(
            parse_links("Home|/, Docs ,|/nowhere,Blog|"),
            vec![
                FooterLink { label: "Home".into(), href: "/".into() },
                FooterLink { label: "Docs".into(), href: "#".into() },
                FooterLink { label: "Blog".into(), href: "#".into() },
            ]
        );
        assert_eq!(parse_social_icons("GitHub|https://github.com")[0].platform, "github");
    }

    #[test]
    fn test_unknown_platform_uses_fallback_icon() {
        assert!(social_svg("myspace").contains("<circle"));
        assert!(!social_svg("github").contains("<circle"));
    }

    #[test]
    fn test_link_click_emits_and_navigates() {
        let doc = Document::new();
        let footer = Component::<Footer>::create(&doc).with_attribute("links", "Home|#,Docs|/docs");
        footer.mount().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        footer.notifications().connect(move |n| seen_clone.lock().push(n.clone()));

        assert!(!footer.dispatch_nth("link", 0, &DomEvent::click()));
        assert!(doc.navigations().is_empty());

        footer.dispatch_nth("link", 1, &DomEvent::click());
        assert_eq!(doc.navigations()[0].href, "/docs");
        assert_eq!(
            seen.lock()[1],
            Notification::FooterLinkActivate { href: "/docs".into(), text: "Docs".into() }
        );
    }

    #[test]
    fn test_columns_layout() {
        let doc = Document::new();
        let footer = Component::<Footer>::create(&doc)
            .with_attribute("layout", "columns")
            .with_attribute("columns", r#"[{"title":"Product","items":["Pricing|/pricing","Docs"]}]"#);
        footer.mount().unwrap();
        let output = footer.output();
        assert!(output.markup().contains("<h4 class=\"column-title\">Product</h4>"));
        assert!(!output.markup().contains("brand-section"));
        assert_eq!(output.nodes_with_role("link").count(), 2);
    }

    #[test]
    fn test_malformed_columns_falls_back_to_row() {
        let doc = Document::new();
        let footer = Component::<Footer>::create(&doc)
            .with_attribute("layout", "columns")
            .with_attribute("columns", "[{oops");
        footer.mount().unwrap();
        assert!(footer.config().unwrap().columns.is_none());
        assert!(footer.output().markup().contains("brand-section"));
    }
}
