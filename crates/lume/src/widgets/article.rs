//! `<lume-article>`: an image beside a heading, text and one action.

use std::fmt::{self, Write as _};

use lume_core::{EventKind, Listener};
use lume_style::{CssValue, ThemeMode};

use crate::attributes::{AttributeStore, LinkTarget, attribute_enum};
use crate::component::{BindContext, Widget};
use crate::render::{RenderContext, esc};
use crate::slot::ChildNode;

attribute_enum! {
    /// Side the image sits on.
    pub enum ArticleLayout {
        /// Image left, text right.
        Left = "left",
        /// Text left, image right.
        Right = "right",
    }
    default Left
}

const DEFAULT_IMAGE: &str = "https://images.unsplash.com/photo-1499750310107-5fef28a66643?w=800";

/// Typed attributes of an article.
#[derive(Debug, Clone)]
pub struct ArticleConfig {
    /// Image side.
    pub layout: ArticleLayout,
    /// Theme.
    pub theme: ThemeMode,
    /// Heading.
    pub heading: String,
    /// Body text.
    pub description: String,
    /// Action text.
    pub button_text: String,
    /// Action destination.
    pub button_href: Option<String>,
    /// Browsing context for the action.
    pub button_target: LinkTarget,
    /// Image URL.
    pub image_src: String,
    /// Image alternative text.
    pub image_alt: String,
    width: CssValue,
    height: CssValue,
    min_height: CssValue,
    padding: CssValue,
    margin: CssValue,
    gap: CssValue,
    heading_color: CssValue,
    heading_size: CssValue,
    description_color: CssValue,
    description_size: CssValue,
    button_color: CssValue,
    button_bg_color: CssValue,
    button_hover_bg_color: CssValue,
    button_radius: CssValue,
    button_padding: CssValue,
    image_height: CssValue,
    image_radius: CssValue,
    image_fit: CssValue,
}

/// `<lume-article>`.
#[derive(Debug, Default)]
pub struct Article;

impl Widget for Article {
    const TAG: &'static str = "lume-article";
    const ID_PREFIX: &'static str = "lume-article-";
    const OBSERVED: &'static [&'static str] = &[
        "layout",
        "theme",
        "width",
        "height",
        "min-height",
        "padding",
        "margin",
        "gap",
        "heading-text",
        "heading-color",
        "heading-size",
        "description-text",
        "description-color",
        "description-size",
        "button-text",
        "button-color",
        "button-bg-color",
        "button-hover-bg-color",
        "button-radius",
        "button-padding",
        "button-href",
        "button-target",
        "image-src",
        "image-alt",
        "image-height",
        "image-radius",
        "image-fit",
    ];

    type Config = ArticleConfig;

    fn configure(&self, attrs: &AttributeStore, _children: &[ChildNode]) -> ArticleConfig {
        let theme: ThemeMode = attrs.get_enum("theme");
        let palette = theme.palette();
        ArticleConfig {
            layout: attrs.get_enum("layout"),
            theme,
            heading: attrs.get_or("heading-text", "Article Heading"),
            description: attrs.get_or(
                "description-text",
                "Share your story with a short, engaging description that invites readers to learn more.",
            ),
            button_text: attrs.get_or("button-text", "Learn More"),
            button_href: attrs.get_opt("button-href"),
            button_target: attrs.get_enum("button-target"),
            image_src: attrs.get_or("image-src", DEFAULT_IMAGE),
            image_alt: attrs.get_or("image-alt", "article image"),
            width: attrs.get_style("width", CssValue::trusted("100%")),
            height: attrs.get_style("height", CssValue::trusted("100vh")),
            min_height: attrs.get_style("min-height", CssValue::trusted("auto")),
            padding: attrs.get_style("padding", CssValue::trusted("2rem")),
            margin: attrs.get_style("margin", CssValue::trusted("0")),
            gap: attrs.get_style("gap", CssValue::trusted("3rem")),
            heading_color: attrs.get_style("heading-color", palette.text),
            heading_size: attrs.get_style("heading-size", CssValue::trusted("clamp(2rem, 4vw, 3.5rem)")),
            description_color: attrs.get_style("description-color", palette.muted),
            description_size: attrs.get_style("description-size", CssValue::trusted("clamp(1rem, 1.5vw, 1.25rem)")),
            button_color: attrs.get_style("button-color", CssValue::trusted("#ffffff")),
            button_bg_color: attrs.get_style("button-bg-color", palette.accent),
            button_hover_bg_color: attrs.get_style("button-hover-bg-color", palette.accent_hover),
            button_radius: attrs.get_style("button-radius", CssValue::trusted("0.75rem")),
            button_padding: attrs.get_style("button-padding", CssValue::trusted("1rem 2rem")),
            image_height: attrs.get_style("image-height", CssValue::trusted("400px")),
            image_radius: attrs.get_style("image-radius", CssValue::trusted("1rem")),
            image_fit: attrs.get_style("image-fit", CssValue::trusted("cover")),
        }
    }

    fn render(&self, config: &ArticleConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        let sheet = ctx.sheet();
        sheet.base(
            "& .container { display: flex; align-items: center; justify-content: center; box-sizing: border-box; }\n\
             & .layout-right { flex-direction: row-reverse; }\n\
             & .image-wrapper, & .text-block { flex: 1; }\n\
             & .image-wrapper img { width: 100%; display: block; }\n\
             & .action-btn { display: inline-block; cursor: pointer; border: none; text-decoration: none; }",
        );
        sheet
            .rule("& .container")
            .decl("width", &config.width)
            .decl("height", &config.height)
            .decl("min-height", &config.min_height)
            .decl("padding", &config.padding)
            .decl("margin", &config.margin)
            .decl("gap", &config.gap);
        sheet
            .rule("& .heading")
            .decl("color", &config.heading_color)
            .decl("font-size", &config.heading_size);
        sheet
            .rule("& .description")
            .decl("color", &config.description_color)
            .decl("font-size", &config.description_size);
        sheet
            .rule("& .action-btn")
            .decl("color", &config.button_color)
            .decl("background", &config.button_bg_color)
            .decl("border-radius", &config.button_radius)
            .decl("padding", &config.button_padding);
        sheet
            .rule("& .action-btn:hover")
            .decl("background", &config.button_hover_bg_color);
        sheet
            .rule("& .image-wrapper img")
            .decl("height", &config.image_height)
            .decl("border-radius", &config.image_radius)
            .decl("object-fit", &config.image_fit);

        write!(
            ctx,
            "<article class=\"container layout-{} theme-{}\"><div class=\"image-wrapper\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></div>",
            config.layout,
            config.theme,
            esc(&config.image_src),
            esc(&config.image_alt)
        )?;
        write!(
            ctx,
            "<div class=\"text-block\"><h2 class=\"heading\">{}</h2><p class=\"description\">{}</p>",
            esc(&config.heading),
            esc(&config.description)
        )?;
        match &config.button_href {
            Some(href) => {
                let node = ctx.node("link");
                write!(
                    ctx,
                    "<a href=\"{}\" target=\"{}\" class=\"action-btn\"{node}>{}</a>",
                    esc(href),
                    config.button_target,
                    esc(&config.button_text)
                )?;
            }
            None => write!(
                ctx,
                "<button type=\"button\" class=\"action-btn\">{}</button>",
                esc(&config.button_text)
            )?,
        }
        ctx.push("</div></article>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        cx.on("link", EventKind::Click, |article, _, event| {
            let Some(config) = article.config() else {
                return;
            };
            if let Some(href) = &config.button_href
                && !event.default_prevented()
            {
                event.prevent_default();
                article.document().navigate(href.as_str(), config.button_target);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use lume_core::DomEvent;

    use super::*;
    use crate::Document;
    use crate::component::Component;

    #[test]
    fn test_layout_and_escaping() {
        let doc = Document::new();
        let article = Component::<Article>::create(&doc)
            .with_attribute("layout", "right")
            .with_attribute("heading-text", "Fish & Chips")
            .with_attribute("image-alt", "\"plate\"");
        article.mount().unwrap();
        let output = article.output();
        assert!(output.markup().contains("container layout-right"));
        assert!(output.markup().contains("Fish &amp; Chips"));
        assert!(output.markup().contains("alt=\"&quot;plate&quot;\""));
        assert!(output.nodes().is_empty());
    }

    #[test]
    fn test_link_action_navigates() {
        let doc = Document::new();
        let article = Component::<Article>::create(&doc).with_attribute("button-href", "/read");
        article.mount().unwrap();
        article.dispatch("link", &DomEvent::click());
        assert_eq!(doc.navigations()[0].href, "/read");
    }
}
