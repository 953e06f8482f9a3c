//! `<lume-card>`: a surface with optional header and footer slots.

use std::fmt::{self, Write as _};

use crate::attributes::{AttributeStore, attribute_enum};
use crate::component::Widget;
use crate::render::RenderContext;
use crate::slot::ChildNode;

attribute_enum! {
    /// Card surface treatment.
    pub enum CardVariant {
        /// Flat surface with a hairline border.
        Default = "default",
        /// Raised with a stronger shadow.
        Elevated = "elevated",
        /// Border only, transparent fill.
        Outlined = "outlined",
    }
    default Default
}

attribute_enum! {
    /// Inner spacing.
    pub enum CardPadding {
        /// Standard spacing.
        Default = "default",
        /// No spacing.
        None = "none",
        /// Tight spacing.
        Small = "small",
        /// Generous spacing.
        Large = "large",
    }
    default Default
}

/// Typed attributes of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardConfig {
    /// Surface treatment.
    pub variant: CardVariant,
    /// Lift on hover.
    pub hover: bool,
    /// Inner spacing.
    pub padding: CardPadding,
    /// Whether anything is assigned to the `header` slot.
    pub has_header: bool,
    /// Whether anything is assigned to the `footer` slot.
    pub has_footer: bool,
}

/// `<lume-card>`.
#[derive(Debug, Default)]
pub struct Card;

impl Widget for Card {
    const TAG: &'static str = "lume-card";
    const ID_PREFIX: &'static str = "lume-card-";
    const OBSERVED: &'static [&'static str] = &["variant", "hover", "padding"];

    type Config = CardConfig;

    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> CardConfig {
        let assigned = |slot: &str| children.iter().any(|child| child.slot_name() == Some(slot));
        CardConfig {
            variant: attrs.get_enum("variant"),
            hover: attrs.get_bool("hover"),
            padding: attrs.get_enum("padding"),
            has_header: assigned("header"),
            has_footer: assigned("footer"),
        }
    }

    fn render(&self, config: &CardConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        ctx.sheet().base(
            "& .card { border-radius: 12px; border: 1px solid #374151; background: #1f2937; overflow: hidden; transition: all 0.25s ease-in-out; }\n\
             & .variant-elevated { box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.3); }\n\
             & .variant-outlined { background: transparent; }\n\
             & .hover:hover { transform: translateY(-2px); box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.3); }\n\
             & .content { display: flex; flex-direction: column; min-height: 100%; }\n\
             & .header { padding: 1.5rem 1.5rem 0; border-bottom: 1px solid #374151; }\n\
             & .body { padding: 1.5rem; flex: 1; }\n\
             & .footer { padding: 0 1.5rem 1.5rem; border-top: 1px solid #374151; display: flex; justify-content: space-between; gap: 1rem; }\n\
             & .padding-none .body { padding: 0; }\n\
             & .padding-small .body { padding: 0.75rem; }\n\
             & .padding-large .body { padding: 2.5rem; }",
        );

        write!(
            ctx,
            "<div class=\"card variant-{} padding-{}{}\"><div class=\"content\">",
            config.variant,
            config.padding,
            if config.hover { " hover" } else { "" }
        )?;
        if config.has_header {
            ctx.push("<div class=\"header\"><slot name=\"header\"></slot></div>");
        }
        ctx.push("<div class=\"body\"><slot></slot></div>");
        if config.has_footer {
            ctx.push("<div class=\"footer\"><slot name=\"footer\"></slot></div>");
        }
        ctx.push("</div></div>");
        Ok(())
    }
}
