//! The widget library.
//!
//! - [`Button`]: button or link with ripple, loading and named handlers
//! - [`Navbar`]: navigation bar with a collapsible menu
//! - [`Hero`]: full-width hero section
//! - [`Article`]: image and text block
//! - [`Footer`]: page footer
//! - [`Card`], [`Modal`], [`Accordion`], [`Input`]: composition primitives
//!
//! The form widget lives in [`crate::form`].

mod accordion;
mod article;
mod button;
mod card;
mod footer;
mod hero;
mod input;
mod modal;
mod navbar;

pub use accordion::{Accordion, AccordionConfig, AccordionPanel, PANEL_TAG};
pub use article::{Article, ArticleConfig, ArticleLayout};
pub use button::{Button, ButtonConfig, ButtonSize, ButtonVariant};
pub use card::{Card, CardConfig, CardPadding, CardVariant};
pub use footer::{
    Footer, FooterColumn, FooterConfig, FooterLayout, FooterLink, SocialIcon, parse_links,
    parse_social_icons,
};
pub use hero::{Align, BackgroundType, CallToAction, Hero, HeroConfig, HeroLayout, VerticalAlign};
pub use input::{Input, InputConfig, InputType, REQUIRED_MESSAGE};
pub use modal::{Modal, ModalConfig, ModalSize};
pub use navbar::{MobileMenuPosition, NavButton, NavLink, Navbar, NavbarConfig, NavbarVariant};
