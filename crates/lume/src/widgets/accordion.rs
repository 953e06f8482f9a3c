//! `<lume-accordion>`: collapsible panels read from `lume-accordion-panel`
//! children.
//!
//! Without the `multiple` attribute, opening a panel closes the others.

use std::fmt::{self, Write as _};

use lume_core::logging::targets;
use lume_core::{EventKind, Listener};
use parking_lot::Mutex;

use crate::attributes::AttributeStore;
use crate::component::{BindContext, Component, Widget};
use crate::notification::Notification;
use crate::render::{NodeData, RenderContext, esc};
use crate::slot::{ChildNode, children_with_tag};

/// Tag of a panel child.
pub const PANEL_TAG: &str = "lume-accordion-panel";

/// One panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionPanel {
    /// Trigger text.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Whether the panel starts open.
    pub initially_open: bool,
}

impl AccordionPanel {
    /// A closed panel.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            initially_open: false,
        }
    }

    fn from_child(node: &ChildNode) -> Self {
        let title = node.attribute("title").map(str::trim).unwrap_or_default();
        Self {
            title: if title.is_empty() { "Untitled Panel" } else { title }.to_string(),
            body: node.text_content(),
            initially_open: node.has_attribute("open"),
        }
    }

    /// The panel as a child element.
    pub fn to_child(&self) -> ChildNode {
        let child = ChildNode::element(PANEL_TAG)
            .attr("title", self.title.as_str())
            .text(self.body.as_str());
        if self.initially_open { child.attr("open", "") } else { child }
    }
}

/// Typed attributes of an accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionConfig {
    /// Allow several panels open at once.
    pub multiple: bool,
    /// Panels in document order.
    pub panels: Vec<AccordionPanel>,
    /// Open flag per panel.
    pub open: Vec<bool>,
}

#[derive(Debug, Default)]
struct PanelState {
    panels: Vec<AccordionPanel>,
    open: Vec<bool>,
}

/// `<lume-accordion>`.
#[derive(Debug, Default)]
pub struct Accordion {
    state: Mutex<PanelState>,
}

impl Widget for Accordion {
    const TAG: &'static str = "lume-accordion";
    const ID_PREFIX: &'static str = "lume-accordion-";
    const OBSERVED: &'static [&'static str] = &["multiple"];

    type Config = AccordionConfig;

    fn configure(&self, attrs: &AttributeStore, children: &[ChildNode]) -> AccordionConfig {
        let multiple = attrs.get_bool("multiple");
        let panels: Vec<_> = children_with_tag(children, PANEL_TAG)
            .into_iter()
            .map(AccordionPanel::from_child)
            .collect();

        let mut state = self.state.lock();
        if state.panels != panels {
            let mut seen_open = false;
            state.open = panels
                .iter()
                .map(|panel| {
                    let open = panel.initially_open && (multiple || !seen_open);
                    seen_open |= open;
                    open
                })
                .collect();
            state.panels = panels.clone();
        } else if !multiple && state.open.iter().filter(|open| **open).count() > 1 {
            let first = state.open.iter().position(|open| *open);
            for (index, open) in state.open.iter_mut().enumerate() {
                *open = Some(index) == first;
            }
        }

        AccordionConfig {
            multiple,
            panels,
            open: state.open.clone(),
        }
    }

    fn render(&self, config: &AccordionConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        ctx.sheet().base(
            "& .accordion { border: 1px solid #374151; border-radius: 8px; overflow: hidden; }\n\
             & .panel:not(:last-child) { border-bottom: 1px solid #374151; }\n\
             & .panel-trigger { width: 100%; padding: 1rem 1.25rem; background: #1f2937; border: none; display: flex; justify-content: space-between; align-items: center; cursor: pointer; font-size: 1rem; color: #e5e7eb; }\n\
             & .panel-trigger:hover { background: #374151; }\n\
             & .panel-icon { font-weight: bold; color: #9ca3af; }\n\
             & .panel-content { max-height: 0; overflow: hidden; transition: max-height 0.3s ease; background: #111827; }\n\
             & .panel-content.open { max-height: none; }\n\
             & .panel-body { padding: 1rem 1.25rem; color: #d1d5db; }",
        );

        ctx.push("<div class=\"accordion\">");
        for (index, panel) in config.panels.iter().enumerate() {
            let open = config.open.get(index).copied().unwrap_or(false);
            let trigger = ctx.node_with("trigger", NodeData::new().with("index", index.to_string()));
            write!(
                ctx,
                "<div class=\"panel\"><button type=\"button\" class=\"panel-trigger\" aria-expanded=\"{open}\"{trigger}><span>{}</span><span class=\"panel-icon\">{}</span></button>",
                esc(&panel.title),
                if open { "\u{2212}" } else { "+" }
            )?;
            write!(
                ctx,
                "<div class=\"panel-content{}\"><div class=\"panel-body\">{}</div></div></div>",
                if open { " open" } else { "" },
                esc(&panel.body)
            )?;
        }
        ctx.push("</div>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        cx.on("trigger", EventKind::Click, |accordion, data, _| {
            if let Some(index) = data.index("index") {
                accordion.toggle(index);
            }
        })
    }
}

impl Component<Accordion> {
    /// Number of panels.
    pub fn panel_count(&self) -> usize {
        self.widget().state.lock().panels.len()
    }

    /// Whether panel `index` is open.
    pub fn is_panel_open(&self, index: usize) -> bool {
        self.widget()
            .state
            .lock()
            .open
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// Indices of open panels.
    pub fn open_panels(&self) -> Vec<usize> {
        let state = self.widget().state.lock();
        state
            .open
            .iter()
            .enumerate()
            .filter_map(|(index, open)| open.then_some(index))
            .collect()
    }

    /// Flip panel `index`. Returns the new state, or `None` for an unknown index.
    pub fn toggle(&self, index: usize) -> Option<bool> {
        let open = !self.widget().state.lock().open.get(index)?;
        self.set_panel(index, open);
        Some(open)
    }

    /// Open panel `index`.
    pub fn open_panel(&self, index: usize) {
        self.set_panel(index, true);
    }

    /// Close panel `index`.
    pub fn close_panel(&self, index: usize) {
        self.set_panel(index, false);
    }

    /// Replace the panels and re-render. Open flags are reset.
    pub fn set_panels(&self, panels: &[AccordionPanel]) {
        let mut children: Vec<_> = self
            .children()
            .into_iter()
            .filter(|child| !child.tag().eq_ignore_ascii_case(PANEL_TAG))
            .collect();
        children.extend(panels.iter().map(AccordionPanel::to_child));
        self.set_children(children);
    }

    fn set_panel(&self, index: usize, open: bool) {
        let multiple = self.config().is_some_and(|config| config.multiple);
        {
            let mut state = self.widget().state.lock();
            let Some(current) = state.open.get(index).copied() else {
                tracing::debug!(target: targets::RENDER, id = self.id(), index, "no such panel");
                return;
            };
            if current == open {
                return;
            }
            if open && !multiple {
                state.open.iter_mut().for_each(|flag| *flag = false);
            }
            state.open[index] = open;
        }
        self.refresh();
        self.emit(Notification::AccordionToggle { index, open });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lume_core::DomEvent;

    use super::*;
    use crate::Document;

    fn panels() -> Vec<ChildNode> {
        vec![
            ChildNode::element(PANEL_TAG).attr("title", "One").text("First"),
            ChildNode::element(PANEL_TAG).text("Second"),
            ChildNode::element(PANEL_TAG).attr("title", "Three").text("Third"),
        ]
    }

    #[test]
    fn test_single_mode_closes_others() {
        let doc = Document::new();
        let accordion = Component::<Accordion>::create(&doc).with_children(panels());
        accordion.mount().unwrap();
        assert_eq!(accordion.panel_count(), 3);
        assert!(accordion.output().markup().contains("Untitled Panel"));

        accordion.dispatch_nth("trigger", 0, &DomEvent::click());
        accordion.dispatch_nth("trigger", 2, &DomEvent::click());
        assert_eq!(accordion.open_panels(), vec![2]);
        assert!(accordion.output().markup().contains("aria-expanded=\"true\""));
    }

    #[test]
    fn test_multiple_mode_and_notifications() {
        let doc = Document::new();
        let accordion = Component::<Accordion>::create(&doc)
            .with_attribute("multiple", "")
            .with_children(panels());
        accordion.mount().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        accordion.notifications().connect(move |n| seen_clone.lock().push(n.clone()));

        accordion.toggle(0);
        accordion.toggle(1);
        accordion.toggle(0);
        assert_eq!(accordion.open_panels(), vec![1]);
        assert_eq!(
            seen.lock().last(),
            Some(&Notification::AccordionToggle { index: 0, open: false })
        );
        assert_eq!(accordion.toggle(7), None);
    }

    #[test]
    fn test_flags_reset_when_panels_change() {
        let doc = Document::new();
        let accordion = Component::<Accordion>::create(&doc).with_children(panels());
        accordion.mount().unwrap();
        accordion.open_panel(1);

        accordion.set_panels(&[AccordionPanel::new("Only", "Body")]);
        assert_eq!(accordion.panel_count(), 1);
        assert!(accordion.open_panels().is_empty());
    }

    #[test]
    fn test_initially_open_respects_single_mode() {
        let doc = Document::new();
        let children = vec![
            ChildNode::element(PANEL_TAG).attr("open", "").text("a"),
            ChildNode::element(PANEL_TAG).attr("open", "").text("b"),
        ];
        let accordion = Component::<Accordion>::create(&doc).with_children(children);
        accordion.mount().unwrap();
        assert_eq!(accordion.open_panels(), vec![0]);
    }
}
