//! `<lume-form>`.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use lume_core::logging::{span_names, targets};
use lume_core::{DomEvent, EventKind, Listener, TimerId};
use lume_net::{FormSubmission, HttpMethod};
use lume_style::{CssValue, ThemeMode};
use parking_lot::Mutex;
use tracing::Instrument;

use super::field::{FieldDescriptor, FieldType, FormKind, resolve_fields};
use super::submit::{FormMessage, MessageKind, SubmissionPhase, SubmitOutcome};
use super::validation::{ValidationState, validate};
use crate::attributes::{AttributeStore, attribute_enum};
use crate::component::{BindContext, Component, Widget};
use crate::notification::Notification;
use crate::render::{NodeData, RenderContext, esc};
use crate::slot::ChildNode;

/// Banner shown when validation fails and no `error-message` is set.
pub const DEFAULT_ERROR_MESSAGE: &str = "Please fill out all required fields.";
/// Banner shown after delivery when no `success-message` is set.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form submitted successfully!";
/// Banner shown when the transport fails.
pub const FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

const SUBMITTING_TEXT: &str = "Submitting...";

attribute_enum! {
    /// Arrangement of the info panel and the fields.
    pub enum FormLayout {
        /// Panel beside the fields.
        Split = "split",
        /// Panel above the fields.
        Stacked = "stacked",
        /// Fields only.
        Single = "single",
    }
    default Split
}

/// Typed attributes of a form.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Preset.
    pub kind: FormKind,
    /// Resolved fields in render order.
    pub fields: Vec<FieldDescriptor>,
    /// Layout.
    pub layout: FormLayout,
    /// Theme.
    pub theme: ThemeMode,
    /// Panel title.
    pub title: String,
    /// Panel description.
    pub description: String,
    /// Submit button text.
    pub button_text: String,
    /// Submission endpoint.
    pub action: Option<String>,
    /// Submission method.
    pub method: HttpMethod,
    /// Banner after delivery.
    pub success_message: String,
    /// Banner after failed validation.
    pub error_message: String,
    width: CssValue,
    max_width: CssValue,
    radius: CssValue,
    padding: CssValue,
    body_bg: CssValue,
    panel_bg: CssValue,
    panel_text_color: CssValue,
    form_bg: CssValue,
    form_text_color: CssValue,
    input_bg: CssValue,
    input_border: CssValue,
    input_color: CssValue,
    input_radius: CssValue,
    label_color: CssValue,
    button_bg: CssValue,
    button_color: CssValue,
    button_hover_bg: CssValue,
    button_radius: CssValue,
}

#[derive(Debug, Default)]
struct FormState {
    values: HashMap<String, String>,
    errors: ValidationState,
    phase: SubmissionPhase,
    message: Option<FormMessage>,
    message_timer: Option<TimerId>,
}

/// A validated form with optional remote submission.
#[derive(Debug, Default)]
pub struct Form {
    state: Mutex<FormState>,
    submitting: AtomicBool,
}

impl Widget for Form {
    const TAG: &'static str = "lume-form";
    const ID_PREFIX: &'static str = "lume-form-";
    const OBSERVED: &'static [&'static str] = &[
        "type",
        "fields",
        "layout",
        "theme",
        "action",
        "method",
        "panel-title",
        "panel-description",
        "button-text",
        "success-message",
        "error-message",
        "width",
        "max-width",
        "radius",
        "padding",
        "body-bg",
        "panel-bg",
        "panel-text-color",
        "form-bg",
        "form-text-color",
        "input-bg",
        "input-border",
        "input-color",
        "input-radius",
        "label-color",
        "button-bg",
        "button-color",
        "button-hover-bg",
        "button-radius",
    ];

    type Config = FormConfig;

    fn configure(&self, attrs: &AttributeStore, _children: &[ChildNode]) -> FormConfig {
        let kind: FormKind = attrs.get_enum("type");
        let theme: ThemeMode = attrs.get_enum("theme");
        let palette = theme.palette();
        let method = match attrs.get_opt("method") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(target: targets::FORM, method = %raw, error = %e, "unknown method, using POST");
                HttpMethod::Post
            }),
            None => HttpMethod::Post,
        };

        FormConfig {
            kind,
            fields: resolve_fields(kind, attrs),
            layout: attrs.get_enum("layout"),
            theme,
            title: attrs.get_or("panel-title", kind.title()),
            description: attrs.get_or("panel-description", kind.description()),
            button_text: attrs.get_or("button-text", kind.button_text()),
            action: attrs.get_opt("action"),
            method,
            success_message: attrs.get_or("success-message", DEFAULT_SUCCESS_MESSAGE),
            error_message: attrs.get_or("error-message", DEFAULT_ERROR_MESSAGE),
            width: attrs.get_style("width", CssValue::trusted("100%")),
            max_width: attrs.get_style("max-width", CssValue::trusted("900px")),
            radius: attrs.get_style("radius", CssValue::trusted("16px")),
            padding: attrs.get_style("padding", CssValue::trusted("2rem")),
            body_bg: attrs.get_style("body-bg", palette.background),
            panel_bg: attrs.get_style("panel-bg", palette.accent),
            panel_text_color: attrs.get_style("panel-text-color", CssValue::trusted("#ffffff")),
            form_bg: attrs.get_style("form-bg", palette.surface),
            form_text_color: attrs.get_style("form-text-color", palette.text),
            input_bg: attrs.get_style("input-bg", palette.input_bg),
            input_border: attrs.get_style("input-border", palette.border),
            input_color: attrs.get_style("input-color", palette.text),
            input_radius: attrs.get_style("input-radius", CssValue::trusted("8px")),
            label_color: attrs.get_style("label-color", palette.muted),
            button_bg: attrs.get_style("button-bg", palette.accent),
            button_color: attrs.get_style("button-color", CssValue::trusted("#ffffff")),
            button_hover_bg: attrs.get_style("button-hover-bg", palette.accent_hover),
            button_radius: attrs.get_style("button-radius", CssValue::trusted("8px")),
        }
    }

    fn render(&self, config: &FormConfig, ctx: &mut RenderContext<'_>) -> fmt::Result {
        let (values, errors, phase, message) = {
            let state = self.state.lock();
            (
                state.values.clone(),
                state.errors.clone(),
                state.phase,
                state.message.clone(),
            )
        };

        write_styles(config, ctx);

        write!(
            ctx,
            "<div class=\"lume-form-wrapper lume-form--{} lume-form--{}\"><div class=\"form-container\">",
            config.layout, config.theme
        )?;
        if config.layout != FormLayout::Single {
            write!(
                ctx,
                "<div class=\"info-panel\"><div class=\"info-content\"><h2 class=\"panel-title\">{}</h2><p class=\"panel-description\">{}</p></div></div>",
                esc(&config.title),
                esc(&config.description)
            )?;
        }
        write!(
            ctx,
            "<div class=\"form-section\"><h2 class=\"form-title\">{}</h2>",
            esc(&config.title)
        )?;

        let form = ctx.node("form");
        write!(ctx, "<form class=\"form-content\" novalidate{form}>")?;
        for field in &config.fields {
            let value = values
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.initial_value());
            write_field(ctx, field, &value, errors.error(&field.name))?;
        }

        let submitting = phase == SubmissionPhase::Submitting;
        let submit = ctx.node("submit");
        write!(
            ctx,
            "<button type=\"submit\" class=\"submit-button\"{submit}{}>{}</button>",
            if submitting { " disabled" } else { "" },
            esc(if submitting { SUBMITTING_TEXT } else { config.button_text.as_str() })
        )?;

        match message {
            Some(message) => write!(
                ctx,
                "<div class=\"form-message {}\" role=\"{}\">{}</div>",
                message.kind.class(),
                if message.kind == MessageKind::Error { "alert" } else { "status" },
                esc(&message.text)
            )?,
            None => ctx.push("<div class=\"form-message\" role=\"status\" aria-live=\"polite\"></div>"),
        }
        ctx.push("</form></div></div></div>");
        Ok(())
    }

    fn listeners(&self, cx: &BindContext<'_, Self>) -> Vec<Listener> {
        let mut listeners = cx.on("form", EventKind::Submit, |form, _, event| {
            event.prevent_default();
            spawn_submission(form);
        });
        listeners.extend(cx.on("submit", EventKind::Click, |form, _, event| {
            event.prevent_default();
            form.dispatch("form", &DomEvent::submit());
        }));
        listeners.extend(cx.on("field", EventKind::Input, |form, data, event| {
            if let Some(name) = data.get("name") {
                form.set_field_value(name, event.value().unwrap_or_default());
            }
        }));
        listeners
    }
}

fn write_styles(config: &FormConfig, ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet();
    sheet.base(
        "& .lume-form-wrapper { display: flex; justify-content: center; align-items: center; }\n\
         & .form-container { width: 100%; overflow: hidden; }\n\
         & .lume-form--split .form-container { display: grid; grid-template-columns: 1fr 1fr; }\n\
         & .lume-form--stacked .form-container { display: flex; flex-direction: column; }\n\
         & .field-group { display: flex; flex-direction: column; gap: 0.4rem; margin-bottom: 1rem; }\n\
         & .field-error { font-size: 0.8rem; }\n\
         & .form-message:empty { display: none; }\n\
         & .submit-button { width: 100%; cursor: pointer; border: none; }\n\
         & .submit-button:disabled { opacity: 0.6; cursor: not-allowed; }",
    );
    sheet
        .rule("& .lume-form-wrapper")
        .decl("width", &config.width)
        .decl("background", &config.body_bg)
        .decl("padding", &config.padding);
    sheet
        .rule("& .form-container")
        .decl("max-width", &config.max_width)
        .decl("border-radius", &config.radius);
    sheet
        .rule("& .info-panel")
        .decl("background", &config.panel_bg)
        .decl("color", &config.panel_text_color);
    sheet
        .rule("& .form-section")
        .decl("background", &config.form_bg)
        .decl("color", &config.form_text_color);
    sheet.rule("& .field-label").decl("color", &config.label_color);
    sheet
        .rule("& .field-input")
        .decl("background", &config.input_bg)
        .decl("border-color", &config.input_border)
        .decl("color", &config.input_color)
        .decl("border-radius", &config.input_radius);
    sheet
        .rule("& .field-error, & .form-message.error")
        .decl("color", lume_style::status::ERROR);
    sheet
        .rule("& .form-message.success")
        .decl("color", lume_style::status::SUCCESS);
    sheet
        .rule("& .submit-button")
        .decl("background", &config.button_bg)
        .decl("color", &config.button_color)
        .decl("border-radius", &config.button_radius);
    sheet
        .rule("& .submit-button:hover:not(:disabled)")
        .decl("background", &config.button_hover_bg);
}

fn write_field(
    ctx: &mut RenderContext<'_>,
    field: &FieldDescriptor,
    value: &str,
    error: Option<&str>,
) -> fmt::Result {
    let field_id = format!("{}-field-{}", ctx.id(), field.name);
    let invalid = if error.is_some() { " invalid" } else { "" };
    let required = if field.required { " required" } else { "" };
    let node = ctx.node_with(
        "field",
        NodeData::new()
            .with("name", field.name.as_str())
            .with("type", field.kind.as_str()),
    );

    write!(
        ctx,
        "<div class=\"field-group{}\">",
        if error.is_some() { " has-error" } else { "" }
    )?;

    if field.kind == FieldType::Checkbox {
        write!(
            ctx,
            "<label class=\"checkbox-label\"><input type=\"checkbox\" id=\"{}\" name=\"{}\" class=\"field-input{invalid}\"{}{required}{node}> {}{}</label>",
            esc(&field_id),
            esc(&field.name),
            if value.is_empty() { "" } else { " checked" },
            esc(&field.label),
            if field.required { " *" } else { "" }
        )?;
    } else {
        write!(
            ctx,
            "<label for=\"{}\" class=\"field-label\">{}{}</label>",
            esc(&field_id),
            esc(&field.label),
            if field.required { " *" } else { "" }
        )?;
        let placeholder = field.placeholder.as_deref().unwrap_or_default();
        match field.kind {
            FieldType::Textarea => write!(
                ctx,
                "<textarea id=\"{}\" name=\"{}\" class=\"field-input{invalid}\" rows=\"{}\" placeholder=\"{}\"{required}{node}>{}</textarea>",
                esc(&field_id),
                esc(&field.name),
                field.rows.unwrap_or(4),
                esc(placeholder),
                esc(value)
            )?,
            FieldType::Select => {
                write!(
                    ctx,
                    "<select id=\"{}\" name=\"{}\" class=\"field-input{invalid}\"{required}{node}><option value=\"\">{}</option>",
                    esc(&field_id),
                    esc(&field.name),
                    esc(field.placeholder.as_deref().unwrap_or("Select an option"))
                )?;
                for option in &field.options {
                    write!(
                        ctx,
                        "<option value=\"{}\"{}>{}</option>",
                        esc(option.value()),
                        if option.value() == value { " selected" } else { "" },
                        esc(option.label())
                    )?;
                }
                ctx.push("</select>");
            }
            kind => {
                write!(
                    ctx,
                    "<input type=\"{}\" id=\"{}\" name=\"{}\" class=\"field-input{invalid}\" placeholder=\"{}\" value=\"{}\"{required}",
                    kind.as_str(),
                    esc(&field_id),
                    esc(&field.name),
                    esc(placeholder),
                    esc(value)
                )?;
                if let Some(min) = field.minlength {
                    write!(ctx, " minlength=\"{min}\"")?;
                }
                if let Some(max) = field.maxlength {
                    write!(ctx, " maxlength=\"{max}\"")?;
                }
                if let Some(min) = field.min {
                    write!(ctx, " min=\"{min}\"")?;
                }
                if let Some(max) = field.max {
                    write!(ctx, " max=\"{max}\"")?;
                }
                if let Some(pattern) = &field.pattern {
                    write!(ctx, " pattern=\"{}\"", esc(pattern))?;
                }
                write!(ctx, "{node}>")?;
            }
        }
    }

    write!(
        ctx,
        "<div id=\"{}-error\" class=\"field-error\" role=\"alert\">{}</div></div>",
        esc(&field_id),
        esc(error.unwrap_or_default())
    )
}

/// Run a submission started from the DOM.
///
/// Submissions that finish without waiting (no `action`, or a failed
/// validation) complete inline; the rest are spawned on the ambient tokio
/// runtime. A form with an `action` is never polled outside a runtime: the
/// HTTP client needs its reactor, so the submission is dropped before any
/// state changes.
fn spawn_submission(form: &Component<Form>) {
    let runtime = tokio::runtime::Handle::try_current();
    if let Err(e) = &runtime
        && form.form_config().action.is_some()
    {
        tracing::error!(target: targets::FORM, id = form.id(), error = %e, "no async runtime, submission abandoned");
        return;
    }

    let form = form.clone();
    let mut task: BoxFuture<'static, SubmitOutcome> = Box::pin(async move { form.submit().await });
    if (&mut task).now_or_never().is_some() {
        return;
    }
    match runtime {
        Ok(runtime) => {
            runtime.spawn(task);
        }
        Err(e) => {
            tracing::error!(target: targets::FORM, error = %e, "submission did not complete inline, abandoned");
        }
    }
}

/// Clears the reentrancy flag when a submission ends, including when its
/// future is dropped mid-flight.
struct SubmittingGuard {
    form: Component<Form>,
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        let form = self.form.widget();
        form.submitting.store(false, Ordering::Release);
        let abandoned = {
            let mut state = form.state.lock();
            let abandoned = matches!(
                state.phase,
                SubmissionPhase::Validating | SubmissionPhase::Submitting
            );
            if abandoned {
                state.phase = SubmissionPhase::Idle;
            }
            abandoned
        };
        if abandoned {
            tracing::debug!(target: targets::FORM, id = self.form.id(), "submission abandoned");
            self.form.refresh();
        }
    }
}

impl Component<Form> {
    /// Current value of a field: the edited value or the field's initial value.
    pub fn field_value(&self, name: &str) -> Option<String> {
        let config = self.form_config();
        let field = config.fields.iter().find(|f| f.name == name)?;
        let edited = self.widget().state.lock().values.get(name).cloned();
        Some(edited.unwrap_or_else(|| field.initial_value()))
    }

    /// Record user input for a field and clear its error message.
    pub fn set_field_value(&self, name: &str, value: impl Into<String>) {
        {
            let mut state = self.widget().state.lock();
            state.values.insert(name.to_string(), value.into());
            state.errors.clear_field(name);
        }
        self.refresh();
    }

    /// Every field's current value, in field order.
    pub fn values(&self) -> Vec<(String, String)> {
        let config = self.form_config();
        let state = self.widget().state.lock();
        config
            .fields
            .iter()
            .map(|field| {
                let value = state
                    .values
                    .get(&field.name)
                    .cloned()
                    .unwrap_or_else(|| field.initial_value());
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Errors of the last validation pass, minus fields edited since.
    pub fn validation(&self) -> ValidationState {
        self.widget().state.lock().errors.clone()
    }

    /// Current submission phase.
    pub fn phase(&self) -> SubmissionPhase {
        self.widget().state.lock().phase
    }

    /// The banner currently shown.
    pub fn message(&self) -> Option<FormMessage> {
        self.widget().state.lock().message.clone()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.widget().submitting.load(Ordering::Acquire)
    }

    /// Validate without submitting, updating the inline errors.
    pub fn validate(&self) -> ValidationState {
        let config = self.form_config();
        let values: HashMap<_, _> = self.values().into_iter().collect();
        let result = validate(&config.fields, &values);
        self.widget().state.lock().errors = result.clone();
        self.refresh();
        result
    }

    /// Validate and submit the form.
    ///
    /// A call made while another submission of this form is in flight returns
    /// [`SubmitOutcome::AlreadySubmitting`] without doing anything.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.widget().submitting.swap(true, Ordering::AcqRel) {
            tracing::debug!(target: targets::FORM, id = self.id(), "submission already in flight");
            return SubmitOutcome::AlreadySubmitting;
        }
        let _guard = SubmittingGuard { form: self.clone() };
        let span = tracing::debug_span!(target: targets::FORM, span_names::SUBMIT, id = self.id());
        self.run_submission().instrument(span).await
    }

    async fn run_submission(&self) -> SubmitOutcome {
        let config = self.form_config();
        self.set_phase(SubmissionPhase::Validating);

        let values = self.values();
        let map: HashMap<_, _> = values.iter().cloned().collect();
        let result = validate(&config.fields, &map);
        if !result.is_valid() {
            {
                let mut state = self.widget().state.lock();
                state.errors = result.clone();
                state.phase = SubmissionPhase::Invalid;
            }
            tracing::debug!(target: targets::FORM, failures = result.len(), "validation failed");
            self.show_message(MessageKind::Error, config.error_message.clone());
            return SubmitOutcome::Invalid(result);
        }

        {
            let mut state = self.widget().state.lock();
            state.errors.clear();
            state.phase = SubmissionPhase::Submitting;
        }
        self.refresh();

        self.emit(Notification::FormSubmitted {
            form_type: config.kind.as_str().to_string(),
            values: values.clone(),
        });

        let delivered = match &config.action {
            Some(action) => self.deliver(action, config.method, values).await,
            None => Ok(()),
        };

        match delivered {
            Ok(()) => {
                {
                    let mut state = self.widget().state.lock();
                    state.values.clear();
                    state.errors.clear();
                    state.phase = SubmissionPhase::Submitted;
                }
                tracing::info!(target: targets::FORM, form_type = %config.kind, "form submitted");
                self.show_message(MessageKind::Success, config.success_message.clone());
                SubmitOutcome::Submitted
            }
            Err(reason) => {
                tracing::error!(target: targets::FORM, form_type = %config.kind, error = %reason, "form submission failed");
                self.set_phase_quiet(SubmissionPhase::Failed);
                self.show_message(MessageKind::Error, FAILURE_MESSAGE.to_string());
                SubmitOutcome::Failed(reason)
            }
        }
    }

    async fn deliver(
        &self,
        action: &str,
        method: HttpMethod,
        values: Vec<(String, String)>,
    ) -> Result<(), String> {
        let transport = self.document().transport().map_err(|e| e.to_string())?;
        let mut submission = FormSubmission::new(action, method).fields(values);
        if let Some(base) = &self.document().config().base_url {
            submission = submission.with_base(base.as_str());
        }
        tracing::debug!(target: targets::FORM, action, %method, "sending form");
        let receipt = transport
            .submit(submission)
            .await
            .map_err(|e| e.to_string())?;
        tracing::debug!(target: targets::FORM, status = receipt.status, "form delivered");
        Ok(())
    }

    /// Hide the banner now. Terminal phases return to idle.
    pub fn dismiss_message(&self) {
        {
            let mut state = self.widget().state.lock();
            if let Some(id) = state.message_timer.take() {
                self.timers().cancel(id);
            }
            state.message = None;
            if matches!(
                state.phase,
                SubmissionPhase::Invalid | SubmissionPhase::Submitted | SubmissionPhase::Failed
            ) {
                state.phase = SubmissionPhase::Idle;
            }
        }
        self.refresh();
    }

    fn show_message(&self, kind: MessageKind, text: String) {
        let previous = {
            let mut state = self.widget().state.lock();
            state.message = Some(FormMessage { kind, text });
            state.message_timer.take()
        };
        if let Some(id) = previous {
            self.timers().cancel(id);
        }

        let handle = self.downgrade();
        let id = self
            .timers()
            .start(self.document().config().message_dismiss(), move || {
                if let Some(form) = handle.upgrade() {
                    form.widget().state.lock().message_timer = None;
                    form.dismiss_message();
                }
            });
        self.widget().state.lock().message_timer = Some(id);
        self.refresh();
    }

    fn set_phase(&self, phase: SubmissionPhase) {
        self.set_phase_quiet(phase);
        self.refresh();
    }

    fn set_phase_quiet(&self, phase: SubmissionPhase) {
        self.widget().state.lock().phase = phase;
    }

    fn form_config(&self) -> Arc<FormConfig> {
        self.config()
            .unwrap_or_else(|| Arc::new(self.widget().configure(&self.attributes(), &self.children())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    fn mounted(attrs: &[(&str, &str)]) -> Component<Form> {
        let doc = Document::new();
        let form = Component::<Form>::create(&doc);
        for (name, value) in attrs {
            form.set_attribute(name, *value);
        }
        form.mount().unwrap();
        form
    }

    #[test]
    fn test_contact_preset_renders_fields_in_order() {
        let form = mounted(&[]);
        let output = form.output();
        let names: Vec<_> = output
            .nodes_with_role("field")
            .filter_map(|node| node.data().get("name").map(str::to_string))
            .collect();
        assert_eq!(names, ["name", "email", "message"]);
        assert!(form.html().contains("Send Message"));
        assert!(form.html().contains("<textarea"));
    }

    #[test]
    fn test_single_layout_has_no_panel() {
        let form = mounted(&[("layout", "single")]);
        assert!(!form.html().contains("info-panel"));
        let split = mounted(&[]);
        assert!(split.html().contains("info-panel"));
    }

    #[test]
    fn test_input_event_updates_value_and_clears_error() {
        let form = mounted(&[("type", "login")]);
        let state = form.validate();
        assert_eq!(state.len(), 2);
        assert!(form.html().contains("Please fill out this field."));

        form.dispatch_nth("field", 0, &DomEvent::input("ada@example.com"));
        assert_eq!(form.field_value("email").as_deref(), Some("ada@example.com"));
        assert_eq!(form.validation().error("email"), None);
        assert!(form.validation().error("password").is_some());
    }

    #[test]
    fn test_unknown_method_falls_back_to_post() {
        let form = mounted(&[("method", "TELEPORT")]);
        assert_eq!(form.config().unwrap().method, HttpMethod::Post);
        let form = mounted(&[("method", "get")]);
        assert_eq!(form.config().unwrap().method, HttpMethod::Get);
    }

    #[test]
    fn test_field_markup_is_escaped() {
        let form = mounted(&[
            ("type", "custom"),
            ("fields", r#"[{"label":"<b>Bio</b>","name":"bio","placeholder":"\"quoted\""}]"#),
        ]);
        let html = form.html();
        assert!(html.contains("&lt;b&gt;Bio&lt;/b&gt;"));
        assert!(html.contains("placeholder=\"&quot;quoted&quot;\""));
    }
}
