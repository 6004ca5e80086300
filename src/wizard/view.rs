use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use web_sys::{window, File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use wasm_bindgen_futures::spawn_local;
use gloo_console::log;

use crate::components::notification::Severity;
use crate::config;
use crate::wizard::attachment::{Attachment, ALLOWED_MIME_TYPES};
use crate::wizard::controller::{FormWizard, WizardSnapshot, WizardView};
use crate::wizard::fields::{FieldKind, FieldSpec, FormValues, FORM_FIELDS, STEP_TITLES};
use crate::wizard::submission::post_form;

pub const FORM_ANCHOR_ID: &str = "contacto";

/// A plan picked on a pricing card. `seq` changes on every click so picking
/// the same plan twice still reaches the form.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanChoice {
    pub seq: u32,
    pub plan: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct WizardFormProps {
    pub on_notify: Callback<(String, Severity)>,
    #[prop_or_default]
    pub plan_choice: Option<PlanChoice>,
}

#[derive(Clone)]
struct DomView {
    snapshot: UseStateHandle<WizardSnapshot>,
    on_notify: Callback<(String, Severity)>,
    file_input: NodeRef,
    file_slot: Rc<RefCell<Option<File>>>,
}

impl WizardView for DomView {
    fn render(&mut self, snapshot: WizardSnapshot) {
        self.snapshot.set(snapshot);
    }

    fn notify(&mut self, text: String, severity: Severity) {
        self.on_notify.emit((text, severity));
    }

    fn scroll_to_form(&mut self) {
        scroll_to_form_anchor();
    }

    fn clear_attachment_input(&mut self) {
        if let Some(input) = self.file_input.cast::<HtmlInputElement>() {
            input.set_value("");
        }
        self.file_slot.borrow_mut().take();
    }
}

pub fn scroll_to_form_anchor() {
    let Some(anchor) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(FORM_ANCHOR_ID))
    else {
        log::warn!("Form anchor #{} not found", FORM_ANCHOR_ID);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    anchor.scroll_into_view_with_scroll_into_view_options(&options);
}

fn attachment_of(file: &File) -> Attachment {
    Attachment::new(file.name(), file.size() as u64, file.type_())
}

#[function_component(WizardForm)]
pub fn wizard_form(props: &WizardFormProps) -> Html {
    let wizard = use_mut_ref(|| {
        FormWizard::new(FORM_FIELDS).expect("form schema defines at least one step")
    });
    let snapshot = {
        let wizard = wizard.clone();
        use_state(move || wizard.borrow().snapshot())
    };
    let file_input = use_node_ref();
    let select_refs = use_state(|| {
        FORM_FIELDS
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Select(_)))
            .map(|f| (f.name, NodeRef::default()))
            .collect::<Vec<_>>()
    });
    let file_slot = use_mut_ref(|| None::<File>);

    let view = DomView {
        snapshot: snapshot.clone(),
        on_notify: props.on_notify.clone(),
        file_input: file_input.clone(),
        file_slot: file_slot.clone(),
    };

    // Preselect the plan chosen on a pricing card
    {
        let wizard = wizard.clone();
        let view = view.clone();
        use_effect_with_deps(
            move |choice: &Option<PlanChoice>| {
                if let Some(choice) = choice {
                    let mut view = view.clone();
                    wizard.borrow_mut().select_plan(choice.plan, &mut view);
                    view.scroll_to_form();
                }
                || ()
            },
            props.plan_choice.clone(),
        );
    }

    // Option `selected` attributes stop applying once the user picks by hand,
    // so the select value is pushed to the DOM after each change.
    {
        let select_refs = select_refs.clone();
        use_effect_with_deps(
            move |values: &FormValues| {
                for (name, value) in values.select_values(FORM_FIELDS) {
                    let select = select_refs
                        .iter()
                        .find(|(ref_name, _)| *ref_name == name)
                        .and_then(|(_, node)| node.cast::<HtmlSelectElement>());
                    if let Some(select) = select {
                        if select.value() != value {
                            select.set_value(value);
                        }
                    }
                }
                || ()
            },
            snapshot.values.clone(),
        );
    }

    let on_text = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |name: &'static str| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let raw = input.value();
                let kept = wizard.borrow_mut().set_text(name, &raw, &mut view.clone());
                if kept != raw {
                    input.set_value(&kept);
                }
            })
        }
    };

    let on_textarea = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |name: &'static str| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |e: InputEvent| {
                let area: HtmlTextAreaElement = e.target_unchecked_into();
                wizard.borrow_mut().set_text(name, &area.value(), &mut view.clone());
            })
        }
    };

    let on_select = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |name: &'static str| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                wizard.borrow_mut().set_text(name, &select.value(), &mut view.clone());
            })
        }
    };

    let on_check = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |name: &'static str| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                wizard.borrow_mut().set_checked(name, input.checked(), &mut view.clone());
            })
        }
    };

    let on_file = {
        let wizard = wizard.clone();
        let view = view.clone();
        let file_slot = file_slot.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            let accepted = wizard
                .borrow_mut()
                .validate_file(file.as_ref().map(attachment_of), &mut view.clone());
            *file_slot.borrow_mut() = if accepted { file } else { None };
        })
    };

    let go_forward = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |target: usize| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |_: MouseEvent| {
                if let Err(err) = wizard.borrow_mut().go_forward(target, &mut view.clone()) {
                    log::warn!("Cannot move forward: {}", err);
                }
            })
        }
    };

    let go_backward = {
        let wizard = wizard.clone();
        let view = view.clone();
        move |target: usize| {
            let wizard = wizard.clone();
            let view = view.clone();
            Callback::from(move |_: MouseEvent| {
                if let Err(err) = wizard.borrow_mut().go_backward(target, &mut view.clone()) {
                    log::warn!("Cannot move back: {}", err);
                }
            })
        }
    };

    let on_submit = {
        let wizard = wizard.clone();
        let view = view.clone();
        let file_slot = file_slot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(payload) = wizard.borrow_mut().submit(&mut view.clone()) else {
                return;
            };
            let file = file_slot.borrow().clone();
            let wizard = wizard.clone();
            let mut view = view.clone();
            spawn_local(async move {
                log!("Submitting form:", payload.summary());
                let result = post_form(&config::form_endpoint(), &payload, file).await;
                wizard.borrow_mut().finish_submission(result, &mut view);
            });
        })
    };

    let render_field = |field: &FieldSpec| -> Html {
        let id = field.name;
        let invalid = snapshot.is_invalid(field.name);
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.to_string()
        };
        match field.kind {
            FieldKind::Checkbox { group } => {
                let validated = group.map_or(false, |g| snapshot.validated_groups.contains(g));
                html! {
                    <div class={classes!("form-check", "mb-2", validated.then(|| "was-validated"))}>
                        <input
                            type="checkbox"
                            class={classes!("form-check-input", invalid.then(|| "is-invalid"))}
                            id={id}
                            name={field.name}
                            required={field.required}
                            checked={snapshot.values.is_checked(field.name)}
                            onchange={on_check(field.name)}
                        />
                        <label class="form-check-label" for={id}>{label}</label>
                    </div>
                }
            }
            FieldKind::Select(options) => {
                let current = snapshot.values.text(field.name);
                let node = select_refs
                    .iter()
                    .find(|(name, _)| *name == field.name)
                    .map(|(_, node)| node.clone())
                    .unwrap_or_default();
                html! {
                    <div class="mb-3">
                        <label class="form-label" for={id}>{label}</label>
                        <select
                            ref={node}
                            class={classes!("form-select", invalid.then(|| "is-invalid"))}
                            id={id}
                            name={field.name}
                            required={field.required}
                            onchange={on_select(field.name)}
                        >
                            <option value="" selected={current.is_empty()}>{"Selecciona una opción"}</option>
                            { for options.iter().map(|(value, text)| html! {
                                <option value={*value} selected={current == *value}>{*text}</option>
                            }) }
                        </select>
                    </div>
                }
            }
            FieldKind::TextArea => html! {
                <div class="mb-3">
                    <label class="form-label" for={id}>{label}</label>
                    <textarea
                        class={classes!("form-control", invalid.then(|| "is-invalid"))}
                        id={id}
                        name={field.name}
                        rows="4"
                        required={field.required}
                        value={snapshot.values.text(field.name).to_string()}
                        oninput={on_textarea(field.name)}
                    />
                </div>
            },
            FieldKind::File => html! {
                <div class="mb-3">
                    <label class="form-label" for={id}>{label}</label>
                    <input
                        type="file"
                        ref={file_input.clone()}
                        class={classes!("form-control", invalid.then(|| "is-invalid"))}
                        id={id}
                        name={field.name}
                        accept={ALLOWED_MIME_TYPES.join(",")}
                        required={field.required}
                        onchange={on_file.clone()}
                    />
                    if let Some(attachment) = &snapshot.attachment {
                        <div class="form-text">{format!("Archivo seleccionado: {}", attachment.name)}</div>
                    }
                </div>
            },
            FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Dni => {
                let (input_type, extra): (&str, Option<&str>) = match field.kind {
                    FieldKind::Email => ("email", None),
                    FieldKind::Tel => ("tel", None),
                    FieldKind::Dni => ("text", Some("numeric")),
                    _ => ("text", None),
                };
                html! {
                    <div class="mb-3">
                        <label class="form-label" for={id}>{label}</label>
                        <input
                            type={input_type}
                            inputmode={extra}
                            class={classes!("form-control", invalid.then(|| "is-invalid"))}
                            id={id}
                            name={field.name}
                            required={field.required}
                            value={snapshot.values.text(field.name).to_string()}
                            oninput={on_text(field.name)}
                        />
                    </div>
                }
            }
        }
    };

    let total = snapshot.total_steps;
    html! {
        <form id="cvForm" class="cv-form" novalidate=true onsubmit={on_submit}>
            <div class="step-indicators d-flex justify-content-between mb-3">
                { for (1..=total).map(|step| html! {
                    <div class={classes!("step", snapshot.is_active(step).then(|| "active"))}>
                        <span class="step-number">{step}</span>
                        <span class="step-title">{STEP_TITLES.get(step - 1).copied().unwrap_or_default()}</span>
                    </div>
                }) }
            </div>
            <div class="progress mb-4" style="height: 4px;">
                <div class="progress-bar" role="progressbar" style={format!("width: {}%", snapshot.progress)}></div>
            </div>
            { for (1..=total).map(|step| html! {
                <div id={format!("step{}", step)} class={classes!("form-step", snapshot.is_active(step).then(|| "active"))}>
                    { for FORM_FIELDS.iter().filter(|f| f.step == step).map(|f| render_field(f)) }
                    <div class="d-flex justify-content-between mt-4">
                        if step > 1 {
                            <button type="button" class="btn btn-outline-secondary" onclick={go_backward(step - 1)}>
                                {"Anterior"}
                            </button>
                        } else {
                            <span></span>
                        }
                        if step < total {
                            <button type="button" class="btn btn-primary" onclick={go_forward(step + 1)}>
                                {"Siguiente"}
                            </button>
                        } else {
                            <button type="submit" class="btn btn-primary" disabled={snapshot.submitting}>
                                if snapshot.submitting {
                                    <><i class="fas fa-spinner fa-spin me-2"></i>{"Enviando..."}</>
                                } else {
                                    <><i class="fas fa-paper-plane me-2"></i>{"Enviar CV para Mejora"}</>
                                }
                            </button>
                        }
                    </div>
                </div>
            }) }
        </form>
    }
}
