//! The one form behind every dashboard tab.

use crate::components::FieldInput;
use crate::hooks::use_form_controller;
use shared::{Operation, Outcome, Phase};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OperationFormProps {
    pub operation: Operation,
}

#[function_component(OperationForm)]
pub fn operation_form(props: &OperationFormProps) -> Html {
    let operation = props.operation;
    let controller = use_form_controller(operation);

    let on_target = {
        let controller = controller.clone();
        Callback::from(move |value: String| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.set_target(value).await;
            });
        })
    };

    let onsubmit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            spawn_local(async move {
                if let Err(refusal) = controller.submit(gloo::dialogs::confirm).await {
                    log::debug!("{}: submit not started ({:?})", operation.label(), refusal);
                }
            });
        })
    };

    let state = controller.state();
    let busy = state.is_busy();

    let target = operation.has_target().then(|| {
        let spec = *operation.resource.id_field();
        html! {
            <FieldInput
                {spec}
                value={state.target().to_string()}
                error={state.target_error()}
                disabled={state.phase() == Phase::Submitting}
                on_change={on_target}
            />
        }
    });

    let fields = operation
        .fields()
        .iter()
        .map(|spec| {
            let on_change = {
                let controller = controller.clone();
                let name = spec.name;
                Callback::from(move |value: String| controller.set_field(name, value))
            };
            html! {
                <FieldInput
                    key={spec.name}
                    spec={*spec}
                    value={state.value(spec.name).to_string()}
                    error={state.error(spec.name)}
                    disabled={busy}
                    {on_change}
                />
            }
        })
        .collect::<Html>();

    let button_label = if state.phase() == Phase::Submitting {
        operation.busy_label()
    } else {
        operation.submit_label()
    };

    let result = state.result().map(|result| {
        let (class, icon) = match result.kind {
            Outcome::Success => ("result success", "✅"),
            Outcome::Error => ("result error", "❌"),
        };
        html! { <p class={class}>{ format!("{} {}", icon, result.text) }</p> }
    });

    html! {
        <form class="operation-form" {onsubmit} novalidate={true}>
            <h2>{ operation.label() }</h2>
            { for target }
            if state.phase() == Phase::Loading {
                <p class="form-loading">{ "Cargando datos..." }</p>
            }
            { fields }
            <button type="submit" class="submit-button" disabled={busy}>
                { button_label }
            </button>
            { for result }
        </form>
    }
}
