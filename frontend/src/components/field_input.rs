use shared::{FieldErrors, FieldSpec, FieldValues, InputType};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldInputProps {
    pub spec: FieldSpec,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<String>,
}

/// Labelled input with its inline validation message
#[function_component(FieldInput)]
pub fn field_input(props: &FieldInputProps) -> Html {
    let id = format!("field-{}", props.spec.name);

    let control = if props.spec.input_type == InputType::TextArea {
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(area.value());
        });
        html! {
            <textarea
                id={id.clone()}
                name={props.spec.name}
                value={props.value.clone()}
                disabled={props.disabled}
                {oninput}
            />
        }
    } else {
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        });
        html! {
            <input
                id={id.clone()}
                name={props.spec.name}
                type={props.spec.input_type.as_html()}
                value={props.value.clone()}
                disabled={props.disabled}
                {oninput}
            />
        }
    };

    html! {
        <div class={classes!("form-field", props.error.is_some().then_some("invalid"))}>
            <label for={id}>{ props.spec.label }</label>
            { control }
            if let Some(error) = props.error {
                <p class="field-error">{ error }</p>
            }
        </div>
    }
}

/// Render a whole field list against plain value/error maps.
pub fn field_inputs(
    fields: &'static [FieldSpec],
    values: &FieldValues,
    errors: &FieldErrors,
    disabled: bool,
    on_field: &Callback<(&'static str, String)>,
) -> Html {
    fields
        .iter()
        .map(|spec| {
            let name = spec.name;
            let on_change = on_field.reform(move |value: String| (name, value));
            html! {
                <FieldInput
                    key={name}
                    spec={*spec}
                    value={values.get(name).cloned().unwrap_or_default()}
                    error={errors.get(name).copied()}
                    {disabled}
                    {on_change}
                />
            }
        })
        .collect()
}
