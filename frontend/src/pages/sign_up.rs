use crate::components::field_inputs;
use crate::pages::login::LoginQuery;
use crate::transport;
use crate::Route;
use shared::accounts::{self, AccountError, SIGN_UP_FIELDS};
use shared::validation::blank_values;
use shared::FieldErrors;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(SignUpPage)]
pub fn sign_up_page() -> Html {
    let navigator = use_navigator();
    let values = use_state(|| blank_values(SIGN_UP_FIELDS));
    let errors = use_state(FieldErrors::new);
    let failure = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_field = {
        let values = values.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            let mut next = (*values).clone();
            next.insert(name, value);
            values.set(next);
        })
    };

    let onsubmit = {
        let values = values.clone();
        let errors = errors.clone();
        let failure = failure.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            failure.set(None);

            let current = (*values).clone();
            let errors = errors.clone();
            let failure = failure.clone();
            let submitting = submitting.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match accounts::sign_up(&transport::client(), &current).await {
                    Ok(()) => {
                        errors.set(FieldErrors::new());
                        if let Some(navigator) = navigator {
                            let query = LoginQuery { registered: true };
                            if let Err(e) = navigator.push_with_query(&Route::Login, &query) {
                                log::error!("Failed to open login after sign-up: {}", e);
                            }
                        }
                    }
                    Err(AccountError::Invalid(field_errors)) => errors.set(field_errors),
                    Err(AccountError::Rejected(message)) => {
                        errors.set(FieldErrors::new());
                        failure.set(Some(message));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="account-container">
            <form class="account-form" {onsubmit} novalidate={true}>
                <h1>{ "Crear usuario" }</h1>
                { field_inputs(SIGN_UP_FIELDS, &values, &errors, *submitting, &on_field) }
                <button type="submit" class="submit-button" disabled={*submitting}>
                    { if *submitting { "Creando..." } else { "Crear cuenta" } }
                </button>
                if let Some(message) = (*failure).clone() {
                    <p class="result error">{ format!("❌ {}", message) }</p>
                }
                <p class="account-switch">
                    { "¿Ya tienes cuenta? " }
                    <Link<Route> to={Route::Login}>{ "Iniciar sesión" }</Link<Route>>
                </p>
            </form>
        </div>
    }
}
