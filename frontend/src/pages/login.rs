use crate::components::field_inputs;
use crate::hooks::use_session;
use crate::transport;
use crate::Route;
use serde::{Deserialize, Serialize};
use shared::accounts::{self, AccountError, LOGIN_FIELDS, SIGN_UP_SUCCESS};
use shared::validation::blank_values;
use shared::FieldErrors;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Query the sign-up view attaches when it hands over to the login view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub registered: bool,
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let registered = use_location()
        .and_then(|location| location.query::<LoginQuery>().ok())
        .is_some_and(|query| query.registered);

    let values = use_state(|| blank_values(LOGIN_FIELDS));
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
            let session = session.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match accounts::log_in(&transport::client(), &current).await {
                    Ok(()) => {
                        errors.set(FieldErrors::new());
                        session.login();
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
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
                <h1>{ "Iniciar sesión" }</h1>
                if registered {
                    <p class="result success">{ SIGN_UP_SUCCESS }</p>
                }
                { field_inputs(LOGIN_FIELDS, &values, &errors, *submitting, &on_field) }
                <button type="submit" class="submit-button" disabled={*submitting}>
                    { if *submitting { "Ingresando..." } else { "Iniciar sesión" } }
                </button>
                if let Some(message) = (*failure).clone() {
                    <p class="result error">{ format!("❌ {}", message) }</p>
                }
                <p class="account-switch">
                    { "¿No tienes cuenta? " }
                    <Link<Route> to={Route::SignUp}>{ "Crear usuario" }</Link<Route>>
                </p>
            </form>
        </div>
    }
}
