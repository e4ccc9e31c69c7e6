use crate::hooks::use_session;
use crate::Route;
use shared::GuardDecision;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Html,
}

/// Renders its children only for an authenticated session.
///
/// While the probe is outstanding nothing protected is shown and no
/// redirect happens. A signed-out session replaces the current history
/// entry with the login view.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let decision = session.status().guard();

    use_effect_with(decision, move |decision| {
        if *decision == GuardDecision::RedirectToLogin {
            match navigator {
                Some(navigator) => navigator.replace(&Route::Login),
                None => log::error!("Protected view rendered outside the router"),
            }
        }
    });

    match decision {
        GuardDecision::Wait => html! {
            <div class="session-loading">{ "Cargando sesión..." }</div>
        },
        GuardDecision::Render => props.children.clone(),
        GuardDecision::RedirectToLogin => html! {},
    }
}
