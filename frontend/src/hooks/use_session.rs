//! Session gate shared by every view through context.

use crate::transport;
use shared::{probe_session, SessionGate, SessionStatus};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub enum SessionAction {
    Settle(SessionStatus),
    Login,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionState {
    gate: SessionGate,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut gate = self.gate;
        match action {
            SessionAction::Settle(outcome) => {
                if !gate.settle(outcome) {
                    log::debug!("Ignoring late session probe result: {}", outcome.as_str());
                    return self;
                }
            }
            SessionAction::Login => gate.login(),
            SessionAction::Logout => gate.logout(),
        }
        Rc::new(Self { gate })
    }
}

/// What views get from [`use_session`].
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    state: UseReducerHandle<SessionState>,
}

impl SessionHandle {
    pub fn status(&self) -> SessionStatus {
        self.state.gate.status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.gate.is_authenticated()
    }

    /// Mark the session authenticated after a successful login form.
    pub fn login(&self) {
        self.state.dispatch(SessionAction::Login);
    }

    /// Local sign-out; the backend cookie is not revoked.
    pub fn logout(&self) {
        self.state.dispatch(SessionAction::Logout);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Html,
}

/// Owns the gate and probes `/dashboard/verify-session` once on mount.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(SessionState::default);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let status = probe_session(&transport::client()).await;
                log::info!("Session probe settled: {}", status.as_str());
                state.dispatch(SessionAction::Settle(status));
            });
            || ()
        });
    }

    let handle = SessionHandle { state };
    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

/// Current session gate. Must be used under [`SessionProvider`].
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("use_session called outside SessionProvider")
}
