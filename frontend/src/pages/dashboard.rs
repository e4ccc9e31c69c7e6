//! Admin dashboard: one tab per catalog operation.

use crate::components::OperationForm;
use shared::DashboardTabs;
use yew::prelude::*;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let tabs = use_state(DashboardTabs::new);

    let buttons = tabs
        .operations()
        .iter()
        .map(|&operation| {
            let onclick = {
                let tabs = tabs.clone();
                Callback::from(move |_: MouseEvent| {
                    let mut next = *tabs;
                    if next.select(operation) {
                        tabs.set(next);
                    }
                })
            };
            html! {
                <button
                    type="button"
                    class={classes!("tab-button", tabs.is_selected(operation).then_some("active"))}
                    {onclick}
                >
                    { operation.label() }
                </button>
            }
        })
        .collect::<Html>();

    html! {
        <div class="dashboard-container">
            <h1>{ "Panel de administración" }</h1>
            <div class="tab-bar">{ buttons }</div>
            // A new key per tab switch remounts the form with a fresh controller
            <OperationForm key={tabs.instance_key().to_string()} operation={tabs.selected()} />
        </div>
    }
}
