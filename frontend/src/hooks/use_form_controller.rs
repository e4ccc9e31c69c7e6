//! Hook binding a [`FormController`] to a component.

use crate::transport::{self, BrowserTransport};
use shared::{FormController, Operation};
use std::rc::Rc;
use yew::prelude::*;

/// One controller per mounted form. The component re-renders whenever the
/// controller's state changes, including when an async request lands.
///
/// The controller lives as long as the component; remount the component
/// (for instance with a new `key`) to start over with a blank form.
#[hook]
pub fn use_form_controller(operation: Operation) -> FormController<BrowserTransport> {
    let update = use_force_update();
    let controller = use_memo(operation, move |operation| {
        FormController::new(*operation, Rc::new(transport::client()), move || {
            update.force_update()
        })
    });
    (*controller).clone()
}
