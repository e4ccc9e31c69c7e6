//! Form lifecycle shared by every create/update/delete form.
//!
//! [`FormState`] is a pure state machine: it hands out a [`PendingRequest`]
//! when something needs to go over the wire and is told the outcome later
//! through `resolve_*`. Each request carries a [`Ticket`] stamped with the
//! generation that issued it. Changing the update target bumps the
//! generation, so a response that lands afterwards is dropped instead of
//! overwriting the newer form.
//!
//! [`FormController`] wires the state machine to a [`ResourceClient`] for
//! single-threaded async callers (the browser, or a current-thread test
//! runtime).

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::{ApiError, ApiRequest, HttpTransport, ResourceClient};
use crate::operations::{Operation, OperationKind};
use crate::validation::{
    blank_values, parse_id, validate, validate_field, FieldErrors, FieldValues,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Fetching the entity an update form targets
    Loading,
    /// A mutation is outstanding
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub kind: Outcome,
    pub text: String,
}

impl ResultMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: Outcome::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: Outcome::Error,
            text: text.into(),
        }
    }
}

/// Identifies the request that produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    target: Option<i64>,
}

impl Ticket {
    pub fn target(&self) -> Option<i64> {
        self.target
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: ApiRequest,
}

/// Why a submit did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    /// Loading or Submitting already
    Busy,
    /// Inline field errors were recorded
    Invalid,
    /// Update form without a target identifier
    MissingTarget,
    /// Operator declined the delete confirmation
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    operation: Operation,
    phase: Phase,
    values: FieldValues,
    target: String,
    target_error: Option<&'static str>,
    errors: FieldErrors,
    result: Option<ResultMessage>,
    generation: u64,
}

impl FormState {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            phase: Phase::Idle,
            values: blank_values(operation.fields()),
            target: String::new(),
            target_error: None,
            errors: FieldErrors::new(),
            result: None,
            generation: 0,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&'static str> {
        self.errors.get(name).copied()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn target_error(&self) -> Option<&'static str> {
        self.target_error
    }

    pub fn result(&self) -> Option<&ResultMessage> {
        self.result.as_ref()
    }

    fn ticket(&self, target: Option<i64>) -> Ticket {
        Ticket {
            generation: self.generation,
            target,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    fn clear_fields(&mut self) {
        self.values = blank_values(self.operation.fields());
    }

    /// Operator typed into a field. Clears that field's inline error.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let Some(spec) = self.operation.fields().iter().find(|f| f.name == name) else {
            log::warn!("{}: no field named {}", self.operation.label(), name);
            return;
        };
        self.values.insert(spec.name, value.into());
        self.errors.remove(spec.name);
    }

    /// Update forms only: the target identifier changed.
    ///
    /// Supersedes anything in flight, blanks the fields and, when the new
    /// identifier is valid, returns the fetch to issue. An empty identifier
    /// just clears the form.
    pub fn set_target(&mut self, value: impl Into<String>) -> Option<PendingRequest> {
        if !self.operation.has_target() {
            log::warn!("{}: form has no target", self.operation.label());
            return None;
        }

        self.generation += 1;
        self.target = value.into();
        self.target_error = None;
        self.errors.clear();
        self.result = None;
        self.phase = Phase::Idle;
        self.clear_fields();

        if self.target.trim().is_empty() {
            return None;
        }

        let id_field = self.operation.resource.id_field();
        if let Some(msg) = validate_field(id_field, &self.target) {
            self.target_error = Some(msg);
            return None;
        }

        let id = parse_id(&self.target)?;
        self.phase = Phase::Loading;
        Some(PendingRequest {
            ticket: self.ticket(Some(id)),
            request: self.operation.fetch_request(id),
        })
    }

    /// Apply a fetch outcome. Returns `false` if the ticket was stale.
    pub fn resolve_fetch(&mut self, ticket: Ticket, outcome: Result<Value, ApiError>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "{}: dropping stale fetch for {:?}",
                self.operation.label(),
                ticket.target
            );
            return false;
        }

        self.phase = Phase::Idle;
        match outcome.and_then(|body| self.operation.resource.populate(body)) {
            Ok(values) => {
                self.clear_fields();
                self.values.extend(values);
            }
            Err(e) => {
                log::error!("{}: fetch failed: {}", self.operation.label(), e);
                self.clear_fields();
                self.result = Some(ResultMessage::error(self.operation.fetch_error_message(&e)));
            }
        }
        true
    }

    /// Validate and, if everything checks out, move to `Submitting`.
    ///
    /// `confirm` is only consulted by delete forms, after validation.
    pub fn begin_submit(
        &mut self,
        today: NaiveDate,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<PendingRequest, SubmitRefusal> {
        if self.is_busy() {
            return Err(SubmitRefusal::Busy);
        }

        if let Err(errors) = validate(self.operation.fields(), &self.values) {
            self.errors = errors;
            return Err(SubmitRefusal::Invalid);
        }
        self.errors.clear();

        let target = match self.operation.kind {
            OperationKind::Create => None,
            OperationKind::Update => {
                if self.target.trim().is_empty() {
                    self.result = Some(ResultMessage::error(
                        self.operation.missing_target_message(),
                    ));
                    return Err(SubmitRefusal::MissingTarget);
                }
                if self.target_error.is_some() {
                    return Err(SubmitRefusal::Invalid);
                }
                parse_id(&self.target)
            }
            OperationKind::Delete => {
                let id = self
                    .operation
                    .delete_target(&self.values)
                    .ok_or(SubmitRefusal::Invalid)?;
                if !confirm(&self.operation.confirm_prompt(id)) {
                    return Err(SubmitRefusal::Cancelled);
                }
                Some(id)
            }
        };

        let request = match self.operation.submit_request(target, &self.values, today) {
            Ok(request) => request,
            Err(e) => {
                self.result = Some(ResultMessage::error(self.operation.error_message(&e)));
                return Err(SubmitRefusal::Invalid);
            }
        };

        self.result = None;
        self.phase = Phase::Submitting;
        Ok(PendingRequest {
            ticket: self.ticket(target),
            request,
        })
    }

    /// Apply a mutation outcome. Returns `false` if the ticket was stale.
    pub fn resolve_submit(&mut self, ticket: Ticket, outcome: Result<Value, ApiError>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "{}: dropping stale submit for {:?}",
                self.operation.label(),
                ticket.target
            );
            return false;
        }

        self.phase = Phase::Idle;
        match outcome {
            Ok(body) => {
                let text = self
                    .operation
                    .success_message(ticket.target, &self.values, &body);
                self.result = Some(ResultMessage::success(text));
                self.clear_fields();
                if self.operation.has_target() {
                    self.target.clear();
                    self.target_error = None;
                }
            }
            Err(e) => {
                log::error!("{}: submit failed: {}", self.operation.label(), e);
                self.result = Some(ResultMessage::error(self.operation.error_message(&e)));
            }
        }
        true
    }
}

/// Runs a [`FormState`] against a [`ResourceClient`].
///
/// Cheap to clone; clones share the same state. `notify` fires after
/// every state change so a view can re-render.
pub struct FormController<T> {
    state: Rc<RefCell<FormState>>,
    client: Rc<ResourceClient<T>>,
    notify: Rc<dyn Fn()>,
}

impl<T> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            client: self.client.clone(),
            notify: self.notify.clone(),
        }
    }
}

impl<T: HttpTransport> FormController<T> {
    pub fn new(
        operation: Operation,
        client: Rc<ResourceClient<T>>,
        notify: impl Fn() + 'static,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(FormState::new(operation))),
            client,
            notify: Rc::new(notify),
        }
    }

    pub fn state(&self) -> Ref<'_, FormState> {
        self.state.borrow()
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        self.state.borrow_mut().set_field(name, value);
        (self.notify)();
    }

    /// Change the update target and load the entity it names.
    pub async fn set_target(&self, value: impl Into<String>) {
        let pending = self.state.borrow_mut().set_target(value);
        (self.notify)();

        if let Some(pending) = pending {
            let outcome = self.client.send(&pending.request).await;
            if self.state.borrow_mut().resolve_fetch(pending.ticket, outcome) {
                (self.notify)();
            }
        }
    }

    /// Validate, confirm (delete forms) and submit.
    pub async fn submit(&self, confirm: impl FnOnce(&str) -> bool) -> Result<(), SubmitRefusal> {
        self.submit_on(crate::today(), confirm).await
    }

    pub async fn submit_on(
        &self,
        today: NaiveDate,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), SubmitRefusal> {
        let pending = self.state.borrow_mut().begin_submit(today, confirm);
        (self.notify)();
        let pending = pending?;

        let outcome = self.client.send(&pending.request).await;
        if self.state.borrow_mut().resolve_submit(pending.ticket, outcome) {
            (self.notify)();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::api::{Method, RawResponse};
    use crate::operations::ResourceKind;
    use futures_util::poll;
    use serde_json::json;
    use std::cell::Cell;
    use std::pin::pin;

    const CREATE_CATEGORY: Operation = Operation::new(ResourceKind::Category, OperationKind::Create);
    const UPDATE_CATEGORY: Operation = Operation::new(ResourceKind::Category, OperationKind::Update);
    const DELETE_CATEGORY: Operation = Operation::new(ResourceKind::Category, OperationKind::Delete);
    const CREATE_PRODUCT: Operation = Operation::new(ResourceKind::Product, OperationKind::Create);
    const UPDATE_PRODUCT: Operation = Operation::new(ResourceKind::Product, OperationKind::Update);
    const DELETE_PRODUCT: Operation = Operation::new(ResourceKind::Product, OperationKind::Delete);

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn controller(operation: Operation, transport: MockTransport) -> FormController<MockTransport> {
        FormController::new(operation, Rc::new(ResourceClient::new(transport)), || {})
    }

    fn calls(ctrl: &FormController<MockTransport>) -> Vec<ApiRequest> {
        ctrl.client.transport().calls()
    }

    fn fill_product(ctrl: &FormController<MockTransport>, price: &str) {
        ctrl.set_field("product_name", "Teclado");
        ctrl.set_field("description", "Mecánico");
        ctrl.set_field("price", price);
        ctrl.set_field("category_id", "3");
    }

    #[test]
    fn fresh_state_is_idle_and_blank() {
        let state = FormState::new(CREATE_PRODUCT);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.result().is_none());
        assert_eq!(state.values().len(), 4);
        assert!(state.values().values().all(String::is_empty));
    }

    #[test]
    fn unknown_field_is_ignored() {
        let mut state = FormState::new(CREATE_CATEGORY);
        state.set_field("nope", "x");
        assert!(!state.values().contains_key("nope"));
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut state = FormState::new(CREATE_CATEGORY);
        assert_eq!(state.begin_submit(date(), |_| true), Err(SubmitRefusal::Invalid));
        assert!(state.error("category_name").is_some());
        state.set_field("category_name", "Li");
        assert!(state.error("category_name").is_none());
    }

    #[test]
    fn busy_form_refuses_second_submit() {
        let mut state = FormState::new(CREATE_CATEGORY);
        state.set_field("category_name", "Books");
        let first = state.begin_submit(date(), |_| true).unwrap();
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.begin_submit(date(), |_| true), Err(SubmitRefusal::Busy));
        assert!(state.resolve_submit(first.ticket, Ok(json!({"category_name": "Books"}))));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn create_category_success_resets_fields() {
        let ctrl = controller(
            CREATE_CATEGORY,
            MockTransport::new().reply(200, r#"{"category_name":"Books"}"#),
        );
        ctrl.set_field("category_name", "Books");
        ctrl.submit_on(date(), |_| true).await.unwrap();

        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::success("Categoría creada: Books"))
        );
        assert_eq!(state.value("category_name"), "");
        assert_eq!(state.phase(), Phase::Idle);

        let sent = calls(&ctrl);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/category");
        assert_eq!(sent[0].body, Some(json!({"category_name": "Books"})));
    }

    #[tokio::test]
    async fn create_category_without_name_in_reply_still_succeeds() {
        let ctrl = controller(CREATE_CATEGORY, MockTransport::new().reply(201, r#"{"id":9}"#));
        ctrl.set_field("category_name", "Books");
        ctrl.submit_on(date(), |_| true).await.unwrap();

        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::success("Categoría creada: Books"))
        );
        assert_eq!(state.value("category_name"), "");
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn loading_form_refuses_submit() {
        let ctrl = controller(UPDATE_CATEGORY, MockTransport::new());
        let gate = ctrl.client.transport().gate("/category/3");

        let mut fetch = pin!(ctrl.set_target("3"));
        assert!(poll!(fetch.as_mut()).is_pending());
        assert_eq!(ctrl.state().phase(), Phase::Loading);

        ctrl.set_field("category_name", "Books");
        assert_eq!(
            ctrl.submit_on(date(), |_| true).await,
            Err(SubmitRefusal::Busy)
        );
        assert_eq!(calls(&ctrl).len(), 1);

        gate.send(RawResponse::new(200, r#"{"category_name":"Hogar"}"#))
            .unwrap();
        fetch.await;
        assert_eq!(ctrl.state().phase(), Phase::Idle);
        assert_eq!(ctrl.state().value("category_name"), "Hogar");
        assert!(ctrl.state().result().is_none());
    }

    #[tokio::test]
    async fn short_names_never_reach_the_network() {
        for name in ["", "a", "ab", "  ab  "] {
            let ctrl = controller(CREATE_CATEGORY, MockTransport::new());
            ctrl.set_field("category_name", name);
            assert_eq!(
                ctrl.submit_on(date(), |_| true).await,
                Err(SubmitRefusal::Invalid)
            );
            assert!(calls(&ctrl).is_empty());
            assert_eq!(ctrl.state().phase(), Phase::Idle);
        }

        let ctrl = controller(CREATE_PRODUCT, MockTransport::new());
        fill_product(&ctrl, "10");
        ctrl.set_field("product_name", "Te");
        assert_eq!(
            ctrl.submit_on(date(), |_| true).await,
            Err(SubmitRefusal::Invalid)
        );
        assert_eq!(
            ctrl.state().error("product_name"),
            Some("El nombre debe tener al menos 3 caracteres.")
        );
        assert!(calls(&ctrl).is_empty());
    }

    #[tokio::test]
    async fn create_error_keeps_values() {
        let ctrl = controller(
            CREATE_PRODUCT,
            MockTransport::new().reply(
                422,
                r#"{"detail":[{"msg":"value is not a valid integer"},{"msg":"field required"}]}"#,
            ),
        );
        fill_product(&ctrl, "49.9");
        ctrl.submit_on(date(), |_| true).await.unwrap();

        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::error(
                "Error al crear el producto: value is not a valid integer, field required"
            ))
        );
        assert_eq!(state.value("product_name"), "Teclado");
        assert_eq!(state.value("price"), "49.9");
    }

    #[tokio::test]
    async fn create_twice_settles_twice() {
        let ctrl = controller(
            CREATE_PRODUCT,
            MockTransport::new().reply(200, "{}").reply(200, "{}"),
        );
        for _ in 0..2 {
            fill_product(&ctrl, "5");
            ctrl.submit_on(date(), |_| true).await.unwrap();
            let state = ctrl.state();
            assert_eq!(
                state.result(),
                Some(&ResultMessage::success("Producto creado exitosamente!"))
            );
            assert!(state.values().values().all(String::is_empty));
        }
        assert_eq!(calls(&ctrl).len(), 2);
    }

    #[tokio::test]
    async fn transport_failure_is_terminal_for_the_attempt() {
        let ctrl = controller(CREATE_CATEGORY, MockTransport::new().fail("Failed to fetch"));
        ctrl.set_field("category_name", "Books");
        ctrl.submit_on(date(), |_| true).await.unwrap();
        let state = ctrl.state();
        assert_eq!(
            state.result().map(|r| r.kind),
            Some(Outcome::Error)
        );
        assert_eq!(state.value("category_name"), "Books");
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn delete_rejects_non_numeric_ids_locally() {
        for id in ["abc", "5x", "1.5", "", "0", "-2"] {
            let ctrl = controller(DELETE_CATEGORY, MockTransport::new());
            ctrl.set_field("category_id", id);
            let asked = Cell::new(false);
            let outcome = ctrl
                .submit_on(date(), |_| {
                    asked.set(true);
                    true
                })
                .await;
            assert_eq!(outcome, Err(SubmitRefusal::Invalid), "id {:?}", id);
            assert!(!asked.get());
            assert!(calls(&ctrl).is_empty());
        }

        let ctrl = controller(DELETE_CATEGORY, MockTransport::new());
        ctrl.set_field("category_id", "abc");
        let _ = ctrl.submit_on(date(), |_| true).await;
        assert_eq!(
            ctrl.state().error("category_id"),
            Some("Por favor, introduce un ID de categoría válido (número).")
        );
    }

    #[tokio::test]
    async fn delete_cancel_returns_to_idle_without_request() {
        let ctrl = controller(DELETE_PRODUCT, MockTransport::new());
        ctrl.set_field("product_id", "4");
        let mut prompt = String::new();
        let outcome = ctrl
            .submit_on(date(), |p| {
                prompt = p.to_string();
                false
            })
            .await;
        assert_eq!(outcome, Err(SubmitRefusal::Cancelled));
        assert_eq!(
            prompt,
            "¿Estás seguro de que quieres eliminar el producto con ID: 4?"
        );
        assert!(calls(&ctrl).is_empty());
        assert_eq!(ctrl.state().phase(), Phase::Idle);
        assert_eq!(ctrl.state().value("product_id"), "4");
    }

    #[tokio::test]
    async fn delete_not_found_keeps_identifier() {
        let ctrl = controller(
            DELETE_CATEGORY,
            MockTransport::new().reply(404, r#"{"detail":"not found"}"#),
        );
        ctrl.set_field("category_id", "5");
        ctrl.submit_on(date(), |_| true).await.unwrap();

        let sent = calls(&ctrl);
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/category/5");

        let state = ctrl.state();
        assert_eq!(state.result(), Some(&ResultMessage::error("not found")));
        assert_eq!(state.value("category_id"), "5");
    }

    #[tokio::test]
    async fn delete_success_clears_identifier() {
        let ctrl = controller(
            DELETE_PRODUCT,
            MockTransport::new().reply(200, r#"{"product_name":"x"}"#),
        );
        ctrl.set_field("product_id", "8");
        ctrl.submit_on(date(), |_| true).await.unwrap();
        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::success("Producto con ID 8 eliminado exitosamente."))
        );
        assert_eq!(state.value("product_id"), "");
    }

    #[tokio::test]
    async fn update_loads_entity_then_submits() {
        let ctrl = controller(
            UPDATE_PRODUCT,
            MockTransport::new()
                .reply(
                    200,
                    r#"{"product_name":"Silla","description":"Roja","price":12,"category_id":2}"#,
                )
                .reply(200, "{}"),
        );
        ctrl.set_target("7").await;
        {
            let state = ctrl.state();
            assert_eq!(state.phase(), Phase::Idle);
            assert_eq!(state.value("product_name"), "Silla");
            assert_eq!(state.value("price"), "12");
        }

        ctrl.set_field("price", "15");
        ctrl.submit_on(date(), |_| true).await.unwrap();

        let sent = calls(&ctrl);
        assert_eq!(sent[0].path, "/products/7");
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(sent[1].path, "/products/7");
        let body = sent[1].body.as_ref().unwrap();
        assert_eq!(body["price"], 15.0);
        assert_eq!(body["updated_product"], "2025-06-01");

        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::success("Producto actualizado exitosamente."))
        );
        assert_eq!(state.target(), "");
        assert!(state.values().values().all(String::is_empty));
    }

    #[tokio::test]
    async fn update_negative_price_is_blocked_locally() {
        let ctrl = controller(
            UPDATE_PRODUCT,
            MockTransport::new().reply(
                200,
                r#"{"product_name":"Silla","description":"Roja","price":12,"category_id":2}"#,
            ),
        );
        ctrl.set_target("7").await;
        ctrl.set_field("price", "-1");
        assert_eq!(
            ctrl.submit_on(date(), |_| true).await,
            Err(SubmitRefusal::Invalid)
        );
        assert_eq!(ctrl.state().error("price"), Some("El precio no puede ser negativo."));
        // only the initial fetch went out
        assert_eq!(calls(&ctrl).len(), 1);
    }

    #[tokio::test]
    async fn update_fetch_error_leaves_fields_blank() {
        let ctrl = controller(
            UPDATE_CATEGORY,
            MockTransport::new().reply(404, r#"{"detail":"Category not found"}"#),
        );
        ctrl.set_target("99").await;
        let state = ctrl.state();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(
            state.result(),
            Some(&ResultMessage::error(
                "Error al cargar la categoría: Category not found"
            ))
        );
        assert_eq!(state.value("category_name"), "");
        assert_eq!(state.target(), "99");
    }

    #[tokio::test]
    async fn update_empty_target_clears_without_request() {
        let ctrl = controller(
            UPDATE_CATEGORY,
            MockTransport::new().reply(200, r#"{"category_name":"Hogar"}"#),
        );
        ctrl.set_target("3").await;
        assert_eq!(ctrl.state().value("category_name"), "Hogar");

        ctrl.set_target("").await;
        assert_eq!(ctrl.state().value("category_name"), "");
        assert_eq!(calls(&ctrl).len(), 1);
    }

    #[tokio::test]
    async fn update_invalid_target_is_not_fetched() {
        let ctrl = controller(UPDATE_CATEGORY, MockTransport::new());
        ctrl.set_target("abc").await;
        assert!(calls(&ctrl).is_empty());
        assert_eq!(
            ctrl.state().target_error(),
            Some("Por favor, introduce un ID de categoría válido (número).")
        );

        ctrl.set_field("category_name", "Hogar");
        assert_eq!(
            ctrl.submit_on(date(), |_| true).await,
            Err(SubmitRefusal::Invalid)
        );
        assert!(calls(&ctrl).is_empty());
    }

    #[tokio::test]
    async fn update_submit_without_target_stays_idle() {
        let ctrl = controller(UPDATE_CATEGORY, MockTransport::new());
        ctrl.set_field("category_name", "Hogar");
        assert_eq!(
            ctrl.submit_on(date(), |_| true).await,
            Err(SubmitRefusal::MissingTarget)
        );
        let state = ctrl.state();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(
            state.result(),
            Some(&ResultMessage::error(
                "Por favor, ingresa el ID de la categoría que deseas actualizar."
            ))
        );
        assert!(calls(&ctrl).is_empty());
    }

    #[tokio::test]
    async fn update_error_keeps_target_and_fields() {
        let ctrl = controller(
            UPDATE_CATEGORY,
            MockTransport::new()
                .reply(200, r#"{"category_name":"Hogar"}"#)
                .reply(500, "Internal Server Error"),
        );
        ctrl.set_target("3").await;
        ctrl.set_field("category_name", "Hogar y jardín");
        ctrl.submit_on(date(), |_| true).await.unwrap();
        let state = ctrl.state();
        assert_eq!(
            state.result(),
            Some(&ResultMessage::error(
                "Error al actualizar la categoría: Error inesperado."
            ))
        );
        assert_eq!(state.target(), "3");
        assert_eq!(state.value("category_name"), "Hogar y jardín");
    }

    #[tokio::test]
    async fn stale_fetch_does_not_overwrite_newer_target() {
        let transport = MockTransport::new();
        let gate_a = transport.gate("/category/1");
        let gate_b = transport.gate("/category/2");
        let ctrl = controller(UPDATE_CATEGORY, transport);

        let mut fetch_a = pin!(ctrl.set_target("1"));
        assert!(poll!(fetch_a.as_mut()).is_pending());
        assert_eq!(ctrl.state().phase(), Phase::Loading);

        let mut fetch_b = pin!(ctrl.set_target("2"));
        assert!(poll!(fetch_b.as_mut()).is_pending());

        // A lands first while B is still loading
        gate_a
            .send(RawResponse::new(200, r#"{"category_name":"Alpha"}"#))
            .unwrap();
        fetch_a.await;
        {
            let state = ctrl.state();
            assert_eq!(state.phase(), Phase::Loading);
            assert_eq!(state.value("category_name"), "");
            assert_eq!(state.target(), "2");
        }

        gate_b
            .send(RawResponse::new(200, r#"{"category_name":"Beta"}"#))
            .unwrap();
        fetch_b.await;
        assert_eq!(ctrl.state().value("category_name"), "Beta");
    }

    #[tokio::test]
    async fn stale_fetch_after_newer_one_settled() {
        let transport = MockTransport::new();
        let gate_a = transport.gate("/category/1");
        let gate_b = transport.gate("/category/2");
        let ctrl = controller(UPDATE_CATEGORY, transport);

        let mut fetch_a = pin!(ctrl.set_target("1"));
        assert!(poll!(fetch_a.as_mut()).is_pending());

        let fetch_b = ctrl.set_target("2");
        gate_b
            .send(RawResponse::new(200, r#"{"category_name":"Beta"}"#))
            .unwrap();
        fetch_b.await;
        assert_eq!(ctrl.state().value("category_name"), "Beta");

        gate_a
            .send(RawResponse::new(200, r#"{"category_name":"Alpha"}"#))
            .unwrap();
        fetch_a.await;
        assert_eq!(ctrl.state().value("category_name"), "Beta");
        assert_eq!(ctrl.state().phase(), Phase::Idle);
    }

    #[test]
    fn target_change_discards_outstanding_submit_state() {
        let mut state = FormState::new(UPDATE_CATEGORY);
        let fetch = state.set_target("3").unwrap();
        assert!(state.resolve_fetch(fetch.ticket, Ok(json!({"category_name": "Hogar"}))));

        let submit = state.begin_submit(date(), |_| true).unwrap();
        assert_eq!(state.phase(), Phase::Submitting);
        assert!(state.set_target("4").is_some());
        assert!(!state.resolve_submit(submit.ticket, Ok(json!({}))));
        assert_eq!(state.target(), "4");
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.result().is_none());
    }

    #[tokio::test]
    async fn target_change_discards_outstanding_submit() {
        let ctrl = controller(
            UPDATE_CATEGORY,
            MockTransport::new().reply(200, r#"{"category_name":"Hogar"}"#),
        );
        ctrl.set_target("3").await;
        let gate_put = ctrl.client.transport().gate("/category/3");

        let mut submit = pin!(ctrl.submit_on(date(), |_| true));
        assert!(poll!(submit.as_mut()).is_pending());
        assert_eq!(ctrl.state().phase(), Phase::Submitting);

        ctrl.set_target("").await;
        gate_put.send(RawResponse::new(200, "{}")).unwrap();
        assert_eq!(submit.await, Ok(()));

        let state = ctrl.state();
        assert!(state.result().is_none());
        assert_eq!(state.target(), "");
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn notify_fires_on_changes() {
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let ctrl = FormController::new(
            CREATE_CATEGORY,
            Rc::new(ResourceClient::new(
                MockTransport::new().reply(200, r#"{"category_name":"Books"}"#),
            )),
            move || seen.set(seen.get() + 1),
        );
        ctrl.set_field("category_name", "Books");
        assert_eq!(count.get(), 1);
        ctrl.submit_on(date(), |_| true).await.unwrap();
        // begin + resolve
        assert_eq!(count.get(), 3);
    }
}
