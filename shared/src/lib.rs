use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Remote resource client, transport trait and error normalization
pub mod api;
pub use api::{
    endpoints, ApiClientConfig, ApiError, ApiRequest, HttpTransport, Method, RawResponse,
    ResourceClient,
};

pub mod validation;
pub use validation::{FieldErrors, FieldSpec, FieldValues, InputType, Rule};

// The six CRUD operations and their per-resource wiring
pub mod operations;
pub use operations::{Operation, OperationKind, ResourceKind};

pub mod form;
pub use form::{FormController, FormState, Outcome, Phase, ResultMessage, SubmitRefusal};

pub mod session;
pub use session::{probe_session, GuardDecision, SessionGate, SessionStatus};

pub mod tabs;
pub use tabs::DashboardTabs;

pub mod listing;
pub use listing::ProductFilter;

pub mod accounts;

/// Category body for `POST /category`, `PUT /category/{id}` and the
/// responses of `GET /category/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_name: String,
}

/// Product as returned by `GET /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
}

/// Body for `POST /products`. Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
    pub created_product: NaiveDate,
    pub updated_product: NaiveDate,
}

/// Body for `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
    pub updated_product: NaiveDate,
}

/// One row of `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub product_id: i64,
    pub product_name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Body for `POST /api/create/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Body for `POST /login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Today's date as the backend expects it on product bodies (UTC).
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
