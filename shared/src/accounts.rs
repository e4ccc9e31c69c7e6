//! Login and sign-up submissions.

use crate::api::{endpoints, ApiError, ApiRequest, HttpTransport, ResourceClient};
use crate::validation::{validate, FieldErrors, FieldSpec, FieldValues, InputType, Rule};
use crate::{LoginRequest, NewUser};

pub const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "email",
        label: "Email",
        input_type: InputType::Email,
        rules: &[
            Rule::Required("El email es requerido."),
            Rule::Email("Formato de email inválido."),
        ],
    },
    FieldSpec {
        name: "password",
        label: "Contraseña",
        input_type: InputType::Password,
        rules: &[Rule::Required("La contraseña es requerida.")],
    },
];

pub const SIGN_UP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "first_name",
        label: "Nombre",
        input_type: InputType::Text,
        rules: &[Rule::Required("El nombre es requerido.")],
    },
    FieldSpec {
        name: "last_name",
        label: "Apellido",
        input_type: InputType::Text,
        rules: &[Rule::Required("El apellido es requerido.")],
    },
    FieldSpec {
        name: "email",
        label: "Email",
        input_type: InputType::Email,
        rules: &[
            Rule::Required("El email es requerido."),
            Rule::Email("Formato de email inválido."),
        ],
    },
    FieldSpec {
        name: "password",
        label: "Contraseña",
        input_type: InputType::Password,
        rules: &[
            Rule::Required("La contraseña es requerida."),
            Rule::MinLength(6, "La contraseña debe tener al menos 6 caracteres."),
        ],
    },
];

pub const SIGN_UP_SUCCESS: &str = "¡Cuenta creada exitosamente! Por favor, inicia sesión.";

/// Outcome of an account submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Inline field errors; nothing was sent
    Invalid(FieldErrors),
    /// Backend or transport failure, already normalized for display
    Rejected(String),
}

fn field(values: &FieldValues, name: &str) -> String {
    values.get(name).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn raw(values: &FieldValues, name: &str) -> String {
    values.get(name).cloned().unwrap_or_default()
}

async fn submit<T: HttpTransport>(
    client: &ResourceClient<T>,
    request: Result<ApiRequest, ApiError>,
) -> Result<(), AccountError> {
    let request = request.map_err(|e| AccountError::Rejected(e.user_message()))?;
    client
        .check(&request)
        .await
        .map_err(|e| AccountError::Rejected(e.user_message()))
}

/// `POST /login`. On success the backend has set the session cookie.
pub async fn log_in<T: HttpTransport>(
    client: &ResourceClient<T>,
    values: &FieldValues,
) -> Result<(), AccountError> {
    validate(LOGIN_FIELDS, values).map_err(AccountError::Invalid)?;
    let body = LoginRequest {
        email: field(values, "email"),
        password: raw(values, "password"),
    };
    submit(client, ApiRequest::post(endpoints::LOGIN).with_json(&body)).await
}

/// `POST /api/create/users`
pub async fn sign_up<T: HttpTransport>(
    client: &ResourceClient<T>,
    values: &FieldValues,
) -> Result<(), AccountError> {
    validate(SIGN_UP_FIELDS, values).map_err(AccountError::Invalid)?;
    let body = NewUser {
        first_name: field(values, "first_name"),
        last_name: field(values, "last_name"),
        email: field(values, "email"),
        password: raw(values, "password"),
    };
    submit(client, ApiRequest::post(endpoints::CREATE_USER).with_json(&body)).await
}
