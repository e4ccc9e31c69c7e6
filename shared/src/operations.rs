//! The six dashboard operations (resource kind x operation kind).
//!
//! Everything that differs between "create category" and "delete product"
//! lives here: which fields the form has, how a request is built from the
//! field values, and what the operator is told afterwards. The lifecycle
//! itself is shared, see [`crate::form`].

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::{endpoints, ApiError, ApiRequest};
use crate::validation::{parse_id, parse_number, FieldSpec, FieldValues, InputType, Rule};
use crate::{CategoryRecord, NewProduct, ProductRecord, ProductUpdate};

const CATEGORY_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "category_name",
    label: "Nombre de la categoría",
    input_type: InputType::Text,
    rules: &[
        Rule::Required("El nombre de la categoría es requerido."),
        Rule::MinLength(3, "El nombre debe tener al menos 3 caracteres."),
    ],
}];

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "product_name",
        label: "Nombre del producto",
        input_type: InputType::Text,
        rules: &[
            Rule::Required("El nombre del producto es requerido."),
            Rule::MinLength(3, "El nombre debe tener al menos 3 caracteres."),
        ],
    },
    FieldSpec {
        name: "description",
        label: "Descripción",
        input_type: InputType::TextArea,
        rules: &[Rule::Required("La descripción es requerida.")],
    },
    FieldSpec {
        name: "price",
        label: "Precio",
        input_type: InputType::Number,
        rules: &[
            Rule::Required("El precio es requerido."),
            Rule::Number("El precio debe ser un número."),
            Rule::Min(0.0, "El precio no puede ser negativo."),
        ],
    },
    FieldSpec {
        name: "category_id",
        label: "ID de la categoría",
        input_type: InputType::Number,
        rules: &[
            Rule::Required("El ID de la categoría es requerido."),
            Rule::Integer("El ID de la categoría debe ser un número positivo."),
            Rule::Min(1.0, "El ID de la categoría debe ser un número positivo."),
        ],
    },
];

const CATEGORY_ID_FIELD: &[FieldSpec] = &[FieldSpec {
    name: "category_id",
    label: "ID de la categoría",
    input_type: InputType::Number,
    rules: &[
        Rule::Required("El ID de la categoría es requerido."),
        Rule::Integer("Por favor, introduce un ID de categoría válido (número)."),
        Rule::Min(1.0, "El ID debe ser un número positivo."),
    ],
}];

const PRODUCT_ID_FIELD: &[FieldSpec] = &[FieldSpec {
    name: "product_id",
    label: "ID del producto",
    input_type: InputType::Number,
    rules: &[
        Rule::Required("El ID del producto es requerido."),
        Rule::Integer("Por favor, introduce un ID de producto válido (número)."),
        Rule::Min(1.0, "El ID debe ser un número positivo."),
    ],
}];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Category,
    Product,
}

impl ResourceKind {
    /// Editable fields of the entity
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            ResourceKind::Category => CATEGORY_FIELDS,
            ResourceKind::Product => PRODUCT_FIELDS,
        }
    }

    /// The identifier input used by delete forms and as update target
    pub fn id_field(&self) -> &'static FieldSpec {
        match self {
            ResourceKind::Category => &CATEGORY_ID_FIELD[0],
            ResourceKind::Product => &PRODUCT_ID_FIELD[0],
        }
    }

    fn id_fields(&self) -> &'static [FieldSpec] {
        match self {
            ResourceKind::Category => CATEGORY_ID_FIELD,
            ResourceKind::Product => PRODUCT_ID_FIELD,
        }
    }

    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Category => endpoints::CATEGORIES,
            ResourceKind::Product => endpoints::PRODUCTS,
        }
    }

    pub fn item_path(&self, id: i64) -> String {
        match self {
            ResourceKind::Category => endpoints::category(id),
            ResourceKind::Product => endpoints::product(id),
        }
    }

    /// Map a fetched entity onto form values.
    pub fn populate(&self, body: Value) -> Result<FieldValues, ApiError> {
        let parse = |e: serde_json::Error| ApiError::Parse(e.to_string());
        let values = match self {
            ResourceKind::Category => {
                let record: CategoryRecord = serde_json::from_value(body).map_err(parse)?;
                FieldValues::from([("category_name", record.category_name)])
            }
            ResourceKind::Product => {
                let record: ProductRecord = serde_json::from_value(body).map_err(parse)?;
                FieldValues::from([
                    ("product_name", record.product_name),
                    ("description", record.description),
                    ("price", record.price.to_string()),
                    ("category_id", record.category_id.to_string()),
                ])
            }
        };
        Ok(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

/// One dashboard tab / form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub resource: ResourceKind,
    pub kind: OperationKind,
}

impl Operation {
    pub const fn new(resource: ResourceKind, kind: OperationKind) -> Self {
        Self { resource, kind }
    }

    /// Tab order on the dashboard
    pub const ALL: [Operation; 6] = [
        Operation::new(ResourceKind::Category, OperationKind::Create),
        Operation::new(ResourceKind::Category, OperationKind::Update),
        Operation::new(ResourceKind::Category, OperationKind::Delete),
        Operation::new(ResourceKind::Product, OperationKind::Create),
        Operation::new(ResourceKind::Product, OperationKind::Update),
        Operation::new(ResourceKind::Product, OperationKind::Delete),
    ];

    pub fn label(&self) -> &'static str {
        use OperationKind::*;
        use ResourceKind::*;
        match (self.resource, self.kind) {
            (Category, Create) => "Crear Categoría",
            (Category, Update) => "Actualizar Categoría",
            (Category, Delete) => "Eliminar Categoría",
            (Product, Create) => "Crear Producto",
            (Product, Update) => "Actualizar Producto",
            (Product, Delete) => "Eliminar Producto",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.resource, self.kind) {
            (ResourceKind::Category, OperationKind::Create) => "Crear",
            (ResourceKind::Category, OperationKind::Delete) => "Eliminar",
            _ => self.label(),
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self.kind {
            OperationKind::Create => "Creando...",
            OperationKind::Update => "Actualizando...",
            OperationKind::Delete => "Eliminando...",
        }
    }

    /// Fields the form validates and submits
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self.kind {
            OperationKind::Create | OperationKind::Update => self.resource.fields(),
            OperationKind::Delete => self.resource.id_fields(),
        }
    }

    /// Only update forms load an existing entity by a separate target id
    pub fn has_target(&self) -> bool {
        self.kind == OperationKind::Update
    }

    pub fn needs_confirmation(&self) -> bool {
        self.kind == OperationKind::Delete
    }

    pub fn fetch_request(&self, id: i64) -> ApiRequest {
        ApiRequest::get(self.resource.item_path(id))
    }

    /// Build the mutation from already-validated values.
    pub fn submit_request(
        &self,
        id: Option<i64>,
        values: &FieldValues,
        today: NaiveDate,
    ) -> Result<ApiRequest, ApiError> {
        let require_id =
            || id.ok_or_else(|| ApiError::Parse("missing target identifier".to_string()));

        match (self.resource, self.kind) {
            (ResourceKind::Category, OperationKind::Create) => {
                ApiRequest::post(endpoints::CATEGORIES).with_json(&category_body(values))
            }
            (ResourceKind::Category, OperationKind::Update) => {
                ApiRequest::put(endpoints::category(require_id()?))
                    .with_json(&category_body(values))
            }
            (ResourceKind::Product, OperationKind::Create) => {
                let body = NewProduct {
                    product_name: text(values, "product_name"),
                    description: text(values, "description"),
                    price: number(values, "price"),
                    category_id: integer(values, "category_id"),
                    created_product: today,
                    updated_product: today,
                };
                ApiRequest::post(endpoints::PRODUCTS).with_json(&body)
            }
            (ResourceKind::Product, OperationKind::Update) => {
                let body = ProductUpdate {
                    product_name: text(values, "product_name"),
                    description: text(values, "description"),
                    price: number(values, "price"),
                    category_id: integer(values, "category_id"),
                    updated_product: today,
                };
                ApiRequest::put(endpoints::product(require_id()?)).with_json(&body)
            }
            (resource, OperationKind::Delete) => {
                Ok(ApiRequest::delete(resource.item_path(require_id()?)))
            }
        }
    }

    /// Identifier a delete form targets, read from its own input.
    pub fn delete_target(&self, values: &FieldValues) -> Option<i64> {
        values
            .get(self.resource.id_field().name)
            .and_then(|v| parse_id(v))
    }

    pub fn confirm_prompt(&self, id: i64) -> String {
        match self.resource {
            ResourceKind::Category => format!(
                "¿Estás seguro de que quieres eliminar la categoría con ID: {}?",
                id
            ),
            ResourceKind::Product => format!(
                "¿Estás seguro de que quieres eliminar el producto con ID: {}?",
                id
            ),
        }
    }

    pub fn missing_target_message(&self) -> &'static str {
        match self.resource {
            ResourceKind::Category => {
                "Por favor, ingresa el ID de la categoría que deseas actualizar."
            }
            ResourceKind::Product => "Por favor, ingresa el ID del producto que deseas actualizar.",
        }
    }

    /// Success text for a settled mutation. Create-category echoes the
    /// stored name, or the submitted one when the body does not carry it.
    pub fn success_message(
        &self,
        id: Option<i64>,
        submitted: &FieldValues,
        body: &Value,
    ) -> String {
        let id = id.map(|i| i.to_string()).unwrap_or_default();
        match (self.resource, self.kind) {
            (ResourceKind::Category, OperationKind::Create) => {
                let name = body
                    .get("category_name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| text(submitted, "category_name"));
                format!("Categoría creada: {}", name)
            }
            (ResourceKind::Category, OperationKind::Update) => {
                "Categoría actualizada exitosamente.".to_string()
            }
            (ResourceKind::Category, OperationKind::Delete) => {
                format!("Categoría con ID {} eliminada exitosamente.", id)
            }
            (ResourceKind::Product, OperationKind::Create) => {
                "Producto creado exitosamente!".to_string()
            }
            (ResourceKind::Product, OperationKind::Update) => {
                "Producto actualizado exitosamente.".to_string()
            }
            (ResourceKind::Product, OperationKind::Delete) => {
                format!("Producto con ID {} eliminado exitosamente.", id)
            }
        }
    }

    pub fn error_message(&self, err: &ApiError) -> String {
        let detail = err.user_message();
        match (self.resource, self.kind) {
            (ResourceKind::Product, OperationKind::Create) => {
                format!("Error al crear el producto: {}", detail)
            }
            (ResourceKind::Category, OperationKind::Update) => {
                format!("Error al actualizar la categoría: {}", detail)
            }
            (ResourceKind::Product, OperationKind::Update) => {
                format!("Error al actualizar el producto: {}", detail)
            }
            _ => detail,
        }
    }

    pub fn fetch_error_message(&self, err: &ApiError) -> String {
        match self.resource {
            ResourceKind::Category => {
                format!("Error al cargar la categoría: {}", err.user_message())
            }
            ResourceKind::Product => format!("Error al cargar el producto: {}", err.user_message()),
        }
    }
}

fn text(values: &FieldValues, name: &str) -> String {
    values
        .get(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn number(values: &FieldValues, name: &str) -> f64 {
    values
        .get(name)
        .and_then(|v| parse_number(v))
        .unwrap_or_default()
}

fn integer(values: &FieldValues, name: &str) -> i64 {
    values
        .get(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_default()
}

fn category_body(values: &FieldValues) -> CategoryRecord {
    CategoryRecord {
        category_name: text(values, "category_name"),
    }
}
