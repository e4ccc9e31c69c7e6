mod field_input;
mod nav;
mod operation_form;
mod protected_route;

pub use field_input::{field_inputs, FieldInput};
pub use nav::Nav;
pub use operation_form::OperationForm;
pub use protected_route::ProtectedRoute;
