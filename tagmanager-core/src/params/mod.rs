//! Provider parameter schemas and their stored values
//!
//! Providers declare their configuration surface as a list of
//! [`FieldDescriptor`]s. Records keep the values as a JSON text blob which is
//! decoded into a [`ParamMap`], expanded into editable fields for the admin
//! form and collapsed back into a blob on save.

mod expander;
mod field;
mod map;

pub use expander::{collapse, collapse_map, expand, expand_into, EditableField};
pub use field::{validate_schema, DropdownOption, FieldDescriptor, FieldKind};
pub use map::ParamMap;
