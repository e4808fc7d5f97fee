use crate::{node::AttributeList, types::InheritanceStrategy};
use serde::Serialize;

///
/// EntityMapping
///
/// Mapping entry for one entity type. `table` is absent exactly when the
/// single-table inheritance header is present.
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityMapping {
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<InheritanceStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_column: Option<String>,

    pub attributes: AttributeList,
}
