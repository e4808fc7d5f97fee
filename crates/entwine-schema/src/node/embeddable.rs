use crate::node::AttributeList;
use serde::Serialize;

///
/// EmbeddableMapping
///
/// Mapping entry for one embeddable type; emitted at most once per type
/// however many attributes reference it.
///

#[derive(Clone, Debug, Serialize)]
pub struct EmbeddableMapping {
    pub type_name: String,
    pub attributes: AttributeList,
}
