use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// AttributeRole
///
/// Mapping role assigned to one classified member. The wire spelling is the
/// element name the persistence runtime expects for the attribute.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[remain::sorted]
pub enum AttributeRole {
    #[display("basic")]
    Basic,
    #[display("element-collection")]
    ElementCollection,
    #[display("embedded")]
    Embedded,
    #[display("id")]
    Id,
    #[display("version")]
    Version,
}

impl AttributeRole {
    /// Whether the attribute maps to a multi-valued column set.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::ElementCollection)
    }
}

///
/// GeneratedStrategy
///
/// Value-generation strategy copied verbatim from the member marker into
/// the mapping document.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[remain::sorted]
pub enum GeneratedStrategy {
    #[display("AUTO")]
    Auto,
    #[display("IDENTITY")]
    Identity,
    #[display("SEQUENCE")]
    Sequence,
    #[display("TABLE")]
    Table,
    #[display("UUID")]
    Uuid,
}

///
/// InheritanceStrategy
///
/// Single-table is the only strategy the builder synthesizes; the table is
/// supplied by the inheritance root.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InheritanceStrategy {
    #[display("SINGLE_TABLE")]
    SingleTable,
}
