//! Attribute classification: per-member mapping roles and the identifier
//! discovery policy.

use crate::{
    node::{AttributeDescriptor, AttributeList},
    reflect::{Member, MemberKind, TypeDescriptor, TypeRef, accessible_members, mapped_members},
    types::AttributeRole,
};
use thiserror::Error as ThisError;

///
/// ClassifyError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ClassifyError {
    #[error(
        "'{type_name}' declares more than one identifier attribute ('{first}' and '{second}')"
    )]
    DuplicateIdentifier {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("'{type_name}' lacks a member with an identifier marker or of the form *ID")]
    NoIdentifier { type_name: String },
}

///
/// ClassifiedType
///
/// Classifier output for one type: the attribute descriptors plus the
/// embeddable member types discovered along the way, in declaration order.
///

#[derive(Clone, Debug)]
pub struct ClassifiedType {
    pub attributes: AttributeList,
    pub embedded: Vec<TypeRef>,
}

/// Choose the identifier attribute for `ty`.
///
/// An explicit identifier marker anywhere on the accessible chain wins
/// immediately. Otherwise the member literally named `id` (case-insensitive)
/// is chosen; failing that, among members whose uppercased name ends in
/// `ID`, the one whose uppercased name sorts lexicographically smallest.
/// Once a literal `id` member has been seen, ends-with candidates are
/// ignored.
pub fn discover_id(ty: &dyn TypeDescriptor) -> Result<String, ClassifyError> {
    let mut id: Option<String> = None;
    let mut upper_id: Option<String> = None;

    for member in accessible_members(ty) {
        if member.markers.id {
            return Ok(member.name);
        }

        let upper = member.name.to_uppercase();
        if upper == "ID" {
            id = Some(member.name);
        } else if id.as_ref().is_none_or(|name| name.len() != 2) && upper.ends_with("ID") {
            if upper_id.as_ref().is_none_or(|prev| upper < *prev) {
                upper_id = Some(upper);
                id = Some(member.name);
            }
        }
    }

    id.ok_or_else(|| ClassifyError::NoIdentifier {
        type_name: ty.type_name().to_string(),
    })
}

/// Classify every mapped member of `ty`.
///
/// `id_attribute` is the externally-chosen identifier name; `None` puts the
/// classifier in embeddable context, where the identifier role is reachable
/// only through an explicit marker and the exactly-one-identifier invariant
/// is not enforced.
pub fn classify(
    ty: &dyn TypeDescriptor,
    id_attribute: Option<&str>,
) -> Result<ClassifiedType, ClassifyError> {
    let mut attributes = Vec::new();
    let mut embedded = Vec::new();

    for member in mapped_members(ty) {
        let role = role_of(&member, id_attribute);
        if role == AttributeRole::Embedded {
            if let MemberKind::Typed { ty } = &member.kind {
                embedded.push(ty.clone());
            }
        }

        let column = member.markers.column.clone().or_else(|| {
            if role == AttributeRole::Id {
                member.markers.id_column.clone()
            } else {
                None
            }
        });

        attributes.push(AttributeDescriptor {
            name: member.name,
            role,
            column,
            generated: member.markers.generated,
        });
    }

    if id_attribute.is_some() {
        let mut ids = attributes.iter().filter(|a| a.role == AttributeRole::Id);
        match (ids.next(), ids.next()) {
            (Some(_), None) => {}
            (None, _) => {
                return Err(ClassifyError::NoIdentifier {
                    type_name: ty.type_name().to_string(),
                });
            }
            (Some(first), Some(second)) => {
                return Err(ClassifyError::DuplicateIdentifier {
                    type_name: ty.type_name().to_string(),
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }

    Ok(ClassifiedType {
        attributes: AttributeList::new(attributes),
        embedded,
    })
}

/// Role precedence: identifier, version, embedded, element-collection,
/// basic.
fn role_of(member: &Member, id_attribute: Option<&str>) -> AttributeRole {
    if member.markers.id || id_attribute == Some(member.name.as_str()) {
        return AttributeRole::Id;
    }
    if member.name == "version" {
        return AttributeRole::Version;
    }

    match &member.kind {
        MemberKind::Typed { ty } if ty.markers().embeddable => AttributeRole::Embedded,
        MemberKind::Collection { .. } => AttributeRole::ElementCollection,
        MemberKind::Scalar { .. } | MemberKind::Typed { .. } => AttributeRole::Basic,
    }
}
