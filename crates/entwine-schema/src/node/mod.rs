mod attribute;
mod document;
mod embeddable;
mod entity;

pub use attribute::*;
pub use document::*;
pub use embeddable::*;
pub use entity::*;
