//! Node classification
//!
//! Decides whether an invocation refers to the primary header or to a header
//! family member, whatever syntax it was written in.

use crate::registry::{ANY_HEADER_NAMES, PRIMARY_HEADER_PATHS, PRIMARY_HEADER_TAGS};
use crate::view::{InvocationView, Shape};

/// Name of the helper that resolves a component from a string
pub const DYNAMIC_COMPONENT_HELPER: &str = "component";

/// `{{wrapper.header}}`, `{{header-main}}`, `<HeaderMain>`, `<wrapper.header>`
pub fn is_primary_header(view: &InvocationView<'_>) -> bool {
    match view.shape {
        Shape::Call => PRIMARY_HEADER_PATHS.contains(&view.identifier),
        Shape::Element => PRIMARY_HEADER_TAGS.contains(&view.identifier),
    }
}

/// Any `wrapper.<name>` with a mandatory attribute entry
pub fn is_header_family_member(view: &InvocationView<'_>) -> bool {
    ANY_HEADER_NAMES.contains(view.identifier)
}

pub fn is_dynamic_component(identifier: &str) -> bool {
    identifier == DYNAMIC_COMPONENT_HELPER
}
