//! Component and attribute names the header rule knows about

use std::collections::HashSet;
use std::sync::LazyLock;

/// Arguments that must hold an action, never a bare string
pub const FORBIDDEN_STRING_ATTRS: [&str; 4] = ["back", "close", "edit", "menu"];

/// Header family members and the arguments each must receive
pub const HEADER_ATTRS: [(&str, &[&str]); 3] = [
    ("headerOperationIndex", &["close"]),
    ("headerOperationConditions", &["edit", "close"]),
    ("headerOperationConfirmation", &["close"]),
];

/// Namespace header components are yielded under
pub const WRAPPER_PREFIX: &str = "wrapper.";

/// Invocation names of the primary header in call syntax
pub const PRIMARY_HEADER_PATHS: [&str; 2] = ["wrapper.header", "header-main"];

/// Invocation names of the primary header in element syntax
pub const PRIMARY_HEADER_TAGS: [&str; 2] = ["HeaderMain", "wrapper.header"];

/// `wrapper.<name>` for every header family member
pub static ANY_HEADER_NAMES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    HEADER_ATTRS
        .iter()
        .map(|(name, _)| format!("{}{}", WRAPPER_PREFIX, name))
        .collect()
});

pub fn is_forbidden_string_attr(name: &str) -> bool {
    FORBIDDEN_STRING_ATTRS.contains(&name)
}

/// Mandatory arguments of a header family member, by bare component name
pub fn mandatory_attrs(component: &str) -> Option<&'static [&'static str]> {
    HEADER_ATTRS
        .iter()
        .find(|(name, _)| *name == component)
        .map(|(_, attrs)| *attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_attrs() {
        for name in ["back", "close", "edit", "menu"] {
            assert!(is_forbidden_string_attr(name));
        }
        assert!(!is_forbidden_string_attr("title"));
        assert!(!is_forbidden_string_attr("@close"));
    }

    #[test]
    fn test_mandatory_attrs_keep_order() {
        assert_eq!(mandatory_attrs("headerOperationIndex"), Some(&["close"][..]));
        assert_eq!(
            mandatory_attrs("headerOperationConditions"),
            Some(&["edit", "close"][..])
        );
        assert_eq!(
            mandatory_attrs("headerOperationConfirmation"),
            Some(&["close"][..])
        );
        assert_eq!(mandatory_attrs("header"), None);
    }

    #[test]
    fn test_any_header_names() {
        assert_eq!(ANY_HEADER_NAMES.len(), 3);
        assert!(ANY_HEADER_NAMES.contains("wrapper.headerOperationIndex"));
        assert!(ANY_HEADER_NAMES.contains("wrapper.headerOperationConditions"));
        assert!(ANY_HEADER_NAMES.contains("wrapper.headerOperationConfirmation"));
        assert!(!ANY_HEADER_NAMES.contains("headerOperationIndex"));
        assert!(!ANY_HEADER_NAMES.contains("wrapper.header"));
    }
}
