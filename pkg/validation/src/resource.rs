use pkg_constants::validation::{
    DNS1123_SUBDOMAIN_MAX_LENGTH, HUGEPAGES_PREFIXES, INTEGER_RESOURCES, MSG_MUST_BE_INTEGER,
    MSG_NON_NEGATIVE, MSG_NOT_STANDARD_QUOTA_RESOURCE, NATIVE_RESOURCE_DOMAIN,
    QUALIFIED_NAME_MAX_LENGTH, REQUESTS_PREFIX, STANDARD_QUOTA_RESOURCES,
};
use pkg_types::field::{ErrorList, FieldError, FieldPath};
use pkg_types::quantity::{Quantity, ResourceList};

const QUALIFIED_NAME_FORMAT: &str = concat!(
    "name part must consist of alphanumeric characters, '-', '_' or '.', ",
    "and must start and end with an alphanumeric character"
);
const DNS1123_SUBDOMAIN_FORMAT: &str = concat!(
    "prefix part a lowercase RFC 1123 subdomain must consist of lower case ",
    "alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character"
);

/// Validate every entry of a resource list: the resource name and its value.
/// Entries are visited in key order; errors are anchored at `base[<name>]`.
pub fn validate_resource_list(list: &ResourceList, base: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    for (name, value) in list {
        let path = base.key(name);
        errs.extend(validate_quota_resource_name(name, &path));
        errs.extend(validate_resource_quantity_value(name, value, &path));
    }
    errs
}

/// Resource names must be qualified names; unprefixed ones must also be a
/// standard quota resource.
pub fn validate_quota_resource_name(name: &str, path: &FieldPath) -> ErrorList {
    let mut errs: ErrorList = qualified_name_errors(name)
        .into_iter()
        .map(|reason| FieldError::invalid(path, name, reason))
        .collect();
    if !name.contains('/') && !is_standard_quota_resource(name) {
        errs.push(FieldError::invalid(path, name, MSG_NOT_STANDARD_QUOTA_RESOURCE));
    }
    errs
}

/// Values must be non-negative, and whole numbers for countable resources.
pub fn validate_resource_quantity_value(
    name: &str,
    value: &Quantity,
    path: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();
    if value.is_negative() {
        errs.push(FieldError::invalid(path, value, MSG_NON_NEGATIVE));
    }
    if is_integer_resource(name) && !value.is_integer() {
        errs.push(FieldError::invalid(path, value, MSG_MUST_BE_INTEGER));
    }
    errs
}

fn is_standard_quota_resource(name: &str) -> bool {
    STANDARD_QUOTA_RESOURCES.contains(&name)
        || HUGEPAGES_PREFIXES.iter().any(|p| name.starts_with(p))
}

fn is_integer_resource(name: &str) -> bool {
    INTEGER_RESOURCES.contains(&name) || is_extended_resource(name)
}

/// Extended resources live outside the native domain, e.g. `example.com/gpu`
/// or `count/deployments.apps`.
fn is_extended_resource(name: &str) -> bool {
    if !name.contains('/')
        || name.contains(NATIVE_RESOURCE_DOMAIN)
        || name.starts_with(REQUESTS_PREFIX)
    {
        return false;
    }
    qualified_name_errors(&format!("{}{}", REQUESTS_PREFIX, name)).is_empty()
}

/// `[prefix/]name` where prefix is a DNS-1123 subdomain.
fn qualified_name_errors(value: &str) -> Vec<String> {
    let parts: Vec<&str> = value.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            let mut errs = Vec::new();
            if prefix.is_empty() {
                errs.push("prefix part must be non-empty".to_string());
            } else if !is_dns1123_subdomain(prefix) {
                errs.push(DNS1123_SUBDOMAIN_FORMAT.to_string());
            }
            errs.extend(name_part_errors(name));
            return errs;
        }
        _ => {
            return vec![format!(
                "a qualified name must be an optional DNS subdomain prefix and '/' \
                 followed by a name; {}",
                QUALIFIED_NAME_FORMAT
            )];
        }
    };
    name_part_errors(name)
}

fn name_part_errors(name: &str) -> Vec<String> {
    if name.is_empty() {
        return vec!["name part must be non-empty".to_string()];
    }
    let mut errs = Vec::new();
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errs.push(format!(
            "name part must be no more than {} characters",
            QUALIFIED_NAME_MAX_LENGTH
        ));
    }
    let edges_ok = name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());
    let chars_ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !edges_ok || !chars_ok {
        errs.push(QUALIFIED_NAME_FORMAT.to_string());
    }
    errs
}

fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH
        && value.split('.').all(|label| {
            !label.is_empty()
                && label.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
                && label.ends_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
                && label
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}
