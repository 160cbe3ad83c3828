use pkg_constants::validation::MAX_NAME_LENGTH;
use pkg_types::field::{ErrorList, FieldError, FieldPath};
use tracing::debug;

/// Validate a `FederatedResourceQuota` name.
/// Only the length is checked here; character-set rules are enforced elsewhere.
pub fn validate_federated_resource_quota_name(name: &str, base: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    // byte length, matching the label value limit
    if name.len() > MAX_NAME_LENGTH {
        debug!(name, limit = MAX_NAME_LENGTH, "quota name too long");
        errs.push(FieldError::invalid(
            base,
            name,
            format!("must be no more than {} characters", MAX_NAME_LENGTH),
        ));
    }
    errs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_path() -> FieldPath {
        FieldPath::new("metadata").child("name")
    }

    #[test]
    fn test_name_too_long() {
        let invalid = "a".repeat(64);
        let errs = validate_federated_resource_quota_name(&invalid, &name_path());
        assert_eq!(
            errs,
            vec![FieldError::invalid(
                &name_path(),
                &invalid,
                "must be no more than 63 characters"
            )]
        );
        assert_eq!(errs[0].field, "metadata.name");
    }

    #[test]
    fn test_name_within_limit() {
        let short = "name-less-than-63-characters";
        assert!(validate_federated_resource_quota_name(short, &name_path()).is_empty());
        assert!(validate_federated_resource_quota_name(&"a".repeat(63), &name_path()).is_empty());
        assert!(validate_federated_resource_quota_name("", &name_path()).is_empty());
    }

    #[test]
    fn test_name_length_counts_bytes() {
        // 32 two-byte characters is 64 bytes
        let name = "é".repeat(32);
        let errs = validate_federated_resource_quota_name(&name, &name_path());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].bad_value, name);

        let name = "é".repeat(31);
        assert!(validate_federated_resource_quota_name(&name, &name_path()).is_empty());
    }

    #[test]
    fn test_character_set_is_not_checked() {
        assert!(validate_federated_resource_quota_name("Not_A_DNS_Name!", &name_path()).is_empty());
    }
}
