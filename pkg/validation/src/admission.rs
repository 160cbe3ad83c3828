use crate::quota::validate_federated_resource_quota;
use pkg_types::field::{ErrorList, FieldError, to_aggregate};
use pkg_types::quota::FederatedResourceQuota;
use tracing::{info, warn};

/// Outcome of reviewing a quota object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    Allowed,
    Denied { reason: String, violations: ErrorList },
}

impl AdmissionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionDecision::Allowed)
    }

    pub fn violations(&self) -> &[FieldError] {
        match self {
            AdmissionDecision::Allowed => &[],
            AdmissionDecision::Denied { violations, .. } => violations.as_slice(),
        }
    }
}

/// Stateless admission check for `FederatedResourceQuota` objects.
/// Transport (HTTP, TLS, review envelopes) is left to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatingAdmission;

impl ValidatingAdmission {
    pub fn new() -> Self {
        Self
    }

    pub fn review(&self, quota: &FederatedResourceQuota) -> AdmissionDecision {
        let namespace = quota.metadata.namespace.as_deref().unwrap_or_default();
        let violations = validate_federated_resource_quota(quota);
        match to_aggregate(&violations) {
            None => {
                info!(
                    "Admitted FederatedResourceQuota {}/{}",
                    namespace, quota.metadata.name
                );
                AdmissionDecision::Allowed
            }
            Some(reason) => {
                warn!(
                    "Denied FederatedResourceQuota {}/{} ({} violations): {}",
                    namespace,
                    quota.metadata.name,
                    violations.len(),
                    reason
                );
                AdmissionDecision::Denied { reason, violations }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::quota::{FederatedResourceQuotaSpec, ObjectMeta, StaticClusterAssignment};

    fn make_quota(name: &str, assigned_cpu: &str) -> FederatedResourceQuota {
        FederatedResourceQuota {
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: Some("default".to_string()),
            },
            spec: FederatedResourceQuotaSpec {
                overall: [("cpu".to_string(), "10".parse().unwrap())].into_iter().collect(),
                static_assignments: vec![StaticClusterAssignment {
                    cluster_name: "m1".to_string(),
                    hard: [("cpu".to_string(), assigned_cpu.parse().unwrap())]
                        .into_iter()
                        .collect(),
                }],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_allows_valid_quota() {
        let decision = ValidatingAdmission::new().review(&make_quota("team-a", "4"));
        assert!(decision.is_allowed());
        assert!(decision.violations().is_empty());
    }

    #[test]
    fn test_denies_with_single_reason() {
        let decision = ValidatingAdmission::new().review(&make_quota("team-a", "11"));
        match decision {
            AdmissionDecision::Denied { reason, violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(
                    reason,
                    r#"spec.overall[cpu]: Invalid value: "10": overall is less than assignments"#
                );
            }
            AdmissionDecision::Allowed => panic!("expected denial"),
        }
    }

    #[test]
    fn test_denies_with_aggregated_reason() {
        let decision = ValidatingAdmission::new().review(&make_quota(&"a".repeat(64), "11"));
        assert!(!decision.is_allowed());
        assert_eq!(decision.violations().len(), 2);
        if let AdmissionDecision::Denied { reason, .. } = decision {
            assert!(reason.starts_with("[metadata.name: Invalid value: "));
            assert!(reason.ends_with("overall is less than assignments]"));
        }
    }

    #[test]
    fn test_review_is_shareable_across_threads() {
        let admission = std::sync::Arc::new(ValidatingAdmission::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let admission = admission.clone();
                std::thread::spawn(move || {
                    let cpu = if i % 2 == 0 { "4" } else { "11" };
                    admission.review(&make_quota("team-a", cpu)).is_allowed()
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    }
}
