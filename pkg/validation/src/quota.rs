use crate::name::validate_federated_resource_quota_name;
use crate::resource::validate_resource_list;
use pkg_constants::validation::{
    MSG_ASSIGNMENT_RESOURCE_NOT_IN_OVERALL, MSG_CLUSTER_NAME_REQUIRED,
    MSG_OVERALL_LESS_THAN_ASSIGNMENTS,
};
use pkg_types::field::{ErrorList, FieldError, FieldPath};
use pkg_types::quantity::Quantity;
use pkg_types::quota::{
    FederatedResourceQuota, FederatedResourceQuotaSpec, FederatedResourceQuotaStatus,
};
use tracing::debug;

/// Validate a whole quota object: name, spec, then status.
pub fn validate_federated_resource_quota(quota: &FederatedResourceQuota) -> ErrorList {
    let mut errs = validate_federated_resource_quota_name(
        &quota.metadata.name,
        &FieldPath::new("metadata").child("name"),
    );
    errs.extend(validate_federated_resource_quota_spec(
        &quota.spec,
        &FieldPath::new("spec"),
    ));
    errs.extend(validate_federated_resource_quota_status(
        &quota.status,
        &FieldPath::new("status"),
    ));
    errs
}

pub fn validate_federated_resource_quota_spec(
    spec: &FederatedResourceQuotaSpec,
    base: &FieldPath,
) -> ErrorList {
    let mut errs = validate_resource_list(&spec.overall, &base.child("overall"));
    for (index, assignment) in spec.static_assignments.iter().enumerate() {
        let assignment_path = base.child("staticAssignments").index(index);
        if assignment.cluster_name.is_empty() {
            errs.push(FieldError::required(
                &assignment_path.child("clusterName"),
                MSG_CLUSTER_NAME_REQUIRED,
            ));
        }
        errs.extend(validate_resource_list(
            &assignment.hard,
            &assignment_path.child("hard"),
        ));
    }
    errs.extend(validate_overall_and_assignments(spec, base));
    errs
}

/// Check that static assignments fit inside the overall budget.
///
/// Two passes, concatenated in this order:
/// 1. for each overall resource (sorted by name), the sum of that resource
///    across all assignments must not exceed the overall amount;
/// 2. for each assignment (in declared order) and each of its resources
///    (sorted by name), the resource must be declared in overall.
///
/// Every violation is reported. An absent resource counts as zero.
pub fn validate_overall_and_assignments(
    spec: &FederatedResourceQuotaSpec,
    base: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();

    let overall_path = base.child("overall");
    for (name, overall) in &spec.overall {
        let contributions: Vec<&Quantity> = spec
            .static_assignments
            .iter()
            .filter_map(|assignment| assignment.hard.get(name))
            .collect();
        // Negative terms first: the running sum then only grows toward the
        // total, so an overflow means no representable budget can hold it.
        let total = contributions
            .iter()
            .filter(|q| q.is_negative())
            .chain(contributions.iter().filter(|q| !q.is_negative()))
            .try_fold(Quantity::zero(), |sum, q| sum.checked_add(q));

        let exceeded = match total {
            Some(total) => total > *overall,
            None => true,
        };
        if exceeded {
            debug!(
                resource = %name,
                overall = %overall,
                "static assignments exceed overall quota"
            );
            errs.push(FieldError::invalid(
                &overall_path.key(name),
                overall,
                MSG_OVERALL_LESS_THAN_ASSIGNMENTS,
            ));
        }
    }

    let assignments_path = base.child("staticAssignments");
    for (index, assignment) in spec.static_assignments.iter().enumerate() {
        for name in assignment.hard.keys() {
            if spec.overall.contains_key(name) {
                continue;
            }
            debug!(
                cluster = %assignment.cluster_name,
                resource = %name,
                "assignment references resource missing from overall"
            );
            errs.push(FieldError::invalid(
                &assignments_path.index(index).child("hard").key(name),
                name,
                MSG_ASSIGNMENT_RESOURCE_NOT_IN_OVERALL,
            ));
        }
    }

    errs
}

pub fn validate_federated_resource_quota_status(
    status: &FederatedResourceQuotaStatus,
    base: &FieldPath,
) -> ErrorList {
    let mut errs = validate_resource_list(&status.overall, &base.child("overall"));
    errs.extend(validate_resource_list(
        &status.overall_used,
        &base.child("overallUsed"),
    ));
    for (index, cluster) in status.aggregated_status.iter().enumerate() {
        let cluster_path = base.child("aggregatedStatus").index(index);
        if cluster.cluster_name.is_empty() {
            errs.push(FieldError::required(
                &cluster_path.child("clusterName"),
                MSG_CLUSTER_NAME_REQUIRED,
            ));
        }
        errs.extend(validate_resource_list(&cluster.hard, &cluster_path.child("hard")));
        errs.extend(validate_resource_list(&cluster.used, &cluster_path.child("used")));
    }
    errs
}
