//! Admission-time validation for `FederatedResourceQuota` objects.
//!
//! Every validator is a pure function: object plus base field path in,
//! ordered list of violations out. Nothing is cached or mutated.

pub mod admission;
pub mod name;
pub mod quota;
pub mod resource;

pub use admission::{AdmissionDecision, ValidatingAdmission};
pub use name::validate_federated_resource_quota_name;
pub use quota::{
    validate_federated_resource_quota, validate_federated_resource_quota_spec,
    validate_federated_resource_quota_status, validate_overall_and_assignments,
};
pub use resource::validate_resource_list;
