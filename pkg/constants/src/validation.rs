//! Admission validation limits and violation messages.

/// Maximum length of a `FederatedResourceQuota` name.
/// Matches the Kubernetes label value ceiling.
pub const MAX_NAME_LENGTH: usize = 63;

/// Maximum length of the name part of a qualified resource name.
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;

/// Maximum length of a DNS-1123 subdomain (qualified name prefix).
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

// ─── Violation details ────────────────────────────────────────────────────

/// Emitted at `spec.overall[<name>]` when static assignments sum past it.
pub const MSG_OVERALL_LESS_THAN_ASSIGNMENTS: &str = "overall is less than assignments";

/// Emitted at `spec.staticAssignments[i].hard[<name>]` for undeclared resources.
pub const MSG_ASSIGNMENT_RESOURCE_NOT_IN_OVERALL: &str =
    "assignment resourceName is not exist in overall";

pub const MSG_NON_NEGATIVE: &str = "must be greater than or equal to 0";

pub const MSG_MUST_BE_INTEGER: &str = "must be an integer";

pub const MSG_NOT_STANDARD_QUOTA_RESOURCE: &str = "must be a standard resource for quota";

pub const MSG_CLUSTER_NAME_REQUIRED: &str = "cluster name must not be empty";

// ─── Resource names ───────────────────────────────────────────────────────

/// Quota resources that only make sense as whole numbers.
pub const INTEGER_RESOURCES: &[&str] = &[
    "pods",
    "services",
    "replicationcontrollers",
    "resourcequotas",
    "secrets",
    "configmaps",
    "persistentvolumeclaims",
    "services.nodeports",
    "services.loadbalancers",
];

/// Unprefixed resource names a quota may constrain.
pub const STANDARD_QUOTA_RESOURCES: &[&str] = &[
    "cpu",
    "memory",
    "ephemeral-storage",
    "requests.cpu",
    "requests.memory",
    "requests.ephemeral-storage",
    "requests.storage",
    "limits.cpu",
    "limits.memory",
    "limits.ephemeral-storage",
    "pods",
    "services",
    "replicationcontrollers",
    "resourcequotas",
    "secrets",
    "configmaps",
    "persistentvolumeclaims",
    "services.nodeports",
    "services.loadbalancers",
];

/// Huge page resources are standard under any page size, e.g. `hugepages-2Mi`.
pub const HUGEPAGES_PREFIXES: &[&str] = &["hugepages-", "requests.hugepages-"];

/// Resources under this domain are native; anything else with a `/` is extended.
pub const NATIVE_RESOURCE_DOMAIN: &str = "kubernetes.io/";

pub const REQUESTS_PREFIX: &str = "requests.";
