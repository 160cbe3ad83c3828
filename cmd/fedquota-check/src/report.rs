use anyhow::{Context, Result, bail};
use pkg_types::field::FieldError;
use pkg_types::quota::{FEDERATED_RESOURCE_QUOTA_KIND, FederatedResourceQuota};
use pkg_validation::{AdmissionDecision, ValidatingAdmission};
use serde::Serialize;
use std::path::Path;

/// Result of checking one manifest file.
#[derive(Debug)]
pub struct ManifestReport {
    pub path: String,
    pub name: String,
    pub decision: AdmissionDecision,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    path: &'a str,
    name: &'a str,
    allowed: bool,
    violations: &'a [FieldError],
}

/// Decode a manifest: `.json` files as JSON, everything else as YAML.
pub fn load_manifest(path: &Path) -> Result<FederatedResourceQuota> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let quota: FederatedResourceQuota = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to decode JSON manifest {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to decode YAML manifest {}", path.display()))?
    };
    if !quota.kind.is_empty() && quota.kind != FEDERATED_RESOURCE_QUOTA_KIND {
        bail!(
            "{}: expected kind {}, got {}",
            path.display(),
            FEDERATED_RESOURCE_QUOTA_KIND,
            quota.kind
        );
    }
    Ok(quota)
}

pub fn check_manifest(admission: &ValidatingAdmission, path: &Path) -> Result<ManifestReport> {
    let quota = load_manifest(path)?;
    let decision = admission.review(&quota);
    Ok(ManifestReport {
        path: path.display().to_string(),
        name: quota.metadata.name,
        decision,
    })
}

/// One status line per manifest, then one indented line per violation.
pub fn render_text(reports: &[ManifestReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let status = if report.decision.is_allowed() { "ok" } else { "denied" };
        out.push_str(&format!("{:<8}{} ({})\n", status, report.path, report.name));
        for violation in report.decision.violations() {
            out.push_str(&format!("  {}\n", violation));
        }
    }
    out
}

pub fn render_json(reports: &[ManifestReport]) -> Result<String> {
    let entries: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|r| JsonReport {
            path: &r.path,
            name: &r.name,
            allowed: r.decision.is_allowed(),
            violations: r.decision.violations(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::field::ErrorType;
    use std::path::PathBuf;

    fn write_manifest(file_name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fedquota-check-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const VALID_YAML: &str = r#"
apiVersion: policy.karmada.io/v1alpha1
kind: FederatedResourceQuota
metadata:
  name: team-a
spec:
  overall:
    cpu: 10
    memory: 10Gi
  staticAssignments:
    - clusterName: m1
      hard:
        cpu: 1
        memory: 1Gi
    - clusterName: m2
      hard:
        cpu: 1.5
        memory: 2Gi
"#;

    const OVER_ASSIGNED_JSON: &str = r#"{
        "kind": "FederatedResourceQuota",
        "metadata": {"name": "team-b"},
        "spec": {
            "overall": {"cpu": "10", "memory": "10Gi"},
            "staticAssignments": [
                {"clusterName": "m1", "hard": {"cpu": "1", "memory": "1Gi"}},
                {"clusterName": "m2", "hard": {"cpu": "10", "memory": "2Gi"}}
            ]
        }
    }"#;

    #[test]
    fn test_check_valid_yaml_manifest() {
        let path = write_manifest("valid.yaml", VALID_YAML);
        let report = check_manifest(&ValidatingAdmission::new(), &path).unwrap();
        assert_eq!(report.name, "team-a");
        assert!(report.decision.is_allowed());
    }

    #[test]
    fn test_check_over_assigned_json_manifest() {
        let path = write_manifest("over.json", OVER_ASSIGNED_JSON);
        let report = check_manifest(&ValidatingAdmission::new(), &path).unwrap();
        let violations = report.decision.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "spec.overall[cpu]");
    }

    #[test]
    fn test_missing_cluster_name_is_a_violation() {
        let path = write_manifest(
            "no-cluster.yaml",
            concat!(
                "metadata:\n  name: team-c\n",
                "spec:\n  overall:\n    cpu: 10\n",
                "  staticAssignments:\n    - hard:\n        cpu: 1\n",
            ),
        );
        let report = check_manifest(&ValidatingAdmission::new(), &path).unwrap();
        let violations = report.decision.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].error_type, ErrorType::Required);
        assert_eq!(violations[0].field, "spec.staticAssignments[0].clusterName");
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let path = write_manifest("pod.yaml", "kind: Pod\nmetadata:\n  name: web\n");
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("expected kind FederatedResourceQuota"));
    }

    #[test]
    fn test_malformed_quantity_is_a_decode_error() {
        let path = write_manifest(
            "bad-quantity.yaml",
            "metadata:\n  name: q\nspec:\n  overall:\n    cpu: lots\n",
        );
        let err = load_manifest(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("lots"));
    }

    #[test]
    fn test_missing_manifest() {
        let err = load_manifest(Path::new("/nonexistent/quota.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read manifest"));
    }

    #[test]
    fn test_render_text_and_json() {
        let admission = ValidatingAdmission::new();
        let reports = vec![
            check_manifest(&admission, &write_manifest("a.yaml", VALID_YAML)).unwrap(),
            check_manifest(&admission, &write_manifest("b.json", OVER_ASSIGNED_JSON)).unwrap(),
        ];

        let text = render_text(&reports);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ok      "));
        assert!(lines[0].ends_with("a.yaml (team-a)"));
        assert!(lines[1].starts_with("denied  "));
        assert_eq!(
            lines[2],
            r#"  spec.overall[cpu]: Invalid value: "10": overall is less than assignments"#
        );

        let rendered = render_json(&reports).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json[0]["allowed"], true);
        assert_eq!(json[1]["allowed"], false);
        assert_eq!(json[1]["violations"][0]["field"], "spec.overall[cpu]");
        assert_eq!(json[1]["violations"][0]["badValue"], "10");
    }
}
