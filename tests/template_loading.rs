//! Template directory loading tests

use obs_renderer::rendering::templates;
use std::fs;

#[test]
fn test_load_dir_sorted_and_multi_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("02-service.yaml"),
        "apiVersion: v1\nkind: Service\nmetadata:\n  name: proxy\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("01-rbac.yaml"),
        concat!(
            "apiVersion: rbac.authorization.k8s.io/v1\n",
            "kind: ClusterRole\n",
            "metadata:\n  name: proxy\n",
            "---\n",
            "apiVersion: rbac.authorization.k8s.io/v1\n",
            "kind: ClusterRoleBinding\n",
            "metadata:\n  name: proxy\n",
        ),
    )
    .unwrap();
    // Non-YAML files are ignored
    fs::write(dir.path().join("README.md"), "not a manifest").unwrap();

    let docs = templates::load_dir(dir.path()).unwrap();
    let kinds: Vec<&str> = docs
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["ClusterRole", "ClusterRoleBinding", "Service"]);
}

#[test]
fn test_load_dir_skips_empty_documents() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("sparse.yaml"),
        "---\n---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cfg\n",
    )
    .unwrap();

    let docs = templates::load_dir(dir.path()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["kind"], "ConfigMap");
}

#[test]
fn test_load_dir_invalid_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.yaml"), "kind: [unclosed\n").unwrap();

    assert!(templates::load_dir(dir.path()).is_err());
}
