use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

const TEMPLATE: &str = "jobs:\n  test:\n    skip: <%= ginkgo_skip %>\n";
const EXPECTED: &str = "# THIS FILE IS AUTOMATICALLY GENERATED\n# DO NOT EDIT\njobs:\n  test:\n    skip: --ginkgo.skip=foo\n";

fn setup(template: Option<&str>) -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let templates_dir = root.path().join(".github/workflow-templates");
    fs::create_dir_all(&templates_dir).unwrap();
    fs::create_dir_all(root.path().join(".github/workflows")).unwrap();
    if let Some(template) = template {
        fs::write(templates_dir.join("test.yml.erb"), template).unwrap();
    }
    root
}

fn output_path(root: &Path) -> std::path::PathBuf {
    root.join(".github/workflows/test_generated.yml")
}

fn workflow_gen(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("workflow-gen").unwrap();
    cmd.current_dir(root);
    cmd
}

#[test]
fn generates_workflow_from_default_templates_dir() {
    let root = setup(Some(TEMPLATE));

    workflow_gen(root.path())
        .arg("--var=ginkgo_skip=--ginkgo.skip=foo")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rendered yaml is: \n"))
        .stdout(predicate::str::contains("skip: --ginkgo.skip=foo"));

    assert_eq!(fs::read_to_string(output_path(root.path())).unwrap(), EXPECTED);
}

#[test]
fn default_binding_is_the_builtin_skip_pattern() {
    let root = setup(Some(TEMPLATE));

    workflow_gen(root.path()).assert().success();

    let output = fs::read_to_string(output_path(root.path())).unwrap();
    assert!(output.contains(r"skip: --ginkgo.skip=Networking\sIPerf\sIPv[46]|"), "{}", output);
}

#[test]
fn vars_file_then_var_arguments() {
    let root = setup(Some("a: <%= first %>\nb: <%= second %>\n"));
    fs::write(root.path().join("vars.yml"), "first: from-file\nsecond: from-file\n").unwrap();

    workflow_gen(root.path())
        .args(["--vars", "vars.yml", "--var", "second=from-arg"])
        .assert()
        .success();

    let output = fs::read_to_string(output_path(root.path())).unwrap();
    assert!(output.ends_with("a: from-file\nb: from-arg\n"), "{}", output);
}

#[test]
fn explicit_template_and_output_paths() {
    let root = setup(None);
    fs::write(root.path().join("custom.erb"), "x: <%= 'literal' %>\n").unwrap();

    workflow_gen(root.path())
        .args(["--template", "custom.erb", "--output", "out.yml"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.path().join("out.yml")).unwrap(),
        "# THIS FILE IS AUTOMATICALLY GENERATED\n# DO NOT EDIT\nx: literal\n"
    );
}

#[test]
fn missing_template_fails_without_output() {
    let root = setup(None);

    workflow_gen(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to read"));

    assert!(!output_path(root.path()).exists());
}

#[test]
fn undefined_variable_names_the_stage() {
    let root = setup(Some("a: <%= nope %>\n"));

    workflow_gen(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("template evaluation error"))
        .stderr(predicate::str::contains("undefined variable `nope`"));
}

#[test]
fn invalid_var_argument_is_rejected() {
    let root = setup(Some(TEMPLATE));

    workflow_gen(root.path()).args(["--var", "novalue"]).assert().failure();
}

#[test]
fn check_mode() {
    let root = setup(Some(TEMPLATE));

    workflow_gen(root.path())
        .args(["--check", "--var=ginkgo_skip=--ginkgo.skip=foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date"));

    fs::write(output_path(root.path()), EXPECTED).unwrap();

    workflow_gen(root.path())
        .args(["--check", "--var=ginkgo_skip=--ginkgo.skip=foo"])
        .assert()
        .success();
}
