use command_extra::CommandExtra;
use lockgraph_testing_utils::{
    bin::{read_json, CommandTempCwd},
    fixtures,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn should_remove_direct_dependency() {
    let CommandTempCwd { lockgraph, root, workspace } =
        CommandTempCwd::with_fixture(&fixtures::nested_version_mismatch());

    eprintln!("Executing lockgraph remove ms...");
    let output = lockgraph.with_args(["remove", "ms"]).output().expect("execute lockgraph remove");
    dbg!(&output);

    eprintln!("Exit status code");
    assert!(output.status.success());

    eprintln!("Stdout");
    insta::assert_snapshot!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        @"Removed ms from dependencies"
    );

    eprintln!("package.json");
    let manifest = read_json(&workspace, "package.json");
    assert_eq!(manifest["dependencies"], json!({ "debug": "^4.3.4" }));

    eprintln!("The version debug needs takes the freed name");
    let lockfile = read_json(&workspace, "package-lock.json");
    let dependencies = lockfile["dependencies"].as_object().unwrap();
    assert_eq!(dependencies.keys().collect::<Vec<_>>(), ["debug", "ms"]);
    assert_eq!(dependencies["ms"]["version"], json!("2.1.2"));
    assert_eq!(dependencies["debug"].get("dependencies"), None);

    drop(root); // cleanup
}

#[test]
fn should_keep_packages_still_required() {
    let CommandTempCwd { lockgraph, root, workspace } =
        CommandTempCwd::with_fixture(&fixtures::nested_mixed_dev());

    eprintln!("Executing lockgraph remove ms...");
    let output = lockgraph.with_args(["remove", "ms"]).output().expect("execute lockgraph remove");
    dbg!(&output);
    assert!(output.status.success());

    eprintln!("ms is now only needed by a dev dependency");
    let lockfile = read_json(&workspace, "package-lock.json");
    assert_eq!(lockfile["dependencies"]["ms"]["dev"], json!(true));
    assert_eq!(lockfile["dependencies"]["debug"]["dev"], json!(true));

    drop(root); // cleanup
}

#[test]
fn should_remove_name_listed_in_several_groups() {
    let mut fixture = fixtures::basic();
    fixture.manifest["devDependencies"] = json!({ "ms": "^2.1.3" });
    let CommandTempCwd { lockgraph, root, workspace } = CommandTempCwd::with_fixture(&fixture);

    eprintln!("Executing lockgraph remove ms...");
    let output = lockgraph.with_args(["remove", "ms"]).output().expect("execute lockgraph remove");
    dbg!(&output);
    assert!(output.status.success());

    eprintln!("package.json");
    let manifest = read_json(&workspace, "package.json");
    assert_eq!(manifest["dependencies"], json!({}));
    assert_eq!(manifest["devDependencies"], json!({}));

    eprintln!("package-lock.json");
    let lockfile = read_json(&workspace, "package-lock.json");
    assert_eq!(lockfile["dependencies"], json!({}));

    drop(root); // cleanup
}

#[test]
fn should_fail_on_unknown_name() {
    let CommandTempCwd { lockgraph, root, workspace } =
        CommandTempCwd::with_fixture(&fixtures::basic());

    let output =
        lockgraph.with_args(["remove", "left-pad"]).output().expect("execute lockgraph remove");
    dbg!(&output);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""left-pad" is not a direct dependency"#));
    assert_eq!(read_json(&workspace, "package-lock.json"), fixtures::basic().lockfile);

    drop(root); // cleanup
}
