use command_extra::CommandExtra;
use lockgraph_testing_utils::{
    bin::{read_json, CommandTempCwd},
    fixtures,
};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn should_leave_canonical_lockfiles_alone() {
    for fixture in fixtures::all() {
        eprintln!("FIXTURE: {}", fixture.name);
        let CommandTempCwd { lockgraph, root, workspace } = CommandTempCwd::with_fixture(&fixture);
        let before = fs::read_to_string(workspace.join("package-lock.json")).unwrap();

        let output = lockgraph
            .with_args(["normalize", "--check"])
            .output()
            .expect("execute lockgraph normalize --check");
        dbg!(&output);
        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim_end(),
            "package-lock.json is already normalized",
        );

        let after = fs::read_to_string(workspace.join("package-lock.json")).unwrap();
        assert_eq!(after, before);

        drop(root); // cleanup
    }
}

#[test]
fn check_should_fail_on_non_canonical_lockfile() {
    let fixture = fixtures::nested_version_mismatch();
    let CommandTempCwd { lockgraph, root, workspace } = CommandTempCwd::with_fixture(&fixture);
    let compact = fixture.lockfile.to_string();
    fs::write(workspace.join("package-lock.json"), &compact).expect("write to package-lock.json");

    eprintln!("Executing lockgraph normalize --check...");
    let output = lockgraph
        .with_args(["normalize", "--check"])
        .output()
        .expect("execute lockgraph normalize --check");
    dbg!(&output);

    eprintln!("Exit status code");
    assert!(!output.status.success());

    eprintln!("Stderr");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("package-lock.json is not normalized"));

    eprintln!("The file is untouched");
    let content = fs::read_to_string(workspace.join("package-lock.json")).unwrap();
    assert_eq!(content, compact);

    drop(root); // cleanup
}

#[test]
fn should_rewrite_non_canonical_lockfile() {
    let mut fixture = fixtures::nested();
    fixture.lockfile["dependencies"]["left-pad"] = serde_json::json!({ "version": "1.3.0" });
    let CommandTempCwd { lockgraph, root, workspace } = CommandTempCwd::with_fixture(&fixture);

    eprintln!("Executing lockgraph normalize...");
    let output = lockgraph.with_arg("normalize").output().expect("execute lockgraph normalize");
    dbg!(&output);

    eprintln!("Exit status code");
    assert!(output.status.success());

    eprintln!("Stdout");
    insta::assert_snapshot!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        @"Normalized package-lock.json"
    );

    eprintln!("Extraneous packages are gone");
    assert_eq!(read_json(&workspace, "package-lock.json"), fixtures::nested().lockfile);

    eprintln!("Text is what npm would write");
    let content = fs::read_to_string(workspace.join("package-lock.json")).unwrap();
    let mut expected = serde_json::to_string_pretty(&fixtures::nested().lockfile).unwrap();
    expected.push('\n');
    assert_eq!(content, expected);

    drop(root); // cleanup
}
