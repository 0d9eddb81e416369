use command_extra::CommandExtra;
use lockgraph_testing_utils::{bin::CommandTempCwd, fixtures};
use pretty_assertions::assert_eq;
use text_block_macros::text_block_fnl;

#[test]
fn should_print_tree() {
    let CommandTempCwd { lockgraph, root, .. } =
        CommandTempCwd::with_fixture(&fixtures::shadowed_chain());

    eprintln!("Executing lockgraph list...");
    let output = lockgraph.with_arg("list").output().expect("execute lockgraph list");
    dbg!(&output);

    eprintln!("Exit status code");
    assert!(output.status.success());

    eprintln!("Stdout");
    let expected = text_block_fnl! {
        "chokidar@2.1.8"
        "  glob-parent@3.1.0"
        "    is-glob@3.1.0"
        "      is-extglob@2.1.1"
        "glob-parent@5.1.2"
        "  is-glob@4.0.3"
        "    is-extglob@2.1.1"
    };
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);

    drop(root); // cleanup
}

#[test]
fn should_filter_and_limit() {
    let CommandTempCwd { lockgraph, root, .. } =
        CommandTempCwd::with_fixture(&fixtures::nested_mixed_dev());

    eprintln!("Executing lockgraph list --dev --depth 0...");
    let output = lockgraph
        .with_args(["list", "--dev", "--depth", "0"])
        .output()
        .expect("execute lockgraph list");
    dbg!(&output);

    eprintln!("Exit status code");
    assert!(output.status.success());

    eprintln!("Stdout");
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout).trim_end(), @"debug@4.3.4");

    drop(root); // cleanup
}

#[test]
fn prod_and_dev_conflict() {
    let CommandTempCwd { lockgraph, root, .. } = CommandTempCwd::with_fixture(&fixtures::basic());

    let output = lockgraph
        .with_args(["list", "--prod", "--dev"])
        .output()
        .expect("execute lockgraph list");
    dbg!(&output);
    assert!(!output.status.success());

    drop(root); // cleanup
}
