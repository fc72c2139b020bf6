use std::{fs, path::Path, process::Command};

fn zcomp(dir: &Path, args: &[&str]) -> (bool, String, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_zcomp")).args(args).current_dir(dir).output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    (out.status.success(), stdout, stderr)
}

const GREET: &str = r#"{
    "prog": "greet",
    "description": "Say hello.",
    "params": [
        { "kind": "argument", "dest": "verbose", "option_strings": ["-v", "--verbose"], "help": "Louder", "action": "count" },
        { "kind": "argument", "dest": "name", "help": "Who to greet" }
    ]
}"#;

#[test]
fn writes_file_into_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greet.json"), GREET).unwrap();

    let (ok, stdout, _) = zcomp(dir.path(), &["greet.json"]);
    assert!(ok);
    assert!(stdout.starts_with("Writing completion file to "), "{stdout}");
    assert!(stdout.trim_end().ends_with("_greet"), "{stdout}");

    let script = fs::read_to_string(dir.path().join("_greet")).unwrap();
    assert!(script.starts_with("#compdef greet\n"));
    assert!(script.contains("'(-v --verbose)'{-v,--verbose}'[Louder]' \\"));
    assert!(script.contains("':name -- Who to greet:_files' \\"));
}

#[test]
fn name_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greet.json"), GREET).unwrap();

    let (ok, _, _) = zcomp(dir.path(), &["greet.json", "--name", "hello"]);
    assert!(ok);
    assert!(dir.path().join("_hello").exists());
    assert!(!dir.path().join("_greet").exists());
}

#[test]
fn dump() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greet.json"), GREET).unwrap();

    let (ok, stdout, _) = zcomp(dir.path(), &["greet.json", "--dump"]);
    assert!(ok);
    assert_eq!(
        stdout,
        "Tool Name: greet\n\
         Description: Say hello.\n\
         Flags:\n  -v, --verbose: Louder\n\
         Positional arguments:\n  name: Who to greet\n\
         Subcommands:\n"
    );
    assert!(!dir.path().join("_greet").exists());
}

#[test]
fn custom_template() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greet.json"), GREET).unwrap();
    fs::write(dir.path().join("names.liquid"), "{% for f in tool.flags %}{{ f.options | join: \" \" }}{% endfor %}").unwrap();

    let (ok, _, _) = zcomp(dir.path(), &["greet.json", "--template", "names.liquid"]);
    assert!(ok);
    assert_eq!(fs::read_to_string(dir.path().join("_greet")).unwrap(), "-v --verbose");
}

#[test]
fn missing_target_fails() {
    let dir = tempfile::tempdir().unwrap();

    let (ok, stdout, stderr) = zcomp(dir.path(), &["nope.rs"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: can't load `nope.rs`"), "{stderr}");
}
