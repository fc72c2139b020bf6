use expect_test::expect;

use crate::check;

#[test]
fn nested() {
    check(
        r#"
xflags! {
    cmd rust-analyzer {
        repeated -v, --verbose

        cmd server {
            optional --dir path:PathBuf
            default cmd launch {
                optional --log
            }
            cmd watch {
            }
        }

        /// Batch typecheck the project.
        cmd analysis-stats
            required path: PathBuf
        {
            optional --parallel
        }
    }
}
"#,
        expect![[r#"
            cmd rust-analyzer
              Repeated -v, --verbose
              Optional -h, --help  # Prints help information.
              cmd server
                Optional --dir path: PathBuf
                cmd launch
                  Optional --log
                cmd watch
              cmd analysis-stats  # Batch typecheck the project.
                Required path: PathBuf
                Optional --parallel
        "#]],
    );
}

#[test]
fn help_is_only_added_to_the_root() {
    let cmd = zcomp_xflags::parse_source(
        "xflags! { cmd git { cmd commit { optional -m, --message msg: String } } }",
    )
    .unwrap();

    let root_flags = cmd.flags.iter().map(|it| it.name.as_str()).collect::<Vec<_>>();
    assert_eq!(root_flags, ["help"]);

    let commit = &cmd.subcommands[0];
    assert_eq!(commit.name, "commit");
    assert!(commit.flags.iter().all(|it| !it.is_help()));
}
