mod subcommands;

use std::fmt::Write;

use expect_test::{expect, Expect};
use zcomp_xflags::ast;

fn check(src: &str, expect: Expect) {
    let actual = match zcomp_xflags::parse_source(src) {
        Ok(cmd) => outline(&cmd),
        Err(err) => err.to_string(),
    };
    expect.assert_eq(&actual);
}

fn outline(cmd: &ast::Cmd) -> String {
    let mut buf = String::new();
    outline_rec(&mut buf, "", cmd);
    buf
}

fn outline_rec(buf: &mut String, indent: &str, cmd: &ast::Cmd) {
    let name = if cmd.is_anon() { "<anon>" } else { cmd.name.as_str() };
    writeln!(buf, "{indent}cmd {name}{}", doc_suffix(&cmd.doc)).unwrap();
    for arg in &cmd.args {
        let doc = doc_suffix(&arg.doc);
        writeln!(buf, "{indent}  {:?} {}: {}{doc}", arg.arity, arg.val.name, arg.val.ty).unwrap();
    }
    for flag in &cmd.flags {
        let short = flag.short.as_ref().map(|it| format!("-{it}, ")).unwrap_or_default();
        let val = flag.val.as_ref().map(|it| format!(" {}: {}", it.name, it.ty)).unwrap_or_default();
        let doc = doc_suffix(&flag.doc);
        writeln!(buf, "{indent}  {:?} {short}--{}{val}{doc}", flag.arity, flag.name).unwrap();
    }
    let indent = format!("{indent}  ");
    for sub in &cmd.subcommands {
        outline_rec(buf, &indent, sub);
    }
}

fn doc_suffix(doc: &Option<String>) -> String {
    match doc {
        Some(doc) => format!("  # {}", doc.replace('\n', " / ")),
        None => String::new(),
    }
}

#[test]
fn smoke() {
    check(
        r#"
mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Say hello.
        cmd hello {
            /// Who to greet.
            required name: String
            /// Add some flair.
            optional -e, --emoji
            /// Write the greeting here.
            /// Defaults to stdout.
            optional -o, --output path: PathBuf
            repeated --data value: u32
        }
    }
}

fn main() {}
"#,
        expect![[r#"
            cmd hello  # Say hello.
              Required name: String  # Who to greet.
              Optional -e, --emoji  # Add some flair.
              Optional -o, --output path: PathBuf  # Write the greeting here. / Defaults to stdout.
              Repeated --data value: u32
              Optional -h, --help  # Prints help information.
        "#]],
    );
}

#[test]
fn anonymous() {
    check(
        r#"
fn main() {
    let flags = xflags::parse_or_exit! {
        /// Remove recursively.
        optional -r,--recursive
        required path: PathBuf
    };
    drop(flags);
}
"#,
        expect![[r#"
            cmd <anon>
              Required path: PathBuf
              Optional -r, --recursive  # Remove recursively.
              Optional -h, --help  # Prints help information.
        "#]],
    );
}

#[test]
fn empty() {
    check(
        "xflags! { cmd empty {} }",
        expect![[r#"
            cmd empty
              Optional -h, --help  # Prints help information.
        "#]],
    );
}

#[test]
fn doc_with_quotes() {
    check(
        r#"
xflags! {
    cmd quoted {
        /// Print "quoted" text, it's fine.
        optional --say
    }
}
"#,
        expect![[r#"
            cmd quoted
              Optional --say  # Print "quoted" text, it's fine.
              Optional -h, --help  # Prints help information.
        "#]],
    );
}

#[test]
fn not_found() {
    check("fn main() { println!(\"hi\") }", expect!["no `xflags!` or `parse_or_exit!` invocation found"]);
}

#[test]
fn bad_syntax() {
    check(
        "xflags! { cmd app { optional emoji } }",
        expect!["invalid flags syntax, expected `--flag` or `arg: Type`"],
    );
}
