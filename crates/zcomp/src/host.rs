//! Loads the declarations of a target tool.
//!
//! Two kinds of targets are understood:
//!
//! * `*.json`: a serialized [`ParserDecl`];
//! * anything else: Rust source declaring its flags with `xflags!` (or
//!   `parse_or_exit!`), read without compiling or running it.

use std::{fmt, fs, path::Path};

use tracing::debug;
use zcomp_xflags::ast;

use crate::{
    decl::{Action, ArgumentDecl, ParserDecl, SubparsersDecl},
    Error, Result,
};

pub fn load(path: &Path) -> Result<ParserDecl> {
    let text = fs::read_to_string(path).map_err(|err| load_error(path, err))?;
    let is_json = path.extension().map_or(false, |it| it == "json");
    debug!(path = %path.display(), is_json, "loading declarations");

    if is_json {
        return serde_json::from_str(&text).map_err(|err| load_error(path, err));
    }

    let cmd = zcomp_xflags::parse_source(&text).map_err(|err| load_error(path, err))?;
    let mut decl = lower(&cmd);
    if cmd.is_anon() {
        // `parse_or_exit!` has no command name, fall back to the file's.
        decl.prog = path.file_stem().map(|it| it.to_string_lossy().into_owned()).unwrap_or_default();
    }
    Ok(decl)
}

fn load_error(path: &Path, err: impl fmt::Display) -> Error {
    Error::Load { path: path.to_path_buf(), reason: err.to_string() }
}

/// Translates an `xflags` command into the declaration tree it stands for.
///
/// Flags without a value are switches (`repeated` ones count), flags with a
/// value store it (`repeated` ones append). The implicit `--help` gets
/// [`Action::Help`].
pub(crate) fn lower(cmd: &ast::Cmd) -> ParserDecl {
    let mut decl = ParserDecl::new(cmd.name.clone());
    decl.description = cmd.doc.as_deref().map(one_line);

    for arg in &cmd.args {
        let mut param = ArgumentDecl::positional(arg.val.name.clone());
        param.help = arg.doc.as_deref().map(one_line);
        decl.params.push(param.into());
    }

    for flag in &cmd.flags {
        let mut options = Vec::new();
        if let Some(short) = &flag.short {
            options.push(format!("-{short}"));
        }
        options.push(format!("--{}", flag.name));

        let action = match (&flag.val, flag.arity) {
            _ if flag.is_help() => Action::Help,
            (None, ast::Arity::Repeated) => Action::Count,
            (None, _) => Action::StoreTrue,
            (Some(_), ast::Arity::Repeated) => Action::Append,
            (Some(_), _) => Action::Store,
        };
        let mut param = ArgumentDecl::flag(options).action(action);
        param.help = flag.doc.as_deref().map(one_line);
        decl.params.push(param.into());
    }

    if !cmd.subcommands.is_empty() {
        let mut group = SubparsersDecl::new();
        for sub in &cmd.subcommands {
            let help = sub.doc.as_deref().map(one_line);
            let mut parser = lower(sub);
            parser.prog = format!("{} {}", cmd.name, sub.name);
            group = group.choice(sub.name.clone(), help.as_deref(), parser);
        }
        decl.params.push(group.into());
    }

    decl
}

fn one_line(doc: &str) -> String {
    doc.lines().map(str::trim).filter(|it| !it.is_empty()).collect::<Vec<_>>().join(" ")
}
