//! Turns a [`Tool`] into a Zsh completion script.
//!
//! Scripts are produced by a [liquid] template. The embedded one targets
//! Zsh's `_arguments`; a custom template sees the same `tool` object:
//!
//! ```text
//! tool.name, tool.description
//! tool.flags[]        options, help_text, takes_value, arg_string
//! tool.arguments[]    name, help_text, message
//! tool.subcommands[]  name, help_text, describe, flags[], arguments[]
//! ```
//!
//! [liquid]: https://shopify.github.io/liquid/

use std::{
    fmt::{self, Write},
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::info;

use crate::{
    model::{Argument, Flag, Subcommand, Tool},
    Error, Result,
};

macro_rules! w {
    ($($tt:tt)*) => {
        {
            let _ = write!($($tt)*);
        }
    };
}

const ZSH_TEMPLATE: &str = include_str!("zsh.liquid");

pub struct Renderer {
    template: liquid::Template,
}

impl Renderer {
    /// Renderer for the embedded Zsh template.
    pub fn new() -> Result<Renderer> {
        Renderer::from_template(ZSH_TEMPLATE)
    }

    pub fn from_template(source: &str) -> Result<Renderer> {
        let parser = liquid::ParserBuilder::with_stdlib().build().map_err(template_error)?;
        let template = parser.parse(source).map_err(template_error)?;
        Ok(Renderer { template })
    }

    pub fn from_path(path: &Path) -> Result<Renderer> {
        let source = fs::read_to_string(path)?;
        Renderer::from_template(&source)
    }

    pub fn render(&self, tool: &Tool) -> Result<String> {
        let globals = liquid::to_object(&Globals { tool: ToolView::from(tool) })
            .map_err(template_error)?;
        self.template.render(&globals).map_err(template_error)
    }

    /// Renders `tool` into [`file_name`] inside `dir`, replacing any existing
    /// file. Nothing is written if rendering fails.
    pub fn write_completion(&self, tool: &Tool, dir: &Path) -> Result<PathBuf> {
        let text = self.render(tool)?;
        let path = dir.join(file_name(tool));
        println!("Writing completion file to {}", path.display());
        fs::write(&path, text)?;
        info!(path = %path.display(), "wrote completion file");
        Ok(path)
    }
}

/// Name of the completion file for `tool`: `_<name>`, as Zsh's `fpath`
/// lookup expects.
pub fn file_name(tool: &Tool) -> String {
    format!("_{}", tool.name)
}

fn template_error(err: impl fmt::Display) -> Error {
    Error::Template(err.to_string())
}

impl Flag {
    /// The flag as an `_arguments` spec, including the outer quotes.
    ///
    /// ```text
    /// '--flag[Help.]'
    /// '--flag=[Help.]:'
    /// '(--flag -f)'{--flag,-f}'[Help.]'
    /// '(--flag -f)'{--flag,-f}'=[Help.]:'
    /// ```
    ///
    /// Aliases exclude each other, and the brace expansion repeats the spec
    /// for each of them. The trailing `:` makes Zsh expect a value, which
    /// keeps subcommand completion working after a flag that takes one.
    pub fn arg_string(&self) -> String {
        let mut buf = String::from("'");
        match self.options() {
            [single] => buf.push_str(single),
            options => {
                w!(buf, "({})'", options.join(" "));
                w!(buf, "{{{}}}'", options.join(","));
            }
        }
        if self.takes_value {
            buf.push('=');
        }
        w!(buf, "[{}]", escape_help(self.help_text.as_deref().unwrap_or_default()));
        if self.takes_value {
            buf.push(':');
        }
        buf.push('\'');
        buf
    }
}

impl Argument {
    /// Message shown while completing the argument: `name -- help`.
    pub fn message(&self) -> String {
        let mut buf = escape_colons(&self.name);
        if let Some(help) = &self.help_text {
            w!(buf, " -- {}", escape_colons(help));
        }
        buf
    }
}

impl Subcommand {
    /// Entry for `_describe`: `name:help`.
    pub fn describe(&self) -> String {
        let mut buf = escape_colons(&self.name);
        if let Some(help) = &self.help_text {
            w!(buf, ":{}", escape_quotes(&one_line(help)));
        }
        buf
    }
}

/// Help text inside `[...]` of a single-quoted spec.
fn escape_help(help: &str) -> String {
    escape_quotes(&one_line(help)).replace('[', "\\[").replace(']', "\\]")
}

fn escape_colons(text: &str) -> String {
    escape_quotes(&one_line(text)).replace(':', "\\:")
}

/// Closes the single-quoted string, emits an escaped quote and reopens it.
fn escape_quotes(text: &str) -> String {
    text.replace('\'', r"'\''")
}

/// Keeps each `_arguments` entry on one line; other whitespace stays.
fn one_line(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

#[derive(Serialize)]
struct Globals<'a> {
    tool: ToolView<'a>,
}

#[derive(Serialize)]
struct ToolView<'a> {
    name: &'a str,
    description: Option<&'a str>,
    flags: Vec<FlagView<'a>>,
    arguments: Vec<ArgumentView<'a>>,
    subcommands: Vec<SubcommandView<'a>>,
}

#[derive(Serialize)]
struct FlagView<'a> {
    options: &'a [String],
    help_text: Option<&'a str>,
    takes_value: bool,
    arg_string: String,
}

#[derive(Serialize)]
struct ArgumentView<'a> {
    name: &'a str,
    help_text: Option<&'a str>,
    message: String,
}

#[derive(Serialize)]
struct SubcommandView<'a> {
    name: &'a str,
    help_text: Option<&'a str>,
    describe: String,
    flags: Vec<FlagView<'a>>,
    arguments: Vec<ArgumentView<'a>>,
}

impl<'a> From<&'a Tool> for ToolView<'a> {
    fn from(tool: &'a Tool) -> ToolView<'a> {
        ToolView {
            name: &tool.name,
            description: tool.description.as_deref(),
            flags: tool.flags.iter().map(FlagView::from).collect(),
            arguments: tool.arguments.iter().map(ArgumentView::from).collect(),
            subcommands: tool.subcommands.iter().map(SubcommandView::from).collect(),
        }
    }
}

impl<'a> From<&'a Flag> for FlagView<'a> {
    fn from(flag: &'a Flag) -> FlagView<'a> {
        FlagView {
            options: flag.options(),
            help_text: flag.help_text.as_deref(),
            takes_value: flag.takes_value,
            arg_string: flag.arg_string(),
        }
    }
}

impl<'a> From<&'a Argument> for ArgumentView<'a> {
    fn from(arg: &'a Argument) -> ArgumentView<'a> {
        ArgumentView { name: &arg.name, help_text: arg.help_text.as_deref(), message: arg.message() }
    }
}

impl<'a> From<&'a Subcommand> for SubcommandView<'a> {
    fn from(sub: &'a Subcommand) -> SubcommandView<'a> {
        SubcommandView {
            name: &sub.name,
            help_text: sub.help_text.as_deref(),
            describe: sub.describe(),
            flags: sub.flags.iter().map(FlagView::from).collect(),
            arguments: sub.arguments.iter().map(ArgumentView::from).collect(),
        }
    }
}
