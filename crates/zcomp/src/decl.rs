//! Declaration tree: what a tool says about its parameters before anything
//! is parsed.
//!
//! The shape follows the usual "parser with added arguments" style of
//! argument parsing libraries: a [`ParserDecl`] holds an ordered list of
//! parameters, each either a single argument (optional when it has
//! invocation strings, positional otherwise) or a group of named
//! subparsers.
//!
//! Trees are built either with the builder methods below, by a
//! [`Declare`] implementation, or deserialized from JSON:
//!
//! ```json
//! {
//!   "prog": "greet",
//!   "description": "Say hello.",
//!   "params": [
//!     { "kind": "argument", "option_strings": ["-v", "--verbose"], "action": "count" },
//!     { "kind": "argument", "dest": "name", "help": "Who to greet" },
//!     { "kind": "subparsers", "choices": [
//!       { "name": "wave", "help": "Wave instead", "parser": { "prog": "greet wave" } }
//!     ] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserDecl {
    #[serde(default)]
    pub prog: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

impl ParserDecl {
    pub fn new(prog: impl Into<String>) -> ParserDecl {
        ParserDecl { prog: prog.into(), description: None, params: Vec::new() }
    }

    pub fn description(mut self, description: impl Into<String>) -> ParserDecl {
        self.description = Some(description.into());
        self
    }

    pub fn param(mut self, param: impl Into<ParamDecl>) -> ParserDecl {
        self.params.push(param.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamDecl {
    Argument(ArgumentDecl),
    Subparsers(SubparsersDecl),
}

impl From<ArgumentDecl> for ParamDecl {
    fn from(arg: ArgumentDecl) -> ParamDecl {
        ParamDecl::Argument(arg)
    }
}

impl From<SubparsersDecl> for ParamDecl {
    fn from(group: SubparsersDecl) -> ParamDecl {
        ParamDecl::Subparsers(group)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDecl {
    #[serde(default)]
    pub dest: String,
    /// Empty for positional arguments.
    #[serde(default)]
    pub option_strings: Vec<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub action: Action,
}

impl ArgumentDecl {
    /// An optional argument. `dest` is derived from the first long option,
    /// or the first option if there is no long one: `--dry-run` => `dry_run`.
    pub fn flag<I>(option_strings: I) -> ArgumentDecl
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let option_strings = option_strings.into_iter().map(Into::into).collect::<Vec<String>>();
        let dest = option_strings
            .iter()
            .find(|it| it.starts_with("--"))
            .or_else(|| option_strings.first())
            .map(|it| it.trim_start_matches('-').replace('-', "_"))
            .unwrap_or_default();
        ArgumentDecl { dest, option_strings, ..ArgumentDecl::default() }
    }

    pub fn positional(dest: impl Into<String>) -> ArgumentDecl {
        ArgumentDecl { dest: dest.into(), ..ArgumentDecl::default() }
    }

    pub fn dest(mut self, dest: impl Into<String>) -> ArgumentDecl {
        self.dest = dest.into();
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> ArgumentDecl {
        self.help = Some(help.into());
        self
    }

    pub fn action(mut self, action: Action) -> ArgumentDecl {
        self.action = action;
        self
    }

    pub fn is_optional(&self) -> bool {
        !self.option_strings.is_empty()
    }
}

/// What an argument does when it is encountered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Store,
    Append,
    Extend,
    StoreConst,
    StoreTrue,
    StoreFalse,
    AppendConst,
    Count,
    Help,
    Version,
}

impl Action {
    /// Whether an optional argument with this action consumes a value.
    pub fn takes_value(self) -> bool {
        match self {
            Action::Help
            | Action::StoreTrue
            | Action::StoreFalse
            | Action::Count
            | Action::AppendConst
            | Action::StoreConst
            | Action::Version => false,
            Action::Store | Action::Append | Action::Extend => true,
        }
    }
}

/// A group of subcommands, each with its own parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubparsersDecl {
    #[serde(default)]
    pub choices: Vec<ChoiceDecl>,
}

impl SubparsersDecl {
    pub fn new() -> SubparsersDecl {
        SubparsersDecl::default()
    }

    pub fn choice(
        mut self,
        name: impl Into<String>,
        help: Option<&str>,
        parser: ParserDecl,
    ) -> SubparsersDecl {
        self.choices.push(ChoiceDecl { name: name.into(), help: help.map(String::from), parser });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDecl {
    pub name: String,
    /// Help given when the choice was registered with its group. This is
    /// what lists of subcommands show, not `parser.description`.
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub parser: ParserDecl,
}

/// Something that can describe its parameters without running.
///
/// The declaration step of a tool, kept apart from its parse-and-run step.
pub trait Declare {
    fn declare(&self) -> ParserDecl;
}

impl<F> Declare for F
where
    F: Fn() -> ParserDecl,
{
    fn declare(&self) -> ParserDecl {
        self()
    }
}
