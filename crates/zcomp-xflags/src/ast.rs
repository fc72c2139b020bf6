//! Syntax tree of an `xflags!` declaration.
//!
//! Mirrors the surface syntax closely: nothing is resolved or validated
//! beyond what the parser needs to accept the input.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    /// Empty for the anonymous command of `parse_or_exit!`.
    pub name: String,
    pub doc: Option<String>,
    pub args: Vec<Arg>,
    pub flags: Vec<Flag>,
    pub subcommands: Vec<Cmd>,
}

impl Cmd {
    pub fn is_anon(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub arity: Arity,
    pub doc: Option<String>,
    pub val: Val,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub arity: Arity,
    /// Long name, without the leading `--`.
    pub name: String,
    /// Short name, without the leading `-`.
    pub short: Option<String>,
    pub doc: Option<String>,
    pub val: Option<Val>,
}

impl Flag {
    pub fn is_help(&self) -> bool {
        self.name == "help"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Optional,
    Required,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Val {
    pub name: String,
    pub ty: String,
}
