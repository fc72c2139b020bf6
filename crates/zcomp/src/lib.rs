//! Generates Zsh completion scripts from a tool's flag declarations.
//!
//! The pipeline has two stages:
//!
//! * [`extract`] turns a declaration tree ([`decl::ParserDecl`]) into a
//!   [`model::Tool`], the normalized description of a command line surface;
//! * [`render::Renderer`] turns a `Tool` into a completion script.
//!
//! ```
//! use zcomp::decl::{Action, ArgumentDecl, ParserDecl};
//!
//! let decl = ParserDecl::new("greet")
//!     .description("Say hello.")
//!     .param(ArgumentDecl::flag(["--verbose", "-v"]).help("Enable verbose output").action(Action::StoreTrue))
//!     .param(ArgumentDecl::positional("name").help("Who to greet"));
//!
//! let tool = zcomp::extract(&decl).unwrap();
//! assert_eq!(tool.flags[0].arg_string(), "'(--verbose -v)'{--verbose,-v}'[Enable verbose output]'");
//!
//! let script = zcomp::render::Renderer::new().unwrap().render(&tool).unwrap();
//! assert!(script.starts_with("#compdef greet"));
//! ```

use std::{io, path::PathBuf};

pub mod decl;
pub mod host;
pub mod model;
pub mod render;

mod extract;

pub use crate::extract::{extract, extract_from};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't load `{}`: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
    #[error("flag declared without invocation strings")]
    InvalidFlag,
    #[error("template error: {0}")]
    Template(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
