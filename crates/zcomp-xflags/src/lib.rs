//! Reads a command line interface declared with [xflags] out of Rust source.
//!
//! The source is tokenized with `proc-macro2` at runtime, so the declaring
//! crate is never compiled or run. The first `xflags! { .. }` or
//! `parse_or_exit! { .. }` invocation found (at any nesting depth) is parsed
//! into an [`ast::Cmd`]. Just like the real macro, an implicit `-h, --help`
//! flag is appended to the top-level command.
//!
//! ```
//! let cmd = zcomp_xflags::parse_source(
//!     r#"
//!     xflags::xflags! {
//!         cmd hello {
//!             required name: String
//!             optional -e, --emoji
//!         }
//!     }
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(cmd.name, "hello");
//! assert_eq!(cmd.flags.len(), 2);
//! ```
//!
//! [xflags]: https://docs.rs/xflags

pub mod ast;
mod parse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't tokenize source: {0}")]
    Lex(String),
    #[error("no `xflags!` or `parse_or_exit!` invocation found")]
    NotFound,
    #[error("invalid flags syntax, {0}")]
    Syntax(String),
}

/// Parses the first flags declaration found in `text`.
pub fn parse_source(text: &str) -> Result<ast::Cmd> {
    parse::source(text)
}
