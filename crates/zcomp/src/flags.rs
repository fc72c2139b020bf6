#![allow(unused)]
use std::path::PathBuf;

xflags::xflags! {
    /// Generate a Zsh completion file from a tool's flag declarations.
    cmd zcomp {
        /// Declarations of the target tool: a `.json` tree, or Rust source
        /// with an `xflags!` block.
        required path: PathBuf
        /// Use this tool name instead of the declared one.
        optional --name name: String
        /// Render with this liquid template instead of the built-in one.
        optional --template template: PathBuf
        /// Print the extracted model instead of writing a completion file.
        optional --dump
        /// Log more, can be repeated.
        repeated -v, --verbose
    }
}
