//! Normalized model of a command line surface.
//!
//! Built once by [`crate::extract()`], then only read.

use std::fmt;

use crate::{Error, Result};

/// A positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub help_text: Option<String>,
}

/// An optional parameter, selected by one of its invocation strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    options: Vec<String>,
    pub help_text: Option<String>,
    /// Whether the flag consumes the following token as its value.
    pub takes_value: bool,
}

impl Flag {
    /// Fails with [`Error::InvalidFlag`] when `options` is empty.
    pub fn new(options: Vec<String>, help_text: Option<String>, takes_value: bool) -> Result<Flag> {
        if options.is_empty() {
            return Err(Error::InvalidFlag);
        }
        Ok(Flag { options, help_text, takes_value })
    }

    /// Invocation strings, in declaration order. Never empty.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// A named mode of a tool. Subcommands never nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    pub help_text: Option<String>,
    pub flags: Vec<Flag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub description: Option<String>,
    pub flags: Vec<Flag>,
    pub arguments: Vec<Argument>,
    pub subcommands: Vec<Subcommand>,
}

/// Human readable outline, one item per line.
impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tool Name: {}", self.name)?;
        match &self.description {
            Some(description) => writeln!(f, "Description: {description}")?,
            None => writeln!(f, "Description:")?,
        }
        writeln!(f, "Flags:")?;
        for flag in &self.flags {
            write_flag(f, "  ", flag)?;
        }
        writeln!(f, "Positional arguments:")?;
        for arg in &self.arguments {
            write_item(f, "  ", &arg.name, &arg.help_text)?;
        }
        writeln!(f, "Subcommands:")?;
        for sub in &self.subcommands {
            write_item(f, "  ", &sub.name, &sub.help_text)?;
            for flag in &sub.flags {
                write_flag(f, "    ", flag)?;
            }
            for arg in &sub.arguments {
                write_item(f, "    ", &arg.name, &arg.help_text)?;
            }
        }
        Ok(())
    }
}

fn write_flag(f: &mut fmt::Formatter<'_>, indent: &str, flag: &Flag) -> fmt::Result {
    let mut label = flag.options.join(", ");
    if flag.takes_value {
        label.push_str(" <value>");
    }
    write_item(f, indent, &label, &flag.help_text)
}

fn write_item(
    f: &mut fmt::Formatter<'_>,
    indent: &str,
    label: &str,
    help: &Option<String>,
) -> fmt::Result {
    match help {
        Some(help) => writeln!(f, "{indent}{label}: {help}"),
        None => writeln!(f, "{indent}{label}"),
    }
}
