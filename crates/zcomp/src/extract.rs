use tracing::debug;

use crate::{
    decl::{ArgumentDecl, ChoiceDecl, Declare, ParamDecl, ParserDecl},
    model::{Argument, Flag, Subcommand, Tool},
    Result,
};

/// Builds the [`Tool`] described by a declaration tree.
///
/// Parameters keep their declaration order. Subcommands are flattened one
/// level deep: a subparsers group inside a subcommand is dropped.
pub fn extract(decl: &ParserDecl) -> Result<Tool> {
    let mut tool = Tool {
        name: decl.prog.clone(),
        description: decl.description.clone(),
        flags: Vec::new(),
        arguments: Vec::new(),
        subcommands: Vec::new(),
    };

    for param in &decl.params {
        match param {
            ParamDecl::Subparsers(group) => {
                for choice in &group.choices {
                    tool.subcommands.push(subcommand(choice)?);
                }
            }
            ParamDecl::Argument(arg) if arg.is_optional() => tool.flags.push(flag(arg)?),
            ParamDecl::Argument(arg) => tool.arguments.push(argument(arg)),
        }
    }

    debug!(
        name = %tool.name,
        flags = tool.flags.len(),
        arguments = tool.arguments.len(),
        subcommands = tool.subcommands.len(),
        "extracted tool"
    );
    Ok(tool)
}

/// Asks `tool` for its declarations and extracts them.
pub fn extract_from(tool: &impl Declare) -> Result<Tool> {
    extract(&tool.declare())
}

fn subcommand(choice: &ChoiceDecl) -> Result<Subcommand> {
    let mut res = Subcommand {
        name: choice.name.clone(),
        help_text: choice.help.clone(),
        flags: Vec::new(),
        arguments: Vec::new(),
    };
    for param in &choice.parser.params {
        match param {
            ParamDecl::Subparsers(_) => {
                debug!(subcommand = %choice.name, "skipping nested subcommands");
            }
            ParamDecl::Argument(arg) if arg.is_optional() => res.flags.push(flag(arg)?),
            ParamDecl::Argument(arg) => res.arguments.push(argument(arg)),
        }
    }
    Ok(res)
}

fn flag(arg: &ArgumentDecl) -> Result<Flag> {
    Flag::new(arg.option_strings.clone(), arg.help.clone(), arg.action.takes_value())
}

fn argument(arg: &ArgumentDecl) -> Argument {
    Argument { name: arg.dest.clone(), help_text: arg.help.clone() }
}
