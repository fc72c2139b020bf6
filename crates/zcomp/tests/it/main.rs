mod cli;

use std::path::Path;

use zcomp::{
    decl::{Action, ArgumentDecl, ParserDecl, SubparsersDecl},
    model::Tool,
    render::Renderer,
};

fn make() -> ParserDecl {
    let build = ParserDecl::new("make build")
        .param(ArgumentDecl::positional("target").help("Build target"))
        .param(SubparsersDecl::new().choice("deeper", Some("Not supported"), ParserDecl::new("x")));
    ParserDecl::new("make")
        .description("Build things.")
        .param(
            ArgumentDecl::flag(["--verbose", "-v"])
                .help("Enable verbose output")
                .action(Action::StoreTrue),
        )
        .param(ArgumentDecl::flag(["--output"]).help("Output path").action(Action::Store))
        .param(SubparsersDecl::new().choice("build", Some("Build the project"), build))
}

fn script(tool: &Tool) -> String {
    Renderer::new().unwrap().render(tool).unwrap()
}

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}
