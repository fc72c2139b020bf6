mod flags;

use std::{env, io, process};

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};
use zcomp::{extract, host, render::Renderer};

fn main() {
    let flags = flags::Zcomp::from_env_or_exit();
    init_logging(flags.verbose);

    if let Err(err) = run(flags) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(flags: flags::Zcomp) -> zcomp::Result<()> {
    let mut decl = host::load(&flags.path)?;
    if let Some(name) = flags.name {
        decl.prog = name;
    }
    let tool = extract(&decl)?;

    if flags.dump {
        print!("{tool}");
        return Ok(());
    }

    let renderer = match &flags.template {
        Some(path) => Renderer::from_path(path)?,
        None => Renderer::new()?,
    };
    renderer.write_completion(&tool, &env::current_dir()?)?;
    Ok(())
}

fn init_logging(verbose: u32) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();
}
