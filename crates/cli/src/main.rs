use anyhow::{Context, Result};
use argbind::Parser;
use std::io::Write;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();

    let mut verbose = false;
    let mut repeats = 1_i32;
    let mut text = String::new();
    let mut trailing = String::new();

    let mut parser = Parser::with_description("print a string a number of times");
    parser
        .add_option(&mut repeats, "--repeat")
        .help("how many times to print the string");
    parser
        .add_flag(&mut verbose, ["--verbose", "-v"])
        .help("describe what is about to happen");
    parser
        .add_positional(&mut text)
        .required()
        .help("the string to print");
    let trailing_arg = parser
        .add_positional(&mut trailing)
        .help("printed once at the end");

    let args: Vec<String> = std::env::args().collect();
    if !parser.parse(&args) {
        eprint!("{}", parser.help());
        std::process::exit(1);
    }
    if parser.need_help() {
        print!("{}", parser.help());
        return Ok(());
    }
    tracing::debug!(repeats, verbose, "command line parsed");

    if verbose {
        if trailing_arg.found() {
            eprintln!("about to print '{text}' {repeats} times, then '{trailing}'");
        } else {
            eprintln!("about to print '{text}' {repeats} times");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..repeats {
        out.write_all(text.as_bytes())
            .context("failed to write output")?;
    }
    if trailing_arg.found() {
        out.write_all(trailing.as_bytes())
            .context("failed to write output")?;
    }
    out.write_all(b"\n").context("failed to write output")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
