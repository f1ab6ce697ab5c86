mod common;
mod repl;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use turing_interpreter::{Config, Env, Interpreter, StdConsole};

use crate::common::{render_diagnostics, render_runtime_error};

#[derive(Parser, Debug)]
#[command(name = "turing", version, about = "Run Turing pseudocode programs")]
struct Cli {
    /// Reject implicit conversions between strings and numbers
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program, reading LIRE answers from stdin
    Run { path: PathBuf },
    /// Evaluate a single expression and print its value
    Eval { expr: String },
    /// Print the statement tree of a program as JSON
    Ast { path: PathBuf },
    /// Report diagnostics without running anything
    Check { path: PathBuf },
    /// Start the interactive loop (the default)
    Repl,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set; stdout belongs to the program
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn fail(msg: String) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    process::exit(1);
}

fn read_source(path: &Path) -> String {
    if !path.exists() {
        fail(format!("File not found: {}", path.display()));
    }
    fs::read_to_string(path).unwrap_or_else(|e| fail(format!("Failed to read {}: {}", path.display(), e)))
}

/// Parses `path`, exiting with the rendered diagnostics if there are any.
fn load_program(path: &Path) -> (String, Vec<turing_syntax::ast::Stmt>) {
    let src = read_source(path);
    let (program, diagnostics) = turing_parser::parse_program(&src);
    if !diagnostics.is_empty() {
        render_diagnostics("Parse error", &src, &diagnostics);
        process::exit(1);
    }
    (src, program)
}

fn run_file(path: &Path, config: Config) {
    let (_, program) = load_program(path);
    tracing::debug!(path = %path.display(), statements = program.len(), "running");
    let mut console = StdConsole;
    let mut interp = Interpreter::new(config, &mut console);
    let mut env = Env::new();
    if let Err(e) = interp.run_with_env(&program, &mut env) {
        render_runtime_error(&e);
        process::exit(1);
    }
}

fn eval_expr(expr: &str, config: Config) {
    let (parsed, diagnostics) = turing_parser::parse(expr);
    if !diagnostics.is_empty() {
        render_diagnostics("Parse error", expr, &diagnostics);
        process::exit(1);
    }
    let Some(parsed) = parsed else {
        fail("Empty expression".to_string());
    };
    match turing_interpreter::evaluate(&parsed, &Env::new(), config.strict_typing) {
        Ok(v) => println!("{}", v),
        Err(e) => {
            render_runtime_error(&e);
            process::exit(1);
        }
    }
}

fn dump_ast(path: &Path) {
    let (_, program) = load_program(path);
    match serde_json::to_string_pretty(&program) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Failed to serialize the tree: {}", e)),
    }
}

fn check_file(path: &Path) {
    load_program(path);
    println!("{}: {}", path.display(), "ok".green());
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = Config {
        strict_typing: cli.strict || Config::from_env().strict_typing,
    };

    match cli.command {
        None | Some(Command::Repl) => repl::start_repl(config),
        Some(Command::Run { path }) => run_file(&path, config),
        Some(Command::Eval { expr }) => eval_expr(&expr, config),
        Some(Command::Ast { path }) => dump_ast(&path),
        Some(Command::Check { path }) => check_file(&path),
    }
}
