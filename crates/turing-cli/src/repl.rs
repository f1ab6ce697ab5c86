use std::io::{self, Write};

use owo_colors::OwoColorize;
use turing_interpreter::{Config, Env, Interpreter, StdConsole};
use turing_parser::{block_depth, parse_program};

use crate::common::{render_diagnostics, render_runtime_error};

pub fn start_repl(config: Config) {
    println!("{}", "Turing REPL. Type :help for help, :quit to exit.".bold().green());

    let mut console = StdConsole;
    let mut interpreter = Interpreter::new(config, &mut console);
    let mut env = Env::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "turing> ".cyan().to_string() } else { "...  > ".cyan().to_string() };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            println!("\nAu revoir.");
            break;
        }
        let trimmed = line.trim();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Au revoir.");
                    break;
                }
                ":help" | ":h" => print_help(),
                ":vars" => print_vars(&env),
                ":funcs" => print_funcs(&interpreter),
                ":strict on" => {
                    interpreter.set_strict_typing(true);
                    println!("{}", "Strict typing on.".yellow());
                }
                ":strict off" => {
                    interpreter.set_strict_typing(false);
                    println!("{}", "Strict typing off.".yellow());
                }
                ":strict" => println!("strict typing: {}", interpreter.config().strict_typing),
                ":reset" => {
                    interpreter.reset();
                    env = Env::new();
                    println!("{}", "State reset.".yellow());
                }
                _ => println!("{}", "Unknown command. Type :help.".red()),
            }
            continue;
        }

        buffer.push_str(&line);
        if !is_complete(&buffer) {
            continue;
        }

        let (program, diagnostics) = parse_program(&buffer);
        if diagnostics.is_empty() {
            if let Err(e) = interpreter.run_with_env(&program, &mut env) {
                render_runtime_error(&e);
            }
        } else {
            render_diagnostics("Parse error", &buffer, &diagnostics);
        }
        buffer.clear();
    }
}

fn print_help() {
    println!(
        "{}\n  {}  {}\n  {}  {}",
        "Commands:".bold(),
        ":help".yellow(),
        "Show this help",
        ":quit".yellow(),
        "Exit the REPL"
    );
    println!(
        "  {}  {}\n  {}  {}",
        ":vars".yellow(),
        "List variables",
        ":funcs".yellow(),
        "List defined functions"
    );
    println!(
        "  {}  {}\n  {}  {}",
        ":strict on|off".yellow(),
        "Toggle strict typing",
        ":reset".yellow(),
        "Clear variables and functions"
    );
    println!("Type statements to run them. SI, POUR, TANT QUE and FONCTION blocks run once their FIN is entered.");
}

fn print_vars(env: &Env) {
    let vars = env.vars_snapshot();
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (k, v) in vars {
        println!("{} = {}", k.yellow(), format!("{}", v).bright_blue());
    }
}

fn print_funcs(interp: &Interpreter<'_>) {
    let names = interp.function_names();
    if names.is_empty() {
        println!("{}", "<no functions>".dimmed());
        return;
    }
    for n in names {
        println!("{}", n.yellow());
    }
}

/// A buffer is ready once every block it opens has its `FIN`. Extra `FIN`s
/// count as complete so the parser can report them.
fn is_complete(input: &str) -> bool {
    block_depth(input) <= 0
}

#[cfg(test)]
mod tests {
    use super::is_complete;

    #[test]
    fn waits_for_fin() {
        assert!(is_complete("x = 1\n"));
        assert!(!is_complete("POUR i DE 1 A 3\n    AFFICHER i\n"));
        assert!(is_complete("POUR i DE 1 A 3\n    AFFICHER i\nFIN\n"));
        assert!(!is_complete("SI 1\nSINON\n"));
    }

    #[test]
    fn stray_fin_is_handed_to_the_parser() {
        assert!(is_complete("FIN\n"));
        assert!(is_complete("# POUR commentaire\n"));
    }
}
