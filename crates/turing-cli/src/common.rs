use owo_colors::OwoColorize;
use turing_interpreter::{ControlFlowError, EvalError, RuntimeError};
use turing_syntax::error::Diagnostic;

/// Prints every diagnostic with the offending source line and a caret.
pub fn render_diagnostics(kind: &str, source: &str, diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        render_diagnostic(kind, source, d);
    }
}

pub fn render_diagnostic(kind: &str, source: &str, err: &Diagnostic) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = " ".repeat(line_num_str.len() + col.saturating_sub(1));
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
    provide_syntax_suggestions(&err.msg);
}

pub fn render_runtime_error(err: &RuntimeError) {
    eprintln!("{}: {}", "Runtime error".red().bold(), err.to_string().red());
    provide_error_suggestions(err);
}

fn help(msg: &str) {
    eprintln!("{}", format!("Help: {}", msg).yellow());
}

fn example(msg: &str) {
    eprintln!("    {}", msg.bright_black());
}

pub fn provide_error_suggestions(err: &RuntimeError) {
    match err {
        RuntimeError::Eval(EvalError::UndefinedVariable(_)) => {
            help("Give the variable a value before using it.");
            example("Example: x = 0  or  LIRE x");
        }
        RuntimeError::Eval(EvalError::UndefinedFunction(name)) => {
            help("Check the spelling, or define the function before calling it.");
            example("Built-ins: abs, floor, len, max, min, round, sqrt");
            if matches!(name.to_lowercase().as_str(), "afficher" | "print") {
                example("AFFICHER is a statement: AFFICHER x");
            }
        }
        RuntimeError::Eval(EvalError::TypeMismatch(_)) => {
            help("Both operands must have compatible types.");
            example("Numbers: 5 + 3 = 8, text: \"a\" + 1 = \"a1\"");
            example("Without --strict, numeric text like \"4\" is converted automatically");
        }
        RuntimeError::Eval(EvalError::DivisionByZero) => {
            help("You cannot divide by zero.");
            example("Check the divisor first: SI d != 0 ALORS ... FIN");
        }
        RuntimeError::Eval(EvalError::InvalidIndex(_)) => {
            help("Only lists can be indexed, with a whole number in range.");
            example("Lists start at 0: l[0] .. l[len(l) - 1]");
        }
        RuntimeError::Eval(EvalError::ArityMismatch { .. }) => {
            help("The function was called with the wrong number of arguments.");
        }
        RuntimeError::Eval(EvalError::NoReturnValue(_)) => {
            help("The function ended without RETOURNER, so it has no value to use.");
            example("Add RETOURNER <valeur>, or call it on its own line");
        }
        RuntimeError::Eval(EvalError::RecursionLimit(_)) => {
            help("The function keeps calling itself. Check that its stopping case is reached.");
        }
        RuntimeError::ControlFlow(ControlFlowError::LoopControlOutsideLoop(_)) => {
            help("SORTIR and CONTINUER only work inside POUR or TANT QUE.");
        }
        RuntimeError::ControlFlow(ControlFlowError::ReturnOutsideFunction) => {
            help("RETOURNER only works inside a FONCTION block.");
        }
        RuntimeError::Console(_) => {}
    }
}

fn provide_syntax_suggestions(msg: &str) {
    if msg.contains("Missing 'FIN'") {
        help("Every SI, POUR, TANT QUE and FONCTION block ends with FIN.");
    } else if msg.contains("without an open block") || msg.contains("without 'SI'") {
        help("This line closes a block that was never opened.");
    } else if msg.contains("Unknown token") {
        help("This character is not part of the language.");
        example("Text goes between double quotes: \"Bonjour\"");
    } else if msg.contains("'='") {
        help("Use '==' for comparison, '=' for assignment.");
    } else if msg.contains("')'") {
        help("Check that parentheses are balanced.");
    }
}
