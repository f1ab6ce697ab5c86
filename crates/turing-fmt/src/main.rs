use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use turing_parser::parse_program;
use turing_syntax::printer::format_program;

fn usage() -> ! {
    eprintln!("Usage: turing-fmt [--check|--write] <file.alg>");
    process::exit(2);
}

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        usage();
    }
    let mut check = false;
    let mut write = false;
    let mut file = None;
    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--check" => check = true,
            "--write" => write = true,
            _ => {
                file = Some(PathBuf::from(a));
                break;
            }
        }
    }
    let Some(file) = file else { usage() };
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        process::exit(1)
    });

    let (program, diagnostics) = parse_program(&src);
    if !diagnostics.is_empty() {
        for d in &diagnostics {
            eprintln!("Parse error: {}", d);
        }
        process::exit(1);
    }

    let formatted = format_program(&program);

    if check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            process::exit(1);
        }
        println!("{}: ok", file.display());
    } else if write {
        if let Err(e) = fs::write(&file, formatted) {
            eprintln!("Failed to write {}: {}", file.display(), e);
            process::exit(1);
        }
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}
