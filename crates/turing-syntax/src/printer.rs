//! Canonical text form of expressions and programs.
//!
//! The output re-parses to a structurally equal tree: operands that are
//! themselves binary operations are always parenthesized, and operators are
//! printed with their canonical spelling (`&`, `|`, `XOR`, `NON`).

use std::fmt;

use crate::ast::{Expr, Op, Stmt};

/// Formats a number the way the language stringifies it: integral values
/// have no fractional part (`15`, not `15.0`), everything else uses the
/// shortest decimal form.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", n)
}

fn needs_parens(expr: &Expr) -> bool {
    matches!(expr, Expr::BinOp { .. })
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if needs_parens(expr) {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => f.write_str(&format_number(*n)),
            Expr::String(s) => write!(f, "\"{}\"", s),
            Expr::Identifier(name) => f.write_str(name),
            Expr::BinOp { left, right, op } => {
                write_operand(f, left)?;
                write!(f, " {} ", op)?;
                write_operand(f, right)
            }
            Expr::UnaryOp { operand, op } => {
                match op {
                    Op::Not => f.write_str("NON ")?,
                    other => f.write_str(other.symbol())?,
                }
                write_operand(f, operand)
            }
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::ArrayAccess { base, index } => {
                if matches!(**base, Expr::BinOp { .. } | Expr::UnaryOp { .. }) {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "[{}]", index)
            }
            Expr::List(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
        }
    }
}

const INDENT: usize = 4;

fn write_args(out: &mut String, args: &[Expr]) {
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&a.to_string());
    }
}

fn write_body(out: &mut String, body: &[Stmt], depth: usize) {
    for s in body {
        write_stmt(out, s, depth);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    let pad = " ".repeat(depth * INDENT);
    match stmt {
        Stmt::Assign { variable, value } => {
            out.push_str(&format!("{}{} = {}\n", pad, variable, value));
        }
        Stmt::If {
            condition,
            then_body,
            else_body,
        } => {
            out.push_str(&format!("{}SI {} ALORS\n", pad, condition));
            write_body(out, then_body, depth + 1);
            if let Some(else_body) = else_body {
                out.push_str(&format!("{}SINON\n", pad));
                write_body(out, else_body, depth + 1);
            }
            out.push_str(&format!("{}FIN SI\n", pad));
        }
        Stmt::For {
            variable,
            start,
            end,
            body,
        } => {
            out.push_str(&format!("{}POUR {} DE {} A {} FAIRE\n", pad, variable, start, end));
            write_body(out, body, depth + 1);
            out.push_str(&format!("{}FIN POUR\n", pad));
        }
        Stmt::While { condition, body } => {
            out.push_str(&format!("{}TANT QUE {} FAIRE\n", pad, condition));
            write_body(out, body, depth + 1);
            out.push_str(&format!("{}FIN TANT QUE\n", pad));
        }
        Stmt::Func(func) => {
            out.push_str(&format!("{}FONCTION {}({})\n", pad, func.name, func.params.join(", ")));
            write_body(out, &func.body, depth + 1);
            out.push_str(&format!("{}FIN FONCTION\n", pad));
        }
        Stmt::Return(Some(value)) => {
            out.push_str(&format!("{}RETOURNER {}\n", pad, value));
        }
        Stmt::Return(None) => {
            out.push_str(&format!("{}RETOURNER\n", pad));
        }
        Stmt::Call { callee, args } => {
            out.push_str(&pad);
            out.push_str(callee);
            out.push('(');
            write_args(out, args);
            out.push_str(")\n");
        }
        Stmt::Display(value) => {
            out.push_str(&format!("{}AFFICHER {}\n", pad, value));
        }
        Stmt::Input(variable) => {
            out.push_str(&format!("{}LIRE {}\n", pad, variable));
        }
        Stmt::Break => {
            out.push_str(&format!("{}SORTIR\n", pad));
        }
        Stmt::Continue => {
            out.push_str(&format!("{}CONTINUER\n", pad));
        }
        Stmt::Block(body) => write_body(out, body, depth),
    }
}

/// Prints a whole program, one statement per line, blocks indented.
pub fn format_program(stmts: &[Stmt]) -> String {
    let mut out = String::new();
    write_body(&mut out, stmts, 0);
    out
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_stmt(&mut out, self, 0);
        f.write_str(out.trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Function;
    use pretty_assertions::assert_eq;

    #[test]
    fn integral_numbers_drop_the_fraction() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn nested_operations_are_parenthesized() {
        let e = Expr::binary(
            Expr::binary(Expr::Number(2.0), Op::Pow, Expr::Number(3.0)),
            Op::Mul,
            Expr::ident("x"),
        );
        assert_eq!(e.to_string(), "(2 ^ 3) * x");

        let neg = Expr::unary(Op::Sub, Expr::binary(Expr::ident("a"), Op::Add, Expr::ident("b")));
        assert_eq!(neg.to_string(), "-(a + b)");

        let not = Expr::unary(Op::Not, Expr::ident("ok"));
        assert_eq!(not.to_string(), "NON ok");
    }

    #[test]
    fn postfix_forms() {
        let e = Expr::index(Expr::call("f", vec![Expr::ident("x"), Expr::string("s")]), Expr::Number(0.0));
        assert_eq!(e.to_string(), "f(x, \"s\")[0]");
        let l = Expr::List(vec![Expr::Number(1.0), Expr::List(vec![])]);
        assert_eq!(l.to_string(), "[1, []]");
    }

    #[test]
    fn program_layout() {
        let program = vec![
            Stmt::Func(Function {
                name: "carre".to_string(),
                params: vec!["x".to_string()],
                body: vec![Stmt::Return(Some(Expr::binary(Expr::ident("x"), Op::Mul, Expr::ident("x"))))],
            }),
            Stmt::For {
                variable: "i".to_string(),
                start: Expr::Number(1.0),
                end: Expr::Number(3.0),
                body: vec![Stmt::If {
                    condition: Expr::binary(Expr::ident("i"), Op::Eq, Expr::Number(2.0)),
                    then_body: vec![Stmt::Continue],
                    else_body: Some(vec![Stmt::Display(Expr::call("carre", vec![Expr::ident("i")]))]),
                }],
            },
        ];
        let expected = "\
FONCTION carre(x)
    RETOURNER x * x
FIN FONCTION
POUR i DE 1 A 3 FAIRE
    SI i == 2 ALORS
        CONTINUER
    SINON
        AFFICHER carre(i)
    FIN SI
FIN POUR
";
        assert_eq!(format_program(&program), expected);
    }
}
