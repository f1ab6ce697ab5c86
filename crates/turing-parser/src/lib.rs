pub mod parser;
pub mod program;

pub use parser::Parser;
pub use program::{block_depth, parse_program, ProgramParser};

use turing_syntax::ast::Expr;
use turing_syntax::error::Diagnostic;

/// Parses one expression from source text.
///
/// Returns the (possibly partial) tree together with every diagnostic. Empty
/// input gives `(None, [])`.
pub fn parse(source: &str) -> (Option<Expr>, Vec<Diagnostic>) {
    let tokens = turing_lexer::tokenize(source);
    let mut parser = Parser::new(tokens);
    let expr = parser.parse();
    (expr, parser.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use turing_syntax::ast::*;

    fn parse_expr_str(input: &str) -> Expr {
        let (expr, diagnostics) = parse(input);
        assert!(diagnostics.is_empty(), "unexpected diagnostics for {:?}: {:?}", input, diagnostics);
        expr.expect("Parsing should produce a tree")
    }

    fn parse_program_str(input: &str) -> Vec<Stmt> {
        let (program, diagnostics) = parse_program(input);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
        program
    }

    fn diagnostics_for(input: &str) -> Vec<Diagnostic> {
        parse(input).1
    }

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn test_literal_expressions() {
        assert_eq!(parse_expr_str("42"), num(42.0));
        assert_eq!(parse_expr_str("2.5"), num(2.5));
        assert_eq!(parse_expr_str("\"bonjour\""), Expr::string("bonjour"));
        assert_eq!(parse_expr_str("somme_1"), Expr::ident("somme_1"));
        assert_eq!(
            parse_expr_str("[1, \"a\", []]"),
            Expr::List(vec![num(1.0), Expr::string("a"), Expr::List(vec![])])
        );
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        assert_eq!(
            parse_expr_str("10 - 4 - 3"),
            Expr::binary(Expr::binary(num(10.0), Op::Sub, num(4.0)), Op::Sub, num(3.0))
        );
    }

    #[test]
    fn test_power_shares_multiplicative_precedence() {
        assert_eq!(
            parse_expr_str("2^3*4"),
            Expr::binary(Expr::binary(num(2.0), Op::Pow, num(3.0)), Op::Mul, num(4.0))
        );
        assert_eq!(
            parse_expr_str("2*3^2"),
            Expr::binary(Expr::binary(num(2.0), Op::Mul, num(3.0)), Op::Pow, num(2.0))
        );
    }

    #[test]
    fn test_operator_precedence_ladder() {
        // a | b XOR c & d == e + f * g
        let expected = Expr::binary(
            Expr::ident("a"),
            Op::Or,
            Expr::binary(
                Expr::ident("b"),
                Op::Xor,
                Expr::binary(
                    Expr::ident("c"),
                    Op::And,
                    Expr::binary(
                        Expr::ident("d"),
                        Op::Eq,
                        Expr::binary(
                            Expr::ident("e"),
                            Op::Add,
                            Expr::binary(Expr::ident("f"), Op::Mul, Expr::ident("g")),
                        ),
                    ),
                ),
            ),
        );
        assert_eq!(parse_expr_str("a OU b XOR c ET d == e + f * g"), expected);
        assert_eq!(parse_expr_str("a | b xor c & d == e + f * g"), expected);
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(parse_expr_str("-x"), Expr::unary(Op::Sub, Expr::ident("x")));
        assert_eq!(
            parse_expr_str("NON NON vrai"),
            Expr::unary(Op::Not, Expr::unary(Op::Not, Expr::ident("vrai")))
        );
        assert_eq!(
            parse_expr_str("-2^2"),
            Expr::binary(Expr::unary(Op::Sub, num(2.0)), Op::Pow, num(2.0))
        );
    }

    #[test]
    fn test_parenthesized_expressions() {
        assert_eq!(
            parse_expr_str("(1 + 2) * 3"),
            Expr::binary(Expr::binary(num(1.0), Op::Add, num(2.0)), Op::Mul, num(3.0))
        );
    }

    #[test]
    fn test_calls_and_indexing_chain() {
        assert_eq!(parse_expr_str("f()"), Expr::call("f", vec![]));
        assert_eq!(
            parse_expr_str("max(a, 2)"),
            Expr::call("max", vec![Expr::ident("a"), num(2.0)])
        );
        assert_eq!(
            parse_expr_str("t[0][1]"),
            Expr::index(Expr::index(Expr::ident("t"), num(0.0)), num(1.0))
        );
        assert_eq!(
            parse_expr_str("f(x)[0]"),
            Expr::index(Expr::call("f", vec![Expr::ident("x")]), num(0.0))
        );
        assert_eq!(
            parse_expr_str("[1, 2][0]"),
            Expr::index(Expr::List(vec![num(1.0), num(2.0)]), num(0.0))
        );
    }

    #[test]
    fn test_call_requires_bare_identifier() {
        let (expr, diagnostics) = parse("f(x)(y)");
        assert_eq!(expr, Some(Expr::call("f", vec![Expr::ident("x")])));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].msg.contains("'('"));
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse_expr_str("2pi"), parse_expr_str("2*pi"));
    }

    #[test]
    fn test_empty_input_is_silent() {
        assert_eq!(parse(""), (None, vec![]));
        assert_eq!(parse("   "), (None, vec![]));
    }

    #[test]
    fn test_error_cases_report_diagnostics() {
        for bad in ["1 +", "(1 + 2", "f(1 2)", "a $ b", "x = 3", "[1, 2", ")", "1 2", "\"open"] {
            assert!(!diagnostics_for(bad).is_empty(), "expected diagnostics for {:?}", bad);
        }
    }

    #[test]
    fn test_partial_tree_on_error() {
        let (expr, diagnostics) = parse("1 + 2 +");
        assert_eq!(expr, Some(Expr::binary(num(1.0), Op::Add, num(2.0))));
        assert_eq!(diagnostics[0].msg, "Unexpected end of input");
        assert_eq!((diagnostics[0].line, diagnostics[0].col), (Some(1), Some(8)));
    }

    #[test]
    fn test_unknown_token_message() {
        let diagnostics = diagnostics_for("a # b");
        assert_eq!(diagnostics[0].msg, "Unknown token '#'");
        assert_eq!(diagnostics[0].col, Some(3));
    }

    #[test]
    fn test_basic_program() {
        let program = parse_program_str(
            "# somme des N premiers entiers
somme = 0
LIRE N
POUR i DE 1 A N FAIRE
    somme = somme + i
FIN POUR
AFFICHER \"Resultat=\" + somme
",
        );
        assert_eq!(
            program,
            vec![
                Stmt::Assign { variable: "somme".to_string(), value: num(0.0) },
                Stmt::Input("N".to_string()),
                Stmt::For {
                    variable: "i".to_string(),
                    start: num(1.0),
                    end: Expr::ident("N"),
                    body: vec![Stmt::Assign {
                        variable: "somme".to_string(),
                        value: Expr::binary(Expr::ident("somme"), Op::Add, Expr::ident("i")),
                    }],
                },
                Stmt::Display(Expr::binary(Expr::string("Resultat="), Op::Add, Expr::ident("somme"))),
            ]
        );
    }

    #[test]
    fn test_control_flow_program() {
        let program = parse_program_str(
            "tant que x < 10 faire
    si x % 2 == 0 alors
        continuer
    sinon
        sortir
    fin si
fin tant que
pour j de 1 à 3
fin",
        );
        assert_eq!(program.len(), 2);
        match &program[0] {
            Stmt::While { body, .. } => match &body[0] {
                Stmt::If { then_body, else_body, .. } => {
                    assert_eq!(then_body, &vec![Stmt::Continue]);
                    assert_eq!(else_body, &Some(vec![Stmt::Break]));
                }
                other => panic!("Expected If, got {:?}", other),
            },
            other => panic!("Expected While, got {:?}", other),
        }
        assert!(matches!(&program[1], Stmt::For { variable, body, .. } if variable == "j" && body.is_empty()));
    }

    #[test]
    fn test_functions_and_calls() {
        let program = parse_program_str(
            "FONCTION carre(x)
    RETOURNER x * x
FIN
FONCTION rien()
    RETOURNER
FIN
afficher_tout(1, [2])",
        );
        assert_eq!(
            program[0],
            Stmt::Func(Function {
                name: "carre".to_string(),
                params: vec!["x".to_string()],
                body: vec![Stmt::Return(Some(Expr::binary(Expr::ident("x"), Op::Mul, Expr::ident("x"))))],
            })
        );
        assert_eq!(
            program[1],
            Stmt::Func(Function { name: "rien".to_string(), params: vec![], body: vec![Stmt::Return(None)] })
        );
        assert_eq!(
            program[2],
            Stmt::Call { callee: "afficher_tout".to_string(), args: vec![num(1.0), Expr::List(vec![num(2.0)])] }
        );
    }

    #[test]
    fn test_program_diagnostics() {
        let (_, diagnostics) = parse_program("SI x ALORS\nAFFICHER x");
        assert!(diagnostics.iter().any(|d| d.msg.contains("Missing 'FIN'")));

        let (_, diagnostics) = parse_program("FIN");
        assert_eq!(diagnostics[0].msg, "'FIN' without an open block");

        let (program, diagnostics) = parse_program("AFFICHER 1 +\nAFFICHER 2");
        assert_eq!(program, vec![Stmt::Display(num(2.0))]);
        assert_eq!(diagnostics[0].line, Some(1));

        let (_, diagnostics) = parse_program("POUR i DE 1 FAIRE\nFIN");
        assert!(diagnostics[0].msg.contains("'A'"));

        let (_, diagnostics) = parse_program("x + 1");
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_bad_condition_keeps_block_structure() {
        let (program, diagnostics) = parse_program("SI ) ALORS\n  AFFICHER 1\nFIN\nAFFICHER 2");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(program, vec![Stmt::Display(num(2.0))]);
    }

    #[test]
    fn test_block_depth() {
        assert_eq!(block_depth("SI x ALORS"), 1);
        assert_eq!(block_depth("POUR i DE 1 A 2\nTANT QUE 1\nFIN"), 1);
        assert_eq!(block_depth("FONCTION f()\nFIN"), 0);
    }

    #[test]
    fn test_printed_program_reparses() {
        let source = "FONCTION f(a, b)
    SI a > b ALORS
        RETOURNER a
    SINON
        RETOURNER [a, b][1]
    FIN SI
FIN FONCTION
POUR i DE 1 A 2 + 1 FAIRE
    AFFICHER f(i, 2) ^ 2 * -i
FIN POUR
";
        let program = parse_program_str(source);
        let printed = turing_syntax::printer::format_program(&program);
        assert_eq!(parse_program_str(&printed), program);
    }

    #[test]
    fn test_loop_bounds_may_use_variable_a() {
        let program = parse_program_str("a = 1\nb = 3\nPOUR i DE a A b\n    AFFICHER i\nFIN\n");
        assert_eq!(
            program[2],
            Stmt::For {
                variable: "i".to_string(),
                start: Expr::ident("a"),
                end: Expr::ident("b"),
                body: vec![Stmt::Display(Expr::ident("i"))],
            }
        );

        let program = parse_program_str("POUR i DE a + 1 A 10 FAIRE\nFIN");
        assert!(matches!(
            &program[0],
            Stmt::For { start: Expr::BinOp { .. }, end: Expr::Number(n), .. } if *n == 10.0
        ));

        let program = parse_program_str("POUR i DE 1 A a FAIRE\nFIN");
        assert!(matches!(&program[0], Stmt::For { end: Expr::Identifier(name), .. } if name == "a"));

        let program = parse_program_str("POUR i DE A A 3\nFIN");
        assert!(matches!(&program[0], Stmt::For { start: Expr::Identifier(name), .. } if name == "A"));
    }

    #[test]
    fn test_conditions_may_end_with_keyword_named_variables() {
        let program = parse_program_str("SI x == alors\n    AFFICHER 1\nFIN");
        assert!(matches!(
            &program[0],
            Stmt::If { condition: Expr::BinOp { right, .. }, .. } if **right == Expr::ident("alors")
        ));
        let program = parse_program_str("TANT QUE a < faire FAIRE\nFIN");
        assert!(matches!(
            &program[0],
            Stmt::While { condition: Expr::BinOp { right, .. }, .. } if **right == Expr::ident("faire")
        ));
    }

    #[test]
    fn test_nesting_limit_is_a_diagnostic() {
        let ok = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(parse_expr_str(&ok), Expr::Number(1.0));

        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let (expr, diagnostics) = parse(&deep);
        assert!(expr.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].msg.contains("nested"));

        let (_, diagnostics) = parse(&format!("{}x", "-".repeat(10_000)));
        assert_eq!(diagnostics.len(), 1);

        let (program, diagnostics) = parse_program(&format!("AFFICHER {}\nAFFICHER 2", "[".repeat(500)));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(program, vec![Stmt::Display(Expr::Number(2.0))]);
    }
}
