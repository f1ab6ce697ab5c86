use predicates::prelude::*;
use std::path::PathBuf;
use assert_cmd::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

fn turing() -> Command {
    let mut cmd = Command::cargo_bin("turing").unwrap();
    cmd.env_remove("TURING_STRICT").env_remove("RUST_LOG");
    cmd
}

#[test]
fn runs_sum_demo_with_echoed_input() {
    let root = workspace_root();
    turing()
        .arg("run")
        .arg(root.join("demos/somme.alg"))
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout("Variable N = 5\nResult=15\n");
}

#[test]
fn runs_factorial_demo() {
    let root = workspace_root();
    turing()
        .arg("run")
        .arg(root.join("demos/factorielle.alg"))
        .assert()
        .success()
        .stdout(predicate::str::contains("fact(5) = 120"));
}

#[test]
fn runs_loop_control_demo_strictly() {
    let root = workspace_root();
    turing()
        .args(["run", "--strict"])
        .arg(root.join("demos/boucles.alg"))
        .assert()
        .success()
        .stdout("2\n4\nbreak\n6\n42\n");
}

#[test]
fn runs_syracuse_demo() {
    let root = workspace_root();
    turing()
        .arg("run")
        .arg(root.join("demos/syracuse.alg"))
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Etapes: 8"));
}

#[test]
fn check_accepts_every_demo() {
    let root = workspace_root();
    for name in ["somme", "factorielle", "boucles", "syracuse"] {
        turing()
            .arg("check")
            .arg(root.join(format!("demos/{}.alg", name)))
            .assert()
            .success()
            .stdout(predicate::str::contains("ok"));
    }
}

#[test]
fn eval_prints_the_value() {
    turing()
        .args(["eval", "\"Result=\" + 15.0"])
        .assert()
        .success()
        .stdout("Result=15\n");
    turing()
        .args(["eval", "2^3*4 + len([1, 2, 3])"])
        .assert()
        .success()
        .stdout("35\n");
}

#[test]
fn strict_flag_rejects_coercion() {
    turing().args(["eval", "\"4\" * 2"]).assert().success().stdout("8\n");
    turing()
        .args(["eval", "--strict", "\"4\" * 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type mismatch"));
}

#[test]
fn ast_dumps_json() {
    let root = workspace_root();
    turing()
        .arg("ast")
        .arg(root.join("demos/somme.alg"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Input\": \"N\""));
}

#[test]
fn parse_error_is_nonzero() {
    let bad = "POUR i DE 1 A 3\n    AFFICHER (i\n";
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = tmp_dir.path().join("bad.alg");
    std::fs::write(&bad_path, bad).unwrap();

    turing()
        .arg("run")
        .arg(&bad_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("Missing 'FIN'"));
}

#[test]
fn runtime_error_is_nonzero_and_keeps_earlier_output() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("div.alg");
    std::fs::write(&path, "AFFICHER \"avant\"\nx = 1 / 0\nAFFICHER \"apres\"\n").unwrap();

    turing()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stdout("avant\n")
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn missing_file_is_reported() {
    turing()
        .args(["run", "nope/absent.alg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn runaway_recursion_is_reported() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("boucle.alg");
    std::fs::write(&path, "FONCTION f(n)\n    RETOURNER f(n + 1)\nFIN\nAFFICHER f(1)\n").unwrap();

    turing()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recursion limit exceeded"));
}
