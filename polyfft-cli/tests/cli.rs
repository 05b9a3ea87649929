use assert_cmd::Command;

fn polyfft() -> Command {
    Command::cargo_bin("polyfft").unwrap()
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn mul_reads_interactive_stdin() {
    let out = stdout_of(polyfft().arg("mul").write_stdin("4\n4 3 2 1\n4 3 2 1\n"));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "[0] = 16", "[1] = 24", "[2] = 25", "[3] = 20", "[4] = 10", "[5] = 4", "[6] = 1"
        ]
    );
}

#[test]
fn mul_with_operands_for_every_algorithm() {
    for alg in ["recursive", "iterative", "staged"] {
        let out = stdout_of(polyfft().args([
            "mul",
            "--lhs",
            "1,1",
            "--rhs",
            "1,-1",
            "--integer",
            "--algorithm",
            alg,
        ]));
        assert_eq!(out, "[0] = 1\n[1] = 0\n[2] = -1\n", "algorithm {}", alg);
    }
}

#[test]
fn mul_prints_reals() {
    let out = stdout_of(polyfft().args(["mul", "--lhs", "0.5", "--rhs", "3"]));
    assert_eq!(out, "[0] = 1.5000\n");
}

#[test]
fn eval_constant_polynomial() {
    let out = stdout_of(polyfft().args(["eval", "--coeffs", "1,0,0,0"]));
    assert_eq!(out.lines().count(), 4);
    assert!(out.lines().all(|l| l.ends_with("= 1.0000 + 0.0000i")));
}

#[test]
fn eval_inverse_scales() {
    let out = stdout_of(polyfft().args(["eval", "--coeffs", "4,4,4,4", "--inverse"]));
    assert_eq!(out.lines().next(), Some("[0] = 4.0000 + 0.0000i"));
}

#[test]
fn bench_prints_one_line_per_size() {
    let out = stdout_of(polyfft().args(["bench", "--max-log", "4", "--iterations", "2"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("[N = 2^1  = 2      ] Time elapsed:"));
    assert!(lines[3].starts_with("[N = 2^4  = 16     ]"));
}

#[test]
fn malformed_input_fails() {
    polyfft()
        .arg("mul")
        .write_stdin("3\n1 2\n")
        .assert()
        .failure();
    polyfft()
        .args(["mul", "--lhs", "1,a", "--rhs", "1"])
        .assert()
        .failure();
    polyfft().args(["eval", "--coeffs", ""]).assert().failure();
}

#[test]
fn bench_rejects_out_of_range_sizes() {
    for max_log in ["0", "31", "64"] {
        polyfft()
            .args(["bench", "--max-log", max_log, "--iterations", "1"])
            .assert()
            .failure();
    }
}
