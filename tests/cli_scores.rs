use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn command_lw() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    let output = cmd
        .arg("lw")
        .arg("--literal")
        .arg("ACGT")
        .arg("ACGA")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // 7/4 + 1/9
    assert_eq!(stdout, "#lw\n1.861111\n");

    Ok(())
}

#[test]
fn command_lw_identical() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    cmd.arg("lw")
        .arg("tests/fasta/t2.fa")
        .arg("tests/fasta/t2.fa");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.000000"));

    Ok(())
}

#[test]
fn command_rw_defaults_are_maws() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    cmd.arg("rw").arg("--literal").arg("ACGT").arg("ACGA");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("6\t13\t7"));

    Ok(())
}

#[test]
fn command_rw_thresholds() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    let output = cmd
        .arg("rw")
        .arg("--literal")
        .arg("AAAACAAAAC")
        .arg("AAAAGAAAAG")
        .arg("--f1")
        .arg("1")
        .arg("--f2")
        .arg("2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 2);
    assert_eq!(stdout.lines().nth(1).unwrap().split('\t').count(), 3);

    Ok(())
}

#[test]
fn command_present() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let words = temp.path().join("present.txt");

    let mut cmd = Command::cargo_bin("pmaw")?;
    cmd.arg("present")
        .arg("--literal")
        .arg("ACGT")
        .arg("ACGA")
        .arg("--words")
        .arg(&words);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1\t0\t0"));

    assert_eq!(fs::read_to_string(&words)?, "GA\n");

    Ok(())
}

#[test]
fn command_kernel() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    let output = cmd
        .arg("kernel")
        .arg("--literal")
        .arg("ACGTTGCAACGT")
        .arg("ACGAACGTTGCA")
        .arg("-p")
        .arg("2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.starts_with("#N\tD1\tD2\tscore\n"));

    let fields: Vec<&str> = stdout.lines().nth(1).unwrap().split('\t').collect();
    assert_eq!(fields.len(), 4);
    for field in fields {
        field.parse::<f64>()?;
    }

    Ok(())
}

#[test]
fn command_kernel_symmetric() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("pmaw")?;
    let ab = cmd
        .arg("kernel")
        .arg("--literal")
        .arg("ACGTTGCA")
        .arg("AACCGGTT")
        .output()?;

    let mut cmd = Command::cargo_bin("pmaw")?;
    let ba = cmd
        .arg("kernel")
        .arg("--literal")
        .arg("AACCGGTT")
        .arg("ACGTTGCA")
        .output()?;

    let field = |out: &[u8], i: usize| -> f64 {
        String::from_utf8_lossy(out)
            .lines()
            .nth(1)
            .unwrap()
            .split('\t')
            .nth(i)
            .unwrap()
            .parse()
            .unwrap()
    };

    assert!((field(&ab.stdout, 0) - field(&ba.stdout, 0)).abs() < 1e-9);
    assert!((field(&ab.stdout, 1) - field(&ba.stdout, 2)).abs() < 1e-9);
    let (s1, s2) = (field(&ab.stdout, 3), field(&ba.stdout, 3));
    assert!((s1.is_nan() && s2.is_nan()) || (s1 - s2).abs() < 1e-9);

    Ok(())
}
