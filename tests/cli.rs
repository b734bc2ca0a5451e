use std::path::PathBuf;
use std::process::Command;

use pretty_assertions::assert_eq;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("_binasm_cli_{}_{name}", std::process::id()))
}

fn binasm(args: &[&str]) -> (i32, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_binasm")).args(args).output().unwrap();
    (out.status.code().unwrap(), String::from_utf8_lossy(&out.stderr).into_owned())
}

fn assemble(tag: &str, src: &str, extra: &[&str]) -> (i32, String, String) {
    let asm = scratch(&format!("{tag}.asm"));
    let bin = scratch(&format!("{tag}.bin"));
    std::fs::write(&asm, src).unwrap();
    let mut args = vec![asm.to_str().unwrap(), bin.to_str().unwrap()];
    args.extend_from_slice(extra);
    let (code, stderr) = binasm(&args);
    let out = std::fs::read_to_string(&bin).unwrap_or_default();
    let _ = std::fs::remove_file(&asm);
    let _ = std::fs::remove_file(&bin);
    (code, out, stderr)
}

#[test]
fn wrong_argument_count() {
    assert_eq!(binasm(&[]).0, 1);
    assert_eq!(binasm(&["only.asm"]).0, 1);
    assert_eq!(binasm(&["a", "b", "c"]).0, 1);
}

#[test]
fn missing_input() {
    let bin = scratch("missing.bin");
    let (code, stderr) = binasm(&["/nonexistent/dir/x.asm", bin.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot open"));
}

#[test]
fn unwritable_output() {
    let asm = scratch("unwritable.asm");
    std::fs::write(&asm, "ADD\n1\n1\n").unwrap();
    let (code, stderr) = binasm(&[asm.to_str().unwrap(), "/nonexistent/dir/out.bin"]);
    let _ = std::fs::remove_file(&asm);
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot open /nonexistent/dir/out.bin"));
}

#[test]
fn basic_profile_success() {
    let (code, out, _) = assemble("ok", "ADD\n101\n11\n", &["--profile", "basic"]);
    assert_eq!(code, 0);
    assert_eq!(out, "00000001\n00000101\n00000011\n");
}

#[test]
fn extended_profile_pads() {
    let (code, out, _) = assemble("pad", "INC\n1\n", &[]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 128);
    assert!(!out.ends_with('\n'));
}

#[test]
fn exit_codes_per_failure() {
    let (code, out, stderr) = assemble("undef", "\nFOO\n", &[]);
    assert_eq!(code, 3);
    assert_eq!(out, "");
    assert!(stderr.contains("line 2"));

    let (code, out, _) = assemble("eof", "ADD\n101\n", &[]);
    assert_eq!(code, 4);
    assert_eq!(out, "00010000\n00000101\n");

    let (code, _, stderr) = assemble("arg", "NOT\n2\n", &["--profile", "basic"]);
    assert_eq!(code, 5);
    assert!(!stderr.contains("line 2"));
}

#[test]
fn bad_table_is_a_config_error() {
    let table = scratch("bad_table.json");
    std::fs::write(&table, r#"[{"mnemonic":"X","opcode":"01","arity":0}]"#).unwrap();
    let (code, _, _) = assemble("table", "X\n", &["--table", table.to_str().unwrap()]);
    let _ = std::fs::remove_file(&table);
    assert_eq!(code, 6);
}

#[test]
fn latin1_comment_assembles() {
    let asm = scratch("latin1.asm");
    let bin = scratch("latin1.bin");
    std::fs::write(&asm, b"ADD ; adi\xE7\xE3o\n101\n11\n").unwrap();
    let (code, _) = binasm(&[asm.to_str().unwrap(), bin.to_str().unwrap(), "--profile", "basic"]);
    let out = std::fs::read_to_string(&bin).unwrap_or_default();
    let _ = std::fs::remove_file(&asm);
    let _ = std::fs::remove_file(&bin);
    assert_eq!(code, 0);
    assert_eq!(out, "00000001\n00000101\n00000011\n");
}
