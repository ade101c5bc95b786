//! CLI integration tests for mysql-pg-convert.
//!
//! These tests verify command-line argument parsing, help output,
//! conversion through files and standard streams, and exit codes for
//! various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the mysql-pg-convert binary.
fn cmd() -> Command {
    Command::cargo_bin("mysql-pg-convert").unwrap()
}

const DUMP: &str = "\
-- MySQL dump 10.13
DROP TABLE IF EXISTS \"users\";
CREATE TABLE \"users\" (
  \"id\" int(11) NOT NULL AUTO_INCREMENT,
  \"active\" tinyint(1) NOT NULL DEFAULT '1',
  \"born\" date NOT NULL DEFAULT '0000-00-00',
  PRIMARY KEY (\"id\")
) ENGINE=InnoDB DEFAULT CHARSET=utf8;
LOCK TABLES \"users\" WRITE;
INSERT INTO \"users\" VALUES (1,1,'0000-00-00');
UNLOCK TABLES;
";

fn dump_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_arguments() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<INPUT>"))
        .stdout(predicate::str::contains("<OUTPUT>"))
        .stdout(predicate::str::contains("--invalid-date-default"))
        .stdout(predicate::str::contains("--fulltext-config"))
        .stdout(predicate::str::contains("--no-progress"))
        .stdout(predicate::str::contains("--output-json"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mysql-pg-convert"));
}

#[test]
fn test_log_format_default() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_default() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

#[test]
fn test_missing_arguments_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Conversion Tests
// =============================================================================

#[test]
fn test_convert_to_stdout() {
    let input = dump_file(DUMP);

    cmd()
        .args([input.path().to_str().unwrap(), "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-- Converted by mysql-pg-convert\n"))
        .stdout(predicate::str::contains("CREATE TABLE \"users\" ("))
        .stdout(predicate::str::contains("    \"born\" date,\n"))
        .stdout(predicate::str::contains("INSERT INTO \"users\" VALUES (1,1,NULL);"))
        .stdout(predicate::str::contains("CREATE SEQUENCE \"users_id_seq\";"))
        .stdout(predicate::str::ends_with("\nCOMMIT;\n"))
        .stderr(predicate::str::contains("Conversion completed!"));
}

#[test]
fn test_convert_stdin_to_stdout() {
    cmd()
        .args(["-", "-"])
        .write_stdin(DUMP)
        .assert()
        .success()
        .stdout(predicate::str::contains("TYPE boolean USING CAST(\"active\" as boolean);"));
}

#[test]
fn test_convert_to_file_prints_summary() {
    let input = dump_file(DUMP);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.sql");

    cmd()
        .args([
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            "--no-progress",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tables: 1"))
        .stdout(predicate::str::contains("Inserts: 1"));

    let script = std::fs::read_to_string(&output).unwrap();
    assert!(script.contains("-- Sequences --\nCREATE SEQUENCE \"users_id_seq\";\n"));
}

#[test]
fn test_output_json_report() {
    let input = dump_file("SET NAMES utf8;\n");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.sql");

    let assert = cmd()
        .args([
            input.path().to_str().unwrap(),
            output.to_str().unwrap(),
            "--no-progress",
            "--output-json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["tables"], 0);
    assert_eq!(report["skipped_lines"][0]["line"], "SET NAMES utf8;");
}

#[test]
fn test_invalid_date_default_flag() {
    let input = dump_file(DUMP);

    cmd()
        .args([input.path().to_str().unwrap(), "-", "--invalid-date-default", "1970-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"born\" date NOT NULL DEFAULT '1970-01-01',"))
        .stdout(predicate::str::contains("VALUES (1,1,'1970-01-01');"));
}

#[test]
fn test_config_file_is_applied() {
    let input = dump_file(DUMP);
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "invalid_date_default: '2000-01-01'").unwrap();

    cmd()
        .args([
            "-c",
            config.path().to_str().unwrap(),
            input.path().to_str().unwrap(),
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("VALUES (1,1,'2000-01-01');"));
}

#[test]
fn test_long_names_and_partitioned_table() {
    let table = "t".repeat(64);
    let column = "c".repeat(64);
    let input = dump_file(&format!(
        "CREATE TABLE \"{t}\" (\n  \"{c}\" enum('a','b') NOT NULL\n) ENGINE=InnoDB\n\
         /*!50100 PARTITION BY KEY () PARTITIONS 4 */;\n\
         INSERT INTO \"{t}\" VALUES ('a');\n",
        t = table,
        c = column
    ));

    cmd()
        .args([input.path().to_str().unwrap(), "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "CREATE TYPE \"{}_{}\" AS ENUM ('a','b');",
            table, column
        )))
        .stdout(predicate::str::contains(format!("INSERT INTO \"{}\" VALUES ('a');", table)))
        .stdout(predicate::str::ends_with("\nCOMMIT;\n"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_input_exits_with_code_7() {
    cmd()
        .args(["nonexistent_dump_file.sql", "-"])
        .assert()
        .code(7); // EXIT_IO_ERROR - file not found
}

#[test]
fn test_missing_config_exits_with_code_7() {
    let input = dump_file(DUMP);

    cmd()
        .args([
            "--config",
            "nonexistent_config_file.yaml",
            input.path().to_str().unwrap(),
            "-",
        ])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let input = dump_file(DUMP);
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "invalid: yaml: content: [").unwrap();

    cmd()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            input.path().to_str().unwrap(),
            "-",
        ])
        .assert()
        .code(1); // EXIT_CONFIG_ERROR
}

#[test]
fn test_invalid_date_default_exits_with_code_1() {
    let input = dump_file(DUMP);

    cmd()
        .args([input.path().to_str().unwrap(), "-", "--invalid-date-default", "yesterday"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_log_format_exits_with_code_1() {
    let input = dump_file(DUMP);

    cmd()
        .args([input.path().to_str().unwrap(), "-", "--log-format", "xml"])
        .assert()
        .code(1);
}

#[test]
fn test_unterminated_table_exits_with_code_3() {
    let input = dump_file("CREATE TABLE \"t\" (\n\"a\" int(11)\n");

    cmd()
        .args([input.path().to_str().unwrap(), "-"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("COMMIT;").not())
        .stderr(predicate::str::contains("\"t\""));
}

#[test]
fn test_null_byte_table_name_exits_with_code_4() {
    let input = dump_file("CREATE TABLE \"a\0b\" (\n);\n");

    cmd()
        .args([input.path().to_str().unwrap(), "-"])
        .assert()
        .code(4);
}
