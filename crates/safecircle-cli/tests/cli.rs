use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

const ADA: &str = "2d8b83e0-1b7c-4f28-9e1a-1a2d5b1e5e2d";
const GRACE: &str = "3b8b83e0-1b7c-4f28-9e1a-1a2d5b1e5e2d";
const LINUS: &str = "4c8b83e0-1b7c-4f28-9e1a-1a2d5b1e5e2d";

fn write_directory(dir: &Path) -> PathBuf {
    let users = json!([
        {
            "id": ADA,
            "fullname": "Ada Lovelace",
            "username": "ada",
            "email": "ada@example.com",
            "phone": "+1 (202) 555-0173",
            "gender": "Female",
            "emergency_contacts": [GRACE]
        },
        {
            "id": GRACE,
            "fullname": "Grace Hopper",
            "username": "grace",
            "email": "grace@example.com",
            "phone": "+44 20 7946 0958",
            "gender": "Female"
        },
        {
            "id": LINUS,
            "fullname": "Linus Torvalds",
            "username": "linus",
            "email": "linus@example.com",
            "phone": "+358 40 123 4567",
            "gender": "Male",
            "emergency_contacts": [ADA, GRACE]
        }
    ]);
    let path = dir.join("users.json");
    fs::write(&path, serde_json::to_vec_pretty(&users).expect("json")).expect("write directory");
    path
}

fn run_raw(config_home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("safecircle")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(config_home: &Path, args: &[&str]) -> String {
    let output = run_raw(config_home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(config_home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(config_home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_normalize_format_and_equals() {
    let temp = TempDir::new().expect("temp dir");

    let out = run_cmd(
        temp.path(),
        &["normalize", "+1-202-555-0173", "0501234567", "9715012345"],
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["2025550173", "501234567", "9715012345"]);

    let out = run_cmd(temp.path(), &["format", "12025550173"]);
    assert_eq!(out.trim(), "202-555-0173");

    let out = run_cmd(temp.path(), &["equals", "+44 20 7946 0958", "020 7946 0958"]);
    assert_eq!(out.trim(), "true");

    let value = run_cmd_json(temp.path(), &["equals", "2025550173", "2025550174"]);
    assert_eq!(value["equal"], false);
    assert_eq!(value["a_normalized"], "2025550173");
}

#[test]
fn cli_validate_sets_exit_code() {
    let temp = TempDir::new().expect("temp dir");

    let reports = run_cmd_json(temp.path(), &["validate", "2025550173"]);
    assert_eq!(reports[0]["valid"], true);

    let output = run_raw(temp.path(), &["validate", "2025550173", "123"]);
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("123\tinvalid"));
}

#[test]
fn cli_sync_contacts_from_vcf() {
    let temp = TempDir::new().expect("temp dir");
    let directory = write_directory(temp.path());
    let vcf = temp.path().join("contacts.vcf");
    fs::write(
        &vcf,
        "BEGIN:VCARD\nFN:Grace\nTEL;TYPE=CELL:020 7946 0958\nEND:VCARD\nBEGIN:VCARD\nFN:Stranger\nTEL:+1 555 010 9999\nEND:VCARD\n",
    )
    .expect("write vcf");

    let value = run_cmd_json(
        temp.path(),
        &[
            "--directory",
            directory.to_str().expect("path"),
            "sync-contacts",
            "--user",
            ADA,
            "--vcf",
            vcf.to_str().expect("path"),
            "--phone",
            "+358 40 123 4567",
        ],
    );
    let contacts = value["registered_contacts"].as_array().expect("array");
    let names: Vec<&str> = contacts
        .iter()
        .map(|contact| contact["fullname"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Grace Hopper", "Linus Torvalds"]);
    assert_eq!(value["submitted"], 3);
    assert_eq!(value["unmatched"], 1);
}

#[test]
fn cli_check_signup_detects_duplicate_phone() {
    let temp = TempDir::new().expect("temp dir");
    let directory = write_directory(temp.path());
    let dir = directory.to_str().expect("path");

    let output = run_raw(
        temp.path(),
        &[
            "--directory",
            dir,
            "check-signup",
            "--fullname",
            "Someone Else",
            "--email",
            "someone@example.com",
            "--phone",
            "202.555.0173",
            "--gender",
            "Other",
            "--agree-terms",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("phone number already registered"));

    let candidate = run_cmd_json(
        temp.path(),
        &[
            "--directory",
            dir,
            "check-signup",
            "--fullname",
            "Katherine Johnson",
            "--email",
            "KJ@nasa.gov",
            "--phone",
            "+1 757 555 0100",
            "--gender",
            "female",
            "--agree-terms",
        ],
    );
    assert_eq!(candidate["phone"], "7575550100");
    assert_eq!(candidate["email"], "kj@nasa.gov");
    assert_eq!(candidate["gender"], "Female");
}

#[test]
fn cli_emergency_add_list_and_my_people() {
    let temp = TempDir::new().expect("temp dir");
    let directory = write_directory(temp.path());
    let dir = directory.to_str().expect("path");

    let outcome = run_cmd_json(
        temp.path(),
        &[
            "--directory",
            dir,
            "emergency",
            "add",
            "--user",
            GRACE,
            "--contact",
            ADA,
        ],
    );
    assert_eq!(outcome["changed"], true);
    assert_eq!(outcome["notification"]["type"], "added_to_emergency");
    assert_eq!(outcome["notification"]["user"], ADA);
    assert_eq!(
        outcome["notification"]["message"],
        "Grace Hopper added you to their emergency contacts."
    );

    let listed = run_cmd_json(
        temp.path(),
        &["--directory", dir, "emergency", "ls", "--user", LINUS],
    );
    assert_eq!(listed.as_array().expect("array").len(), 2);

    let people = run_cmd_json(
        temp.path(),
        &["--directory", dir, "my-people", "--user", GRACE],
    );
    let ids: Vec<&str> = people
        .as_array()
        .expect("array")
        .iter()
        .map(|person| person["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, vec![ADA, LINUS]);
}

#[test]
fn cli_sos_notifies_emergency_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let directory = write_directory(temp.path());

    let value = run_cmd_json(
        temp.path(),
        &[
            "--directory",
            directory.to_str().expect("path"),
            "sos",
            "--user",
            LINUS,
            "--on",
        ],
    );
    assert_eq!(value["emergency"], true);
    let notifications = value["notifications"].as_array().expect("array");
    assert_eq!(notifications.len(), 2);
    assert!(notifications
        .iter()
        .all(|note| note["message"] == "Linus Torvalds is in emergency!"));
}

#[test]
fn cli_reports_missing_directory_and_unknown_user() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(temp.path(), &["my-people", "--user", ADA]);
    assert_eq!(output.status.code(), Some(3));

    let directory = write_directory(temp.path());
    let output = run_raw(
        temp.path(),
        &[
            "--directory",
            directory.to_str().expect("path"),
            "my-people",
            "--user",
            "5d8b83e0-1b7c-4f28-9e1a-1a2d5b1e5e2d",
        ],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reads_prefix_order_from_config() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("safecircle");
    fs::create_dir_all(&config_dir).expect("config dir");
    let config_path = config_dir.join("config.toml");
    fs::write(&config_path, "[phone]\nprefix_order = \"shortest-first\"\n").expect("write");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&config_path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&config_path, perms).expect("chmod");
    }

    let out = run_cmd(temp.path(), &["normalize", "+1 202 555 0173"]);
    assert_eq!(out.trim(), "2025550173");
}

#[test]
fn cli_sync_contacts_requires_a_source() {
    let temp = TempDir::new().expect("temp dir");
    let directory = write_directory(temp.path());

    let output = run_raw(
        temp.path(),
        &[
            "--directory",
            directory.to_str().expect("path"),
            "sync-contacts",
            "--user",
            ADA,
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--phone"));
}

#[test]
fn cli_warns_about_shared_phone_numbers() {
    let temp = TempDir::new().expect("temp dir");
    let users = json!([
        {
            "id": ADA,
            "fullname": "Ada Lovelace",
            "username": "ada",
            "email": "ada@example.com",
            "phone": "+1 (202) 555-0173",
            "gender": "Female"
        },
        {
            "id": GRACE,
            "fullname": "Grace Hopper",
            "username": "grace",
            "email": "grace@example.com",
            "phone": "202.555.0173",
            "gender": "Female"
        }
    ]);
    let directory = temp.path().join("users.json");
    fs::write(&directory, serde_json::to_vec_pretty(&users).expect("json")).expect("write");

    let output = run_raw(
        temp.path(),
        &[
            "--directory",
            directory.to_str().expect("path"),
            "my-people",
            "--user",
            ADA,
        ],
    );
    assert!(output.status.success(), "command failed: {:?}", output);
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("phone number shared by two users"));
    assert!(stderr.contains(GRACE));
}
