//! Integration tests for the MoldMaster CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a moldmaster command with a clean environment
fn moldmaster() -> Command {
    let mut cmd = Command::cargo_bin("moldmaster").unwrap();
    cmd.env_remove("MOLDMASTER_PASSPHRASE");
    cmd.env_remove("GEMINI_API_KEY");
    cmd
}

/// Helper to create a test workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    moldmaster()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Extract the first whitespace-delimited token with the given prefix,
/// trimming surrounding parentheses.
fn extract_id(output: &[u8], prefix: &str) -> String {
    let stdout = String::from_utf8_lossy(output);
    stdout
        .split_whitespace()
        .map(|w| w.trim_matches(|c| c == '(' || c == ')'))
        .find(|w| w.starts_with(prefix))
        .map(String::from)
        .unwrap_or_default()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help_displays() {
    moldmaster()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("injection-mold maintenance"));
}

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();
    moldmaster()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized MoldMaster workspace"));
    assert!(tmp.path().join(".moldmaster/config.yaml").exists());
}

#[test]
fn test_init_fails_if_workspace_exists() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_fail_outside_workspace() {
    let tmp = TempDir::new().unwrap();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a MoldMaster workspace"));
}

// ============================================================================
// Dashboard and seed data
// ============================================================================

#[test]
fn test_status_shows_seeded_counts() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."))
        .stdout(predicate::str::contains("Total:     3"))
        .stdout(predicate::str::contains("Active:    2"))
        .stdout(predicate::str::contains("In repair: 1"));
}

#[test]
fn test_mold_list_shows_seed_inventory() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Корпус Телефон A1"))
        .stdout(predicate::str::contains("MOLD-2022-452"))
        .stdout(predicate::str::contains("3 mold(s)"));
}

#[test]
fn test_mold_list_search_filters() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "list", "--search", "капачка"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Капачка Бутилка V2"))
        .stdout(predicate::str::contains("1 mold(s)"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "list", "--search", "несъществуваща"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 mold(s)"));
}

// ============================================================================
// Molds
// ============================================================================

#[test]
fn test_mold_new_persists() {
    let tmp = setup_workspace();
    let output = moldmaster()
        .current_dir(tmp.path())
        .args([
            "mold",
            "new",
            "--name",
            "Кофичка Кисело Мляко",
            "--serial",
            "MOLD-2025-009",
            "--cavities",
            "8",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = extract_id(&output.stdout, "MOLD-");
    assert!(!id.is_empty());

    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Кофичка Кисело Мляко"))
        .stdout(predicate::str::contains("4 mold(s)"));
}

#[test]
fn test_mold_new_defaults_blank_fields() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Нова Матрица"));
}

#[test]
fn test_seeded_mold_id_stays_valid_across_invocations() {
    let tmp = setup_workspace();
    let output = moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", "MOLD-2023-001"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = extract_id(&output.stdout, "MOLD-");
    assert_ne!(id, "MOLD-2023-001");

    // The seeded id must still address the same mold in a later process
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Корпус Телефон A1"));
}

#[test]
fn test_mold_new_with_image_shown() {
    let tmp = setup_workspace();
    let output = moldmaster()
        .current_dir(tmp.path())
        .args([
            "mold",
            "new",
            "--name",
            "Видима Матрица",
            "--image",
            "molds/vidima.png",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = extract_id(&output.stdout, "MOLD-");

    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("molds/vidima.png"));
}

#[test]
fn test_mold_show_by_serial() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", "MOLD-2021-112"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Основа Стол Б-12"))
        .stdout(predicate::str::contains("В Ремонт"))
        .stdout(predicate::str::contains("Петър Петров"));
}

#[test]
fn test_mold_set_status() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "set-status", "MOLD-2023-001", "retired"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Бракувана"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", "MOLD-2023-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Бракувана"));
}

#[test]
fn test_mold_reference_not_found() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", "NO-SUCH-MOLD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mold matches"));
}

#[test]
fn test_mold_analyze_requires_api_key() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "analyze", "MOLD-2023-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

// ============================================================================
// Repairs
// ============================================================================

#[test]
fn test_repair_log_forces_mold_active() {
    let tmp = setup_workspace();
    // Seed mold 3 is in repair; logging a repair returns it to service
    moldmaster()
        .current_dir(tmp.path())
        .args([
            "repair",
            "log",
            "MOLD-2021-112",
            "--description",
            "Подмяна на нагревател",
            "--technician",
            "Иван Иванов",
            "--hours",
            "4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("returned to service"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["mold", "show", "MOLD-2021-112"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Активна"));

    moldmaster()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("In repair: 0"));
}

#[test]
fn test_repair_log_splits_parts_list() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args([
            "repair",
            "log",
            "MOLD-2022-452",
            "--description",
            "Профилактика",
            "--parts",
            "Изхвъргач 12мм, , Пружина ,",
        ])
        .assert()
        .success();

    moldmaster()
        .current_dir(tmp.path())
        .args(["repair", "list", "--mold", "MOLD-2022-452"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Изхвъргач 12мм, Пружина"))
        .stdout(predicate::str::contains("1 repair(s)"));
}

#[test]
fn test_repair_log_technician_falls_back_to_generic_label() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["repair", "log", "MOLD-2022-452", "--description", "Оглед"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Служител"));
}

#[test]
fn test_repair_log_technician_defaults_to_session_user() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["login", "admin@moldmaster.pro", "--passphrase", "Gotmar123"])
        .assert()
        .success();

    moldmaster()
        .current_dir(tmp.path())
        .args(["repair", "log", "MOLD-2022-452", "--description", "Оглед"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@moldmaster.pro"));
}

#[test]
fn test_repair_list_newest_first() {
    let tmp = setup_workspace();
    let output = moldmaster()
        .current_dir(tmp.path())
        .args(["repair", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let feb_2024 = stdout.find("2024-02-01").expect("2024 repair missing");
    let nov_2023 = stdout.find("2023-11-15").expect("2023 repair missing");
    assert!(feb_2024 < nov_2023, "repairs not sorted date-descending");
}

// ============================================================================
// Spare parts
// ============================================================================

#[test]
fn test_part_list_shows_seed_stock() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EJ-12-HASCO"))
        .stdout(predicate::str::contains("3 part(s)"));
}

#[test]
fn test_part_order_adds_ten_units() {
    let tmp = setup_workspace();
    // Нагревател Дюза starts at 5 units
    moldmaster()
        .current_dir(tmp.path())
        .args(["part", "order", "HEAT-NZL-40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Симулирана поръчка"))
        .stdout(predicate::str::contains("Наличност: 15"));
}

#[test]
fn test_part_new_and_low_stock_filter() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args([
            "part",
            "new",
            "--name",
            "Пружина 8мм",
            "--sku",
            "SPR-8",
            "--quantity",
            "2",
            "--min-quantity",
            "5",
        ])
        .assert()
        .success();

    moldmaster()
        .current_dir(tmp.path())
        .args(["part", "list", "--low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SPR-8"))
        .stdout(predicate::str::contains("1 part(s)"));
}

#[test]
fn test_part_order_unknown_reference() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["part", "order", "NO-SUCH-SKU"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No spare part matches"));
}

// ============================================================================
// Roster and login
// ============================================================================

#[test]
fn test_user_list_shows_seed_roster() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("petar.simeonov@gotmar.com"))
        .stdout(predicate::str::contains("4 user(s)"));
}

#[test]
fn test_user_add_and_remove() {
    let tmp = setup_workspace();
    let output = moldmaster()
        .current_dir(tmp.path())
        .args(["user", "add", "nov.slujitel@gotmar.com", "--role", "user"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = extract_id(&output.stdout, "USER-");
    assert!(!id.is_empty());

    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 user(s)"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "remove", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 user(s)"));
}

#[test]
fn test_user_remove_seeded_user_by_email() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "remove", "Petar.Simeonov@gotmar.com", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("petar.simeonov@gotmar.com"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 user(s)"))
        .stdout(predicate::str::contains("petar.simeonov").not());
}

#[test]
fn test_user_remove_unknown_reference() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "remove", "nobody@gotmar.com", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody@gotmar.com"));
}

#[test]
fn test_user_add_rejects_invalid_email() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "add", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("валиден имейл"));

    moldmaster()
        .current_dir(tmp.path())
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 user(s)"));
}

#[test]
fn test_login_case_insensitive_email() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["login", "Admin@MoldMaster.PRO", "--passphrase", "Gotmar123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@moldmaster.pro"));

    moldmaster()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"));
}

#[test]
fn test_login_wrong_passphrase() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["login", "admin@moldmaster.pro", "--passphrase", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Грешна парола"));
}

#[test]
fn test_login_unknown_email() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["login", "x@y.com", "--passphrase", "Gotmar123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("оторизиран достъп"));
}

#[test]
fn test_logout_clears_session() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .args(["login", "admin@moldmaster.pro", "--passphrase", "Gotmar123"])
        .assert()
        .success();

    moldmaster()
        .current_dir(tmp.path())
        .arg("logout")
        .assert()
        .success();

    moldmaster()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_passphrase_override_via_env() {
    let tmp = setup_workspace();
    moldmaster()
        .current_dir(tmp.path())
        .env("MOLDMASTER_PASSPHRASE", "Zavod456")
        .args(["login", "admin@moldmaster.pro", "--passphrase", "Gotmar123"])
        .assert()
        .failure();

    moldmaster()
        .current_dir(tmp.path())
        .env("MOLDMASTER_PASSPHRASE", "Zavod456")
        .args(["login", "admin@moldmaster.pro", "--passphrase", "Zavod456"])
        .assert()
        .success();
}
