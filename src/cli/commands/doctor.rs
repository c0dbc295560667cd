//! Doctor command implementation.

use super::CommandContext;
use crate::config::{self, Settings};
use crate::error::Result;
use itrack_lib::{FileSlot, IssuePersistence, SlotReport};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
struct DoctorReport {
    ok: bool,
    checks: Vec<CheckResult>,
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &str,
    status: CheckStatus,
    message: Option<String>,
    details: Option<serde_json::Value>,
) {
    checks.push(CheckResult {
        name: name.to_string(),
        status,
        message,
        details,
    });
}

fn has_error(checks: &[CheckResult]) -> bool {
    checks
        .iter()
        .any(|check| matches!(check.status, CheckStatus::Error))
}

fn print_report(report: &DoctorReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("itrack doctor");
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Error => "ERROR",
        };
        if let Some(message) = &check.message {
            println!("{label} {}: {}", check.name, message);
        } else {
            println!("{label} {}", check.name);
        }
    }
    Ok(())
}

fn check_slot(report: &SlotReport, checks: &mut Vec<CheckResult>) {
    if report.present {
        push_check(
            checks,
            "slot.present",
            CheckStatus::Ok,
            None,
            Some(serde_json::json!({ "key": report.key, "bytes": report.bytes })),
        );
    } else {
        push_check(
            checks,
            "slot.present",
            CheckStatus::Warn,
            Some(format!(
                "No stored value under '{}'; the initial issues are shown until the first change",
                report.key
            )),
            None,
        );
        return;
    }

    match &report.parsed {
        Ok(count) => push_check(
            checks,
            "slot.parse",
            CheckStatus::Ok,
            Some(format!("{count} issue(s)")),
            None,
        ),
        Err(reason) => push_check(
            checks,
            "slot.parse",
            CheckStatus::Error,
            Some(format!("Stored issues are unreadable: {reason}")),
            None,
        ),
    }

    if !report.duplicate_ids.is_empty() {
        push_check(
            checks,
            "slot.duplicate_ids",
            CheckStatus::Warn,
            Some(format!("Duplicate ids: {}", report.duplicate_ids.join(", "))),
            Some(serde_json::json!({ "ids": report.duplicate_ids })),
        );
    }
}

fn check_leftover_temp(slot: &FileSlot, key: &str, checks: &mut Vec<CheckResult>) {
    let Ok(path) = slot.path_for(key) else {
        return;
    };
    let tmp = path.with_extension("json.tmp");
    if tmp.exists() {
        push_check(
            checks,
            "slot.temp_file",
            CheckStatus::Warn,
            Some(format!(
                "Leftover {} from an interrupted write",
                tmp.display()
            )),
            None,
        );
    }
}

fn run_checks(workspace: &Path, ctx: &CommandContext, checks: &mut Vec<CheckResult>) {
    push_check(
        checks,
        "workspace",
        CheckStatus::Ok,
        Some(workspace.display().to_string()),
        None,
    );

    let settings = match config::load_config(workspace, &ctx.overrides) {
        Ok(settings) => {
            push_check(checks, "config", CheckStatus::Ok, None, None);
            settings
        }
        Err(err) => {
            push_check(
                checks,
                "config",
                CheckStatus::Error,
                Some(err.to_string()),
                None,
            );
            Settings::default()
        }
    };

    let slot = FileSlot::new(workspace);
    let persistence =
        IssuePersistence::new(slot.clone()).with_key(settings.storage_key.clone());
    match persistence.inspect() {
        Ok(report) => check_slot(&report, checks),
        Err(err) => push_check(
            checks,
            "slot.read",
            CheckStatus::Error,
            Some(err.to_string()),
            Some(serde_json::json!({ "key": settings.storage_key })),
        ),
    }
    check_leftover_temp(&slot, &settings.storage_key, checks);
}

/// Execute the doctor command.
///
/// Exits with status 1 when any check fails.
///
/// # Errors
///
/// Returns an error if the report cannot be printed.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let mut checks = Vec::new();
    match ctx.workspace() {
        Ok(workspace) => run_checks(&workspace, ctx, &mut checks),
        Err(err) => push_check(
            &mut checks,
            "workspace",
            CheckStatus::Error,
            Some(err.to_string()),
            None,
        ),
    }

    let report = DoctorReport {
        ok: !has_error(&checks),
        checks,
    };
    print_report(&report, ctx.json)?;

    if !report.ok {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn find_check<'a>(checks: &'a [CheckResult], name: &str) -> Option<&'a CheckResult> {
        checks.iter().find(|check| check.name == name)
    }

    fn checks_for(workspace: &Path) -> Vec<CheckResult> {
        let mut checks = Vec::new();
        run_checks(workspace, &CommandContext::default(), &mut checks);
        checks
    }

    #[test]
    fn test_missing_slot_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let checks = checks_for(temp.path());

        let present = find_check(&checks, "slot.present").expect("present check");
        assert!(matches!(present.status, CheckStatus::Warn));
        assert!(find_check(&checks, "slot.parse").is_none());
        assert!(!has_error(&checks));
    }

    #[test]
    fn test_malformed_slot_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("issues.json"), "[{\"id\": 1}]").unwrap();
        let checks = checks_for(temp.path());

        let parse = find_check(&checks, "slot.parse").expect("parse check");
        assert!(matches!(parse.status, CheckStatus::Error));
        assert!(has_error(&checks));
    }

    #[test]
    fn test_healthy_slot_and_leftover_temp() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("issues.json"), "[]").unwrap();
        fs::write(temp.path().join("issues.json.tmp"), "[").unwrap();
        let checks = checks_for(temp.path());

        let parse = find_check(&checks, "slot.parse").expect("parse check");
        assert!(matches!(parse.status, CheckStatus::Ok));
        let tmp = find_check(&checks, "slot.temp_file").expect("temp check");
        assert!(matches!(tmp.status, CheckStatus::Warn));
        assert!(!has_error(&checks));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.yaml"), "default-priority: urgent\n").unwrap();
        let checks = checks_for(temp.path());

        let config = find_check(&checks, "config").expect("config check");
        assert!(matches!(config.status, CheckStatus::Error));
    }
}
