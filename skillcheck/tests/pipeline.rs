//! End-to-end validation runs over skill directories on disk

mod common;

use common::{SkillFixture, GOOD_DESCRIPTION};
use skillcheck::{
    validate, CheckCategory, CheckOutcome, Limits, ReportMode, Severity, SkillValidator,
    ValidationReport,
};

fn standard(fixture: &SkillFixture) -> ValidationReport {
    validate(&fixture.package(), ReportMode::Standard)
}

fn failures(report: &ValidationReport) -> Vec<(Severity, CheckCategory, &str)> {
    report
        .outcomes()
        .iter()
        .filter(|o| !o.passed)
        .map(|o| (o.severity, o.category, o.message.as_str()))
        .collect()
}

fn messages(report: &ValidationReport) -> Vec<&str> {
    report.outcomes().iter().map(|o| o.message.as_str()).collect()
}

#[test_log::test]
fn valid_package_passes_without_findings() {
    let fixture = SkillFixture::valid("pdf-tools");
    let report = standard(&fixture);

    assert!(report.overall_pass(), "{}", report.render_text());
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(
        messages(&report),
        vec![
            "SKILL.md found",
            "Valid YAML frontmatter",
            "Valid name: pdf-tools",
            "Valid description (84 chars)",
            "Valid body (3 lines)",
            "Valid Python syntax: extract.py",
        ]
    );
}

#[test_log::test]
fn missing_manifest_is_a_single_fatal_outcome() {
    let fixture = SkillFixture::empty("no-manifest")
        .file("README.md", "# Readme")
        .file("scripts/run.py", "def broken(:\n");
    let report = standard(&fixture);

    assert_eq!(report.outcomes().len(), 1);
    assert!(!report.overall_pass());
    assert_eq!(report.outcomes()[0].category, CheckCategory::Structure);
    assert_eq!(report.outcomes()[0].message, "SKILL.md not found (required)");
}

#[test]
fn miscased_manifest_is_reported_as_such() {
    let fixture = SkillFixture::empty("lower").file("skill.md", "---\nname: lower\n---\n# x\n");
    let report = standard(&fixture);

    assert_eq!(
        messages(&report),
        vec!["SKILL.md must be uppercase (found: skill.md)"]
    );
}

#[test]
fn missing_opening_delimiter_is_fatal() {
    let fixture = SkillFixture::empty("plain").file("SKILL.md", "# Just markdown\n");
    let report = standard(&fixture);

    assert_eq!(report.outcomes().len(), 1);
    assert_eq!(
        report.outcomes()[0].message,
        "SKILL.md must start with '---' (YAML frontmatter delimiter)"
    );
}

#[test_log::test]
fn scalar_metadata_is_a_schema_error_and_checks_continue() {
    let fixture = SkillFixture::with_manifest("scalar", "just a string", "Body without heading\n")
        .file("README.md", "readme");
    let report = standard(&fixture);

    assert!(!report.overall_pass());
    assert_eq!(
        failures(&report),
        vec![
            (
                Severity::Warning,
                CheckCategory::Structure,
                "Forbidden file found: README.md"
            ),
            (
                Severity::Error,
                CheckCategory::Schema,
                "Frontmatter must be a YAML mapping, got: string"
            ),
            (
                Severity::Warning,
                CheckCategory::Content,
                "SKILL.md should have at least one heading"
            ),
        ]
    );
    assert!(messages(&report).contains(&"Valid body (1 lines)"));
}

#[test]
fn invalid_yaml_is_a_schema_error() {
    let fixture = SkillFixture::with_manifest("bad-yaml", "name: [unclosed", "# Body\n");
    let report = standard(&fixture);

    let schema: Vec<&CheckOutcome> = report
        .outcomes()
        .iter()
        .filter(|o| o.category == CheckCategory::Schema)
        .collect();
    assert_eq!(schema.len(), 1);
    assert!(schema[0].is_error());
    assert!(schema[0].message.starts_with("Invalid YAML in frontmatter"));
}

#[test]
fn bad_name_format_errors_and_mismatch_warns() {
    let fixture = SkillFixture::with_manifest(
        "my-skill",
        &format!("name: My_Skill\ndescription: {}", GOOD_DESCRIPTION),
        "# My skill\n",
    );
    let report = standard(&fixture);

    assert_eq!(
        failures(&report),
        vec![
            (
                Severity::Error,
                CheckCategory::Field,
                "'name' must be hyphen-case (lowercase letters, digits, single hyphens): My_Skill"
            ),
            (
                Severity::Warning,
                CheckCategory::Field,
                "'name' (My_Skill) should match directory name (my-skill)"
            ),
        ]
    );
}

#[test]
fn directory_mismatch_alone_does_not_fail() {
    let fixture = SkillFixture::with_manifest(
        "folder",
        &format!("name: pdf-tools\ndescription: {}", GOOD_DESCRIPTION),
        "# PDF\n",
    );
    let report = standard(&fixture);

    assert!(report.overall_pass());
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn description_quality_warnings() {
    let cases = [
        ("For PDFs!!", "'description' too short (<20 chars): 10"),
        (
            "I will help you fill forms when asked",
            "'description' should use third-person voice (found: 'I')",
        ),
        (
            "Extracts text and tables from documents",
            "'description' should say when to use the skill (e.g. 'Use when...')",
        ),
    ];

    for (description, expected) in cases {
        let fixture = SkillFixture::with_manifest(
            "desc",
            &format!("name: desc\ndescription: {}", description),
            "# Desc\n",
        );
        let report = standard(&fixture);
        assert_eq!(
            failures(&report),
            vec![(Severity::Warning, CheckCategory::Field, expected)],
            "description: {}",
            description
        );
        assert!(report.overall_pass());
    }
}

#[test]
fn missing_required_fields_and_unknown_keys() {
    let fixture = SkillFixture::with_manifest("keys", "version: 1.0\nlicense: MIT", "# Keys\n");
    let report = standard(&fixture);

    let errors: Vec<&str> = report.errors().iter().map(|o| o.message.as_str()).collect();
    assert_eq!(
        errors,
        vec![
            "Missing required field: 'name'",
            "Missing required field: 'description'",
            "Unexpected frontmatter field: 'version' (allowed: name, description, license, allowed-tools, metadata)",
        ]
    );
}

#[test]
fn optional_field_shapes_are_checked() {
    let fixture = SkillFixture::with_manifest(
        "shapes",
        &format!(
            "name: shapes\ndescription: {}\nallowed-tools:\n  - Read\n  - Bash\nmetadata: flat",
            GOOD_DESCRIPTION
        ),
        "# Shapes\n",
    );
    let report = standard(&fixture);

    assert_eq!(
        failures(&report),
        vec![(
            Severity::Error,
            CheckCategory::Schema,
            "'metadata' must be a mapping, got: string"
        )]
    );
}

#[test]
fn broken_and_resolved_references() {
    let body = "# Guide\n\nSee [guide](references/missing.md).\n";

    let broken = SkillFixture::with_manifest(
        "refs",
        &format!("name: refs\ndescription: {}", GOOD_DESCRIPTION),
        body,
    );
    let report = standard(&broken);
    assert_eq!(
        failures(&report),
        vec![(
            Severity::Warning,
            CheckCategory::Content,
            "Broken reference: references/missing.md (file not found)"
        )]
    );

    let resolved = SkillFixture::with_manifest(
        "refs",
        &format!("name: refs\ndescription: {}", GOOD_DESCRIPTION),
        body,
    )
    .file("references/missing.md", common::GOOD_REFERENCE);
    assert!(failures(&standard(&resolved)).is_empty());
}

#[test]
fn script_and_reference_findings() {
    let fixture = SkillFixture::valid("assets-check")
        .file("scripts/broken.py", "#!/usr/bin/env python3\n\"\"\"Doc.\"\"\"\ndef f(:\n")
        .file("references/stub.md", "# Stub\n");
    let report = standard(&fixture);

    assert!(!report.overall_pass());
    let found = failures(&report);
    assert_eq!(found.len(), 3);
    assert_eq!(found[0].1, CheckCategory::Syntax);
    assert!(found[0].2.starts_with("Syntax error in broken.py: line "));
    assert_eq!(
        &found[1..],
        &[
            (
                Severity::Warning,
                CheckCategory::Content,
                "Reference file nearly empty: stub.md"
            ),
            (
                Severity::Warning,
                CheckCategory::Content,
                "Reference file has headings but little content: stub.md"
            ),
        ]
    );
    assert_eq!(report.warning_count(), 2);
}

#[test]
fn conventional_dir_as_file_is_error() {
    let fixture = SkillFixture::valid("odd-layout").file("assets", "not a directory");
    let report = standard(&fixture);

    assert_eq!(
        failures(&report),
        vec![(
            Severity::Error,
            CheckCategory::Structure,
            "assets should be a directory, not a file"
        )]
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let fixture = SkillFixture::valid("stable")
        .file("README.md", "x")
        .file("CHANGELOG.md", "x")
        .file("references/b.md", "")
        .file("references/a.md", "");

    let first = standard(&fixture);
    let second = standard(&fixture);
    assert_eq!(first, second);
    assert_eq!(first.render_text(), second.render_text());
    assert_eq!(first.render_json().unwrap(), second.render_json().unwrap());
}

#[test]
fn strict_mode_fails_on_warnings_only() {
    let fixture = SkillFixture::valid("strictly").file("README.md", "readme");

    let standard_report = validate(&fixture.package(), ReportMode::Standard);
    assert_eq!(standard_report.error_count(), 0);
    assert_eq!(standard_report.warning_count(), 1);
    assert!(standard_report.overall_pass());

    let strict_report = validate(&fixture.package(), ReportMode::Strict);
    assert!(!strict_report.overall_pass());
    assert_eq!(strict_report.error_count(), 1);
    assert_eq!(strict_report.outcomes(), standard_report.outcomes());
}

#[test]
fn custom_limits_change_thresholds() {
    let fixture = SkillFixture::valid("limited");
    let limits = Limits {
        description_max_chars: 30,
        ..Limits::default()
    };
    let report = SkillValidator::new(limits, ReportMode::Standard).validate(&fixture.package());

    assert_eq!(
        failures(&report),
        vec![(
            Severity::Error,
            CheckCategory::Field,
            "'description' exceeds 30 characters: 84"
        )]
    );
}

#[test]
fn json_report_carries_verdict_and_outcomes() {
    let fixture = SkillFixture::valid("json-out").file("README.md", "x");
    let report = standard(&fixture);

    let json: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();
    assert_eq!(json["skill"], "json-out");
    assert_eq!(json["overall_pass"], true);
    assert_eq!(json["warning_count"], 1);
    assert_eq!(json["outcomes"][1]["severity"], "warning");
    assert_eq!(json["outcomes"][1]["category"], "structure");
}
