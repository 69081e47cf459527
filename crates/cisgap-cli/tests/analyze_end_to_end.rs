//! End-to-end runs of `analyze` followed by `report`, driven through the
//! library entry points with a config file and a user remediation catalog.

use std::io::Cursor;

use cisgap_cli::analyze::{run_analyze_with, AnalyzeArgs};
use cisgap_cli::config::CliConfig;
use cisgap_cli::controls::{run_controls_with, ControlsArgs};
use cisgap_cli::pipeline::load_record;
use cisgap_cli::report::{run_report, ReportArgs};

const BENCHMARK_CSV: &str = "\
control,expected
Strong Password Policy,implemented
Disable LOAD DATA LOCAL INFILE,0
Error Limit,3
Audit Logging,ON
Encryption,implemented
";

const BASELINE_TXT: &str = "\
# production my.cnf review
Strong Password Policy: implemented
Disable LOAD DATA LOCAL INFILE: 1
Error Limit: 10
Audit Logging: OFF
";

#[test]
fn analyze_then_report_with_custom_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    std::fs::write(root.join("cis_mysql.csv"), BENCHMARK_CSV).unwrap();
    std::fs::write(root.join("baseline.txt"), BASELINE_TXT).unwrap();
    std::fs::write(
        root.join("remediations.yaml"),
        "controls:\n  Audit Logging:\n    non_compliant: \"Load the audit_log plugin and set audit_log={expected}\"\n",
    )
    .unwrap();
    std::fs::write(
        root.join("cisgap.yaml"),
        "report_file: mysql_report.html\nchart_file: mysql_charts.svg\nremediation_catalog: remediations.yaml\n",
    )
    .unwrap();

    let config = CliConfig::load(Some(&root.join("cisgap.yaml")))
        .unwrap()
        .with_output_dir(Some(root.join("first")));

    let args = AnalyzeArgs {
        baseline: Some(root.join("baseline.txt")),
        benchmark: Some(root.join("cis_mysql.csv")),
        controls: None,
        example_dataset: false,
        save_results: Some(root.join("run.json")),
    };
    let code = run_analyze_with(&args, &config, &mut Cursor::new(""), &mut Vec::new()).unwrap();
    assert_eq!(code, 0);

    let html = std::fs::read_to_string(root.join("first").join("mysql_report.html")).unwrap();
    assert!(html.contains("Overall Compliance Score:</strong> 20.00%"));
    assert!(html.contains("Set load-infile=0 in MySQL configuration"));
    assert!(html.contains("Load the audit_log plugin and set audit_log=ON"));
    assert!(html.contains("Configure TLS for database connections"));
    assert!(html.contains("<strong>Non-Compliant Controls:</strong> 3 (60.00%)"));
    assert!(root.join("first").join("mysql_charts.svg").exists());

    // Re-render the saved analysis elsewhere.
    let config = config.with_output_dir(Some(root.join("second")));
    run_report(
        &ReportArgs {
            results: root.join("run.json"),
        },
        &config,
    )
    .unwrap();
    let rerendered =
        std::fs::read_to_string(root.join("second").join("mysql_report.html")).unwrap();
    assert_eq!(rerendered, html);
}

#[test]
fn controls_output_feeds_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("cis_mysql.csv"), BENCHMARK_CSV).unwrap();
    std::fs::write(root.join("baseline.txt"), BASELINE_TXT).unwrap();

    let controls_args = ControlsArgs {
        baseline: Some(root.join("baseline.txt")),
        benchmark: Some(root.join("cis_mysql.csv")),
        example_dataset: false,
    };
    let mut yaml = Vec::new();
    run_controls_with(&controls_args, &mut Cursor::new(""), &mut Vec::new(), &mut yaml).unwrap();
    assert!(String::from_utf8(yaml.clone())
        .unwrap()
        .starts_with("Strong Password Policy:"));
    std::fs::write(root.join("controls.yaml"), &yaml).unwrap();

    let args = AnalyzeArgs {
        baseline: None,
        benchmark: None,
        controls: Some(root.join("controls.yaml")),
        example_dataset: false,
        save_results: Some(root.join("run.json")),
    };
    let config = CliConfig::default().with_output_dir(Some(root.to_path_buf()));
    let code = run_analyze_with(&args, &config, &mut Cursor::new(""), &mut Vec::new()).unwrap();
    assert_eq!(code, 0);

    let record = load_record(&root.join("run.json")).unwrap();
    assert_eq!(record.result.total, 5);
    assert_eq!(record.result.compliant, vec!["Strong Password Policy"]);
    assert_eq!(record.result.missing, vec!["Encryption"]);
}
