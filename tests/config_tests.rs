// Config loading and validation tests

use loadstats_analyze::config::AnalyzeConfig;

const VALID_CONFIG: &str = r#"
[files]
summary_prefix = "loadtest-"
monitoring_prefix = "mon_"
io_suffix = ".txt"

[output]
analysis_csv = "runs.csv"
chart_width = 1200
chart_height = 800
charts = false

[analysis]
sort_regions = false
strict_region_names = true
"#;

#[test]
fn test_empty_config_gives_defaults() {
    let config = AnalyzeConfig::load_from_str("").expect("load_from_str");
    assert_eq!(config.files.summary_prefix, "k6-summary-");
    assert_eq!(config.files.summary_suffix, ".json");
    assert_eq!(config.files.monitoring_prefix, "monitoring_");
    assert_eq!(config.files.cpu_memory_prefix, "cpu_memory_");
    assert_eq!(config.files.system_metrics_suffix, ".csv");
    assert_eq!(config.output.analysis_csv, "analysis_summary.csv");
    assert_eq!(config.output.system_chart, "system_metrics_analysis.png");
    assert_eq!((config.output.chart_width, config.output.chart_height), (1800, 1200));
    assert!(config.output.charts);
    assert!(config.analysis.sort_regions);
    assert!(!config.analysis.strict_region_names);
}

#[test]
fn test_config_loads_from_str() {
    let config = AnalyzeConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.files.summary_prefix, "loadtest-");
    assert_eq!(config.files.monitoring_prefix, "mon_");
    assert_eq!(config.files.io_suffix, ".txt");
    // untouched keys in a partial table keep their defaults
    assert_eq!(config.files.io_prefix, "io_");
    assert_eq!(config.output.analysis_csv, "runs.csv");
    assert_eq!(config.output.system_csv, "system_metrics_summary.csv");
    assert_eq!(config.output.chart_width, 1200);
    assert!(!config.output.charts);
    assert!(!config.analysis.sort_regions);
    assert!(config.analysis.strict_region_names);
}

#[test]
fn test_config_validation_rejects_empty_prefix() {
    let bad = VALID_CONFIG.replace("monitoring_prefix = \"mon_\"", "monitoring_prefix = \"\"");
    let err = AnalyzeConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("files.monitoring_prefix"));
}

#[test]
fn test_config_validation_rejects_empty_output_name() {
    let bad = VALID_CONFIG.replace("analysis_csv = \"runs.csv\"", "analysis_csv = \"\"");
    let err = AnalyzeConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("output.analysis_csv"));
}

#[test]
fn test_config_validation_rejects_chart_width_zero() {
    let bad = VALID_CONFIG.replace("chart_width = 1200", "chart_width = 0");
    let err = AnalyzeConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("chart_width"));
}

#[test]
fn test_config_validation_rejects_chart_height_zero() {
    let bad = VALID_CONFIG.replace("chart_height = 800", "chart_height = 0");
    let err = AnalyzeConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("chart_height"));
}

#[test]
fn test_config_rejects_wrong_type() {
    let bad = VALID_CONFIG.replace("charts = false", "charts = \"no\"");
    assert!(AnalyzeConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_load_explicit_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("loadstats.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AnalyzeConfig::load(Some(&path)).expect("load");
    assert_eq!(config.files.summary_prefix, "loadtest-");
}

#[test]
fn test_config_load_missing_explicit_path_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let err = AnalyzeConfig::load(Some(&tmp.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
