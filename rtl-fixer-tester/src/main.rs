mod fixtures;
mod reports;
mod scenario;
mod tester;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rtl_fixer_core::FixerConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use scenario::{ScenarioCtx, expand_scenarios, get_scenario, list_scenarios};
use tester::{ScenarioResult, ScenarioRunner};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "rtl-fixer-tester", version = "0.1.0")]
#[command(about = "Runs RTL Fixer behavior scenarios against synthetic article pages")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for the whole catalog)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Upper bound on fixer passes when waiting for a page to settle
    #[arg(long, default_value_t = 4)]
    max_passes: usize,

    /// Fixer configuration JSON to use instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&split_csv(&args.scenarios));
    let results = run_scenarios(&args, &config, &scenarios);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🔤 RTL Fixer Scenario Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<FixerConfig> {
    let Some(path) = path else {
        return Ok(FixerConfig::load_from_static());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = FixerConfig::from_json(&raw)
        .with_context(|| format!("invalid fixer config in {}", path.display()))?;
    log::info!("using fixer config from {}", path.display());
    Ok(config)
}

fn run_scenarios(args: &Args, config: &FixerConfig, scenarios: &[String]) -> Vec<ScenarioResult> {
    let ctx = ScenarioCtx {
        config,
        max_passes: args.max_passes.max(1),
        verbose: args.verbose,
    };
    let runner = ScenarioRunner::new(args.verbose);
    let mut results = Vec::new();

    for name in scenarios {
        let Some(scenario) = get_scenario(name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        let result = runner.run(&scenario, &ctx, args.iterations);
        if result.passed {
            println!("✅ {} - {:?}", scenario.name, result.average_duration);
        } else {
            eprintln!("❌ {}", scenario.name.red());
        }
        results.push(result);
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# RTL Fixer Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report != "json" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "all".to_string(),
            list_scenarios: false,
            iterations: 1,
            max_passes: 4,
            config: None,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rtl-fixer-{}-{name}", std::process::id()))
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Mode Cycling".to_string(),
            key: "mode-cycle".to_string(),
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2: unexpected cycle".to_string()]
            },
            average_duration: Duration::from_micros(10),
        }
    }

    #[test]
    fn runs_whole_catalog_with_bundled_config() {
        let args = base_args();
        let config = FixerConfig::load_from_static();
        let scenarios = expand_scenarios(&split_csv(&args.scenarios));
        let results = run_scenarios(&args, &config, &scenarios);
        assert_eq!(results.len(), list_scenarios().len());
        assert!(results.iter().all(|r| r.passed), "{results:#?}");
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let args = base_args();
        let config = FixerConfig::default();
        let results = run_scenarios(&args, &config, &["missing".to_string()]);
        assert!(results.is_empty());
    }

    #[test]
    fn load_config_reads_and_validates_file() {
        let path = temp_file("config.json");
        std::fs::write(&path, r#"{ "initial_mode": "justify" }"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.initial_mode, rtl_fixer_core::Mode::Justify);

        std::fs::write(&path, r#"{ "content_selectors": [] }"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("content selector list is empty"));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_file("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("single-button"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let temp = temp_file("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].key, "mode-cycle");
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_file("empty.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_emits_markdown_failures() {
        let temp = temp_file("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("# RTL Fixer Scenario Results"));
        assert!(content.contains("unexpected cycle"));
    }

    #[test]
    fn write_reports_emits_console_summary() {
        let temp = temp_file("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Mode Cycling"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
