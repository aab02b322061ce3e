use anyhow::{Context, Result};
use clap::Parser;
use dulce::{
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output::CleanCsvOutput,
    dataset::DailyDataset,
    html_output::HtmlReport,
    json_output::JsonReport,
    summary,
    verdict::assess_difference,
    welch::welch_t_test,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = AnalysisConfig {
        significance_level: args.alpha,
        rolling_window: args.rolling_window,
        one_sided_rule: args.one_sided.into(),
        ..AnalysisConfig::default()
    };
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Stage 1: load and clean
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;
    let (dataset, cleaning) = DailyDataset::from_csv_str(&raw)?;

    // Stage 2: write the cleaned dataset
    let clean_csv = CleanCsvOutput::new(&dataset).to_csv();
    std::fs::write(&args.output, clean_csv)
        .with_context(|| format!("Failed to write cleaned CSV to {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "cleaned data written");

    // Stage 3: descriptive summaries
    let (on, off) = dataset.samples();
    if on.len() < config.min_sample_size || off.len() < config.min_sample_size {
        anyhow::bail!(
            "Need at least {} observations per group for the t-test (got {} on-period, {} off-period)",
            config.min_sample_size,
            on.len(),
            off.len()
        );
    }

    let means = summary::group_means(&dataset);
    let on_summary = summary::five_number_summary(&on);
    let off_summary = summary::five_number_summary(&off);
    let crosstab = summary::crosstab(&dataset);
    let daily: Vec<f64> = dataset
        .observations()
        .iter()
        .map(|o| o.sweets_consumed as f64)
        .collect();
    let rolling = summary::rolling_mean(&daily, config.rolling_window);

    // Stage 4: hypothesis test and verdict
    let test = welch_t_test(&on, &off, config.one_sided_rule)?;
    let assessment = assess_difference(test, means.clone(), &config);

    // Stage 5: optional HTML report
    if let Some(report_path) = &args.report {
        let html = HtmlReport::new(
            &dataset,
            &means,
            &on_summary,
            &off_summary,
            &rolling,
            config.rolling_window,
            &crosstab,
            &assessment,
        )
        .to_html();
        std::fs::write(report_path, html)
            .with_context(|| format!("Failed to write HTML report to {}", report_path.display()))?;
        tracing::info!(path = %report_path.display(), "HTML report written");
    }

    // Stage 6: results
    match args.format {
        OutputFormat::Text => {
            println!(
                "[INFO] Cleaned data saved to: {} ({} rows kept, {} dropped)",
                args.output.display(),
                cleaning.rows_kept,
                cleaning.rows_dropped()
            );
            if cleaning.rows_dropped() > 0 {
                println!(
                    "[INFO] Dropped rows: {} bad date, {} non-numeric, {} too short",
                    cleaning.dropped_bad_date,
                    cleaning.dropped_bad_numeric,
                    cleaning.dropped_short_row
                );
            }
            println!();
            print!("{}", assessment.to_report_string());
        }
        OutputFormat::Json => {
            let report = JsonReport::build(
                &cleaning,
                on_summary,
                off_summary,
                crosstab,
                &assessment,
                &config,
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
