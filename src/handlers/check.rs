use crate::charts::{ChartUpdate, check_for_updates, load_charts};
use crate::cli::OutputFormat;
use crate::common::CommandRunner;
use crate::config::types::RunConfig;
use crate::error::{ManifestError, Result, UpdaterError};
use crate::helm::HelmClient;

/// Report available chart updates without touching any file.
pub fn handle_check<R: CommandRunner>(
    config: &RunConfig,
    runner: &R,
    format: OutputFormat,
) -> Result<Vec<ChartUpdate>> {
    let mut charts = load_charts(&config.chart_path)?;
    let mut helm = HelmClient::new(runner);
    let updates = check_for_updates(&mut charts, &mut helm)?;

    println!("{}", format_updates(&updates, format)?);
    Ok(updates)
}

pub fn format_updates(updates: &[ChartUpdate], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(updates).map_err(|e| {
            UpdaterError::from(ManifestError::Serialize {
                target: "update report".to_string(),
                reason: e.to_string(),
            })
        }),
        OutputFormat::Table => {
            if updates.is_empty() {
                return Ok("All charts are up to date.".to_string());
            }
            let width = updates.iter().map(|u| u.name.len()).max().unwrap_or(0).max(5);
            let mut table = format!("{:<width$}  {:<12}  {}\n", "CHART", "CURRENT", "LATEST");
            for update in updates {
                table.push_str(&format!(
                    "{:<width$}  {:<12}  {}\n",
                    update.name, update.old_version, update.version
                ));
            }
            Ok(table.trim_end().to_string())
        }
    }
}
