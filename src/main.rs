use mapmeasure::cli::CliArgs;
use mapmeasure::{
    init_logging, tool_options, Config, ReplayScript, SettingsPersistence, BUILD_DATE, VERSION,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse_args();

    // Initialize logging
    init_logging()?;
    info!("MapMeasure {} (built {})", VERSION, BUILD_DATE);

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => SettingsPersistence::load_or_default().into_config(),
    };

    let script = match &args.script {
        Some(path) => ReplayScript::load(path)?,
        None => {
            info!("No script given, running the demo");
            ReplayScript::demo()
        }
    };

    let outcome = script.run(tool_options(&config))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.reports)?);
        return Ok(());
    }

    for report in &outcome.reports {
        println!("[{}] {}", report.tool, report.id);
        for line in &report.annotation {
            println!("  {}", line);
        }
    }
    info!("{} overlays left on the map", outcome.overlays_on_map);

    Ok(())
}
