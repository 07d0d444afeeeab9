use clap::Parser;
use editor_page::cli::commands::{cmd_locators, cmd_run};
use editor_page::cli::config::{Cli, Commands, load_config, resolve_platform};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > env > defaults
    let platform = resolve_platform(cli.platform, &config);
    let appium_url = cli.appium_url.as_deref().or(config.appium.url.as_deref());
    let trace_path = cli.trace.as_deref().or(config.trace.path.as_deref());

    match cli.command {
        Commands::Run {
            scenario,
            driver,
            format,
            output,
        } => {
            let all_passed = cmd_run(
                &scenario,
                &driver,
                &format,
                output.as_deref(),
                platform,
                appium_url,
                trace_path,
                &config,
                cli.verbose,
            )?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Locators { block, position } => {
            print!("{}", cmd_locators(&block, position, platform)?);
        }
    }

    Ok(())
}
