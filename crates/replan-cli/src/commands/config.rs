use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Point the CLI at a different events file
    SetDataFile {
        /// Path to the JSON events file
        path: std::path::PathBuf,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
            println!("events file: {}", config.events_path()?.display());
        }
        ConfigAction::SetDataFile { path } => {
            let mut config = Config::load_or_default();
            config.data_file = Some(path);
            config.save()?;
            println!("ok");
        }
    }
    Ok(())
}
