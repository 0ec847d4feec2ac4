pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::RaffleInfo;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "raffle")]
#[command(about = "Claim numbered raffle slots (00-99) without double-booking")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the ledger file (overrides storage.data_dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Ledger file name inside the data directory (overrides storage.ledger_file)
    #[arg(long, global = true)]
    pub ledger_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the raffle title, prize and draw details
    Info,
    /// Show the 10x10 board of numbers
    Slots {
        /// List only the numbers still available
        #[arg(long)]
        available: bool,
    },
    /// Reserve a number for a claimant
    Reserve {
        /// Two-digit number, 00 to 99
        slot: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    /// List reservations in the order they were made
    Reservations,
    /// Write the reservations table as CSV
    Export {
        /// Destination file
        path: String,
    },
}

/// TOML 設定與命令列覆蓋合併後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub ledger_file: String,
    pub raffle: RaffleInfo,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            data_dir: config.data_dir().to_string(),
            ledger_file: config.ledger_file().to_string(),
            raffle: config.raffle_info(),
            log_level: config.log_level().map(str::to_string),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let toml = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        toml.validate()?;

        let mut settings = Self::from_toml(&toml);
        if let Some(data_dir) = &cli.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(ledger_file) = &cli.ledger_file {
            settings.ledger_file = ledger_file.clone();
        }
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn ledger_file(&self) -> &str {
        &self.ledger_file
    }

    fn raffle_info(&self) -> RaffleInfo {
        self.raffle.clone()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("data_dir", &self.data_dir)?;
        validate_path("ledger_file", &self.ledger_file)?;
        validate_file_extension("ledger_file", &self.ledger_file, &["json"])?;
        validate_non_empty_string("raffle.title", &self.raffle.title)
    }
}
