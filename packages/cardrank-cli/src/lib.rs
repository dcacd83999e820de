use std::path::PathBuf;

use clap::{
	Args,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};

use cardrank_config::Config;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file argument shared by every binary.
#[derive(Debug, Args)]
pub struct ConfigArgs {
	#[arg(long, short = 'c', value_name = "FILE", env = "CARDRANK_CONFIG")]
	pub config: PathBuf,
}
impl ConfigArgs {
	pub fn load(&self) -> cardrank_config::Result<Config> {
		cardrank_config::load(&self.config)
	}
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Green.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Yellow.on_default())
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[derive(Debug, Parser)]
	struct Cli {
		#[command(flatten)]
		config: ConfigArgs,
	}

	#[test]
	fn parses_short_and_long_config_flags() {
		let short = Cli::try_parse_from(["cardrank", "-c", "cardrank.toml"]).expect("Flags must parse.");
		let long =
			Cli::try_parse_from(["cardrank", "--config", "cardrank.toml"]).expect("Flags must parse.");

		assert_eq!(short.config.config, PathBuf::from("cardrank.toml"));
		assert_eq!(long.config.config, short.config.config);
	}

	#[test]
	fn missing_config_file_surfaces_read_error() {
		let args = ConfigArgs { config: PathBuf::from("/nonexistent/cardrank.toml") };

		assert!(matches!(args.load(), Err(cardrank_config::Error::ReadConfig { .. })));
	}
}
