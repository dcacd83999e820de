use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = cardrank_api::Args::parse();

	cardrank_api::run(args).await
}
