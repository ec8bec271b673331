use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = nutri_api::Args::parse();

	nutri_api::run(args).await
}
