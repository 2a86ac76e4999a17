use anyhow::Result;
use clap::Parser;
use dna_expression_cnn::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dna_expression_cnn=info".parse()?),
        )
        .init();

    Cli::parse().run()
}
