use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use postdoc::codec;
use postdoc::command::Command;
use postdoc::config::Flags;
use postdoc::views::DerivedViews;
use std::path::Path;
use structopt::StructOpt;
use tokio::fs;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(debug_assertions)]
const DEFAULT_FILTER: &str = "warn,postdoc=trace";
#[cfg(not(debug_assertions))]
const DEFAULT_FILTER: &str = "warn,postdoc=info";

fn install_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .init();
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .await
            .wrap_err("Could not read stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Could not read {}", path.display()))
    }
}

async fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    install_tracing();
    color_eyre::install()?;

    let flags = Flags::from_args();
    let mut options = flags.load_cfg().await?;

    match flags.cmd {
        Command::Views {
            input,
            view,
            max_length,
        } => {
            if let Some(max_length) = max_length {
                options.excerpt.max_length = max_length;
            }
            let raw = read_input(&input).await?;
            let views = DerivedViews::derive(&raw, &options);
            let text = view.format(&views).wrap_err("Could not format view")?;
            write_stdout(&text).await?;
        }
        Command::Normalize { input, output } => {
            let raw = read_input(&input).await?;
            let normalized = codec::normalize(&raw)
                .wrap_err_with(|| format!("Could not normalize {}", input.display()))?;
            match output {
                Some(output) => {
                    fs::write(&output, normalized)
                        .await
                        .wrap_err_with(|| format!("Could not write {}", output.display()))?;
                    info!("Wrote {}", output.display());
                }
                None => write_stdout(&normalized).await?,
            }
        }
    }
    Ok(())
}
