// toppeers: write the busiest CometBFT peers of a node as a persistent_peers list.

mod config;
mod fetch;
mod logging;
mod output;
mod pipeline;
#[cfg(test)]
mod test_server;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "toppeers", version, about)]
struct Args {
    /// Config file (default ~/.config/toppeers/config.toml, then /etc/toppeers/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Node RPC host, e.g. localhost:26657 or http://10.0.0.1:26657
    #[arg(long)]
    host: Option<String>,
    /// Request timeout, in seconds (at least 1)
    #[arg(long = "timeout", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    /// Number of peers to export
    #[arg(long = "top")]
    top_n: Option<usize>,
    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl From<Args> for config::Overrides {
    fn from(a: Args) -> Self {
        Self {
            config: a.config,
            host: a.host,
            timeout_secs: a.timeout_secs,
            top_n: a.top_n,
            output: a.output,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging();

    let cfg = match config::load(&args.into()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("config: {cfg:?}");

    match pipeline::run_pipeline(&cfg) {
        Ok(report) => {
            for p in &report.peers {
                log::debug!(
                    "{} {} on {} ({} bytes): {}",
                    p.remote_ip, p.moniker, p.network, p.total_bytes, p.address
                );
            }
            log::debug!(
                "wrote {} peers ({} bytes) to {}",
                report.peers.len(),
                report.contents.len(),
                report.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
