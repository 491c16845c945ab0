use gitsim::cli::{self, Cli};
use gitsim::ui::output;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    if let Err(e) = cli::run(cli) {
        output::error(format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` picks the filter unless `--debug`
/// is given, which forces debug output for this crate.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gitsim=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
