use env_logger::{Builder, Env};
use log::LevelFilter;

/// Route `log` output to stderr.
///
/// `verbose` lowers the default level from info to debug; `RUST_LOG` still takes precedence.
pub fn init(verbose: bool) {
    let level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };

    let _ = Builder::from_env(Env::default().default_filter_or(level.to_string())).try_init();
}
