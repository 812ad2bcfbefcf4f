use anyhow::Context;
use mln::System;
use mln::domain::config::SystemConfig;
use mln::domain::layout::{CONFIG_FILE, Layout};
use mln::kernel::config::load_config;
use mln_logger::{Logger, parse_level};

fn main() -> anyhow::Result<()> {
    let cfg: SystemConfig =
        load_config(CONFIG_FILE).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %cfg.root.display(),
        "Starting MLN OS"
    );

    System::builder().config(cfg).build().run().context("Critical: MLN OS halted")
}

fn init_logger(cfg: &SystemConfig) -> anyhow::Result<Logger> {
    let logging = &cfg.logging;
    let directory =
        logging.directory.clone().unwrap_or_else(|| Layout::new(cfg.root.clone()).log_dir());

    Logger::builder()
        .name("mln")
        .level(parse_level(&logging.level)?)
        .console(logging.console)
        .path(directory)
        .max_files(logging.max_files)
        .json(logging.json)
        .init()
        .context("Critical: Logging could not be initialized")
}
