use anyhow::Context;
use loadchart::{config::Config, report::Report};
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let report = Report::new(Config::default());
    let stdout = io::stdout();
    let summary = report
        .run(&mut stdout.lock())
        .context("failed to write report status")?;
    log::debug!("{} charts rendered", summary.rendered());
    Ok(())
}
