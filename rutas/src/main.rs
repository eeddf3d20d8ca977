//! rutas: shortest routes around water, buildings and potholes.

use std::io::Write;

use log::{debug, error};
use rutas_lib::app::{Inputs, run};
use rutas_lib::cli::{help_text, parse_args};
use rutas_lib::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = parse_args(std::env::args().skip(1)).inspect_err(|_| {
        eprintln!("{}", help_text());
    })?;
    if args.help {
        println!("{}", help_text());
        return Ok(());
    }

    let config = Config::load(args.config_path.as_deref());
    let report = Inputs::load(&args)
        .and_then(|inputs| run(&inputs, &config))
        .inspect_err(|e| error!("{e}"))?;

    print!("{}", report.to_text());
    debug!(
        "search stats: {} expanded, {} pushed, {} skipped",
        report.stats.expanded, report.stats.pushed, report.stats.skipped
    );
    Ok(())
}
