#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime;

#[path = "../cli/opts.rs"]
mod cli_opts;
#[path = "demarche_facile/config_guard.rs"]
mod config_guard;
#[path = "demarche_facile/one_shot.rs"]
mod one_shot;
#[path = "demarche_facile/output.rs"]
mod output;
#[path = "demarche_facile/web_mode.rs"]
mod web_mode;

use cli_opts::Opts;

fn main() -> Result<()> {
    let opts = Opts::parse();

    let cfg = config_guard::load_config(&opts)?;
    demarche_facile::init_logging(cfg.runtime.rust_log.as_deref());

    let rt = runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("démarrage du runtime tokio")?;

    if opts.is_one_shot() {
        rt.block_on(one_shot::run(&opts, &cfg))
    } else {
        rt.block_on(web_mode::run(&opts, &cfg))
    }
}
