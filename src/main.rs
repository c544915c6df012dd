// SPDX-License-Identifier: MPL-2.0
use marklens::app::{self, Flags};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let time_index = match args.opt_value_from_str::<_, usize>("--time") {
        Ok(time_index) => time_index.unwrap_or(0),
        Err(err) => {
            tracing::warn!(%err, "ignoring invalid --time");
            0
        }
    };
    let images = args
        .finish()
        .into_iter()
        .map(PathBuf::from)
        .collect::<Vec<_>>();
    if images.is_empty() {
        tracing::info!("no image given; usage: marklens [--time N] IMAGE...");
    }

    app::run(Flags { images, time_index })
}
