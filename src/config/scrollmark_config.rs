use std::net::SocketAddr;
use std::time::Duration;
use clap::Parser;
use log::info;

#[derive(Clone, Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ScrollmarkConfig {
    #[arg(short, long, default_value = "127.0.0.1:18990")]
    pub listen_address: SocketAddr,

    /// JSON document holding the storage area. Empty keeps bookmarks in memory only.
    #[arg(short, long, default_value = "")]
    pub storage_file: String,

    /// HTTP relay to the browser's tab APIs. Empty leaves every tab unreachable.
    #[arg(short, long, default_value = "")]
    pub bridge_url: String,

    #[arg(long, default_value_t = 3000, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    pub scroll_timeout_ms: u64,

    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..=10))]
    pub storage_write_attempts: u64,
}

impl ScrollmarkConfig {

    pub fn read_args() -> ScrollmarkConfig {
        let scrollmark_config = ScrollmarkConfig::parse();
        info!("Listen address: [{}]", scrollmark_config.listen_address);
        if scrollmark_config.storage_file.is_empty() {
            info!("Storage file: [none, bookmarks are kept in memory]");
        } else {
            info!("Storage file: [{}]", scrollmark_config.storage_file);
        }
        info!("Bridge URL: [{}]", scrollmark_config.bridge_url);
        info!("Scroll timeout (ms): [{}]", scrollmark_config.scroll_timeout_ms);
        info!("Storage write attempts: [{}]", scrollmark_config.storage_write_attempts);
        scrollmark_config
    }

    pub fn scroll_timeout(&self) -> Duration {
        Duration::from_millis(self.scroll_timeout_ms)
    }
}
