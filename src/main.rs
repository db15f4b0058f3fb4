mod config;
mod error;
mod macros;
mod query;
mod server;

mod page {
    pub mod content;
    pub mod document;
    pub mod nav;
    pub mod pagination;
}

use log::info;

pub const NAME: &str = "warehouse-nav";
pub const CSS: &str = include_str!("../styles.css");
pub const CSS_PATH: &str = "/style.css";

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = config::config_path()?;
    let config = config::load_config(&config_path)?;
    let site = server::Site::from_config(&config)?;
    info!("Default page is {}", site.default_page);

    server::serve(config.bind(), &site)
}
