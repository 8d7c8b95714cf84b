use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::models::Year;

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Directory holding the bundled `playlist-<year>.json` files
    #[arg(long, env = "DATA_DIR", default_value = "resources", global = true)]
    pub data_dir: PathBuf,

    /// Directory holding the tera templates
    #[arg(long, env = "TEMPLATE_DIR", default_value = "templates", global = true)]
    pub template_dir: PathBuf,

    /// Directory served under /public
    #[arg(long, env = "PUBLIC_DIR", default_value = "public", global = true)]
    pub public_dir: PathBuf,

    #[arg(long, env = "PORT", default_value_t = 8080, global = true)]
    pub port: u16,

    /// Year selected when none is requested
    #[arg(long, env = "DEFAULT_YEAR", default_value = "2023", global = true)]
    pub default_year: Year,
}

impl Config {
    pub fn template_glob(&self) -> String {
        format!("{}/**/*", self.template_dir.display())
    }

    pub fn print_server_start_message(&self) {
        info!("Starting server at port {}", self.port);
        info!("Gallery URL: http://localhost:{}/", self.port);
        info!(
            "Catalog API: http://localhost:{}/api/catalog/{}",
            self.port, self.default_year
        );
        info!("Serving playlists from {}", self.data_dir.display());
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("resources"),
            template_dir: PathBuf::from("templates"),
            public_dir: PathBuf::from("public"),
            port: 8080,
            default_year: Year::default(),
        }
    }
}
