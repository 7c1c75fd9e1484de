//! Web server command

use std::path::Path;

use anyhow::Result;

use cadence_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let db = open_db(db_path)?;

    println!("Starting Cadence server on http://{}:{}", host, port);
    println!("   API base: http://{}:{}/api", host, port);

    let config = ServerConfig { allowed_origins };
    cadence_server::serve(db, host, port, config).await
}
