use crate::config::Config;
use crate::db::connection::Database;
use crate::router::{respond, App};
use astra::Server;
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod templates;


fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airbnb_listings=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 1️⃣ Configuration from the environment
    let config = Config::from_env()?;

    // 2️⃣ Open the listing store and bring legacy rows up to date
    let db = Database::open(&config.database_path, config.store_timeout)?;
    let backfilled = db::backfill_price_amounts(&db)?;
    if backfilled > 0 {
        tracing::info!(rows = backfilled, "parsed legacy prices");
    }

    // `import <file.json>` loads a collection export and exits.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, file] = args.as_slice() {
        if command == "import" {
            let reader = BufReader::new(File::open(file)?);
            db::import::import_legacy_json(&db, reader)?;
            return Ok(());
        }
    }
    if !args.is_empty() {
        return Err(format!("unknown arguments: {}", args.join(" ")).into());
    }

    // 3️⃣ Start the server
    let addr = config.addr();
    tracing::info!("Server running at http://{addr}");

    let app = App {
        listings: db,
        static_dir: config.static_dir.clone(),
    };

    Server::bind(&addr)
        .max_workers(config.max_workers)
        .serve(move |req, _info| respond(req, &app))?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
