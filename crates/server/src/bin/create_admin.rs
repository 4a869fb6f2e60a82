//! Create an admin account.
//!
//! ```text
//! create-admin --username admin --password "your-password"
//! ```
//!
//! Uses the same configuration sources as the server.

use clap::Parser;
use std::sync::Arc;

use suggestbox_common::Config;
use suggestbox_core::{AdminService, CreateAdminInput};
use suggestbox_db::repositories::AdminRepository;

#[derive(Debug, Parser)]
#[command(name = "create-admin", about = "Create an admin account")]
struct Args {
    /// Login name for the new admin
    #[arg(long)]
    username: String,

    /// Password for the new admin
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "suggestbox=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let db = suggestbox_db::init(&config).await?;
    suggestbox_db::migrate(&db).await?;

    let service = AdminService::new(AdminRepository::new(Arc::new(db)), &config);
    let admin = service
        .create(CreateAdminInput {
            username: args.username,
            password: args.password,
        })
        .await?;

    println!("Created admin: {}", admin.username);
    Ok(())
}
