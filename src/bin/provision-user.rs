use anyhow::Context;
use clap::Parser;
use prompt_share::db::Db;
use prompt_share::db::repo::UserRepository;
use prompt_share::init_tracing;
use prompt_share::models::user::OAuthProfile;
use prompt_share::models::username::derive_username;
use prompt_share::services::{AuthService, SignInOutcome};
use std::sync::Arc;

// cargo run --bin provision-user -- --email ada@example.com --name "Ada Lovelace"

#[derive(Debug, Parser)]
#[command(name = "provision-user", version, about = "Provision a user the same way a first sign-in does")]
struct Args {
    /// Email address as reported by the provider
    #[arg(long)]
    email: String,

    /// Display name the username is derived from
    #[arg(long, default_value = "")]
    name: String,

    /// Profile picture URL
    #[arg(long)]
    picture: Option<String>,

    /// Only print the derived username, do not touch the database
    #[arg(long)]
    dry_run: bool,

    /// Override database URL (if omitted, use DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.dry_run {
        let username = derive_username(&args.name)?;
        println!("{username}");
        return Ok(());
    }

    let _ = dotenvy::from_filename(".env");
    let database_url = match args.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL is not set and --database-url was not given")?,
    };

    let db = Arc::new(Db::new(&database_url, 1)?);
    db.init().await?;

    let auth = AuthService::new(Arc::new(UserRepository::new(db)));
    let profile = OAuthProfile {
        email: args.email,
        name: Some(args.name),
        picture: args.picture,
    };

    match auth.sign_in(&profile).await {
        SignInOutcome::Admitted(p) => {
            let verb = if p.created { "created" } else { "exists" };
            println!("{verb}: {} ({}) id={}", p.user.username, p.user.email, p.user.id);
            Ok(())
        }
        SignInOutcome::Denied(e) => Err(e).context("provisioning denied"),
    }
}
