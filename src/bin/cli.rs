use std::sync::Arc;

use appdeck::logging::init_cli_tracing;
use appdeck::modules::auth::model::MeResponse;
use appdeck_auth::{AdminAllowlist, Authenticator, RoleResolver, TokenVerifier, create_access_token};
use appdeck_config::{AuthConfig, StorageConfig};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "appdeck-cli")]
#[command(about = "AppDeck CLI - Token tools for AppDeck", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue an access token signed with JWT_SECRET (login mode only)
    IssueToken {
        /// Email claim of the token
        #[arg(short = 'e', long)]
        email: String,

        /// Display name claim
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Lifetime in seconds, defaults to JWT_ACCESS_EXPIRY
        #[arg(short = 't', long)]
        ttl: Option<i64>,
    },
    /// Verify a token with the server's configuration and show the resolved identity
    InspectToken {
        /// The bearer token, without the "Bearer " prefix
        token: String,
    },
}

fn main() {
    dotenv().ok();
    init_cli_tracing();

    let cli = Cli::parse();

    let auth_config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::IssueToken { email, name, ttl } => {
            handle_issue_token(&auth_config, &email, name.as_deref(), ttl)
        }
        Commands::InspectToken { token } => handle_inspect_token(&auth_config, &token),
    }
}

fn handle_issue_token(auth_config: &AuthConfig, email: &str, name: Option<&str>, ttl: Option<i64>) {
    let ttl = ttl.unwrap_or(auth_config.access_token_expiry);
    if ttl <= 0 {
        eprintln!("❌ --ttl must be a positive number of seconds");
        std::process::exit(1);
    }

    match create_access_token(auth_config, email, name, ttl) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("❌ Error issuing token: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_inspect_token(auth_config: &AuthConfig, token: &str) {
    let verifier = match TokenVerifier::from_config(auth_config) {
        Ok(verifier) => verifier,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let storage_config = StorageConfig::from_env();
    let allowlist = AdminAllowlist::from_path(&storage_config.admin_users_path);
    let authenticator =
        Authenticator::new(Arc::new(verifier), RoleResolver::new(Arc::new(allowlist)));

    match authenticator.authenticate(token.trim()) {
        Ok(identity) => match serde_json::to_string_pretty(&MeResponse::from(&identity)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to render identity: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("❌ Token rejected: {}", e);
            std::process::exit(1);
        }
    }
}
