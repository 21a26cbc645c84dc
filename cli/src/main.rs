//! Command-line front end for the Keybase HTTP API
//!
//! Every subcommand maps to one endpoint: build the params, perform the
//! GET, then print either a short table or the decoded response as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use keybase::{
    Client, Config, KeyFetchParams, Status, UserAutocompleteParams, UserDiscoverParams,
    UserLookupParams,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "keybase")]
#[command(about = "Query the Keybase HTTP API")]
struct Cli {
    /// API root URL
    #[arg(long, env = "KEYBASE_API_URL", global = true)]
    api_url: Option<String>,

    /// Print the decoded response as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the request URL without sending it
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch public keys by PGP key id
    KeyFetch {
        /// Comma-separated 64-bit key ids
        #[arg(long)]
        pgp_key_ids: String,

        /// Operation bitmask (1 encrypt, 2 decrypt, 4 verify, 8 sign)
        #[arg(long, default_value = "0")]
        ops: u32,
    },

    /// Look up users by username or proven identity
    Lookup(LookupArgs),

    /// Rank users matching a search string
    Autocomplete {
        /// Search text
        q: String,
    },

    /// Find Keybase users behind remote identities
    Discover(DiscoverArgs),
}

#[derive(Args)]
struct LookupArgs {
    #[arg(long, default_value = "")]
    usernames: String,
    #[arg(long, default_value = "")]
    domain: String,
    #[arg(long, default_value = "")]
    twitter: String,
    #[arg(long, default_value = "")]
    github: String,
    #[arg(long, default_value = "")]
    reddit: String,
    #[arg(long, default_value = "")]
    hackernews: String,
    #[arg(long, default_value = "")]
    coinbase: String,
    #[arg(long, default_value = "")]
    key_fingerprint: String,
    /// Restrict returned sections, e.g. basics,profile
    #[arg(long, default_value = "")]
    fields: String,
}

impl From<LookupArgs> for UserLookupParams {
    fn from(a: LookupArgs) -> Self {
        Self {
            usernames: a.usernames,
            domain: a.domain,
            twitter: a.twitter,
            github: a.github,
            reddit: a.reddit,
            hackernews: a.hackernews,
            coinbase: a.coinbase,
            key_fingerprint: a.key_fingerprint,
            fields: a.fields,
        }
    }
}

#[derive(Args)]
struct DiscoverArgs {
    #[arg(long, default_value = "")]
    twitter: String,
    #[arg(long, default_value = "")]
    github: String,
    #[arg(long, default_value = "")]
    hackernews: String,
    #[arg(long, default_value = "")]
    web: String,
    #[arg(long, default_value = "")]
    coinbase: String,
    #[arg(long, default_value = "")]
    key_fingerprint: String,
    /// Merge per-handle groups into one list per service
    #[arg(long)]
    flatten: bool,
}

impl From<DiscoverArgs> for UserDiscoverParams {
    fn from(a: DiscoverArgs) -> Self {
        Self {
            twitter: a.twitter,
            github: a.github,
            hackernews: a.hackernews,
            web: a.web,
            coinbase: a.coinbase,
            key_fingerprint: a.key_fingerprint,
            flatten: a.flatten,
        }
    }
}

/// Output switches shared by every subcommand.
struct Output {
    json: bool,
    dry_run: bool,
}

impl Output {
    /// Handle `--dry-run`; returns false when the request must not be sent.
    fn should_send<E: keybase::Endpoint>(&self, client: &Client, params: &E) -> Result<bool> {
        if self.dry_run {
            println!("GET {}", client.url_for(params)?);
            return Ok(false);
        }
        Ok(true)
    }

    /// Print JSON if requested; returns false when the table should be skipped.
    fn json<T: serde::Serialize>(&self, resp: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(resp)?);
            return Ok(false);
        }
        Ok(true)
    }
}

/// Report an API-level failure. Exits non-zero after printing what was decoded.
fn check_status(status: &Status) -> Result<()> {
    if status.code != 0 {
        let desc = if status.desc.is_empty() { "no description" } else { status.desc.as_str() };
        anyhow::bail!("Keybase returned {} ({}): {}", status.name, status.code, desc);
    }
    Ok(())
}

async fn key_fetch(client: &Client, out: &Output, params: KeyFetchParams) -> Result<()> {
    if !out.should_send(client, &params)? {
        return Ok(());
    }
    let resp = client.key_fetch(&params).await?;

    if out.json(&resp)? {
        println!("{:<20} {:<8} {:<8} {:<8}", "KID", "Type", "Secret", "Subkeys");
        println!("{}", "-".repeat(50));
        for key in &resp.keys {
            let kid = key.kid.get(..18).unwrap_or(&key.kid);
            println!(
                "{:<20} {:<8} {:<8} {:<8}",
                kid,
                key.key_type,
                if key.is_secret() { "yes" } else { "no" },
                key.subkeys.len()
            );
        }
    }

    check_status(&resp.status)
}

async fn lookup(client: &Client, out: &Output, params: UserLookupParams) -> Result<()> {
    if !out.should_send(client, &params)? {
        return Ok(());
    }
    let resp = client.user_lookup(&params).await?;

    if out.json(&resp)? {
        println!("{:<20} {:<24} {:<20} {:<10}", "Username", "Name", "Location", "Key");
        println!("{}", "-".repeat(78));
        for user in resp.users() {
            let fp = &user.public_keys.primary.key_fingerprint;
            let short_fp = fp.get(fp.len().saturating_sub(8)..).unwrap_or(fp);
            println!(
                "{:<20} {:<24} {:<20} {:<10}",
                user.basics.username, user.profile.full_name, user.profile.location, short_fp
            );
        }
        let missing = resp.them.iter().filter(|u| u.is_none()).count();
        if missing > 0 {
            println!("\n{} requested identities not found", missing);
        }
    }

    check_status(&resp.status)
}

async fn autocomplete(client: &Client, out: &Output, params: UserAutocompleteParams) -> Result<()> {
    if !out.should_send(client, &params)? {
        return Ok(());
    }
    let resp = client.user_autocomplete(&params).await?;

    if out.json(&resp)? {
        println!("{:<8} {:<20} {:<24}", "Score", "Username", "Name");
        println!("{}", "-".repeat(54));
        for c in &resp.completions {
            let name = c.components.full_name.as_ref().map_or("", |n| n.val.as_str());
            println!("{:<8.3} {:<20} {:<24}", c.total_score, c.components.username(), name);
        }
    }

    check_status(&resp.status)
}

async fn discover(client: &Client, out: &Output, params: UserDiscoverParams) -> Result<()> {
    if !out.should_send(client, &params)? {
        return Ok(());
    }
    let resp = client.user_discover(&params).await?;

    if out.json(&resp)? {
        println!("{:<12} {:<20} {:<10}", "Service", "Username", "Key bits");
        println!("{}", "-".repeat(44));
        for (service, c) in resp.matches.iter() {
            println!("{:<12} {:<20} {:<10}", service, c.username, c.public_key.bits);
        }
    }

    check_status(&resp.status)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keybase=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config.base_url = keybase::config::parse_base_url(url)?;
    }
    tracing::debug!("API root: {}", config.base_url);

    let client = Client::new(&config).context("Failed to build HTTP client")?;
    let out = Output {
        json: cli.json,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::KeyFetch { pgp_key_ids, ops } => {
            key_fetch(&client, &out, KeyFetchParams { pgp_key_ids, ops }).await
        }
        Commands::Lookup(args) => lookup(&client, &out, args.into()).await,
        Commands::Autocomplete { q } => {
            autocomplete(&client, &out, UserAutocompleteParams::new(q)).await
        }
        Commands::Discover(args) => discover(&client, &out, args.into()).await,
    }
}
