//! Cookiebar CLI: resolve consent and drive the banner for one simulated page load

use clap::{Parser, Subcommand, ValueEnum};
use cookiebar_banner::{
    boot, ConsentResolver, DirFragmentSource, FragmentSource, HttpFragmentSource, TracePresenter,
};
use cookiebar_core::{
    BannerConfiguration, ConsentStore, CookiebarConfig, FileStore, JurisdictionMode,
    DEFAULT_REMEMBER_DAYS,
};
use cookiebar_geo::{HttpLocator, JurisdictionLocator, JurisdictionLookup, StaticLocator};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cookiebar", about = "Cookie consent banner: resolve and remember visitor consent")]
struct Cli {
    /// Deployment config (TOML). Missing file means defaults.
    #[arg(short, long, default_value = "cookiebar.toml")]
    config: PathBuf,
    /// Cookie jar file (overrides the config)
    #[arg(short, long)]
    jar: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a page load, optionally followed by one visitor action
    Visit {
        /// URL the widget script was included with, query string options included
        #[arg(short, long)]
        script_url: String,
        /// Visitor locale (e.g. de-DE)
        #[arg(short, long)]
        locale: Option<String>,
        /// Serve fragments from <DIR>/lang/<code>.html instead of fetching them
        #[arg(short, long)]
        fragments: Option<PathBuf>,
        /// Pretend the visitor is in this country (enables the jurisdiction lookup)
        #[arg(long)]
        country: Option<String>,
        #[arg(short, long, value_enum, default_value = "none")]
        action: Action,
        /// Scroll offset used by `--action scroll`
        #[arg(long, default_value = "300")]
        scroll: f64,
        /// Answer yes to the decline confirmation
        #[arg(long)]
        confirm: bool,
    },
    /// Show the stored consent record
    Status,
    /// Withdraw consent: purge storage and record the refusal
    Revoke,
    /// Print the banner options parsed from a script URL
    Config {
        #[arg(short, long)]
        script_url: String,
    },
    /// Look up the visitor's country through the configured endpoint
    Locate {
        #[arg(short, long)]
        endpoint: Option<String>,
    },
    /// Show version
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Action {
    None,
    Accept,
    Decline,
    Scroll,
    Details,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cookiebar=info,cookiebar_core=info,cookiebar_geo=info,cookiebar_banner=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CookiebarConfig::load(&cli.config);
    let jar = cli.jar.unwrap_or_else(|| config.store.path.clone());

    match cli.command {
        Commands::Visit {
            script_url,
            locale,
            fragments,
            country,
            action,
            scroll,
            confirm,
        } => {
            let store: Arc<dyn ConsentStore> = Arc::new(FileStore::new(&jar));
            let mut jurisdiction = config.jurisdiction.clone();
            let locator: Arc<dyn JurisdictionLocator> = match country {
                Some(code) => {
                    jurisdiction.mode = JurisdictionMode::Lookup;
                    Arc::new(StaticLocator::new(code))
                }
                None => Arc::new(HttpLocator::new(&jurisdiction.endpoint)),
            };
            let resolver = ConsentResolver::from_config(&jurisdiction, store, locator);

            let banner = BannerConfiguration::from_script_url(&script_url)?;
            let fragments: Box<dyn FragmentSource> = match fragments {
                Some(dir) => Box::new(DirFragmentSource::new(dir)),
                None => Box::new(HttpFragmentSource::new()),
            };

            let mut controller = boot(
                &resolver,
                banner,
                Box::new(TracePresenter::new(confirm)),
                fragments.as_ref(),
                config.language.fixed.clone(),
                locale.as_deref(),
            )
            .await?;

            let outcome = match action {
                Action::None => Ok(controller.state()),
                Action::Accept => controller.accept(),
                Action::Decline => controller.decline(),
                Action::Scroll => controller.scrolled(scroll),
                Action::Details => Ok(controller.open_details()),
            };
            let state = match outcome {
                Ok(state) => state,
                Err(e) if e.is_soft() => {
                    info!("Action had no effect: {}", e);
                    controller.state()
                }
                Err(e) => return Err(e.into()),
            };

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "resolution": controller.resolution(),
                    "banner": state,
                }))?
            );
        }

        Commands::Status => {
            let store = FileStore::new(&jar);
            let record = store.get()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "jar": store.path(),
                    "consent": record,
                    "has_data": store.has_any_data()?,
                }))?
            );
        }

        Commands::Revoke => {
            let store = FileStore::new(&jar);
            store.clear()?;
            store.set(cookiebar_core::ConsentValue::Disallowed, DEFAULT_REMEMBER_DAYS)?;
            info!("Consent revoked, storage purged ({})", jar.display());
        }

        Commands::Config { script_url } => {
            let banner = BannerConfiguration::from_script_url(&script_url)?;
            println!("{}", serde_json::to_string_pretty(&banner)?);
        }

        Commands::Locate { endpoint } => {
            let endpoint = endpoint.unwrap_or_else(|| config.jurisdiction.endpoint.clone());
            let lookup = JurisdictionLookup::new(Arc::new(HttpLocator::new(endpoint)))
                .with_timeout(config.jurisdiction.timeout());
            let code = lookup
                .country_code(None)
                .await
                .map_err(cookiebar_core::Error::from)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "country_code": code,
                    "requires_consent": cookiebar_core::requires_consent(&code),
                }))?
            );
        }

        Commands::Version => {
            println!("cookiebar v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
