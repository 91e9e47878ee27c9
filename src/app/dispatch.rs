use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::render::{
    render_classified, render_config, render_listing, render_overview, render_preferences,
    render_tree,
};
use crate::cli::{Cli, Commands, ConfigCommands, OrgCommands, PrefsCommands};
use crate::config::Config;
use crate::org::OrgClient;
use crate::preferences::PreferencesStore;
use crate::providers::{ModelListClient, ModelType, ProviderType};
use crate::ui::style as ui;

struct ModelsArgs {
    kind: ModelType,
    provider: Option<ProviderType>,
    url: Option<String>,
    api_key: Option<String>,
    all: bool,
    save: bool,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn run_models(config: Config, args: ModelsArgs) -> Result<()> {
    let configured = config.provider(args.kind).clone();
    let provider_type = args.provider.unwrap_or(configured.provider_type);

    // A different provider type makes the configured endpoint meaningless.
    let switched = provider_type != configured.provider_type;
    let url = non_blank(args.url.as_deref())
        .or_else(|| (!switched).then(|| non_blank(Some(configured.url.as_str()))).flatten());
    let api_key = non_blank(args.api_key.as_deref())
        .or_else(|| (!switched).then(|| non_blank(configured.api_key.as_deref())).flatten());
    let prior = if switched {
        None
    } else {
        non_blank(configured.model.as_deref())
    };

    if provider_type.requires_api_key() && api_key.is_none() {
        warn!(provider = %provider_type, "no API key configured, the endpoint may reject the request");
    }

    let client = ModelListClient::new(config.request_timeout_secs);

    if args.all {
        let raw = client
            .fetch_model_names(provider_type, url, api_key)
            .await
            .with_context(|| format!("Failed to list models from {}", provider_type.service_name()))?;
        println!("{}", render_classified(&raw, provider_type));
        return Ok(());
    }

    let listing = client
        .load_models(provider_type, args.kind, url, api_key, prior)
        .await;
    println!("{}", render_listing(&listing));

    if args.save {
        // Only flags given on this run are stored; env-derived values are not.
        config.persist_selection(
            args.kind,
            provider_type,
            non_blank(args.url.as_deref()),
            non_blank(args.api_key.as_deref()),
            listing.selected.as_deref(),
        )?;

        info!(kind = %args.kind, provider = %provider_type, "saved model selection");
        println!(
            "{} Saved {} model: {}",
            ui::success("✓"),
            args.kind,
            listing.selected.as_deref().unwrap_or("(none)")
        );
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config, mut prefs: PreferencesStore) -> Result<()> {
    match cli.command {
        Commands::Models {
            kind,
            provider,
            url,
            api_key,
            all,
            save,
        } => {
            run_models(
                config,
                ModelsArgs {
                    kind,
                    provider,
                    url,
                    api_key,
                    all,
                    save,
                },
            )
            .await
        }

        Commands::Org { org_command } => {
            let client = OrgClient::new(
                &config.api_base_url,
                config.api_token.as_deref(),
                config.request_timeout_secs,
            );
            match org_command {
                OrgCommands::Tree { lang } => {
                    let language = lang.unwrap_or(prefs.get().language);
                    let view = client.load_tree(language).await;
                    println!("{}", render_tree(&view, language));
                }
                OrgCommands::Overview => {
                    let overview = client.load_overview().await;
                    println!("{}", render_overview(&overview, prefs.get().language));
                }
            }
            Ok(())
        }

        Commands::Prefs { prefs_command } => {
            match prefs_command {
                PrefsCommands::Show => println!("{}", render_preferences(&prefs.get())),
                PrefsCommands::Set { key, value } => {
                    let updated = prefs.set(&key, &value)?;
                    println!("{} Saved to {}", ui::success("✓"), prefs.path().display());
                    println!("{}", render_preferences(&updated));
                }
            }
            Ok(())
        }

        Commands::Config { config_command } => {
            match config_command {
                ConfigCommands::Show => println!("{}", render_config(&config)),
            }
            Ok(())
        }
    }
}
