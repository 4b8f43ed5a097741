//! # lumend — lumen daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Open the JSON state store and construct repository implementations
//! - Construct protocol adapters per configuration and the routing registry
//! - Construct application services, injecting ports
//! - Run startup discovery, the minute-tick scheduler, and the poll loop
//! - Build the axum router, bind, and serve until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use lumen_adapter_http_axum::state::AppState;
use lumen_adapter_hue::{HueAdapter, HueConfig};
use lumen_adapter_lifx::{LifxAdapter, LifxConfig};
use lumen_adapter_storage_json::{
    JsonGroupRepository, JsonLightRepository, JsonScheduleRepository, JsonSettingsStore, JsonStore,
};
use lumen_adapter_virtual::VirtualAdapter;
use lumen_app::event_bus::InProcessEventBus;
use lumen_app::registry::AdapterRegistry;
use lumen_app::scheduler::Scheduler;
use lumen_app::services::discovery_service::DiscoveryService;
use lumen_app::services::group_service::GroupService;
use lumen_app::services::light_service::LightService;
use lumen_app::services::schedule_service::ScheduleService;
use lumen_app::services::settings_service::SettingsService;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.logging.filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // State store + repositories
    let store = JsonStore::open(&config.store.path)
        .await
        .context("opening state store")?;
    let light_repo = JsonLightRepository::new(Arc::clone(&store));
    let group_repo = JsonGroupRepository::new(Arc::clone(&store));
    let schedule_repo = JsonScheduleRepository::new(Arc::clone(&store));
    let settings_store = JsonSettingsStore::new(Arc::clone(&store));

    // Protocol adapters
    let hue = if config.hue.enabled {
        build_hue_adapter(&config.hue).await?
    } else {
        None
    };
    let lifx = if config.lifx.enabled {
        Some(LifxAdapter::new(LifxConfig {
            token: config.lifx.token.clone(),
            base_url: "https://api.lifx.com/v1".to_string(),
            timeout_secs: 5,
        })?)
    } else {
        None
    };
    let virt = config
        .integrations
        .virtual_enabled
        .then(VirtualAdapter::default);
    let gateway = Arc::new(AdapterRegistry::new(hue, lifx, virt));
    tracing::info!(protocols = ?gateway.registered(), "adapters registered");

    // Event bus + services
    let bus = InProcessEventBus::new(256);
    let lights = Arc::new(LightService::new(
        light_repo.clone(),
        group_repo.clone(),
        schedule_repo.clone(),
        Arc::clone(&gateway),
        bus.clone(),
    ));
    let groups = Arc::new(GroupService::new(group_repo.clone(), Arc::clone(&lights)));
    let schedules = Arc::new(ScheduleService::new(schedule_repo.clone()));
    let settings_service = Arc::new(SettingsService::new(settings_store, bus.clone()));
    let discovery = Arc::new(DiscoveryService::new(
        light_repo,
        Arc::clone(&gateway),
        bus.clone(),
    ));

    // Startup discovery
    let settings = settings_service.get_settings().await?;
    if settings.discover_on_startup {
        match discovery.run().await {
            Ok(report) => tracing::info!(
                discovered = report.discovered,
                added = report.added,
                "startup discovery finished"
            ),
            Err(error) => tracing::warn!(%error, "startup discovery failed"),
        }
    }

    // Scheduler: tick every wall-clock minute
    let scheduler = Scheduler::new(
        schedule_repo,
        group_repo,
        Arc::clone(&lights),
        bus.clone(),
    );
    tokio::spawn(async move {
        loop {
            let local_now = chrono::Local::now().naive_local();
            if let Err(error) = scheduler.tick(local_now).await {
                tracing::error!(%error, "scheduler tick failed");
            }
            tokio::time::sleep(time_until_next_minute(chrono::Local::now())).await;
        }
    });

    // Background state polling
    let poll_lights = Arc::clone(&lights);
    let refresh_secs = settings.refresh_interval_secs.max(5);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(refresh_secs));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match poll_lights.refresh_all().await {
                Ok(reachable) => tracing::debug!(reachable, "poll finished"),
                Err(error) => tracing::warn!(%error, "poll failed"),
            }
        }
    });

    // HTTP
    let state = AppState::from_arcs(lights, groups, schedules, settings_service, discovery);
    let app = lumen_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "lumend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

/// Build the Hue adapter, asking the Philips discovery service for a
/// bridge when no host is configured. A missing bridge disables the
/// adapter instead of failing startup.
async fn build_hue_adapter(section: &config::HueSection) -> anyhow::Result<Option<HueAdapter>> {
    let host = if section.host.is_empty() {
        match lumen_adapter_hue::discover_bridges().await {
            Ok(bridges) => match bridges.into_iter().next() {
                Some(bridge) => {
                    tracing::info!(host = %bridge.internalipaddress, "hue bridge located");
                    bridge.internalipaddress
                }
                None => {
                    tracing::warn!("hue enabled but no bridge found, adapter disabled");
                    return Ok(None);
                }
            },
            Err(error) => {
                tracing::warn!(%error, "hue bridge discovery failed, adapter disabled");
                return Ok(None);
            }
        }
    } else {
        section.host.clone()
    };

    Ok(Some(HueAdapter::new(HueConfig {
        host,
        username: section.username.clone(),
        timeout_secs: 5,
    })?))
}

/// How long to sleep until the next wall-clock minute starts.
fn time_until_next_minute(now: chrono::DateTime<chrono::Local>) -> Duration {
    use chrono::Timelike;
    let into_minute = Duration::new(
        u64::from(now.second()),
        now.nanosecond().min(999_999_999),
    );
    Duration::from_secs(60)
        .saturating_sub(into_minute)
        .max(Duration::from_millis(200))
}
