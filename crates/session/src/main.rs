//! `atlas-navigate`: resolve the session against a live backend and print
//! what navigating to a path would do.
//!
//! Usage: `atlas-navigate <path> [referrer]`

use std::sync::Arc;

use anyhow::{Context, bail};

use atlas_client::{ClientConfig, HttpTransport, TracingNotifier};
use atlas_session::{Navigation, RouteTable, SessionContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    atlas_observability::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: atlas-navigate <path> [referrer]");
    };
    let referrer = args.next();

    let config = ClientConfig::from_env().context("failed to read client configuration")?;
    tracing::info!(api = %config.api_base_url, "resolving navigation");

    let transport = HttpTransport::from_config(&config).context("failed to build HTTP client")?;
    if !transport.check_connectivity().await {
        tracing::warn!(api = %config.api_base_url, "backend is unreachable; guards will fail closed");
    }
    let session = SessionContext::from_client_config(&config, Arc::new(transport), Arc::new(TracingNotifier));
    let router = session.router(RouteTable::erp());

    let mut navigation = Navigation::to(path);
    if let Some(referrer) = referrer {
        navigation = navigation.from(referrer);
    }

    let outcome = router.navigate(&navigation).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
