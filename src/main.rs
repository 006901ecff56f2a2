use prompt_share::{Registry, config, init_tracing, net::http};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = Arc::new(config::Config::from_env()?);
    tracing::debug!(?cfg, "configuration loaded");

    let registry = Arc::new(Registry::connect(cfg.clone()).await?);

    let http_addr: SocketAddr = cfg.http_addr.parse()?;
    tracing::info!(%http_addr, site = %cfg.site.title, "prompt-share server listening");
    if let Err(e) = http::serve(http_addr, registry).await {
        tracing::error!(error = %e, "http server failed");
        return Err(e.into());
    }

    Ok(())
}
