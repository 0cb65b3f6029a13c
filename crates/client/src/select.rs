use std::{sync::Arc, time::Duration};

use configs::ClientConfig;
use tracing::info;

use crate::api::SosApi;
use crate::error::ClientError;
use crate::local::LocalSosApi;
use crate::remote::RemoteSosApi;

/// Choose the backend once: remote when `api_url` is set, local otherwise.
pub async fn select_api(cfg: &ClientConfig) -> Result<Arc<dyn SosApi>, ClientError> {
    if let Some(url) = cfg.remote_url() {
        info!(%url, "using remote SOS API");
        let api = RemoteSosApi::new(url, Duration::from_secs(cfg.request_timeout_secs))?;
        return Ok(Arc::new(api));
    }

    info!(path = %cfg.local_path, "no API URL configured; using local fallback store");
    let api = LocalSosApi::open(&cfg.local_path).await?;
    if cfg.seed_demo {
        api.seed_demo_data().await?;
    }
    Ok(Arc::new(api))
}
