use anyhow::{Context, Error, bail};
use triage_wizard::{ChatClient, ReqwestTransport};

use crate::opt::Backend;

pub(crate) async fn health(backend: &Backend) -> Result<(), Error> {
    let config = backend.client_config()?;
    let client = ChatClient::new(ReqwestTransport::new(&config)?);
    let status = client
        .health()
        .await
        .with_context(|| format!("backend at {} is unreachable", config.base_url()))?;

    if !status.ok {
        bail!(
            "backend at {} is unhealthy: {}",
            config.base_url(),
            status.error.as_deref().unwrap_or("no reason given")
        );
    }
    match status.model {
        Some(model) => println!("ok ({model})"),
        None => println!("ok"),
    }
    Ok(())
}
