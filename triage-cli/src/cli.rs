mod chat;
mod health;
mod survey;

use anyhow::Error;
use triage_catalogs::Catalog;

use crate::opt::{Backend, Commands};

pub(crate) async fn exec(command: Commands, backend: Backend) -> Result<(), Error> {
    match command {
        Commands::Survey(o) => survey::survey(Catalog::Workplace, o, &backend).await,
        Commands::Quick(o) => survey::survey(Catalog::Quick, o, &backend).await,
        Commands::Chat(o) => chat::chat(o, &backend).await,
        Commands::Health => health::health(&backend).await,
    }
}
