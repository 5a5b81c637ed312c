use anyhow::Error;
use triage_catalogs::Catalog;
use triage_dialoguer::DialoguerFrontend;
use triage_ratatui::RatatuiFrontend;
use triage_wizard::{
    ChatClient, Frontend, FrontendOutcome, NETWORK_ERROR_MESSAGE, Pacing, PresentMode,
    ReplyPresenter, ReqwestTransport, Session, SubmitOutcome,
};

use crate::opt::{Backend, Survey};

pub(crate) async fn survey(catalog: Catalog, opt: Survey, backend: &Backend) -> Result<(), Error> {
    let config = backend.client_config()?;
    tracing::info!(base = %config.base_url(), catalog = catalog.title(), "starting survey");

    let mode = if opt.instant {
        PresentMode::Immediate
    } else {
        PresentMode::Typewriter(Pacing::default())
    };
    let mut session = Session::new(
        catalog.questions()?,
        ChatClient::new(ReqwestTransport::new(&config)?),
        ReplyPresenter::new(mode),
        catalog.payload_style(),
    );

    if opt.tui {
        let mut frontend = RatatuiFrontend::new().with_title(catalog.title());
        let outcome = frontend.run(&mut session).await?;
        // The alternate screen is gone; leave the reply in the scrollback.
        match outcome {
            FrontendOutcome::Submitted(SubmitOutcome::Replied(result)) => {
                println!("{}", result.display_text());
            }
            FrontendOutcome::Submitted(SubmitOutcome::Failed) => println!("{NETWORK_ERROR_MESSAGE}"),
            FrontendOutcome::Submitted(SubmitOutcome::Incomplete { .. })
            | FrontendOutcome::Quit => {}
        }
    } else {
        let mut frontend = if opt.plain {
            DialoguerFrontend::plain()
        } else {
            DialoguerFrontend::new()
        };
        frontend.run(&mut session).await?;
    }
    Ok(())
}
