use anyhow::Error;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use triage_wizard::{ChatClient, ChatDemo, ChatTransport, ReqwestTransport, Responder};

use crate::opt::{Backend, Chat};

/// Typed alone on a line to leave the chat.
const QUIT: &str = "/quit";

pub(crate) async fn chat(opt: Chat, backend: &Backend) -> Result<(), Error> {
    let responder = if opt.backend {
        let config = backend.client_config()?;
        tracing::info!(base = %config.base_url(), "chatting with backend");
        Responder::Backend(ChatClient::new(ReqwestTransport::new(&config)?))
    } else {
        Responder::canned()
    };

    println!("Type a message and press Enter. {QUIT} leaves.");
    converse(ChatDemo::new(responder)).await
}

async fn converse<T: ChatTransport>(mut chat: ChatDemo<T>) -> Result<(), Error> {
    let theme = ColorfulTheme::default();
    loop {
        let input: String = match Input::with_theme(&theme)
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(input) => input,
            Err(dialoguer::Error::IO(err)) if err.kind() == std::io::ErrorKind::Interrupted => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        if input.trim() == QUIT {
            return Ok(());
        }

        if let Some(message) = chat.send(&input).await {
            println!("Bot: {}", message.text);
        }
    }
}
