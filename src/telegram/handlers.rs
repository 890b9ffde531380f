//! Telegram bot handler tree configuration
//!
//! The same schema is used in production and can be reused by integration
//! tests. Pipeline failures never bubble out of an endpoint as a crash: the
//! user gets one generic error reply and the details go to the log.

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{InputFile, Message, PhotoSize};

use super::bot::Command;
use super::photos::process_photo_request;
use crate::core::error::{AppError, AppResult};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    /// Shared client for photo downloads; carries the network timeout
    pub http: reqwest::Client,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

/// Reply texts (the bot speaks Portuguese)
mod texts {
    pub const WAIT_A_MOMENT: &str = "Aguarde um instante...";
    pub const NO_PROFILE_PHOTO: &str = "Você não tem foto de perfil. Me envie uma foto!";
    pub const SEND_MORE_TIP: &str = "Para aplicar em outras fotos, basta me enviar a qualquer momento!";
    pub const UNEXPECTED_ERROR: &str = "Opa! Ocorreu um erro inesperado. Tente novamente, ou tente algo diferente.";
}

/// Creates the main dispatcher schema for the Telegram bot.
///
/// # Arguments
/// * `deps` - Handler dependencies (shared HTTP client)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_photos = deps;

    dptree::entry()
        // Command handler
        .branch(command_handler(deps_commands))
        // Photo messages get the overlay applied directly
        .branch(photo_handler(deps_photos))
}

/// Handler for bot commands (/start, /aplicar)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start | Command::Aplicar => {
                        if let Err(e) = handle_apply_command(&bot, &msg, &deps).await {
                            log::error!("Failed to apply overlay to profile photo for chat {}: {}", msg.chat.id, e);
                            bot.send_message(msg.chat.id, texts::UNEXPECTED_ERROR).await?;
                        }
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Handler for photo messages
fn photo_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.photo().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                if let Err(e) = handle_photo_message(&bot, &msg, &deps).await {
                    log::error!("Failed to apply overlay to photo from chat {}: {}", msg.chat.id, e);
                    bot.send_message(msg.chat.id, texts::UNEXPECTED_ERROR).await?;
                }
                Ok(())
            }
        })
}

/// Applies the overlay to the sender's current profile photo
///
/// Users without a profile photo get a reply asking for a photo instead;
/// that is the expected flow, not an error.
async fn handle_apply_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let user = msg
        .from
        .as_ref()
        .ok_or(AppError::MalformedUpdate("command message without a sender"))?;

    let profile = bot.get_user_profile_photos(user.id).limit(1).await?;
    let Some(sizes) = profile.photos.first().filter(|sizes| !sizes.is_empty()) else {
        bot.send_message(msg.chat.id, texts::NO_PROFILE_PHOTO).await?;
        return Ok(());
    };

    reply_with_stamped_photo(bot, msg, deps, sizes).await?;
    bot.send_message(msg.chat.id, texts::SEND_MORE_TIP).await?;
    Ok(())
}

/// Applies the overlay to a photo attached to a message
async fn handle_photo_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let sizes = msg
        .photo()
        .ok_or(AppError::MalformedUpdate("photo message without photo sizes"))?;

    reply_with_stamped_photo(bot, msg, deps, sizes).await
}

/// Sends the "wait" note, runs the pipeline and replies with the stamped PNG
async fn reply_with_stamped_photo(bot: &Bot, msg: &Message, deps: &HandlerDeps, sizes: &[PhotoSize]) -> AppResult<()> {
    bot.send_message(msg.chat.id, texts::WAIT_A_MOMENT).await?;

    let png = process_photo_request(bot, &deps.http, sizes).await?;

    bot.send_photo(msg.chat.id, InputFile::memory(png).file_name("lula.png"))
        .await?;
    Ok(())
}
