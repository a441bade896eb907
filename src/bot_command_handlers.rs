use teloxide::{prelude::*, utils::command::BotCommands};

use crate::constants::NOT_A_COMMAND_MSG;
use crate::data_types::{Command, HandlerResult};
use crate::navigator::Navigator;

pub async fn start(bot: Bot, msg: Message, navigator: Navigator) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        format!(
            "¡Bienvenido al Restaurante Desweb!\nToca un platillo del menú y te sorprendemos con otro.\n\n{}",
            Command::descriptions()
        ),
    )
    .await?;

    navigator.open_menu(msg.chat.id.0).await?;
    Ok(())
}

pub async fn menu_cmd(msg: Message, navigator: Navigator) -> HandlerResult {
    navigator.open_menu(msg.chat.id.0).await?;
    Ok(())
}

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub async fn invalid_cmd(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, NOT_A_COMMAND_MSG).await?;
    Ok(())
}
