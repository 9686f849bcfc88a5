//! One-off account messages carrying today's confirmation key.

use crate::{Notification, NotificationSink, Result as NotifierErrorResult};

use rl_account::AccountService;
use rl_core::Identity;
use rl_db::IdentityStore;

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountMessage {
    Welcome,
    PasswordReset,
}

/// Look up `id_or_email` and send it `message` with a fresh confirmation key.
pub async fn send_account_message<S, N>(
    service: &AccountService<S>,
    sink: &N,
    id_or_email: &str,
    message: AccountMessage,
) -> NotifierErrorResult<Identity>
where
    S: IdentityStore,
    N: NotificationSink + ?Sized,
{
    let identity = service.lookup(id_or_email).await?;
    let key = service.confirmation_key(identity.id).await?;

    let notification = match message {
        AccountMessage::Welcome => Notification::Welcome { key },
        AccountMessage::PasswordReset => Notification::PasswordReset { key },
    };
    sink.deliver(&identity, &notification).await?;

    info!(
        "Sent {} message to {} ({})",
        notification, identity.email, identity.id
    );
    Ok(identity)
}
