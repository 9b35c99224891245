use ferheng_types::{AppEvent, EntryId, Notice};
use kanal::AsyncSender;

use super::refresh::send_list;
use super::{Session, notify};
use crate::state::AppState;

/// Record the delete and ask the console to confirm it
pub async fn handle_delete_request(
    state: &AppState,
    session: &mut Session,
    id: EntryId,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    session.controller.request_delete(id.clone());

    let assume_yes = state.config.read().await.assume_yes;
    if assume_yes {
        return handle_delete_answer(session, true, app_to_ui_tx).await;
    }

    app_to_ui_tx.send(AppEvent::ConfirmDelete(id)).await?;
    Ok(())
}

pub async fn handle_delete_answer(
    session: &mut Session,
    confirmed: bool,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !confirmed {
        return match session.controller.dismiss_delete() {
            Some(_) => notify(app_to_ui_tx, Notice::DeleteDismissed).await,
            None => notify(app_to_ui_tx, Notice::NothingToConfirm).await,
        };
    }

    match session.controller.confirm_delete(&mut session.cache).await {
        Ok(id) => {
            notify(app_to_ui_tx, Notice::Deleted(id)).await?;
            send_list(session, app_to_ui_tx).await
        }
        Err(e) => notify(app_to_ui_tx, e.notice()).await,
    }
}
