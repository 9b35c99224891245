use ferheng_types::{AppEvent, EntryId, Mode, Notice};
use kanal::AsyncSender;

use super::{Session, notify};

pub async fn show_draft(
    session: &Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::ShowDraftState {
            mode: session.controller.mode().clone(),
            values: session.controller.draft().clone(),
        })
        .await?;
    Ok(())
}

pub async fn handle_begin_edit(
    session: &mut Session,
    id: EntryId,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(entry) = session.cache.get(&id).cloned() else {
        return notify(app_to_ui_tx, Notice::UnknownEntry(id)).await;
    };

    match session.controller.begin_edit(&entry) {
        Ok(()) => show_draft(session, app_to_ui_tx).await,
        Err(e) => notify(app_to_ui_tx, e.notice()).await,
    }
}

pub async fn handle_set_field(
    session: &mut Session,
    name: &str,
    value: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Err(e) = session.controller.set_field(name, value) {
        return notify(app_to_ui_tx, e.notice()).await;
    }
    Ok(())
}

pub async fn handle_cancel_edit(
    session: &mut Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if session.controller.mode() == &Mode::Creating {
        return Ok(());
    }

    session.controller.cancel_edit();
    notify(app_to_ui_tx, Notice::EditCancelled).await?;
    show_draft(session, app_to_ui_tx).await
}
