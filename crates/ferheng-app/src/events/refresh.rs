use ferheng_types::{AppEvent, ListState, Notice};
use kanal::AsyncSender;

use super::{Session, notify};

pub async fn handle_refresh(
    session: &mut Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    session.cache.refresh().await;
    send_list(session, app_to_ui_tx).await
}

/// Push the current snapshot, flagging a degraded fetch separately
pub async fn send_list(
    session: &Session,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let state = session.cache.state().clone();
    let degraded = match &state {
        ListState::FetchFailed(reason) => Some(reason.clone()),
        ListState::Loaded(_) | ListState::Empty => None,
    };

    app_to_ui_tx.send(AppEvent::ShowList(state)).await?;

    if let Some(reason) = degraded {
        notify(app_to_ui_tx, Notice::ListFetchDegraded(reason)).await?;
    }

    Ok(())
}
