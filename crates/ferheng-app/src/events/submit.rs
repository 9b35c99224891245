use ferheng_core::{SubmitOutcome, SubmitTicket};
use ferheng_store::StoreError;
use ferheng_types::{AppEvent, Notice};
use kanal::AsyncSender;

use super::refresh::send_list;
use super::{Session, notify};

/// A finished store request for a submitted draft
pub struct SubmitDone {
    pub ticket: SubmitTicket,
    pub result: Result<SubmitOutcome, StoreError>,
}

/// Validate the draft and send it in the background.
///
/// The controller stays busy until the result comes back through `done_tx`,
/// so a second submit in the meantime is refused.
pub async fn handle_submit(
    session: &mut Session,
    done_tx: &AsyncSender<SubmitDone>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ticket = match session.controller.prepare_submit() {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::debug!("Submit refused: {}", e);
            return notify(app_to_ui_tx, e.notice()).await;
        }
    };

    tracing::info!("Submitting draft ({:?})", ticket.mode());

    let store = session.controller.store();
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let sent = ticket.clone();
        let request = tokio::spawn(async move { sent.send(store.as_ref()).await });

        // A request that dies still has to hand the ticket back
        let result = request.await.unwrap_or_else(|e| {
            tracing::error!("Submit request aborted: {}", e);
            Err(StoreError::Network(format!("request aborted: {e}")))
        });

        if let Err(e) = done_tx.send(SubmitDone { ticket, result }).await {
            tracing::error!("Failed to report submit result: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_submit_done(
    session: &mut Session,
    done: SubmitDone,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let result = session
        .controller
        .complete_submit(done.ticket, done.result, &mut session.cache)
        .await;

    match result {
        Ok(SubmitOutcome::Created(entry)) => {
            notify(app_to_ui_tx, Notice::Added(entry.id)).await?;
            send_list(session, app_to_ui_tx).await
        }
        Ok(SubmitOutcome::Updated(id)) => {
            notify(app_to_ui_tx, Notice::Updated(id)).await?;
            send_list(session, app_to_ui_tx).await
        }
        Err(e) => notify(app_to_ui_tx, e.notice()).await,
    }
}
