use std::sync::Arc;

use ferheng_core::{DraftController, EntryListCache};
use ferheng_store::EntryStore;
use ferheng_types::{AppEvent, Notice};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod delete;
pub mod edit;
pub mod refresh;
pub mod submit;

use delete::{handle_delete_answer, handle_delete_request};
use edit::{handle_begin_edit, handle_cancel_edit, handle_set_field, show_draft};
use refresh::handle_refresh;
use submit::{SubmitDone, handle_submit, handle_submit_done};

/// Draft and list state for the running session
pub struct Session {
    pub controller: DraftController,
    pub cache: EntryListCache,
}

impl Session {
    pub fn new(state: &AppState, store: Arc<dyn EntryStore>) -> Self {
        Self {
            controller: DraftController::new(state.schema.clone(), store.clone()),
            cache: EntryListCache::new(store),
        }
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    store: Arc<dyn EntryStore>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = Session::new(&state, store);
    let (done_tx, done_rx) = kanal::unbounded_async::<SubmitDone>();

    // Initial load, before any intent is handled
    handle_refresh(&mut session, &app_to_ui_tx).await?;
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            done = done_rx.recv() => {
                handle_submit_done(&mut session, done?, &app_to_ui_tx).await?;
            }
            event = ui_to_app_rx.recv() => {
                let event = event?;
                tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", event);

                if matches!(event, AppEvent::Quit) {
                    // Let an in-flight submit land before leaving
                    if session.controller.is_busy() {
                        tokio::select! {
                            _ = cancel.cancelled() => {
                                tracing::info!("[EVENT_LOOP] Cancelled while waiting for submit");
                                return Ok(());
                            }
                            done = done_rx.recv() => {
                                handle_submit_done(&mut session, done?, &app_to_ui_tx).await?;
                            }
                        }
                    }
                    app_to_ui_tx.send(AppEvent::Quit).await?;
                    return Ok(());
                }

                handle_events(&state, &mut session, &done_tx, &app_to_ui_tx, event).await?;
            }
        }
    }
}

async fn handle_events(
    state: &AppState,
    session: &mut Session,
    done_tx: &AsyncSender<SubmitDone>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::BeginCreate => {
            session.controller.begin_create();
            show_draft(session, app_to_ui_tx).await?;
        }
        AppEvent::BeginEdit(id) => {
            handle_begin_edit(session, id, app_to_ui_tx).await?;
        }
        AppEvent::SetField { name, value } => {
            handle_set_field(session, &name, value, app_to_ui_tx).await?;
        }
        AppEvent::Submit => {
            handle_submit(session, done_tx, app_to_ui_tx).await?;
        }
        AppEvent::CancelEdit => {
            handle_cancel_edit(session, app_to_ui_tx).await?;
        }
        AppEvent::RequestDelete(id) => {
            handle_delete_request(state, session, id, app_to_ui_tx).await?;
        }
        AppEvent::DeleteConfirmed(confirmed) => {
            handle_delete_answer(session, confirmed, app_to_ui_tx).await?;
        }
        AppEvent::Refresh => {
            handle_refresh(session, app_to_ui_tx).await?;
        }
        AppEvent::ShowEntry(id) => {
            let event = match session.cache.get(&id) {
                Some(entry) => AppEvent::ShowEntryDetail(entry.clone()),
                None => AppEvent::Notice(Notice::UnknownEntry(id)),
            };
            app_to_ui_tx.send(event).await?;
        }
        AppEvent::ShowDraft => {
            show_draft(session, app_to_ui_tx).await?;
        }
        AppEvent::Quit => {
            // Handled by the loop itself
        }
        AppEvent::BackendReady
        | AppEvent::ShowList(_)
        | AppEvent::ShowDraftState { .. }
        | AppEvent::ShowEntryDetail(_)
        | AppEvent::ConfirmDelete(_)
        | AppEvent::Notice(_) => {
            // UI-only event, ignore in backend
        }
    }

    Ok(())
}

pub(crate) async fn notify(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    notice: Notice,
) -> anyhow::Result<()> {
    tracing::debug!("Notice: {}", notice);
    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}
