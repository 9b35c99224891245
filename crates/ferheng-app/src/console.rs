use std::io::Write;
use std::sync::Arc;

use ferheng_types::{AppEvent, EntryId, EntrySchema};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod render;

const HELP: &str = "\
Commands:
  list                   reload and show all words
  show <id>              show every field of one word
  new                    start a new word (clears the form)
  set <field> <value>    set a field; \\n inserts a line break
  draft                  show the form
  submit                 add the new word, or save the one being edited
  edit <id>              load a word into the form
  cancel                 stop editing
  delete <id>            delete a word (asks for confirmation)
  fields                 list the form fields
  help                   show this text
  quit                   exit";

/// What a console line asks for
#[derive(Debug)]
pub enum Command {
    Send(AppEvent),
    Help,
    Fields,
    Nothing,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => AppEvent::Refresh,
        "show" => AppEvent::ShowEntry(id_arg(rest, "show <id>")?),
        "new" => AppEvent::BeginCreate,
        "draft" | "form" => AppEvent::ShowDraft,
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim_start()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            AppEvent::SetField {
                name: name.to_string(),
                value: value.replace("\\n", "\n"),
            }
        }
        "submit" | "save" => AppEvent::Submit,
        "edit" => AppEvent::BeginEdit(id_arg(rest, "edit <id>")?),
        "cancel" => AppEvent::CancelEdit,
        "delete" | "rm" => AppEvent::RequestDelete(id_arg(rest, "delete <id>")?),
        "fields" => return Ok(Command::Fields),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => AppEvent::Quit,
        other => return Err(format!("Unknown command '{other}', try 'help'")),
    };

    Ok(Command::Send(event))
}

fn id_arg(rest: &str, usage: &str) -> Result<EntryId, String> {
    match rest.split_whitespace().next() {
        Some(id) => Ok(EntryId::new(id)),
        None => Err(format!("usage: {usage}")),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Terminal front end: turns lines into intents and app events into text
pub async fn console_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<String>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let schema = state.schema.clone();
    let interactive = atty::is(atty::Stream::Stdin);

    let mut awaiting_confirm: Option<EntryId> = None;
    let mut input_closed = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Console stopping");
                return Ok(());
            }
            line = input_rx.recv(), if !input_closed => {
                let Ok(line) = line else {
                    // EOF: let the backend finish, then leave on its Quit
                    input_closed = true;
                    ui_to_app_tx.send(AppEvent::Quit).await?;
                    continue;
                };

                if awaiting_confirm.take().is_some() {
                    ui_to_app_tx.send(AppEvent::DeleteConfirmed(is_yes(&line))).await?;
                    continue;
                }

                match parse_command(&line) {
                    Ok(Command::Send(event)) => {
                        let quitting = matches!(event, AppEvent::Quit);
                        ui_to_app_tx.send(event).await?;
                        if quitting {
                            input_closed = true;
                            continue;
                        }
                    }
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Fields) => print!("{}", render::fields(&schema)),
                    Ok(Command::Nothing) => {}
                    Err(message) => println!("{message}"),
                }
            }
            event = app_to_ui_rx.recv() => {
                match event? {
                    AppEvent::Quit => return Ok(()),
                    AppEvent::ConfirmDelete(id) => {
                        print!("Delete word {id}? Are you sure? [y/N] ");
                        std::io::stdout().flush()?;
                        awaiting_confirm = Some(id);
                        continue;
                    }
                    event => show_event(event, &schema),
                }
            }
        }

        if interactive && !input_closed {
            print!("> ");
            std::io::stdout().flush()?;
        }
    }
}

fn show_event(event: AppEvent, schema: &EntrySchema) {
    match event {
        AppEvent::BackendReady => println!("Ready. Type 'help' for commands."),
        AppEvent::ShowList(state) => print!("{}", render::list(&state, schema)),
        AppEvent::ShowDraftState { mode, values } => {
            print!("{}", render::draft(&mode, &values, schema))
        }
        AppEvent::ShowEntryDetail(entry) => print!("{}", render::entry(&entry, schema)),
        AppEvent::Notice(notice) => println!("{notice}"),
        other => tracing::debug!("Console ignoring {:?}", other),
    }
}
