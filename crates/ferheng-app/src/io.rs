use std::io::BufRead;

use kanal::AsyncReceiver;

/// Read stdin lines on a plain thread and forward them.
///
/// A runtime blocking task would keep shutdown waiting on a pending read,
/// so this thread is left detached. The channel closes at EOF.
pub fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::unbounded_async();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if !matches!(tx.try_send(line), Ok(true)) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("stdin reader stopping");
    });

    rx
}
