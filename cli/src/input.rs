use std::io::BufRead;

use log::error;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Forward every line of `reader` to the returned channel from a dedicated thread.
///
/// The thread is never joined. A blocking read must not keep the runtime alive once the module is solved, and the
/// process exits from under it when `main` returns.
pub fn spawn_line_reader(reader: impl BufRead + Send + 'static) -> UnboundedReceiver<String> {
    let (lines_tx, lines_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if lines_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    error!("Failed to read input: {err}");
                    break;
                }
            }
        }
    });

    lines_rx
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use pretty_assertions::assert_eq;

    use super::spawn_line_reader;

    #[test]
    fn forwards_lines_then_closes() {
        let mut lines = spawn_line_reader(Cursor::new("R U'\n\nreset\n"));

        assert_eq!(lines.blocking_recv().as_deref(), Some("R U'"));
        assert_eq!(lines.blocking_recv().as_deref(), Some(""));
        assert_eq!(lines.blocking_recv().as_deref(), Some("reset"));
        assert_eq!(lines.blocking_recv(), None);
    }

    #[test]
    fn dropping_the_receiver_does_not_wait_for_input() {
        // An endless reader never reaches EOF, so only the closed channel can stop the thread
        let endless = Cursor::new("F\n".repeat(1000)).chain(std::io::repeat(b'\n'));
        let mut lines = spawn_line_reader(BufReader::new(endless));

        assert_eq!(lines.blocking_recv().as_deref(), Some("F"));
        drop(lines);
    }
}
