//! Submit-after-pause input handling

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

pub const DEFAULT_DEBOUNCE_MS: u64 = 1500;

/// Feed input lines through a resettable timer
///
/// Each line replaces the pending text and restarts the timer; `submit` runs
/// with the latest text once `delay` passes without new input. A blank line
/// cancels the pending text. When the input closes, pending text is submitted
/// immediately.
///
/// `submit` is awaited inline, so no input is consumed while a call is in
/// flight.
pub async fn run_debounced<F, Fut>(mut input: mpsc::Receiver<String>, delay: Duration, mut submit: F)
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<String> = None;
    let timer = time::sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            line = input.recv() => match line {
                Some(line) => {
                    let text = line.trim();
                    pending = (!text.is_empty()).then(|| text.to_string());
                    timer.as_mut().reset(Instant::now() + delay);
                }
                None => {
                    if let Some(text) = pending.take() {
                        submit(text).await;
                    }
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(text) = pending.take() {
                    submit(text).await;
                }
            }
        }
    }
}
