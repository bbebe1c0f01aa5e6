//! Periodic tick source plus a single-threaded dispatcher.
//!
//! Used when running without a window. Ticks and user events are multiplexed
//! with `select!` on one task, so at most one handler runs at a time.

use crate::{clock::Clock, update_loop::UpdateLoop};
use dewmon_core::{Message, Renderer, Result, Transport};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Drive `update_loop` every `period` until `Message::Shutdown` arrives or
/// every event sender is dropped. Stops ticking, then releases the transport.
pub async fn run<T, C, R>(
    update_loop: &mut UpdateLoop<T, C>,
    renderer: &mut R,
    period: Duration,
    mut events: mpsc::Receiver<Message>,
) -> Result<()>
where
    T: Transport,
    C: Clock,
    R: Renderer + ?Sized,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("Polling every {} ms", period.as_millis());

    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(Message::WindowSelected(window)) => {
                    update_loop.select_window(window, renderer);
                }
                Some(Message::Tick) => {
                    update_loop.tick(renderer);
                }
                Some(Message::Shutdown) | None => break,
            },

            _ = ticker.tick() => {
                update_loop.tick(renderer);
            }
        }
    }

    drop(ticker);
    info!("Tick source stopped");
    update_loop.shutdown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, ManualClock, RecordingRenderer, ScriptedTransport};
    use dewmon_config::SamplingConfig;
    use dewmon_core::TimeWindow;

    fn rig() -> (UpdateLoop<ScriptedTransport, ManualClock>, ScriptedTransport, ManualClock) {
        let transport = ScriptedTransport::default();
        let clock = ManualClock::starting_at(at(0));
        let ul = UpdateLoop::new(
            transport.clone(),
            clock.clone(),
            &SamplingConfig::default(),
            TimeWindow::FourHours,
        )
        .unwrap();
        (ul, transport, clock)
    }

    #[tokio::test]
    async fn drains_transport_then_shuts_down() {
        let (mut ul, t, _c) = rig();
        let mut r = RecordingRenderer::default();
        for i in 0..3 {
            t.push(&format!("x,{},50,0", 20 + i));
        }

        let (tx, rx) = mpsc::channel(4);
        let stopper = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tx.send(Message::Shutdown).await.unwrap();
        };

        let (result, ()) = tokio::join!(run(&mut ul, &mut r, Duration::from_millis(5), rx), stopper);
        result.unwrap();

        assert_eq!(ul.buffer().len(), 3);
        assert_eq!(r.views.len(), 3);
        assert_eq!(t.closes(), 1);
        assert!(!ul.is_open());
    }

    #[tokio::test]
    async fn selection_event_redraws_immediately() {
        let (mut ul, t, _c) = rig();
        let mut r = RecordingRenderer::default();

        let (tx, rx) = mpsc::channel(4);
        tx.send(Message::WindowSelected(TimeWindow::OneMinute)).await.unwrap();
        tx.send(Message::Shutdown).await.unwrap();

        // Long period: only the immediate first tick can fire.
        run(&mut ul, &mut r, Duration::from_secs(3600), rx).await.unwrap();

        assert_eq!(ul.window(), TimeWindow::OneMinute);
        assert_eq!(r.views.len(), 1);
        assert_eq!(r.views[0].x_range.1 - r.views[0].x_range.0, chrono::Duration::minutes(1));
        assert_eq!(t.closes(), 1);
    }

    #[tokio::test]
    async fn dropped_sender_stops_the_loop() {
        let (mut ul, t, _c) = rig();
        let mut r = RecordingRenderer::default();
        let (tx, rx) = mpsc::channel::<Message>(1);
        drop(tx);

        run(&mut ul, &mut r, Duration::from_millis(5), rx).await.unwrap();
        assert_eq!(t.closes(), 1);
    }
}
