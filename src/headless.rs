//! Window-less mode: the scheduler drives the pipeline, status lines go to
//! the log, and the time range is chosen by typing `1m`, `5m`, `20m`, `1h`
//! or `4h` on stdin.

use anyhow::Result;
use dewmon_config::DewConfig;
use dewmon_core::{Message, TimeWindow};
use dewmon_pipeline::{scheduler, SystemClock, UpdateLoop};
use dewmon_renderer::ChartStore;
use dewmon_serial::SerialTransport;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

pub fn run(config: DewConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(config));
    // The stdin reader sits on a blocking thread; do not wait for it.
    runtime.shutdown_background();
    result
}

async fn serve(config: DewConfig) -> Result<()> {
    let transport = SerialTransport::open(&config.serial)?;
    let mut pipeline = UpdateLoop::new(
        transport,
        SystemClock,
        &config.sampling,
        config.display.default_window,
    )?;
    let mut store = ChartStore::new();

    let (tx, rx) = tokio::sync::mpsc::channel(8);
    tokio::spawn(forward_ctrl_c(tx.clone()));
    tokio::spawn(forward_stdin(tx));

    info!("Headless mode; type 1m, 5m, 20m, 1h or 4h to change the window");
    scheduler::run(&mut pipeline, &mut store, config.sampling.tick(), rx).await?;
    info!("Stopped with {} readings buffered", pipeline.buffer().len());
    Ok(())
}

async fn forward_ctrl_c(tx: Sender<Message>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Interrupted");
            let _ = tx.send(Message::Shutdown).await;
        }
        Err(e) => warn!("Cannot listen for Ctrl-C: {e}"),
    }
}

async fn forward_stdin(tx: Sender<Message>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match line.parse::<TimeWindow>() {
                Ok(window) => {
                    if tx.send(Message::WindowSelected(window)).await.is_err() {
                        return;
                    }
                }
                Err(e) => warn!("{e}"),
            },
            Ok(None) => return,
            Err(e) => {
                warn!("stdin read failed: {e}");
                return;
            }
        }
    }
}
