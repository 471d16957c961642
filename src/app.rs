use crate::config::PosepilotConfig;
use crate::error::Result;
use crate::motion::MotionController;
use crate::sender::ControlSink;
use crate::source::SkeletonSource;
use crate::stopwatch::Stopwatch;
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Counters for one controller session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_processed: u64,
    pub frames_sent: u64,
    pub send_failures: u64,
}

/// Drive skeleton frames from `source` through one controller into `sink`
/// until the stream ends or Ctrl-C arrives.
///
/// Frames are pulled, interpreted, and sent from this single task in
/// capture order; the gesture detectors rely on that ordering. Undelivered
/// control records are counted and logged, never retried.
pub async fn run<R, S>(
    config: &PosepilotConfig,
    source: &mut SkeletonSource<R>,
    sink: &mut S,
) -> Result<SessionStats>
where
    R: AsyncRead + Unpin,
    S: ControlSink,
{
    let session_id = Uuid::new_v4();
    info!("Starting motion session {}", session_id);

    let mut controller = MotionController::new(&config.motion);
    let mut stats = SessionStats::default();
    let mut stopwatch = Stopwatch::new();

    loop {
        let frame = tokio::select! {
            frame = source.next_frame() => frame?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, stopping session {}", session_id);
                break;
            }
        };
        let Some(skeletons) = frame else {
            info!("Skeleton stream ended");
            break;
        };

        let control = controller.process_frame(&skeletons);
        stats.frames_processed += 1;

        match sink.send(&control).await {
            Ok(()) => stats.frames_sent += 1,
            Err(e) => {
                stats.send_failures += 1;
                debug!("Control record not delivered: {}", e);
            }
        }

        if stats.frames_processed % config.system.stats_interval_frames == 0 {
            let elapsed_ms = stopwatch.restart().max(1);
            let fps = config.system.stats_interval_frames as f64 * 1000.0 / elapsed_ms as f64;
            info!(
                "Session {}: {} frames, {:.1} fps, state {:?}",
                session_id,
                stats.frames_processed,
                fps,
                controller.game_state()
            );
        }
    }

    if stats.send_failures > 0 {
        warn!(
            "{} control records were not delivered this session",
            stats.send_failures
        );
    }
    info!(
        "Session {} finished: {} frames processed, {} sent",
        session_id, stats.frames_processed, stats.frames_sent
    );
    Ok(stats)
}
