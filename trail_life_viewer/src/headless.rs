// headless.rs - Windowless runner paced by a tokio interval

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};
use trail_life::{GameOfLife, NullSink};

use crate::pacer::frame_interval;

/// Generations between progress lines.
const LOG_EVERY: u64 = 100;

/// Runs until `frames` cycles have completed or Ctrl-C arrives, and returns
/// the last generation reached.
pub async fn run(mut life: GameOfLife, max_fps: f64, frames: Option<u64>) -> Result<u64> {
    let mut ticker = time::interval(frame_interval(max_fps));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(max_fps, ?frames, "headless run started");
    let mut reseeds = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            res = &mut shutdown => {
                res.context("failed to listen for Ctrl-C")?;
                tracing::info!("interrupted");
                break;
            }
        }

        let report = life.step(&mut NullSink);
        if let Some(reseed) = &report.reseed {
            reseeds += 1;
            tracing::info!(
                generation = report.generation,
                activity = report.activity,
                reason = ?reseed.reason,
                shapes = reseed.placements.len(),
                "reseeded"
            );
        }
        if report.generation % LOG_EVERY == 0 {
            tracing::info!(
                generation = report.generation,
                activity = report.activity,
                live = life.live_count(),
                "progress"
            );
        }
        if frames.is_some_and(|limit| report.generation >= limit) {
            break;
        }
    }

    tracing::info!(generation = life.generation(), reseeds, "headless run finished");
    Ok(life.generation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_life::LifeConfig;

    #[tokio::test]
    async fn stops_after_requested_frames() {
        let config = LifeConfig {
            seed: Some(11),
            ..Default::default()
        };
        let life: GameOfLife = GameOfLife::new(&config).unwrap();

        let generation = run(life, 1000.0, Some(25)).await.unwrap();
        assert_eq!(generation, 25);
    }
}
