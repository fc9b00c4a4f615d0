//! Headless driver: runs the field against a synthetic 60 Hz clock
//!
//! Used by the native binary to exercise the simulation without a browser.

use clap::Parser;

use crate::app::FloatingLogos;
use crate::settings::Settings;

/// What a headless run should do
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "floating-logos", version, about = "Run the logo field against a synthetic 60 Hz clock")]
pub struct RunConfig {
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u32,
    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1024.0)]
    pub width: f32,
    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 768.0)]
    pub height: f32,
    /// Pop one sprite every this many frames (0 = never)
    #[arg(long, default_value_t = 0)]
    pub pop_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            width: 1024.0,
            height: 768.0,
            pop_every: 0,
        }
    }
}

/// Summary of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub frames: u32,
    pub final_count: usize,
    pub min_count: usize,
    pub pops: u32,
    pub out_of_bounds: u32,
}

/// Frame interval of the synthetic clock (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

pub fn run(config: &RunConfig, settings: Settings) -> RunReport {
    let mut logos = FloatingLogos::new(settings);
    logos.start(0.0, config.width, config.height);

    let mut report = RunReport {
        min_count: usize::MAX,
        ..Default::default()
    };

    for frame in 0..config.frames {
        let now = frame as f64 * FRAME_MS;

        if config.pop_every > 0 && frame > 0 && frame % config.pop_every == 0 {
            let target = logos
                .field()
                .and_then(|f| f.sprites.iter().find(|s| !s.is_popping()).map(|s| s.id));
            if let Some(id) = target {
                if logos.click(id, now) {
                    report.pops += 1;
                }
            }
        }

        let snapshot = logos.frame(now, config.width, config.height);
        report.frames += 1;
        report.min_count = report.min_count.min(snapshot.sprites.len());

        if let Some(field) = logos.field() {
            let stray = field
                .sprites
                .iter()
                .filter(|s| !s.in_bounds(&field.viewport))
                .count();
            report.out_of_bounds += stray as u32;
        }

        if frame % 60 == 0 {
            log::debug!(
                "t={:.1}s sprites={} bursts={} tasks={}",
                now / 1000.0,
                snapshot.sprites.len(),
                snapshot.bursts.len(),
                logos.field().map_or(0, |f| f.pending_tasks())
            );
        }
    }

    report.final_count = logos.field().map_or(0, |f| f.len());
    if report.min_count == usize::MAX {
        report.min_count = 0;
    }
    logos.stop();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LOGO_COUNT;

    fn quiet() -> Settings {
        Settings {
            autoplay_hint: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_ten_second_run_keeps_everything() {
        let report = run(&RunConfig::default(), quiet());
        assert_eq!(report.frames, 600);
        assert_eq!(report.final_count, LOGO_COUNT);
        assert_eq!(report.min_count, LOGO_COUNT);
        assert_eq!(report.out_of_bounds, 0);
    }

    #[test]
    fn test_pops_shrink_the_field() {
        let config = RunConfig {
            frames: 120,
            pop_every: 30,
            ..Default::default()
        };
        let report = run(&config, quiet());
        assert_eq!(report.pops, 3);
        assert!(report.min_count < LOGO_COUNT);
    }

    #[test]
    fn test_args() {
        let config =
            RunConfig::try_parse_from(["floating-logos", "--frames", "90", "--width", "800"]).unwrap();
        assert_eq!(config.frames, 90);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 768.0);
        assert_eq!(config.pop_every, 0);

        let defaults = RunConfig::try_parse_from(["floating-logos"]).unwrap();
        assert_eq!(defaults, RunConfig::default());
    }

    #[test]
    fn test_bad_args_are_rejected() {
        assert!(RunConfig::try_parse_from(["floating-logos", "--width", "10x24"]).is_err());
        assert!(RunConfig::try_parse_from(["floating-logos", "90"]).is_err());

        let help = RunConfig::try_parse_from(["floating-logos", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
