use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use ptrack::error::Error;
use ptrack::{Detection, DetectionFilter, Scene, Track, TrackState, TrackerConfig};
use serde_derive::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ptrack-replay", about = "Run the box tracker over a detection log")]
struct Args {
    /// Detection log, `-` for stdin
    input: PathBuf,

    /// JSON tracker config (camelCase keys)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    iou_threshold: Option<f32>,

    #[arg(long)]
    max_misses: Option<u32>,

    #[arg(long)]
    pos_smoothing: Option<f32>,

    #[arg(long)]
    size_smoothing: Option<f32>,

    #[arg(long)]
    prediction_dilation: Option<f32>,

    /// Detector class to track
    #[arg(long, default_value_t = 0)]
    class: i32,

    #[arg(long, default_value_t = 0.5)]
    min_confidence: f32,

    #[arg(long, default_value_t = 5)]
    max_detections: usize,

    /// Skip tracks born on the current frame; coasting tracks are still printed
    #[arg(long)]
    confirmed_only: bool,

    /// One `id x y w h missed ts` line per track instead of JSON
    #[arg(long)]
    plain: bool,
}

impl Args {
    fn tracker_config(&self) -> Result<TrackerConfig, Error> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_path(path)?,
            None => TrackerConfig::default(),
        };

        if let Some(v) = self.iou_threshold {
            config.iou_threshold = v;
        }
        if let Some(v) = self.max_misses {
            config.max_misses = v;
        }
        if let Some(v) = self.pos_smoothing {
            config.pos_smoothing = v;
        }
        if let Some(v) = self.size_smoothing {
            config.size_smoothing = v;
        }
        if let Some(v) = self.prediction_dilation {
            config.prediction_dilation = v;
        }

        Ok(config)
    }

    fn filter(&self) -> DetectionFilter {
        DetectionFilter {
            class: self.class,
            min_confidence: self.min_confidence,
            max_count: self.max_detections,
        }
    }
}

fn is_printed(track: &Track, confirmed_only: bool) -> bool {
    !confirmed_only || track.state() != TrackState::Tentative
}

#[derive(Serialize)]
struct FrameTracks<'a> {
    ts: f64,
    tracks: Vec<&'a Track>,
}

fn parse_line(line: &str) -> Option<(f64, Vec<Detection>)> {
    let Some(idx) = line.find(':') else {
        warn!("wrong file format: expected `:`");
        return None;
    };

    let (ts, vector) = line.split_at(idx);

    match (ts.trim().parse::<f64>(), serde_json::from_str(&vector[1..])) {
        (Ok(ts), Ok(vector)) => Some((ts, vector)),
        (Ok(_), Err(err)) => {
            warn!(%err, "wrong file format: parse json failed");
            None
        }
        (Err(err), _) => {
            warn!(%err, "wrong file format: parse timestamp failed");
            None
        }
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = args.tracker_config()?;
    let filter = args.filter();
    let mut scene = Scene::new(config)?;

    info!(?config, ?filter, input = %args.input.display(), "replaying");

    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        Box::new(BufReader::new(std::fs::File::open(&args.input)?))
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some((ts, detections)) = parse_line(&line) else {
            skipped += 1;
            continue;
        };

        let boxes = filter.apply(&detections);
        let tracks = scene
            .update(&boxes)
            .iter()
            .filter(|t| is_printed(t, args.confirmed_only));

        if args.plain {
            for t in tracks {
                writeln!(out, "{} {} {} {} {} {} {}", t.id, t.x, t.y, t.w, t.h, t.missed, ts)?;
            }
        } else {
            let frame = FrameTracks {
                ts,
                tracks: tracks.collect(),
            };
            serde_json::to_writer(&mut out, &frame)?;
            writeln!(out)?;
        }
    }

    info!(frames = scene.frame_count(), skipped, "replay finished");

    Ok(())
}
