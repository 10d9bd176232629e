use std::fs;
use std::path::PathBuf;

use clap::Parser;
use formats::{SeriesOptions, parse_claims_json, parse_series_json, split_frames};
use foundation::math::GeoPoint;
use gpu::RecordingRenderer;
use layers::{RecordingReadout, RecordingSurface};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::{CameraIntent, GlobeConfig, GlobeController};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless data globe: ingest a series, tick, log the readout")]
struct Args {
    /// JSON array of series records (or a flat number array)
    #[arg(long)]
    series: PathBuf,

    /// JSON array of claim records
    #[arg(long)]
    claims: Option<PathBuf>,

    /// JSON viewer config; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Series format: magnitude or legend
    #[arg(long, default_value = "magnitude")]
    format: String,

    /// Split the series by its time key and ingest one morph frame per key
    #[arg(long)]
    animated: bool,

    /// Number of ticks to run
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Point the camera at lat,lon before the first tick
    #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
    focus: Option<GeoPoint>,

    /// Sweep the morph time from 0 to 1 across the run
    #[arg(long)]
    sweep: bool,

    /// Seed for claim choice and widget placement
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport size in pixels as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080", value_parser = parse_viewport)]
    viewport: (f64, f64),
}

fn parse_lat_lon(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn parse_viewport(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse::<f64>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<f64>().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => GlobeConfig::load(path).map_err(|e| e.to_string())?,
        None => GlobeConfig::default(),
    };
    if args.seed.is_some() {
        config.scheduler.seed = args.seed;
    }

    let widget_size = config.scheduler.placement.widget_size_px;
    let mut controller = GlobeController::new(
        config,
        RecordingRenderer::new(),
        RecordingSurface::new(widget_size),
        RecordingReadout::default(),
    );
    controller.handle_intent(CameraIntent::Resize {
        width: args.viewport.0,
        height: args.viewport.1,
    });

    let base_options = SeriesOptions {
        format: Some(args.format.clone()),
        animated: args.animated,
        name: None,
    };
    let format = base_options.resolve().map_err(|e| e.to_string())?.format;
    let payload = fs::read_to_string(&args.series)
        .map_err(|e| format!("read {}: {e}", args.series.display()))?;
    let series = parse_series_json(&payload, format).map_err(|e| e.to_string())?;

    if args.animated {
        let frames = split_frames(&series);
        info!(frames = frames.len(), "ingesting animated series");
        for frame in frames {
            let options = SeriesOptions {
                name: frame.key.clone(),
                ..base_options.clone()
            };
            controller
                .ingest_series(frame.series, &options)
                .map_err(|e| e.to_string())?;
        }
    } else {
        controller
            .ingest_series(series, &base_options)
            .map_err(|e| e.to_string())?;
    }

    if let Some(path) = &args.claims {
        let payload =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let records = parse_claims_json(&payload).map_err(|e| e.to_string())?;
        controller.ingest_claims(records);
    }

    if let Some(point) = args.focus {
        controller.camera_mut().orient_toward(point);
    }

    let mut last_label = String::new();
    for i in 0..args.ticks {
        if args.sweep && args.ticks > 1 {
            controller.set_time(f64::from(i) / f64::from(args.ticks - 1));
        }
        let report = controller.tick(args.dt);

        for country in &report.annotations.spawned {
            info!(frame = report.frame.index, country = %country, "claim shown");
        }
        for country in &report.annotations.retired {
            info!(frame = report.frame.index, country = %country, "claim hidden");
        }
        if report.annotations.overlaps > 0 {
            warn!(frame = report.frame.index, "annotation placed over another widget");
        }
        if report.readout.label != last_label {
            info!(
                frame = report.frame.index,
                lat = report.focus.latitude,
                lon = report.focus.longitude,
                readout = %report.readout.label,
                "readout"
            );
            last_label = report.readout.label;
        }
    }

    for (handle, widget) in controller.scheduler().surface().widgets() {
        info!(
            widget = handle.0,
            country = %widget.content.country,
            category = widget.content.category.description(),
            text = %widget.content.text,
            "active claim"
        );
    }
    info!(
        time = controller.get_time(),
        frames = controller.renderer().frame_count(),
        metrics = %controller.metrics().snapshot(),
        "run finished"
    );
    Ok(())
}
