//! `penplot`: replay an event script and send the result to a plotter.

use std::path::PathBuf;

use clap::Parser;
use miette::{Context, IntoDiagnostic};
use penplot::{AnyTransport, DeviceSettings, HttpTransport, PlotterConfig, Rect, StdoutTransport, defaults};
use tokio::runtime::Handle;

#[derive(Debug, Parser)]
#[command(version, about = "Replay a pen event script as plotter commands")]
struct Args {
    /// Event script to replay
    script: PathBuf,

    /// Sheet size in millimeters, as WIDTH,HEIGHT
    #[arg(long, value_name = "W,H", value_parser = parse_area)]
    plot_area: Option<Rect>,

    /// Device steps per millimeter
    #[arg(long, default_value_t = defaults::UNITS_PER_MM)]
    units_per_mm: f64,

    /// Plot speed sent in the preamble
    #[arg(long, default_value_t = defaults::VELOCITY)]
    velocity: u32,

    /// Tool slot selected in the preamble
    #[arg(long, default_value_t = defaults::PEN)]
    pen: u32,

    /// Where bare `post` lines send the buffer
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Print requests instead of sending them
    #[arg(long)]
    dry_run: bool,
}

fn parse_area(s: &str) -> Result<Rect, String> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got {s:?}"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Rect::sized(w, h).map_err(|e| e.to_string())
}

impl Args {
    fn config(&self) -> miette::Result<PlotterConfig> {
        let mut config = PlotterConfig::new()
            .with_units_per_mm(self.units_per_mm)?
            .with_device(DeviceSettings {
                velocity: self.velocity,
                pen: self.pen,
            });
        if let Some(area) = self.plot_area {
            config = config.with_plot_area(area);
        }
        if let Some(url) = &self.endpoint {
            config = config.with_endpoint(url.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout carries the command string
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;
    let source = std::fs::read_to_string(&args.script)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.script.display()))?;

    let transport = if args.dry_run {
        AnyTransport::from(StdoutTransport)
    } else {
        AnyTransport::from(HttpTransport::new(Handle::current()))
    };

    let name = args.script.display().to_string();
    let output = penplot::replay(&name, &source, &config, &transport)?;
    tracing::info!(script = %name, bytes = output.len(), "replayed");
    println!("{output}");

    if let AnyTransport::Http(http) = &transport {
        http.wait_idle().await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_area_accepts_width_height() {
        let area = parse_area("200, 150").unwrap();
        assert_eq!(area.width(), 200.0);
        assert_eq!(area.height(), 150.0);
    }

    #[test]
    fn parse_area_rejects_garbage() {
        assert!(parse_area("200").is_err());
        assert!(parse_area("a,b").is_err());
        assert!(parse_area("-1,5").is_err());
    }

    #[test]
    fn flags_build_config() {
        let args = Args::parse_from([
            "penplot",
            "draw.plot",
            "--plot-area",
            "80,60",
            "--velocity",
            "20",
            "--endpoint",
            "http://plotter.local/print",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.plot_area(), Rect::sized(80.0, 60.0).unwrap());
        assert_eq!(config.device(), DeviceSettings { velocity: 20, pen: 1 });
        assert_eq!(config.endpoint(), Some("http://plotter.local/print"));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let args = Args::parse_from(["penplot", "draw.plot", "--units-per-mm", "0"]);
        assert!(args.config().is_err());
    }
}
