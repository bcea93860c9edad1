//! Pen-plotter command engine.
//!
//! Turns 2D pen movement (positions in screen space plus pen-up, pen-down
//! and paper-feed transitions) into the plotter's textual command language:
//!
//! ```text
//! VS50;!ST1,0;PU0,3200;PD;PD0,3333;PU;PG;
//! ```
//!
//! The pieces, leaf first:
//! - `types`: [`Rect`] and [`Point`]
//! - `mapper`: screen-to-device mapping with the plotter's axis swap
//! - `action`: [`Action`], one device primitive
//! - `buffer`: [`CommandBuffer`], recorded actions and their serialization
//! - `controller`: [`PenController`], the per-target pen state machine
//! - `transport`: fire-and-forget delivery of command strings
//! - `script` / `replay`: event scripts and an in-memory host to run them

// Bindings read only by log macros are unused when `tracing` is off
#![cfg_attr(not(feature = "tracing"), allow(unused_variables))]

pub mod action;
pub mod buffer;
pub mod config;
pub mod controller;
pub mod defaults;
pub mod errors;
pub mod log;
pub mod mapper;
pub mod replay;
pub mod script;
pub mod transport;
pub mod types;

pub use action::{Action, ActionKind};
pub use buffer::CommandBuffer;
pub use config::{DeviceSettings, PlotterConfig};
pub use controller::{PenController, PenLayer, PenPhase, PenState, Target};
pub use errors::{DomainError, InvalidActionError, NumericError, ScriptError, SourceContext};
pub use mapper::{CoordinateMapper, map_point};
pub use replay::{Sprite, Stage};
pub use transport::{AnyTransport, HttpTransport, RecordingTransport, StdoutTransport, Transport};
pub use types::{Point, Rect, pt};

/// Replay an event script and return the active sprite's command string.
///
/// `post` lines are delivered through `transport`. `name` labels the source
/// in diagnostics.
pub fn replay<X: Transport + ?Sized>(
    name: &str,
    source: &str,
    config: &PlotterConfig,
    transport: &X,
) -> Result<String, miette::Report> {
    let ctx = SourceContext::new(name, source);
    let script = script::parse(&ctx)?;
    let mut stage = Stage::new(config.clone(), transport)?;
    stage.run(&script)?;
    Ok(stage.buffer().serialize())
}

/// Render an event script to a command string, discarding any posts.
pub fn render_script(source: &str, config: &PlotterConfig) -> Result<String, miette::Report> {
    replay("<input>", source, config, &RecordingTransport::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_stroke() {
        let source = "pen down\ngoto 10 0\npen up\n";
        let out = render_script(source, &PlotterConfig::default()).unwrap();
        insta::assert_snapshot!(out, @"VS50;!ST1,0;PU0,3200;PD;PD0,3333;PU;PG;");
    }

    #[test]
    fn render_nothing() {
        let out = render_script("# pen never goes down\ngoto 10 10\n", &PlotterConfig::default()).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn replay_posts_once() {
        let transport = RecordingTransport::default();
        let source = r#"
            pen down
            goto 10 0
            pen up
            post "http://plotter.local/print"
        "#;
        let out = replay("stroke.plot", source, &PlotterConfig::default(), &transport).unwrap();
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, out);
    }

    #[test]
    fn render_uses_configured_plot_area() {
        // half-size sheet halves every coordinate before normalization
        let config = PlotterConfig::new().with_plot_area(Rect::sized(80.0, 60.0).unwrap());
        let out = render_script("goto 0 -180\npen down\ngoto 240 -180\n", &config).unwrap();
        assert_eq!(out, "VS50;!ST1,0;PU0,1600;PD;PD0,3200;PG;");
    }

    #[test]
    fn render_reports_syntax_errors() {
        let err = render_script("pen sideways\n", &PlotterConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid event script"));
    }

    #[test]
    fn degenerate_source_area_is_reported() {
        let config = PlotterConfig::new().with_source_area(Rect::try_new(0.0, 0.0, 0.0, 0.0).unwrap());
        assert!(render_script("pen down", &config).is_err());
    }
}
