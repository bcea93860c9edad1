//! Replays every `tests/scripts/*.plot` file and compares the transcript
//! (posted requests, then the final buffer) with the sibling `.hpgl` file.

use std::fmt::Write;

use camino::Utf8Path;
use penplot::{PlotterConfig, RecordingTransport};

fn transcript(transport: &RecordingTransport, output: &str) -> String {
    let mut out = String::new();
    for request in transport.requests() {
        let _ = writeln!(out, "POST {}\n{}", request.url, request.body);
    }
    let _ = writeln!(out, "---\n{output}");
    out
}

fn diff(expected: &str, actual: &str) -> String {
    let mut report = String::new();
    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            dissimilar::Chunk::Equal(text) => report.push_str(text),
            dissimilar::Chunk::Delete(text) => {
                let _ = write!(report, "[-{text}-]");
            }
            dissimilar::Chunk::Insert(text) => {
                let _ = write!(report, "{{+{text}+}}");
            }
        }
    }
    report
}

fn replay_script(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let expected = std::fs::read_to_string(path.with_extension("hpgl"))?;

    let transport = RecordingTransport::default();
    let output = penplot::replay(path.as_str(), &source, &PlotterConfig::default(), &transport)
        .map_err(|e| format!("{e:?}"))?;
    let actual = transcript(&transport, &output);

    if actual.trim_end() != expected.trim_end() {
        return Err(format!(
            "transcript mismatch for {path}:\n{}",
            diff(expected.trim_end(), actual.trim_end())
        )
        .into());
    }
    Ok(())
}

datatest_stable::harness! {
    { test = replay_script, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scripts"), pattern = r"\.plot$" },
}
