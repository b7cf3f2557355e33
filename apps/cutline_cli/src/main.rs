use anyhow::{bail, Context, Result};
use cutline_core::{EditAction, EditorSession};

const USAGE: &str = "usage: cutline <show|normalize> <snapshot.json> [output.json]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "show" => show(path),
        [cmd, path] if cmd == "normalize" => normalize(path, path),
        [cmd, path, output] if cmd == "normalize" => normalize(path, output),
        _ => bail!(USAGE),
    }
}

fn show(path: &str) -> Result<()> {
    let session =
        EditorSession::load_from_file(path).with_context(|| format!("loading {path}"))?;

    println!("duration  {}", session.cutting.duration());
    println!();
    println!("segments  ({})", session.cutting.segments().len());
    for (i, segment) in session.cutting.segments().iter().enumerate() {
        println!(
            "  [{i}] {} - {}  {}",
            segment.start,
            segment.end,
            if segment.deleted { "deleted" } else { "alive" }
        );
    }

    println!();
    println!("subtitle tracks  ({})", session.subtitles.tracks().len());
    for track in session.subtitles.tracks() {
        println!("  {}  {} cues", track.flavor, track.cues.len());
        for cue in &track.cues {
            println!("    {} - {}  {}", cue.start_ms, cue.end_ms, cue.text);
        }
    }
    Ok(())
}

/// Collapse adjacent segments sharing a deleted flag and rewrite the file.
fn normalize(path: &str, output: &str) -> Result<()> {
    let mut session =
        EditorSession::load_from_file(path).with_context(|| format!("loading {path}"))?;
    let before = session.cutting.segments().len();

    session.dispatch(EditAction::MergeAll)?;

    let after = session.cutting.segments().len();
    session
        .save_to_file(output)
        .with_context(|| format!("writing {output}"))?;
    tracing::info!(before, after, output, "normalized partition");
    println!("{before} -> {after} segments, written to {output}");
    Ok(())
}
