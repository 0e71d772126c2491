use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sightline::api::{
    compute_visibility_polygon, generate_round, Piece, Playfield, Point, ReplayToken, Round,
    VisibilityPolygon,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod provenance;

use config::RunConfig;
use provenance::Sidecar;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Round generation and field-of-view inspection")]
struct Cmd {
    /// Optional run label; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate one round (both regions) and write it as JSON
    Round {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 400.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        /// JSON document with optional `placement`, `visibility`, `layout` sections
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Compute the visibility polygon of a piece on a saved round
    Fov {
        /// Round file written by `round`
        #[arg(long)]
        round: PathBuf,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        /// Facing angle in degrees (0 = +x, 90 = +y)
        #[arg(long, default_value_t = 90.0)]
        facing: f64,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Generate many rounds and write per-round stats (CSV or Parquet by extension)
    Sweep {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        rounds: u64,
        #[arg(long, default_value_t = 400.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a provenance block, with summary stats of a sweep table if given
    Report {
        #[arg(long)]
        from: Option<PathBuf>,
    },
}

/// On-disk form of a generated round.
#[derive(Serialize, Deserialize)]
struct RoundFile {
    playfield: Playfield,
    round: Round,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Round {
            seed,
            index,
            width,
            height,
            config,
            out,
        } => round(seed, index, width, height, config.as_deref(), &out, cmd.tag),
        Action::Fov {
            round,
            x,
            y,
            facing,
            config,
            out,
        } => fov(&round, Point::new(x, y), facing, config.as_deref(), &out, cmd.tag),
        Action::Sweep {
            seed,
            rounds,
            width,
            height,
            config,
            out,
        } => sweep(seed, rounds, width, height, config.as_deref(), &out, cmd.tag),
        Action::Report { from } => report(from.as_deref(), cmd.tag),
    }
}

fn round(
    seed: u64,
    index: u64,
    width: f64,
    height: f64,
    config: Option<&Path>,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(seed, index, width, height, out = %out.display(), "round");
    let cfg = RunConfig::load(config)?;
    let playfield = cfg.playfield(width, height)?;
    let token = ReplayToken::new(seed, index);
    let round = generate_round(&playfield, &cfg.placement, token)?;
    for side in [&round.top, &round.bottom] {
        if !side.is_complete(&cfg.placement) {
            tracing::warn!(
                side = ?side.side,
                segments = side.segments.len(),
                king = side.king.is_some(),
                "region incomplete"
            );
        }
    }
    let bounds = playfield.bounds;
    write_json(out, &RoundFile { playfield, round })?;
    Sidecar::describe(&cfg, tag)?
        .replay(token)
        .bounds(bounds)
        .write(out)?;
    Ok(())
}

fn fov(
    round_path: &Path,
    position: Point,
    facing_deg: f64,
    config: Option<&Path>,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(round = %round_path.display(), x = position.x, y = position.y, facing_deg, "fov");
    let cfg = RunConfig::load(config)?;
    let bytes = fs::read(round_path).with_context(|| format!("reading {}", round_path.display()))?;
    let file: RoundFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing round file {}", round_path.display()))?;
    let segments = file.round.all_segments();
    let piece = Piece::new(position, facing_deg.to_radians());
    let polygon = compute_visibility_polygon(&piece, &segments, &cfg.visibility)?;
    let mut kings = serde_json::Map::new();
    for side in [&file.round.top, &file.round.bottom] {
        let seen = match side.king {
            Some(k) => Some(piece.sees(k, &segments, &cfg.visibility)?),
            None => None,
        };
        kings.insert(format!("{:?}", side.side).to_lowercase(), json!(seen));
    }
    tracing::info!(
        edges = polygon.edges.len(),
        arcs = polygon.arc_count(),
        area = polygon.area(),
        "fov_polygon"
    );
    let doc = json!({
        "piece": piece,
        "polygon": polygon,
        "vertices": polygon.vertices(),
        "area": polygon.area(),
        "king_visible": kings,
    });
    write_json(out, &doc)?;
    Sidecar::describe(&cfg, tag)?
        .replay(file.round.replay)
        .bounds(file.playfield.bounds)
        .piece(piece)
        .input(round_path)
        .write(out)?;
    Ok(())
}

/// Per-round stats for the sweep table. The viewing piece stands at the
/// playfield center facing the bottom region.
struct SweepRow {
    top_segments: u32,
    bottom_segments: u32,
    complete: bool,
    fov: VisibilityPolygon,
    king_visible: bool,
}

fn sweep_row(playfield: &Playfield, cfg: &RunConfig, token: ReplayToken) -> Result<SweepRow> {
    let round = generate_round(playfield, &cfg.placement, token)?;
    let segments = round.all_segments();
    let piece = Piece::new(playfield.bounds.center(), std::f64::consts::FRAC_PI_2);
    let fov = compute_visibility_polygon(&piece, &segments, &cfg.visibility)?;
    let king_visible = match round.bottom.king {
        Some(k) => piece.sees(k, &segments, &cfg.visibility)?,
        None => false,
    };
    Ok(SweepRow {
        top_segments: round.top.segments.len() as u32,
        bottom_segments: round.bottom.segments.len() as u32,
        complete: round.top.is_complete(&cfg.placement) && round.bottom.is_complete(&cfg.placement),
        fov,
        king_visible,
    })
}

fn sweep(
    seed: u64,
    rounds: u64,
    width: f64,
    height: f64,
    config: Option<&Path>,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(seed, rounds, width, height, out = %out.display(), "sweep");
    let cfg = RunConfig::load(config)?;
    let playfield = cfg.playfield(width, height)?;
    let n = rounds as usize;
    let mut index = Vec::with_capacity(n);
    let mut top = Vec::with_capacity(n);
    let mut bottom = Vec::with_capacity(n);
    let mut complete = Vec::with_capacity(n);
    let mut area = Vec::with_capacity(n);
    let mut arcs = Vec::with_capacity(n);
    let mut king_visible = Vec::with_capacity(n);
    for i in 0..rounds {
        let row = sweep_row(&playfield, &cfg, ReplayToken::new(seed, i))?;
        index.push(i);
        top.push(row.top_segments);
        bottom.push(row.bottom_segments);
        complete.push(row.complete);
        area.push(row.fov.area());
        arcs.push(row.fov.arc_count() as u32);
        king_visible.push(row.king_visible);
    }
    let mut df = df!(
        "index" => index,
        "top_segments" => top,
        "bottom_segments" => bottom,
        "complete" => complete,
        "fov_area" => area,
        "fov_arcs" => arcs,
        "king_visible" => king_visible,
    )?;
    tracing::info!(rows = df.height(), cols = df.width(), "sweep_table");
    write_frame(&mut df, out)?;
    Sidecar::describe(&cfg, tag)?
        .replay(ReplayToken::new(seed, 0))
        .rounds(rounds)
        .bounds(playfield.bounds)
        .write(out)?;
    Ok(())
}

fn report(from: Option<&Path>, tag: Option<String>) -> Result<()> {
    let mut obj = json!({
        "code_rev": provenance::code_rev(),
        "lib_version": sightline::VERSION,
        "tag": tag,
    });
    if let Some(path) = from {
        tracing::info!(from = %path.display(), "report");
        obj["summary"] = summarize(path)?;
    }
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn summarize(path: &Path) -> Result<serde_json::Value> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let df = lf
        .select([
            col("fov_area").count().cast(DataType::Float64).alias("rounds"),
            col("fov_area").mean().alias("mean_fov_area"),
            col("complete").cast(DataType::Float64).mean().alias("complete_rate"),
            col("king_visible")
                .cast(DataType::Float64)
                .mean()
                .alias("king_visible_rate"),
        ])
        .collect()
        .with_context(|| format!("summarizing {}", path.display()))?;
    let mut out = serde_json::Map::new();
    for name in ["rounds", "mean_fov_area", "complete_rate", "king_visible_rate"] {
        out.insert(name.to_string(), json!(df.column(name)?.f64()?.get(0)));
    }
    Ok(out.into())
}

fn is_parquet(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("parquet")
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).finish(df)?;
    }
    Ok(())
}
