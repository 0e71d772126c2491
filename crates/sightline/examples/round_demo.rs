//! Generate a few rounds and print segment counts, kings and the FOV area of
//! a piece standing between the regions.
//!
//! Usage:
//!   cargo run -p sightline --example round_demo -- [seed]

use sightline::api::{
    compute_visibility_polygon, generate_round, LayoutCfg, PlacementConfig, Piece, Playfield,
    Point, Rect, ReplayToken, VisibilityConfig,
};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let field = Playfield::new(Rect::new(20.0, 20.0, 400.0, 800.0), LayoutCfg::default()).unwrap();
    let cfg = PlacementConfig::default();
    let vis = VisibilityConfig::default();
    let center = field.bounds.center();
    for index in 0..5 {
        let round = generate_round(&field, &cfg, ReplayToken::new(seed, index)).unwrap();
        let segs = round.all_segments();
        let piece = Piece::new(Point::new(center.x, center.y), -std::f64::consts::FRAC_PI_2);
        let poly = compute_visibility_polygon(&piece, &segs, &vis).unwrap();
        println!(
            "round {index}: top={} bottom={} kings=({:?}, {:?}) fov_area={:.1} arcs={}",
            round.top.segments.len(),
            round.bottom.segments.len(),
            round.top.king.map(|k| (k.x.round(), k.y.round())),
            round.bottom.king.map(|k| (k.x.round(), k.y.round())),
            poly.area(),
            poly.arc_count()
        );
    }
}
