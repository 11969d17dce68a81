// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap demo for `vizir_heatmap`.
//!
//! Builds a week of daily pollutant readings into a scene and writes it to
//! `vizir_heatmap_demo.svg`. Set `RUST_LOG=debug` to see the derived domains and geometry.

mod svg;

use chrono::NaiveDate;
use vizir_heatmap::{Accessors, Heatmap, HeatmapOptions, Value};

struct Reading {
    date: NaiveDate,
    pollutant: &'static str,
    value: f64,
}

fn readings() -> Vec<Reading> {
    let pollutants = [("O3", 35.0), ("SO2", 12.0), ("NO2", 28.0), ("PM10", 45.0)];
    let Some(start) = NaiveDate::from_ymd_opt(2024, 6, 1) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for (day, date) in start.iter_days().take(7).enumerate() {
        for (i, &(pollutant, base)) in pollutants.iter().enumerate() {
            let wobble = ((day * 7 + i * 13) % 11) as f64 * 4.0;
            out.push(Reading {
                date,
                pollutant,
                value: base + wobble,
            });
        }
    }
    out
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = readings();
    let accessors = Accessors::map(
        |r: &Reading| Value::from(r.date),
        |r: &Reading| r.pollutant,
        |r: &Reading| r.value,
    )
    .with_title(|r: &Reading| Ok(Value::from(format!("{}: {:.1} µg/m³", r.pollutant, r.value))));

    let options = HeatmapOptions::default()
        .with_target_limit(40.0)
        .with_x_label("Date")
        .with_y_label("Pollutant")
        .with_x_format("%b %d");
    let heatmap = Heatmap::new(options);

    let scene = match heatmap.build(&data, &accessors, Some(1024.0)) {
        Ok(scene) => scene,
        Err(err) => {
            log::error!("heatmap build failed: {err}");
            std::process::exit(1);
        }
    };
    log::info!(
        "{} tiles, tile size {:.1} x {:.1}",
        scene.tiles.len(),
        scene.geometry.tile_width,
        scene.geometry.tile_height
    );

    let out = svg::scene_to_svg(&scene);
    std::fs::write("vizir_heatmap_demo.svg", out).expect("write vizir_heatmap_demo.svg");
    println!("wrote vizir_heatmap_demo.svg");
}
