// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;

use crate::{
    Accessors, AxisScale, Channel, FillDomain, Heatmap, HeatmapError, HeatmapOptions, Palette,
    Value, XDomain, XScaleKind, YScaleKind, cividis,
};

type Reading = (Value, &'static str, f64);

const DAY: i64 = 86_400_000;

fn accessors<'a>() -> Accessors<'a, Reading> {
    Accessors::map(|r: &Reading| r.0.clone(), |r: &Reading| r.1, |r: &Reading| r.2)
}

fn pollutants() -> Vec<Reading> {
    vec![
        (Value::Time(0), "O3", 10.0),
        (Value::Time(0), "SO2", 40.0),
        (Value::Time(DAY), "O3", 90.0),
    ]
}

fn assert_rect_close(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
    assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
    assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
    assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
}

fn week_of_readings() -> Vec<Reading> {
    let species = ["O3", "SO2", "NO2", "PM10"];
    let mut out = Vec::new();
    for day in 0..7_i64 {
        for (i, s) in species.iter().enumerate() {
            let v = ((day * 17 + i as i64 * 29) % 100) as f64;
            out.push((Value::Time(day * DAY), *s, v));
        }
    }
    out
}

#[test]
fn pollutant_scenario_lays_out_two_bands_and_one_day() {
    let heatmap = Heatmap::new(HeatmapOptions::default().with_target_limit(40.0));
    let scene = heatmap.build(&pollutants(), &accessors(), None).unwrap();

    assert_eq!(scene.fill_domain, FillDomain::new(10.0, Some(40.0), 90.0));
    assert_eq!(scene.tiles.len(), 3);
    assert_eq!(scene.geometry.unit_count, 1.0);
    assert_eq!(scene.geometry.tile_width, 594.0);
    assert_eq!(scene.geometry.tile_height, 159.0);

    let AxisScale::Categorical(y) = &scene.y_axis.scale else {
        panic!("y axis should be categorical");
    };
    assert_eq!(y.keys(), &[Value::from("O3"), Value::from("SO2")]);
    let labels: Vec<&str> = scene.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["O3", "SO2"]);

    // O3 is the first key, so its band sits at the bottom of the plot.
    assert_rect_close(scene.tiles[0].rect, Rect::new(43.0, 194.0, 637.0, 353.0));
    assert_rect_close(scene.tiles[1].rect, Rect::new(43.0, 27.0, 637.0, 186.0));
    assert_rect_close(scene.tiles[2].rect, Rect::new(637.0, 194.0, 1231.0, 353.0));

    let palette = cividis();
    assert_eq!(scene.tiles[0].fill, palette.color(0.0));
    assert_eq!(scene.tiles[1].fill, palette.color(0.5));
    assert_eq!(scene.tiles[2].fill, palette.color(1.0));
    for tile in &scene.tiles {
        assert_eq!(tile.fill, tile.stroke);
    }
}

#[test]
fn two_day_ozone_and_one_day_sulfur_dioxide() {
    let data = vec![
        (Value::Time(0), "O3", 10.0),
        (Value::Time(DAY), "O3", 50.0),
        (Value::Time(0), "SO2", 90.0),
    ];
    let heatmap = Heatmap::new(HeatmapOptions::default().with_target_limit(40.0));
    let scene = heatmap.build(&data, &accessors(), None).unwrap();

    let AxisScale::Categorical(y) = &scene.y_axis.scale else {
        panic!("y axis should be categorical");
    };
    assert_eq!(y.keys(), &[Value::from("O3"), Value::from("SO2")]);
    assert_eq!(scene.fill_domain, FillDomain::new(10.0, Some(40.0), 90.0));
    assert_eq!(scene.tiles.len(), 3);
    assert_eq!(scene.geometry.tile_width, 594.0);

    assert_rect_close(scene.tiles[0].rect, Rect::new(43.0, 194.0, 637.0, 353.0));
    assert_rect_close(scene.tiles[1].rect, Rect::new(637.0, 194.0, 1231.0, 353.0));
    assert_rect_close(scene.tiles[2].rect, Rect::new(43.0, 27.0, 637.0, 186.0));
}

#[test]
fn repeated_explicit_y_keys_keep_one_band_each() {
    let options = HeatmapOptions::default().with_y_domain(vec![
        Value::from("O3"),
        Value::from("SO2"),
        Value::from("O3"),
    ]);
    let scene = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    let AxisScale::Categorical(y) = &scene.y_axis.scale else {
        panic!("y axis should be categorical");
    };
    assert_eq!(y.keys(), &[Value::from("O3"), Value::from("SO2")]);
    assert_eq!(y.step(), 167.0);
    let labels: Vec<&str> = scene.y_axis.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["O3", "SO2"]);

    let plain = Heatmap::default()
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    assert_eq!(scene.tiles, plain.tiles);
}

#[test]
fn builds_are_deterministic() {
    let heatmap = Heatmap::new(HeatmapOptions::default().with_target_limit(50.0));
    let data = week_of_readings();
    let a = heatmap.build(&data, &accessors(), Some(1024.0)).unwrap();
    let b = heatmap.build(&data, &accessors(), Some(1024.0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn one_tile_per_record_inside_the_scale_ranges() {
    let data = week_of_readings();
    let scene = Heatmap::default().build(&data, &accessors(), None).unwrap();
    assert_eq!(scene.tiles.len(), data.len());

    let (x0, x1) = scene.x_axis.range;
    let (y_bottom, y_top) = scene.y_axis.range;
    for (i, tile) in scene.tiles.iter().enumerate() {
        assert_eq!(tile.index, i);
        assert!(tile.rect.x0 >= x0 - 1e-9 && tile.rect.x0 <= x1 + 1e-9, "{tile:?}");
        assert!(tile.rect.y0 >= y_top && tile.rect.y1 <= y_bottom, "{tile:?}");
    }
    assert!((scene.geometry.tile_width - 594.0 / 6.0).abs() < 1e-9);
}

#[test]
fn bands_are_equal_and_gapless() {
    let data = week_of_readings();
    let scene = Heatmap::default().build(&data, &accessors(), None).unwrap();
    let AxisScale::Categorical(y) = &scene.y_axis.scale else {
        panic!("y axis should be categorical");
    };
    let step = y.step();
    let mut edges: Vec<f64> = y.keys().iter().map(|k| y.map(k).unwrap()).collect();
    edges.sort_by(f64::total_cmp);
    assert_eq!(edges.len(), 4);
    assert!((edges[0] - 23.0).abs() < 1e-9);
    for w in edges.windows(2) {
        assert!((w[1] - w[0] - step).abs() < 1e-9);
    }
    assert!((edges[3] + step - 357.0).abs() < 1e-9);
}

#[test]
fn fill_values_outside_the_domain_clamp() {
    let options = HeatmapOptions::default().with_fill_domain(FillDomain::new(20.0, Some(40.0), 60.0));
    let scene = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    let palette = cividis();
    assert_eq!(scene.tiles[0].fill, palette.color(0.0));
    assert_eq!(scene.tiles[2].fill, palette.color(1.0));
}

#[test]
fn zero_span_x_domain_is_a_geometry_error() {
    let data = vec![(Value::Time(0), "O3", 1.0), (Value::Time(0), "SO2", 2.0)];
    let err = Heatmap::default().build(&data, &accessors(), None).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidGeometryDomain { .. }), "{err:?}");
}

#[test]
fn empty_data_fails_on_the_x_domain() {
    let data: Vec<Reading> = Vec::new();
    assert_eq!(
        Heatmap::default().build(&data, &accessors(), None),
        Err(HeatmapError::EmptyDomain { channel: Channel::X })
    );
}

#[test]
fn empty_data_with_explicit_domains_builds_axes_only() {
    let data: Vec<Reading> = Vec::new();
    let options = HeatmapOptions::default()
        .with_x_domain(XDomain::new(Value::Time(0), Value::Time(2 * DAY)))
        .with_y_domain(vec![Value::from("O3")])
        .with_fill_domain(FillDomain::new(0.0, None, 1.0));
    let scene = Heatmap::new(options).build(&data, &accessors(), None).unwrap();
    assert!(scene.tiles.is_empty());
    assert_eq!(scene.geometry.unit_count, 2.0);
    assert_eq!(scene.y_axis.ticks.len(), 1);
}

#[test]
fn explicit_domains_are_not_recomputed() {
    let options = HeatmapOptions::default()
        .with_x_domain(XDomain::new(Value::Time(-DAY), Value::Time(2 * DAY)))
        .with_y_domain(vec![Value::from("SO2"), Value::from("NO2"), Value::from("O3")]);
    let scene = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap();

    let AxisScale::Categorical(y) = &scene.y_axis.scale else {
        panic!("y axis should be categorical");
    };
    assert_eq!(y.keys().len(), 3);
    assert_eq!(y.keys()[0], Value::from("SO2"));
    assert_eq!(scene.geometry.unit_count, 3.0);
    // Record 0 is on day 0, one unit into the three-day domain.
    assert!((scene.tiles[0].rect.x0 - (43.0 + 198.0)).abs() < 1e-9);
}

#[test]
fn unknown_category_is_reported() {
    let options = HeatmapOptions::default().with_y_domain(vec![Value::from("O3")]);
    let err = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap_err();
    assert_eq!(
        err,
        HeatmapError::UnknownCategory {
            index: 1,
            value: Value::from("SO2"),
        }
    );
}

#[test]
fn wide_displays_shrink_the_chart() {
    let heatmap = Heatmap::default();
    let wide = heatmap.build(&pollutants(), &accessors(), Some(1920.0)).unwrap();
    let expected = 640.0 * 8.0 / 12.0;
    assert!((wide.size.width - expected).abs() < 1e-9);
    assert!((wide.x_axis.range.1 - (expected - 3.0)).abs() < 1e-9);

    let narrow = heatmap.build(&pollutants(), &accessors(), Some(800.0)).unwrap();
    assert_eq!(narrow.size.width, 640.0);

    let tiny = Heatmap::new(HeatmapOptions::default().with_size(200.0, 400.0))
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    assert_eq!(tiny.size.width, 375.0);
}

#[test]
fn non_finite_fill_uses_the_missing_color() {
    let mut data = pollutants();
    data.push((Value::Time(DAY), "SO2", f64::NAN));
    let options = HeatmapOptions::default().with_missing_fill(Color::from_rgb8(200, 0, 0));
    let scene = Heatmap::new(options).build(&data, &accessors(), None).unwrap();
    assert_eq!(scene.fill_domain.min, 10.0);
    assert_eq!(scene.fill_domain.max, 90.0);
    assert_eq!(scene.tiles[3].fill, Color::from_rgb8(200, 0, 0));
}

#[test]
fn default_tuple_accessors_read_fill_from_the_y_element() {
    let data = vec![(0.0_f64, "O3", 10.0_f64), (1.0_f64, "SO2", 20.0_f64)];
    let err = Heatmap::default()
        .build(&data, &Accessors::tuple(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        HeatmapError::NonQuantitative {
            channel: Channel::Fill,
            index: Some(0),
            ..
        }
    ));
}

#[test]
fn numeric_x_uses_a_linear_scale_with_unit_override() {
    let data = vec![(0.0_f64, "a", 1.0_f64), (10.0_f64, "a", 2.0_f64)];
    let accessors: Accessors<'_, (f64, &str, f64)> =
        Accessors::tuple().with_fill(|r: &(f64, &str, f64)| Ok(r.2.into()));
    let options = HeatmapOptions::default().with_x_unit(1.0).with_x_label("Hour");
    let scene = Heatmap::new(options).build(&data, &accessors, None).unwrap();
    assert!(matches!(
        scene.x_axis.scale,
        AxisScale::Continuous(crate::ScaleContinuous::Linear(_))
    ));
    assert!((scene.geometry.tile_width - 59.4).abs() < 1e-9);
    assert_eq!(scene.x_axis.title.as_ref().map(|t| t.text.as_str()), Some("Hour"));
    assert_eq!(scene.x_axis.ticks[0].label, "0".to_string());
}

#[test]
fn log_scales_need_positive_domains() {
    let options = HeatmapOptions::default().with_x_scale(XScaleKind::Log);
    let err = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap_err();
    assert_eq!(err, HeatmapError::NonPositiveLogDomain { channel: Channel::X });

    let options = HeatmapOptions::default()
        .with_fill_scale(crate::FillScaleKind::Log)
        .with_fill_domain(FillDomain::new(-1.0, None, 10.0));
    let err = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap_err();
    assert_eq!(err, HeatmapError::NonPositiveLogDomain { channel: Channel::Fill });
}

#[test]
fn point_y_scale_keeps_tiles_inside_their_slots() {
    let options = HeatmapOptions::default().with_y_scale(YScaleKind::Point);
    let point = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    let band = Heatmap::default()
        .build(&pollutants(), &accessors(), None)
        .unwrap();
    for (p, b) in point.tiles.iter().zip(&band.tiles) {
        assert_rect_close(p.rect, b.rect);
    }
}

#[test]
fn invalid_tick_format_surfaces_from_build() {
    let options = HeatmapOptions::default().with_x_format("%Q");
    let err = Heatmap::new(options)
        .build(&pollutants(), &accessors(), None)
        .unwrap_err();
    assert_eq!(
        err,
        HeatmapError::InvalidFormat {
            spec: "%Q".to_string()
        }
    );
}

#[test]
fn x_ticks_on_a_temporal_axis_are_timestamps() {
    let data = week_of_readings();
    let options = HeatmapOptions::default().with_x_format("%d/%m");
    let scene = Heatmap::new(options).build(&data, &accessors(), None).unwrap();
    assert!(!scene.x_axis.ticks.is_empty());
    assert_eq!(scene.x_axis.ticks[0].value, Value::Time(0));
    assert_eq!(scene.x_axis.ticks[0].label, "01/01");
    assert_eq!(scene.x_axis.ticks[0].position, 43.0);
    assert!(scene.x_axis.ticks.len() <= 8);
}
