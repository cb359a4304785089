//! Plotters drawing code for distribution and overlay plots.

use std::path::Path;

use plotters::prelude::*;

use super::{DrawResult, PLOT_SIZE, PlotError, PlotLabels};
use crate::analysis::{Bucket, DistributionPayload, OverlayPayload};

/// Draws one box per window of raw best-fitness samples.
pub fn render_distribution(
    payload: &DistributionPayload,
    labels: &PlotLabels,
    path: &Path,
) -> Result<(), PlotError> {
    if payload.buckets.iter().all(Vec::is_empty) {
        return Err(PlotError::NoData {
            path: path.to_path_buf(),
        });
    }

    draw_distribution(payload, labels, path).map_err(|err| PlotError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Draws the all-time-best step curve over average-fitness boxes.
pub fn render_overlay(
    payload: &OverlayPayload,
    labels: &PlotLabels,
    path: &Path,
) -> Result<(), PlotError> {
    if payload.all_time_best.is_empty() {
        return Err(PlotError::NoData {
            path: path.to_path_buf(),
        });
    }

    draw_overlay(payload, labels, path).map_err(|err| PlotError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn draw_distribution(
    payload: &DistributionPayload,
    labels: &PlotLabels,
    path: &Path,
) -> DrawResult<()> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let columns = payload.buckets.len() as u32;
    let (y_min, y_max) = value_range(payload.buckets.iter().flatten().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Fitness Over the Generations, {}", labels.title),
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(46)
        .y_label_area_size(68)
        .build_cartesian_2d((0..columns).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(labels.x_desc())
        .y_desc(labels.y_desc())
        .draw()?;

    chart.draw_series(non_empty_buckets(&payload.buckets).map(|(column, values)| {
        Boxplot::new_vertical(SegmentValue::CenterOf(column), &Quartiles::new(values))
            .width(12)
            .whisker_width(0.5)
            .style(BLUE)
    }))?;

    root.present()?;
    Ok(())
}

fn draw_overlay(payload: &OverlayPayload, labels: &PlotLabels, path: &Path) -> DrawResult<()> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let columns = payload
        .all_time_best
        .len()
        .max(payload.average_buckets.len()) as u32;
    let (y_min, y_max) = value_range(
        payload
            .average_buckets
            .iter()
            .flatten()
            .chain(payload.all_time_best.iter())
            .copied(),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "All Time Best Fitness, Average Fitness Over the Generations ({})",
                labels.fit_name
            ),
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(46)
        .y_label_area_size(68)
        .build_cartesian_2d((0..columns).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(labels.x_desc())
        .y_desc(labels.y_desc())
        .draw()?;

    chart
        .draw_series(
            non_empty_buckets(&payload.average_buckets).map(|(column, values)| {
                Boxplot::new_vertical(SegmentValue::CenterOf(column), &Quartiles::new(values))
                    .width(12)
                    .whisker_width(0.5)
                    .style(BLUE)
            }),
        )?
        .label("average fitness")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE));

    chart
        .draw_series(LineSeries::new(
            step_points(&payload.all_time_best),
            RED.stroke_width(2),
        ))?
        .label("all time best")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Non-empty buckets with their column index; empty windows stay as gaps.
fn non_empty_buckets(buckets: &[Bucket]) -> impl Iterator<Item = (u32, &[f64])> {
    buckets
        .iter()
        .enumerate()
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(index, bucket)| (index as u32, bucket.as_slice()))
}

/// Post-style step: hold each value until the next window's center.
fn step_points(steps: &[f64]) -> Vec<(SegmentValue<u32>, f32)> {
    let mut points = Vec::with_capacity(steps.len() * 2);
    for (index, &value) in steps.iter().enumerate() {
        let x = SegmentValue::CenterOf(index as u32);
        if index > 0 {
            points.push((x.clone(), steps[index - 1] as f32));
        }
        points.push((x, value as f32));
    }
    points
}

/// Padded `f32` axis range covering `values`.
fn value_range(values: impl Iterator<Item = f64>) -> (f32, f32) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (0.0, 1.0);
    }

    let pad = ((max - min) * 0.05).max(0.5);
    ((min - pad) as f32, (max + pad) as f32)
}
