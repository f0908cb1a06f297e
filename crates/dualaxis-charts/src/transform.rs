//! View-model transform: host data view in, self-contained chart model out.
//!
//! The transform is total. Any extraction failure is logged and collapses to
//! [`ChartViewModel::empty`]; a partially built model is never returned.

use crate::domain::x_domain;
use dualaxis_core::{
    AxisRole, AxisStyle, CategoryColumn, ChartDataPoint, ChartViewModel, DataView,
    DataViewObjects, DomainValue, LegendPosition, PaletteTable, PrimitiveValue,
    SelectionIdBuilder, Series, ValueColumn, colors, DEFAULT_AXIS_TITLE, DEFAULT_DATE_FORMAT,
    DEFAULT_FONT, DEFAULT_FONT_SIZE, DEFAULT_LEGEND_ROW_HEIGHT, DEFAULT_MARKER_SIZE,
    DEFAULT_NUMBER_FORMAT,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Reasons a data view cannot be turned into a chart
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("data view has no categorical section")]
    MissingCategorical,
    #[error("first category column has no source metadata")]
    MissingCategorySource,
    #[error("categorical section has no plottable measure columns")]
    MissingValues,
    #[error("category column is neither date-time nor numeric")]
    UnusableCategoryType,
    #[error("category value at row {row} does not match the axis type")]
    CategoryValue { row: usize },
    #[error("measure column {column} has a non-numeric value at row {row}")]
    MeasureValue { column: usize, row: usize },
    #[error("palette {0} does not exist")]
    UnknownPalette(f64),
}

/// Build the chart model for the first data view
pub fn visual_transform(
    data_views: &[DataView],
    selection_ids: &dyn SelectionIdBuilder,
    palettes: &PaletteTable,
) -> ChartViewModel {
    match try_transform(data_views, selection_ids, palettes) {
        Ok(view_model) => view_model,
        Err(err) => {
            debug!(%err, "data view rejected, rendering empty chart");
            ChartViewModel::empty()
        }
    }
}

/// Fallible core of [`visual_transform`]
pub fn try_transform(
    data_views: &[DataView],
    selection_ids: &dyn SelectionIdBuilder,
    palettes: &PaletteTable,
) -> Result<ChartViewModel, TransformError> {
    let data_view = data_views.first().ok_or(TransformError::MissingCategorical)?;
    let categorical = data_view
        .categorical
        .as_ref()
        .ok_or(TransformError::MissingCategorical)?;
    let category = categorical
        .categories
        .as_ref()
        .and_then(|c| c.first())
        .ok_or(TransformError::MissingCategorySource)?;
    let source = category
        .source
        .as_ref()
        .ok_or(TransformError::MissingCategorySource)?;
    let columns = categorical
        .values
        .as_ref()
        .ok_or(TransformError::MissingValues)?;

    let is_date = match source.value_type {
        Some(kind) if kind.is_date_time() => true,
        Some(kind) if kind.is_numeric() => false,
        _ => return Err(TransformError::UnusableCategoryType),
    };

    let objects = data_view.objects();
    let palette_id = palette_id(objects, palettes)?;
    let palette = palettes
        .get(palette_id)
        .ok_or(TransformError::UnknownPalette(palette_id as f64))?;

    let x_values = category_values(category, is_date)?;

    let mut series = Vec::new();
    let mut y1 = Extent::default();
    let mut y2 = Extent::default();

    for (k, column) in columns.iter().enumerate() {
        let Some(axis) = column.axis() else {
            trace!(column = %column.source.display_name, "skipping column without an axis role");
            continue;
        };

        let points = series_points(k, column, &x_values)?;
        match axis {
            AxisRole::Primary => y1.fold(column),
            AxisRole::Secondary => y2.fold(column),
        }

        series.push(Series {
            points,
            color: palette.color(k).unwrap_or(colors::AXIS_LABEL).to_string(),
            name: column.source.display_name.clone(),
            axis,
            selection_id: selection_ids.create_selection_id(category, k),
        });
    }

    if series.is_empty() {
        return Err(TransformError::MissingValues);
    }

    let (y1_min, y1_max) = y1.bounds();
    let (y2_min, y2_max) = y2.bounds();

    Ok(ChartViewModel {
        x_domain: x_domain(&series),
        series,
        y1_min,
        y1_max,
        y2_min,
        y2_max,
        line_style: objects.get("chart", "lineStyle", String::new()),
        marker_size: objects.get("chart", "markerSize", DEFAULT_MARKER_SIZE),
        background_color: objects.get_fill("chart", "backgroundColor", colors::BACKGROUND),
        show_gridlines: objects.get("chart", "showGridLines", true),
        x_axis: x_axis_style(objects, is_date),
        y_axis: y_axis_style(objects, "yAxis"),
        y2_axis: y_axis_style(objects, "y2Axis"),
        legend_position: LegendPosition::parse(&objects.get(
            "chart",
            "legendPosition",
            LegendPosition::None.as_str().to_string(),
        )),
        legend_row_height: DEFAULT_LEGEND_ROW_HEIGHT,
        is_date_range: is_date,
        palette_id,
    })
}

fn palette_id(objects: &DataViewObjects, palettes: &PaletteTable) -> Result<usize, TransformError> {
    let raw = objects.get("yColorSelector", "lineColor", 0.0_f64);
    if raw < 0.0 || raw.fract() != 0.0 || raw as usize >= palettes.len() {
        return Err(TransformError::UnknownPalette(raw));
    }
    Ok(raw as usize)
}

/// Category values typed to the inferred X domain
fn category_values(category: &CategoryColumn, is_date: bool) -> Result<Vec<DomainValue>, TransformError> {
    category
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| match (value, is_date) {
            (PrimitiveValue::Date(dt), true) => Ok(DomainValue::Date(*dt)),
            (PrimitiveValue::Number(n), false) => Ok(DomainValue::Number(*n)),
            _ => Err(TransformError::CategoryValue { row }),
        })
        .collect()
}

/// Zip one measure column with the category values, in source order
fn series_points(
    column_index: usize,
    column: &ValueColumn,
    x_values: &[DomainValue],
) -> Result<Vec<ChartDataPoint>, TransformError> {
    let mut points = Vec::with_capacity(column.values.len());
    for (row, value) in column.values.iter().enumerate() {
        let y_value = match value {
            PrimitiveValue::Null => continue,
            PrimitiveValue::Number(n) => *n,
            _ => {
                return Err(TransformError::MeasureValue {
                    column: column_index,
                    row,
                });
            }
        };
        let x_value = x_values
            .get(row)
            .copied()
            .ok_or(TransformError::CategoryValue { row })?;
        points.push(ChartDataPoint { x_value, y_value });
    }
    Ok(points)
}

/// Running min/max across the columns of one axis
#[derive(Debug, Default)]
struct Extent(Option<(f64, f64)>);

impl Extent {
    fn fold(&mut self, column: &ValueColumn) {
        let Some((lo, hi)) = column_extent(column) else {
            return;
        };
        self.0 = Some(match self.0 {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        });
    }

    fn bounds(&self) -> (f64, f64) {
        self.0.unwrap_or((0.0, 0.0))
    }
}

/// Host-reported extent, or a scan of the finite values when it is missing
fn column_extent(column: &ValueColumn) -> Option<(f64, f64)> {
    if let (Some(lo), Some(hi)) = (column.min_local, column.max_local) {
        return Some((lo, hi));
    }
    let mut finite = column
        .values
        .iter()
        .filter_map(PrimitiveValue::as_f64)
        .filter(|v| v.is_finite());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

fn x_axis_style(objects: &DataViewObjects, is_date: bool) -> AxisStyle {
    let label_format = if is_date {
        objects.get("xAxis", "xAxisDateFormat", DEFAULT_DATE_FORMAT.to_string())
    } else {
        objects.get("xAxis", "xAxisLabelFormat", DEFAULT_NUMBER_FORMAT.to_string())
    };
    AxisStyle {
        rotation: Some(objects.get("xAxis", "xAxisLabelRotation", 0.0)),
        ..axis_style(objects, "xAxis", label_format)
    }
}

fn y_axis_style(objects: &DataViewObjects, object: &str) -> AxisStyle {
    let label_format = objects.get(
        object,
        &format!("{object}LabelFormat"),
        DEFAULT_NUMBER_FORMAT.to_string(),
    );
    axis_style(objects, object, label_format)
}

/// Shared title/label properties, all named `{object}{suffix}`
fn axis_style(objects: &DataViewObjects, object: &str, label_format: String) -> AxisStyle {
    let key = |suffix: &str| format!("{object}{suffix}");
    AxisStyle {
        title: objects.get(object, &key("Title"), DEFAULT_AXIS_TITLE.to_string()),
        title_size: objects.get(object, &key("TitleSize"), DEFAULT_FONT_SIZE),
        title_font: objects.get(object, &key("TitlefontFamily"), DEFAULT_FONT.to_string()),
        title_color: objects.get_fill(object, &key("TitleColor"), colors::AXIS_LABEL),
        label_size: objects.get(object, &key("LabelSize"), DEFAULT_FONT_SIZE),
        label_font: objects.get(object, &key("LabelfontFamily"), DEFAULT_FONT.to_string()),
        label_color: objects.get_fill(object, &key("LabelColor"), colors::AXIS_LABEL),
        label_format,
        rotation: None,
    }
}
