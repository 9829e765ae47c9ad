// Query results to chart descriptors
use crate::domain::chart::{
    ChartCurve, ChartDescriptor, ChartKind, ChartPoint, ChartSeries, XAxis, XAxisAggregate,
    XAxisKind, YAxis,
};
use crate::domain::metrics::{
    AggregatedResult, AggregationType, MetricCatalog, MetricQueryConfig, TimeWindow,
};
use chrono::{DateTime, Duration, Utc};

pub fn x_axis_aggregate(aggregation: AggregationType) -> XAxisAggregate {
    match aggregation {
        AggregationType::Sum | AggregationType::Count => XAxisAggregate::Sum,
        AggregationType::Max => XAxisAggregate::Max,
        AggregationType::Min => XAxisAggregate::Min,
        AggregationType::Avg => XAxisAggregate::Average,
    }
}

/// Windows of 24h or less get time-of-day ticks
pub fn x_axis_kind(window: Option<&TimeWindow>) -> XAxisKind {
    match window {
        Some(w) if w.spans_at_most_a_day() => XAxisKind::Time,
        _ => XAxisKind::Date,
    }
}

/// Rounds every value half-up to a whole number, in place
pub fn round_result(result: &mut AggregatedResult) {
    for point in &mut result.data {
        // v - floor(v) is exact, v + 0.5 is not
        let floor = point.value.floor();
        point.value = if point.value - floor >= 0.5 { floor + 1.0 } else { floor };
    }
}

fn build_series(config: &MetricQueryConfig, result: &AggregatedResult) -> Vec<ChartSeries> {
    let Some(naming) = &config.series_naming else {
        let points = result
            .data
            .iter()
            .map(|p| ChartPoint::new(p.timestamp, p.value))
            .collect();
        return vec![ChartSeries::new(config.display_title(), points)];
    };

    let mut series: Vec<ChartSeries> = Vec::new();
    for point in &result.data {
        let name = naming.name_for(point);
        let chart_point = ChartPoint::new(point.timestamp, point.value);

        match series.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.points.push(chart_point),
            None => series.push(ChartSeries::new(name, vec![chart_point])),
        }
    }
    series
}

/// Builds one line chart per query that has a result.
///
/// `results[i]` belongs to `query_configs[i]`; queries past the end of
/// `results` are skipped. `now` fills in the x range when there is no window.
pub fn build_charts(
    query_configs: &[MetricQueryConfig],
    results: &[AggregatedResult],
    window: Option<&TimeWindow>,
    now: DateTime<Utc>,
    catalog: &MetricCatalog,
) -> Vec<ChartDescriptor> {
    let kind = x_axis_kind(window);
    let (min, max) = match window {
        Some(w) => (w.start, w.end),
        None => (now - Duration::hours(1), now),
    };

    query_configs
        .iter()
        .zip(results)
        .enumerate()
        .map(|(index, (config, result))| {
            let unit = config
                .query
                .metric_name
                .as_deref()
                .and_then(|name| catalog.unit_for(name))
                .map(str::to_string);

            ChartDescriptor {
                id: index.to_string(),
                kind: ChartKind::Line,
                title: config.display_title(),
                description: config.alias.description.clone(),
                series: build_series(config, result),
                x_axis: XAxis {
                    legend: "Time".to_string(),
                    kind,
                    min,
                    max,
                    aggregate: x_axis_aggregate(config.query.aggregation_type),
                },
                y_axis: YAxis::numeric(unit),
                curve: ChartCurve::Linear,
                sync: true,
            }
        })
        .collect()
}
