/// Extracts the legend text of a series from its metric string.
///
/// Only the part between the first `{` and the last `}` is shown, which
/// leaves out the metric name that all series of a query usually share.
pub(crate) fn label(metric: &str) -> Option<&str> {
    let start = metric.find('{')? + 1;
    let end = metric.rfind('}')?;

    metric.get(start..end)
}
