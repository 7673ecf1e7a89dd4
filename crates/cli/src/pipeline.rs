use std::io::Write;

use promplot_query::Matrix;
use promplot_query::PrometheusClient;
use promplot_query::RangeQuery;
use promplot_vis::Render;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::flags::format_duration;
use crate::flags::format_unix_time;
use crate::sink::Sink;
use crate::slack::Chat;

/// Fetches the matrix of a range query.
pub(crate) trait Fetch {
    fn fetch(&self, query: &RangeQuery) -> promplot_query::error::Result<Matrix>;
}

impl Fetch for PrometheusClient {
    fn fetch(&self, query: &RangeQuery) -> promplot_query::error::Result<Matrix> {
        self.query_range(query)
    }
}

/// Queries, plots and delivers; the first failing stage aborts the run.
pub(crate) fn run<F, R, C, W>(
    config: &Config,
    fetcher: &F,
    renderer: &R,
    sink: &Sink<C>,
    stdout: &mut W,
) -> Result<(), CliError>
where
    F: Fetch,
    R: Render,
    C: Chat,
    W: Write + ?Sized,
{
    info!("Querying Prometheus \"{}\"", config.query.query);
    debug!(
        url = %config.url,
        time = %format_unix_time(config.query.end),
        range = %format_duration(config.query.range),
        "range query"
    );
    let matrix = fetcher.fetch(&config.query)?;

    info!("Creating plot \"{}\"", config.title);
    let chart = renderer.render(&matrix, &config.title, &config.format)?;

    sink.deliver(&chart, &config.title, &config.notice(), stdout)?;

    info!("Done");

    Ok(())
}
