//! Table Renderer.
//!
//! Turns a snapshot plus navigation state into the complete text of the
//! screen. Rendering is a pure function of its inputs, so the controller can
//! compare consecutive outputs to decide whether to repaint.

use lstop_core::types::{InputPlugin, PipelineData, WorkerPlugin, plugin_label};
use lstop_core::{NodeOverview, PipelineAnswer, Trend, TrendLevel, WorkerMetric};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use crate::nav::NavigationState;
use crate::theme::Palette;

/// Width of name cells in the detail tables.
pub const NAME_WIDTH: usize = 10;
/// Width of name cells in the overview table.
pub const OVERVIEW_NAME_WIDTH: usize = 15;
/// Width of every numeric cell.
pub const NUMBER_WIDTH: usize = 15;

const OVERVIEW_HEADERS: [&str; 6] = [
    "Pipeline",
    "Input",
    "Filter",
    "Output",
    "QueueBackpress",
    "WorkerConcurren",
];
const SELECTED_MARKER: &str = "->";
const UNSELECTED_MARKER: &str = "  ";

/// Everything one screen is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub node: &'a NodeOverview,
    pub answer: &'a PipelineAnswer,
    /// Pipeline names in display order
    pub roster: &'a [String],
    pub nav: &'a NavigationState,
    pub base_url: &'a str,
    /// One-line fetch warning, shown above everything else
    pub warning: Option<&'a str>,
}

/// Renders dashboard screens with a fixed palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Compose the full screen for the current navigation state.
    pub fn compose(&self, screen: &Screen<'_>) -> Text<'static> {
        let mut lines = Vec::new();

        if screen.nav.help {
            lines.extend(self.help(screen.nav.selected));
        } else {
            if let Some(warning) = screen.warning {
                lines.push(Line::styled(format!("! {warning}"), self.palette.warning()));
            }
            lines.push(self.title(screen.node, screen.base_url));
            lines.push(Line::default());

            let detail = if screen.nav.selected {
                screen.roster.get(screen.nav.selected_index)
            } else {
                None
            };
            match detail {
                Some(name) => lines.extend(self.detail(
                    name,
                    screen.answer.pipeline(name),
                    screen.node,
                    screen.nav.metric,
                )),
                None => lines.extend(self.overview(
                    screen.answer,
                    screen.roster,
                    screen.nav.selected_index,
                )),
            }
        }

        lines.push(Line::default());
        lines.push(self.footer(screen.nav));
        Text::from(lines)
    }

    /// `Logstash Top - <host> (<version>) @ <base_url>`
    pub fn title(&self, node: &NodeOverview, base_url: &str) -> Line<'static> {
        Line::styled(
            format!("Logstash Top - {} ({}) @ {}", node.host, node.version, base_url),
            self.palette.header(),
        )
    }

    /// One row per pipeline plus a total row.
    pub fn overview(
        &self,
        answer: &PipelineAnswer,
        roster: &[String],
        selected_index: usize,
    ) -> Vec<Line<'static>> {
        let border = self.overview_border();
        let mut lines = vec![
            border.clone(),
            Line::styled(
                overview_row(UNSELECTED_MARKER, OVERVIEW_HEADERS.map(String::from)),
                self.palette.header(),
            ),
            border.clone(),
        ];

        let default = PipelineData::default();
        let mut total = lstop_core::types::EventCounts::default();

        for (index, name) in roster.iter().enumerate() {
            let data = answer.pipeline(name).unwrap_or(&default);
            total.accumulate(&data.events);

            let selected = index == selected_index;
            let marker = if selected { SELECTED_MARKER } else { UNSELECTED_MARKER };
            let text = overview_row(
                marker,
                [
                    pad_truncate(name, OVERVIEW_NAME_WIDTH),
                    format!("{:>NUMBER_WIDTH$}", data.events.r#in),
                    format!("{:>NUMBER_WIDTH$}", data.events.filtered),
                    format!("{:>NUMBER_WIDTH$}", data.events.out),
                    format!("{:>NUMBER_WIDTH$.4}", data.flow.queue_backpressure.current),
                    format!("{:>NUMBER_WIDTH$.4}", data.flow.worker_concurrency.current),
                ],
            );
            let style = if selected {
                self.palette.selected_row()
            } else {
                Style::default()
            };
            lines.push(Line::styled(text, style));
        }

        lines.push(border.clone());
        lines.push(Line::from(overview_row(
            UNSELECTED_MARKER,
            [
                pad_truncate("total", OVERVIEW_NAME_WIDTH),
                format!("{:>NUMBER_WIDTH$}", total.r#in),
                format!("{:>NUMBER_WIDTH$}", total.filtered),
                format!("{:>NUMBER_WIDTH$}", total.out),
                format!("{:>NUMBER_WIDTH$}", "N/A"),
                format!("{:>NUMBER_WIDTH$}", "N/A"),
            ],
        )));
        lines.push(border);
        lines
    }

    /// Configuration, counters and plugin tables of one pipeline.
    ///
    /// A pipeline missing from the snapshot renders as all zeros.
    pub fn detail(
        &self,
        name: &str,
        data: Option<&PipelineData>,
        node: &NodeOverview,
        metric: WorkerMetric,
    ) -> Vec<Line<'static>> {
        let default = PipelineData::default();
        let data = data.unwrap_or(&default);
        let config = node.pipeline_config(name).cloned().unwrap_or_default();

        let mut lines = vec![
            Line::styled(format!("Pipeline '{name}'"), self.palette.header()),
            Line::from(format!("Queue '{}'", data.queue.queue_type)),
            Line::from(format!(
                "Workers: {} | Batch Size: {} | Batch Delay: {} | In: {} | Filtered: {} | Out: {}",
                config.workers,
                config.batch_size,
                config.batch_delay,
                data.events.r#in,
                data.events.filtered,
                data.events.out,
            )),
            Line::default(),
        ];

        let input_headers = ["Name", "Throughput", "DiffLifetime", "Diff1Minutes"];
        let border = self.table_border(input_headers.len());
        lines.push(self.section_title("Inputs"));
        lines.push(border.clone());
        lines.push(self.table_header(&input_headers));
        lines.push(border.clone());
        lines.extend(data.plugins.inputs.iter().map(|p| self.input_row(p)));
        lines.push(border);
        lines.push(Line::default());

        let headers = [
            "Name",
            metric.display_name(),
            "DiffLifetime",
            "Diff1Minutes",
            "Diff15Minutes",
        ];
        for (title, plugins) in [
            ("Filters", &data.plugins.filters),
            ("Outputs", &data.plugins.outputs),
        ] {
            let border = self.table_border(headers.len());
            lines.push(self.section_title(title));
            lines.push(border.clone());
            lines.push(self.table_header(&headers));
            lines.push(border.clone());
            lines.extend(plugins.iter().map(|p| self.worker_row(p, metric)));
            lines.push(border);
            lines.push(Line::default());
        }
        lines.pop();

        lines
    }

    /// Static help for the overview or the detail view.
    pub fn help(&self, detail: bool) -> Vec<Line<'static>> {
        let mut entries = vec![("up / k", "previous pipeline"), ("down / j", "next pipeline")];
        if detail {
            entries.push(("b / esc", "back to the overview"));
            entries.push(("w", "cycle the filter and output metric"));
        } else {
            entries.push(("enter", "show the selected pipeline"));
        }
        entries.push(("p", "pause or resume polling"));
        entries.push(("h / ?", "close this help"));
        entries.push(("q", "quit"));

        let title = if detail {
            "Logstash Top - help (pipeline detail)"
        } else {
            "Logstash Top - help (overview)"
        };
        let mut lines = vec![Line::styled(title, self.palette.header()), Line::default()];
        lines.extend(entries.into_iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), self.palette.warning()),
                Span::raw(action),
            ])
        }));
        lines
    }

    /// Pause status trailer; the detail view also names the worker metric.
    pub fn footer(&self, nav: &NavigationState) -> Line<'static> {
        let mut spans = if nav.paused {
            vec![Span::styled("[PAUSED] press p to resume", self.palette.warning())]
        } else {
            vec![Span::styled("press h for help, q to quit", self.palette.dim())]
        };
        if nav.selected && !nav.help {
            spans.push(Span::styled(
                format!("  |  metric: {} (w to cycle)", nav.metric.display_name()),
                self.palette.dim(),
            ));
        }
        Line::from(spans)
    }

    /// Screen painted while the startup gate waits for the node.
    pub fn waiting(&self, base_url: &str, attempt: u32, error: &str) -> Text<'static> {
        Text::from(vec![
            Line::styled("Logstash Top", self.palette.header()),
            Line::default(),
            Line::styled(
                format!("waiting for {base_url} (attempt {attempt}): {error}"),
                self.palette.warning(),
            ),
            Line::default(),
            Line::styled("press q to quit", self.palette.dim()),
        ])
    }

    fn overview_border(&self) -> Line<'static> {
        let cell = "-".repeat(NUMBER_WIDTH);
        let mut border = String::from(UNSELECTED_MARKER);
        border.push('+');
        for _ in 0..OVERVIEW_HEADERS.len() {
            border.push_str(&cell);
            border.push('+');
        }
        Line::styled(border, self.palette.border())
    }

    fn section_title(&self, title: &str) -> Line<'static> {
        Line::styled(format!("{:>30}", format!("==={title}===")), self.palette.border())
    }

    /// `+----------+---------------+...+` for a detail table of `columns` cells.
    fn table_border(&self, columns: usize) -> Line<'static> {
        let mut border = format!("+{}+", "-".repeat(NAME_WIDTH));
        for _ in 1..columns {
            border.push_str(&"-".repeat(NUMBER_WIDTH));
            border.push('+');
        }
        Line::styled(border, self.palette.border())
    }

    fn table_header(&self, headers: &[&str]) -> Line<'static> {
        let mut cells = vec![pad_truncate(headers[0], NAME_WIDTH)];
        cells.extend(headers[1..].iter().map(|h| pad_truncate(h, NUMBER_WIDTH)));
        Line::styled(format!("|{}|", cells.join("|")), self.palette.header())
    }

    fn input_row(&self, plugin: &InputPlugin) -> Line<'static> {
        let series = &plugin.flow.throughput;
        let trend = Trend::of(series);
        let mut spans = vec![
            Span::raw("|"),
            Span::raw(pad_truncate(plugin_label(&plugin.name, &plugin.id), NAME_WIDTH)),
            Span::raw("|"),
            Span::raw(format!("{:<NUMBER_WIDTH$.6}", series.current)),
        ];
        for delta in [trend.vs_lifetime, trend.vs_1_minute] {
            spans.push(Span::raw("|"));
            spans.push(self.delta_cell(delta));
        }
        spans.push(Span::raw("|"));
        Line::from(spans)
    }

    fn worker_row(&self, plugin: &WorkerPlugin, metric: WorkerMetric) -> Line<'static> {
        let series = metric.series(&plugin.flow);
        let trend = Trend::of(series);
        let mut spans = vec![
            Span::raw("|"),
            Span::raw(pad_truncate(plugin_label(&plugin.name, &plugin.id), NAME_WIDTH)),
            Span::raw("|"),
            Span::raw(format!("{:<NUMBER_WIDTH$.6}", series.current)),
        ];
        for delta in [trend.vs_lifetime, trend.vs_1_minute, trend.vs_15_minutes] {
            spans.push(Span::raw("|"));
            spans.push(self.delta_cell(delta));
        }
        spans.push(Span::raw("|"));
        Line::from(spans)
    }

    fn delta_cell(&self, delta: f64) -> Span<'static> {
        Span::styled(
            format!("{delta:>NUMBER_WIDTH$.4}"),
            self.palette.trend(TrendLevel::classify(delta)),
        )
    }
}

fn overview_row(marker: &str, cells: [String; 6]) -> String {
    let mut row = String::from(marker);
    row.push('|');
    for (index, cell) in cells.iter().enumerate() {
        let width = if index == 0 {
            OVERVIEW_NAME_WIDTH
        } else {
            NUMBER_WIDTH
        };
        row.push_str(&pad_truncate(cell, width));
        row.push('|');
    }
    row
}

/// Pad `text` to exactly `width` characters, truncating with `…`.
pub fn pad_truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return format!("{text:<width$}");
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Flatten rendered text to plain lines, dropping styles.
#[cfg(test)]
pub(crate) fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
