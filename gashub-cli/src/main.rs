//! Gas Hub CLI: the market-data pipeline for scripts and pipes.
//!
//! Commands:
//! - `show`: print a market or settlement table, optionally converted,
//!   sorted, filtered and paged
//! - `export`: write a whole table as CSV
//! - `chart`: print the dual-axis chart description as JSON
//! - `rates`: print the current rates for the offered currencies

mod chart_json;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gashub_core::chart::chart_title;
use gashub_core::currency::{HttpRateSource, StaticRateSource, BASE_CURRENCY, CURRENCY_OPTIONS};
use gashub_core::table::{filter_table, pagination_info, sort_table};
use gashub_core::{
    convert_prices, AppConfig, ChartCanvas, ChartSeries, Conversion, DisplayTables, Language,
    RateSource, SortKey, TabId, TableView, Translations,
};

use crate::chart_json::JsonChart;

#[derive(Parser)]
#[command(name = "gashub", about = "Gas Hub CLI for Balkan gas-exchange market data")]
struct Cli {
    /// Path to a TOML config file. Missing files mean defaults.
    #[arg(long, global = true, default_value = "gashub.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Which {
    Market,
    Settlement,
}

#[derive(clap::Args, Debug)]
struct TableArgs {
    /// Tab: intraday, day-ahead, weeks or months. Unknown ids show day-ahead.
    #[arg(long)]
    tab: Option<String>,

    /// Interface language for headers and number grouping.
    #[arg(long, default_value = "bg")]
    lang: String,

    /// Which table to print.
    #[arg(long, value_enum, default_value_t = Which::Market)]
    table: Which,

    /// Convert prices from BGN into this currency.
    #[arg(long)]
    currency: Option<String>,

    /// Use this BGN rate instead of asking the rate service.
    #[arg(long, requires = "currency")]
    rate: Option<f64>,

    /// Sort key: contract or price. Unknown keys sort by contract.
    #[arg(long)]
    sort: Option<String>,

    /// Keep rows containing this text (case-insensitive).
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of a table.
    Show {
        #[command(flatten)]
        table: TableArgs,

        /// Page number, clamped to the available pages.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Entries per page. Defaults to the configured value.
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Write every matching row of a table as CSV.
    Export {
        #[command(flatten)]
        table: TableArgs,

        /// Output file. Defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the chart for a tab as JSON.
    Chart {
        #[arg(long)]
        tab: Option<String>,

        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print BGN exchange rates for the offered currencies.
    Rates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    init_tracing(&config.logging.level);
    let translations = Translations::load(config.i18n.dir.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Show {
            table,
            page,
            per_page,
        } => {
            let mut view = build_view(&config, &translations, &table)?;
            view.set_entries_per_page(per_page.unwrap_or(config.display.entries_per_page));
            view.go_to_page(page);
            write_text(&mut out, &view, &translations, parse_lang(&table.lang)?)
        }
        Commands::Export { table, output } => {
            let view = build_view(&config, &translations, &table)?;
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    write_csv(file, &view)?;
                    tracing::info!(path = %path.display(), rows = view.matching_count(), "exported");
                    Ok(())
                }
                None => write_csv(&mut out, &view),
            }
        }
        Commands::Chart { tab, pretty } => {
            let tab = resolve_tab(&config, tab.as_deref());
            write_chart(&mut out, tab, pretty)
        }
        Commands::Rates => {
            let source = http_source(&config)?;
            write_rates(&mut out, &source)
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level. Logs go to stderr so
/// stdout stays clean for pipes.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_lang(code: &str) -> Result<Language> {
    match Language::parse(code) {
        Some(lang) => Ok(lang),
        None => bail!("unknown language '{code}', expected bg or en"),
    }
}

fn resolve_tab(config: &AppConfig, tab: Option<&str>) -> TabId {
    match tab {
        Some(id) => {
            if TabId::parse(id).is_none() {
                tracing::warn!(tab = id, "unknown tab, showing day-ahead");
            }
            TabId::parse_or_default(id)
        }
        None => config.default_tab(),
    }
}

fn http_source(config: &AppConfig) -> Result<HttpRateSource> {
    HttpRateSource::new(config.rates.endpoint.clone(), config.rate_timeout())
        .context("building exchange-rate client")
}

/// Render, convert, filter and sort one table, in that order.
fn build_view(config: &AppConfig, translations: &Translations, args: &TableArgs) -> Result<TableView> {
    let lang = parse_lang(&args.lang)?;
    let tab = resolve_tab(config, args.tab.as_deref());
    let mut tables = DisplayTables::new(tab, translations, lang, BASE_CURRENCY);

    if let Some(target) = args.currency.as_deref() {
        let target = target.to_uppercase();
        let source: Box<dyn RateSource> = match args.rate {
            Some(rate) => Box::new(StaticRateSource::new([(target.clone(), rate)])),
            None => Box::new(http_source(config)?),
        };
        // A failed conversion keeps base prices; the error is already logged.
        if let Ok(Conversion::Converted { cells, .. }) =
            convert_prices(&mut tables, &target, source.as_ref(), translations, lang)
        {
            tracing::debug!(cells, currency = %target, "prices converted");
        }
    }

    let mut view = match args.table {
        Which::Market => tables.market,
        Which::Settlement => tables.settlement,
    };
    if let Some(term) = args.filter.as_deref() {
        filter_table(&mut view, term);
    }
    if let Some(key) = args.sort.as_deref() {
        sort_table(&mut view, SortKey::parse(key));
    }
    Ok(view)
}

/// Column-aligned page of `view` followed by the pagination line.
fn write_text(
    out: &mut impl Write,
    view: &TableView,
    translations: &Translations,
    lang: Language,
) -> Result<()> {
    let rows: Vec<&Vec<String>> = view.visible_rows().map(|r| &r.cells).collect();
    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (i, c) in cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(c.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(view.headers.as_slice()))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for cells in rows {
        writeln!(out, "{}", line(cells.as_slice()))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", pagination_info(view, translations, lang))?;
    Ok(())
}

/// Header plus every row matching the filter, ignoring pagination.
fn write_csv(out: impl Write, view: &TableView) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&view.headers)?;
    for row in view.rows().iter().filter(|r| r.matches_filter()) {
        wtr.write_record(&row.cells)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_chart(out: &mut impl Write, tab: TabId, pretty: bool) -> Result<()> {
    let mut canvas = ChartCanvas::new(JsonChart);
    let series = ChartSeries::from_observations(tab.dataset());
    canvas.render_chart(&series, &chart_title(tab))?;
    let Some(spec) = canvas.current() else {
        bail!("chart backend produced no chart");
    };
    let json = if pretty {
        serde_json::to_string_pretty(spec)?
    } else {
        serde_json::to_string(spec)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn write_rates(out: &mut impl Write, source: &dyn RateSource) -> Result<()> {
    let table = source
        .latest(BASE_CURRENCY)
        .with_context(|| format!("fetching {BASE_CURRENCY} rates from {}", source.name()))?;
    if let Some(date) = &table.date {
        writeln!(out, "{BASE_CURRENCY} rates as of {date}")?;
    }
    for code in CURRENCY_OPTIONS {
        match table.rate(code) {
            Some(rate) => writeln!(out, "{code}  {rate}")?,
            None => writeln!(out, "{code}  n/a")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(extra: &[&str]) -> TableArgs {
        let mut argv = vec!["gashub", "export"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Export { table, .. } => table,
            _ => unreachable!(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rate_requires_currency() {
        assert!(Cli::try_parse_from(["gashub", "show", "--rate", "1.8"]).is_err());
    }

    #[test]
    fn show_prints_page_and_status_line() {
        let t = Translations::embedded();
        let view = build_view(&AppConfig::default(), &t, &args(&["--lang", "en"])).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &view, &t, Language::En).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].starts_with("2025-08-26"));
        assert!(lines[2].contains("+0.61 ↗"));
        assert_eq!(lines.last().copied(), Some("Showing 1 to 7 of 7 entries"));
    }

    #[test]
    fn fixed_rate_converts_then_sorts() {
        let t = Translations::embedded();
        let view = build_view(
            &AppConfig::default(),
            &t,
            &args(&[
                "--lang", "en", "--table", "settlement", "--currency", "eur", "--rate", "1.8",
                "--sort", "price",
            ]),
        )
        .unwrap();
        assert_eq!(view.headers[1], "Settlement price (EUR/MWh)");
        assert_eq!(view.rows()[0].cells[1], "110.52");
        assert_eq!(view.sorted_by(), Some(SortKey::Price));
    }

    #[test]
    fn failed_conversion_keeps_base_prices() {
        let t = Translations::embedded();
        let view = build_view(
            &AppConfig::default(),
            &t,
            &args(&["--lang", "en", "--currency", "EUR", "--rate", "0"]),
        )
        .unwrap();
        assert_eq!(view.headers[3], "VWAP (BGN/MWh)");
        assert_eq!(view.rows()[0].cells[3], "62.94");
    }

    #[test]
    fn csv_export_skips_filtered_rows() {
        let t = Translations::embedded();
        let view = build_view(
            &AppConfig::default(),
            &t,
            &args(&["--tab", "weeks", "--lang", "en", "--filter", "week 3"]),
        )
        .unwrap();
        let mut out = Vec::new();
        write_csv(&mut out, &view).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Volume (MWh),Trades,VWAP (BGN/MWh),Change,Reference price")
        );
        assert_eq!(lines.next(), Some("Week 34,\"285,000\",850,62.45,+1.23 ↗,61.22"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn unknown_tab_falls_back() {
        assert_eq!(resolve_tab(&AppConfig::default(), Some("hourly")), TabId::DayAhead);
        assert_eq!(resolve_tab(&AppConfig::default(), None), TabId::DayAhead);
        assert!(parse_lang("de").is_err());
    }

    #[test]
    fn chart_json_is_one_line_unless_pretty() {
        let mut out = Vec::new();
        write_chart(&mut out, TabId::Months, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"Months Market Data\""));
    }

    #[test]
    fn rates_list_every_option() {
        let source = StaticRateSource::new([("EUR", 0.5113), ("USD", 0.5952)]);
        let mut out = Vec::new();
        write_rates(&mut out, &source).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("EUR  0.5113"));
        assert!(text.contains("GBP  n/a"));
        assert_eq!(text.lines().count(), CURRENCY_OPTIONS.len());
    }
}
