use anyhow::{Context, Result};
use calendar_grid::{Action, CalendarArgs, CalendarMode, CalendarState, Weekday};
use clap::Parser;

mod output;
mod script;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(version, about = "Render calendar month grids and replay selection actions", long_about = None)]
struct Cli {
    /// Selection mode: single, range, week or month
    #[arg(short, long, default_value = "single")]
    mode: CalendarMode,
    /// Initial value, YYYY-MM-DD or YYYY-MM-DD/YYYY-MM-DD (defaults to today)
    #[arg(short, long, default_value = "")]
    value: String,
    /// Earliest selectable date
    #[arg(long)]
    min: Option<String>,
    /// Latest selectable date
    #[arg(long)]
    max: Option<String>,
    /// First day of the week, by name or index starting at Sunday = 0
    #[arg(short, long, default_value = "sunday")]
    week_start: Weekday,
    /// Number of months shown side by side
    #[arg(short = 'n', long, default_value_t = 1)]
    months: usize,
    /// Disable colors
    #[arg(long)]
    plain: bool,
    /// Actions to replay: click:DATE, hover:DATE, leave, left, right, up,
    /// down, pageup, pagedown, enter, next, prev, set:ISO, view:DATE
    #[arg(value_parser = script::parse_action)]
    actions: Vec<Action>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    if cli.plain {
        console::set_colors_enabled(false);
    }

    let mut args = CalendarArgs::default()
        .mode(cli.mode)
        .value(cli.value)
        .first_day_of_week(cli.week_start)
        .number_of_months(cli.months);
    args.min_date = cli.min;
    args.max_date = cli.max;

    let mut calendar =
        CalendarState::from_args(&args).context("invalid calendar configuration")?;
    tracing::info!(mode = %calendar.mode(), value = %calendar.iso_value(), "calendar ready");
    for action in cli.actions {
        match calendar.apply(action) {
            Some(changed) => output::status("changed", changed.iso()),
            None => output::step(format!("{action:?}")),
        }
    }

    output::print_grids(&calendar.render());
    output::status("value", calendar.iso_value());
    if calendar.is_selecting() {
        output::note("range selection still in progress");
    }
    Ok(())
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,calendar_grid=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
