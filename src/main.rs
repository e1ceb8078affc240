//! Month grid CLI application.
//!
//! # Usage
//! ```ignore
//! monthgrid              // Current month
//! monthgrid 2024         // Every month of 2024
//! monthgrid 2 2024       // February 2024
//! monthgrid -3           // Three months
//! monthgrid --json 2 2024
//! ```

use monthgrid::args::{Args, get_display_range};
use monthgrid::clock::{Clock, EnvClock};
use monthgrid::error::AppError;
use monthgrid::events::EventIndex;
use monthgrid::formatter::{format_json, print_months};
use monthgrid::grid::compute_month_grid_with;
use monthgrid::types::GridContext;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("monthgrid: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let today = EnvClock.today();
    let ctx = GridContext::new(args, today)?;
    let range = get_display_range(args, today)?;
    info!(start = ?range.start, count = range.count, %today, "rendering months");

    let events = args.events.as_ref().map(EventIndex::load).transpose()?;

    if args.json {
        // Bounded by the months count limit
        let grids = range
            .months()
            .map(|m| compute_month_grid_with(m.month0 as i32, m.year, today, ctx.week_start))
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", format_json(&grids)?);
    } else {
        print_months(&ctx, range.months(), events.as_ref())?;
    }

    Ok(())
}
