//! Text and JSON rendering of month grids with localization and color support.

use chrono::{Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::error::GridError;
use crate::events::EventIndex;
use crate::grid::{MonthCursor, compute_month_grid_with, is_header_today};
use crate::types::{
    COLOR_DIM, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, COLOR_UNDERLINE,
    CalendarCell, ColumnsMode, DAYS_PER_WEEK, GRID_WIDTH, GridContext, MonthGrid,
};

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split(['.', '@'])
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Month name for a one-based month, capitalized.
///
/// Several locales (pt_BR, es_ES, ...) format month names in lower case.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    let name = match NaiveDate::from_ymd_opt(2000, month, 1) {
        Some(date) => date.format_localized("%B", locale).to_string(),
        None => return month.to_string(),
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let s_lower = s.to_lowercase();
    if s_lower.len() < 3 {
        return None;
    }
    NAMES
        .iter()
        .position(|name| *name == s_lower || (s_lower.len() == 3 && name.starts_with(&s_lower)))
        .map(|i| i as u32 + 1)
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Format month header ("Month Year") centered over the grid.
pub fn format_month_header(ctx: &GridContext, grid: &MonthGrid, locale: Locale) -> String {
    let header = format!("{} {}", get_month_name(grid.month(), locale), grid.year);
    let centered = center_text(&header, GRID_WIDTH);
    if ctx.color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Seven weekdays in column order, starting from `week_start`.
pub fn get_weekday_order(week_start: Weekday) -> [Weekday; 7] {
    let mut order = [week_start; 7];
    for i in 1..DAYS_PER_WEEK {
        order[i] = order[i - 1].succ();
    }
    order
}

/// Get 2-character weekday abbreviation for a locale.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    // 2000-01-03 was a Monday
    let Some(date) = NaiveDate::from_ymd_opt(2000, 1, 3 + weekday.num_days_from_monday()) else {
        return String::new();
    };
    let day_name = date.format_localized("%a", locale).to_string();
    day_name.chars().take(2).collect()
}

/// Format weekday header row; today's column is underlined when it lies in the month.
pub fn format_weekday_headers(ctx: &GridContext, grid: &MonthGrid, locale: Locale) -> String {
    let mut result = String::new();

    for weekday in get_weekday_order(ctx.week_start) {
        let name = format!("{:<2}", get_weekday_short_name(weekday, locale));
        if ctx.color && is_header_today(weekday, grid.month0, grid.year, ctx.today) {
            result.push_str(&format!(
                "{}{}{}{} ",
                COLOR_SAND_YELLOW, COLOR_UNDERLINE, name, COLOR_RESET
            ));
        } else if ctx.color {
            result.push_str(&format!("{}{}{} ", COLOR_SAND_YELLOW, name, COLOR_RESET));
        } else {
            result.push_str(&format!("{} ", name));
        }
    }

    result
}

/// Format one day cell: a right-aligned numeral and an event marker column.
///
/// Color priority: today > adjacent month > regular
pub fn format_cell(ctx: &GridContext, cell: &CalendarCell, marker: char) -> String {
    let day_str = format!("{:>2}", cell.display_day);

    if !ctx.color {
        return format!("{}{}", day_str, marker);
    }
    if cell.is_today {
        format!("{}{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET, marker)
    } else if !cell.is_in_target_month() {
        format!("{}{}{}{}", COLOR_DIM, day_str, COLOR_RESET, marker)
    } else {
        format!("{}{}", day_str, marker)
    }
}

/// Format month as lines: header, weekday names, then one line per week.
pub fn format_month_grid(
    ctx: &GridContext,
    grid: &MonthGrid,
    events: Option<&EventIndex>,
) -> Vec<String> {
    let locale = get_system_locale();
    let mut lines = Vec::with_capacity(grid.len() / DAYS_PER_WEEK + 2);

    lines.push(format_month_header(ctx, grid, locale));
    lines.push(format_weekday_headers(ctx, grid, locale));

    for week in grid.weeks() {
        let line: String = week
            .iter()
            .map(|cell| {
                let marker = events.map_or(' ', |index| index.day_events(cell.date).marker());
                format_cell(ctx, cell, marker)
            })
            .collect();
        lines.push(line);
    }

    lines
}

/// Lay several grids out side by side, padding shorter grids with blank rows.
pub fn format_months_side_by_side(
    ctx: &GridContext,
    grids: &[MonthGrid],
    events: Option<&EventIndex>,
) -> Vec<String> {
    let blocks: Vec<Vec<String>> = grids
        .iter()
        .map(|g| format_month_grid(ctx, g, events))
        .collect();
    let max_height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let gutter = " ".repeat(ctx.gutter_width);
    let blank = " ".repeat(GRID_WIDTH);

    (0..max_height)
        .map(|row| {
            blocks
                .iter()
                .map(|block| block.get(row).map(String::as_str).unwrap_or(blank.as_str()))
                .collect::<Vec<_>>()
                .join(&gutter)
                .trim_end()
                .to_string()
        })
        .collect()
}

/// List the visible event titles of each target-month day, with a count of hidden ones.
pub fn format_event_agenda(grid: &MonthGrid, events: &EventIndex) -> Vec<String> {
    let locale = get_system_locale();
    grid.iter()
        .filter(|cell| cell.is_in_target_month())
        .filter_map(|cell| {
            let day = events.day_events(cell.date);
            if day.count == 0 {
                return None;
            }
            let titles: Vec<&str> = day.visible.iter().map(|e| e.title.as_str()).collect();
            let mut line = format!(
                "{:>2} {}: {}",
                cell.display_day,
                get_month_name(grid.month(), locale),
                titles.join(", ")
            );
            if day.has_more {
                line.push_str(&format!(" +{} more", day.hidden()));
            }
            Some(line)
        })
        .collect()
}

/// Render grids as JSON: one grid is an array of cells, several are an array of arrays.
pub fn format_json(grids: &[MonthGrid]) -> serde_json::Result<String> {
    match grids {
        [grid] => serde_json::to_string_pretty(&grid.cells),
        _ => {
            let all: Vec<&Vec<CalendarCell>> = grids.iter().map(|g| &g.cells).collect();
            serde_json::to_string_pretty(&all)
        }
    }
}

impl GridContext {
    pub fn months_per_row(&self) -> u32 {
        match self.columns {
            ColumnsMode::Fixed(n) => n,
            ColumnsMode::Auto => {
                // clamp to 1-3 for readability
                let month_width = GRID_WIDTH + self.gutter_width;
                if let Some(term_width) = get_terminal_width() {
                    (term_width / month_width as u32).clamp(1, 3)
                } else {
                    3
                }
            }
        }
    }
}

/// Compute and print months one row of `months_per_row` at a time, each row
/// followed by its event agenda when events are loaded.
pub fn print_months<I>(
    ctx: &GridContext,
    months: I,
    events: Option<&EventIndex>,
) -> Result<(), GridError>
where
    I: IntoIterator<Item = MonthCursor>,
{
    let per_row = ctx.months_per_row().max(1) as usize;
    let mut months = months.into_iter();
    let mut first = true;

    loop {
        let row = months
            .by_ref()
            .take(per_row)
            .map(|m| compute_month_grid_with(m.month0 as i32, m.year, ctx.today, ctx.week_start))
            .collect::<Result<Vec<_>, _>>()?;
        if row.is_empty() {
            return Ok(());
        }
        if !first {
            println!();
        }
        first = false;

        for line in format_months_side_by_side(ctx, &row, events) {
            println!("{}", line);
        }
        if let Some(index) = events {
            for grid in &row {
                for line in format_event_agenda(grid, index) {
                    println!("{}", line);
                }
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}
