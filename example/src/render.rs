use std::fmt::Write as _;

use tessera_forms::{
    calendar::{DAYS_PER_WEEK, Weekday},
    date_field::DateFieldState,
    grid::GridCell,
};

const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Renders the input line and, when open, the month grid.
///
/// Markers: `[d]` highlight, `*d` selected, `(d)` out of range, `d.` today.
pub fn render(state: &DateFieldState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "input: {:?}{}",
        state.text(),
        match state.suggestions() {
            [suggestion] => format!("  (suggests {suggestion})"),
            _ => String::new(),
        }
    );
    if !state.is_open() {
        let _ = writeln!(out, "[closed]");
        return out;
    }
    let _ = writeln!(out, "{:^35}", state.displayed_month().to_string());
    let _ = writeln!(out, "{}", weekday_header(state.locale().first_day_of_week()));
    let highlighted = state.highlighted_cell_index();
    for (row_index, row) in state.grid().chunks(DAYS_PER_WEEK).enumerate() {
        for (column, cell) in row.iter().enumerate() {
            let index = row_index * DAYS_PER_WEEK + column;
            let _ = write!(out, "{}", render_cell(cell, highlighted == Some(index)));
        }
        out.push('\n');
    }
    out
}

fn weekday_header(first_day_of_week: Weekday) -> String {
    let start = first_day_of_week.index_from_monday() as usize;
    (0..DAYS_PER_WEEK)
        .map(|offset| format!("{:^5}", WEEKDAY_LABELS[(start + offset) % DAYS_PER_WEEK]))
        .collect()
}

fn render_cell(cell: &GridCell, is_highlighted: bool) -> String {
    let GridCell::Day {
        date,
        is_today,
        is_selected,
        is_in_range,
    } = cell
    else {
        return " ".repeat(5);
    };
    let day = date.day().to_string();
    let label = if is_highlighted {
        format!("[{day}]")
    } else if !is_in_range {
        format!("({day})")
    } else if *is_selected {
        format!("*{day}")
    } else if *is_today {
        format!("{day}.")
    } else {
        day
    };
    format!("{label:^5}")
}
