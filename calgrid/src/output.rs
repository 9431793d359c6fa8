use calendar_grid::{Cell, MonthGrid, weekday_labels};
use console::{StyledObject, style};

const STATUS_WIDTH: usize = 12;
const CELL_WIDTH: usize = 3;

pub fn status(label: &str, message: impl AsRef<str>) {
    eprintln!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn note(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("note").blue().bold(), message.as_ref());
}

pub fn step(message: impl AsRef<str>) {
    eprintln!("    {}", message.as_ref());
}

pub fn print_grids(grids: &[MonthGrid]) {
    for grid in grids {
        println!();
        print_grid(grid);
    }
}

fn print_grid(grid: &MonthGrid) {
    let width = CELL_WIDTH * 7;
    println!("{}", style(format!("{:^width$}", grid.label())).bold());
    let header: String = weekday_labels(grid.first_day_of_week())
        .iter()
        .map(|label| format!("{label:>CELL_WIDTH$}"))
        .collect();
    println!("{}", style(header).dim());
    for week in grid.visible_rows() {
        let line: String = week.iter().map(|cell| styled_cell(cell).to_string()).collect();
        println!("{line}");
    }
}

fn styled_cell(cell: &Cell) -> StyledObject<String> {
    if cell.hidden {
        return style(" ".repeat(CELL_WIDTH));
    }
    let mut styled = style(format!("{:>CELL_WIDTH$}", cell.date.day()));
    if !cell.in_current_month || cell.disabled {
        styled = styled.dim();
    }
    if cell.disabled {
        styled = styled.strikethrough();
    }
    if cell.in_range {
        styled = styled.cyan();
    }
    if cell.hovered {
        styled = styled.underlined();
    }
    if cell.selected {
        styled = styled.reverse().bold();
    }
    styled
}
