//! Row packing and selection movement for the tile grid.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub tile: usize,
    pub col: u16,
    pub span: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Pack tiles (given by their column spans) into rows of `columns`,
/// in reading order. A tile wider than the grid gets a row of its own.
pub fn pack_rows(spans: &[u16], columns: u16) -> Vec<GridRow> {
    let columns = columns.max(1);
    let mut rows = Vec::new();
    let mut current = GridRow::default();
    let mut used = 0u16;

    for (tile, &span) in spans.iter().enumerate() {
        let span = span.clamp(1, columns);
        if used + span > columns && !current.cells.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.cells.push(GridCell {
            tile,
            col: used,
            span,
        });
        used += span;
    }
    if !current.cells.is_empty() {
        rows.push(current);
    }
    rows
}

/// Screen rectangle of `cell` inside a row area split into `columns`.
pub fn cell_rect(row_area: Rect, columns: u16, cell: GridCell) -> Rect {
    let columns = columns.max(1);
    let col_width = row_area.width / columns;
    let x = row_area.x + cell.col * col_width;
    // The last column absorbs the division remainder.
    let width = if cell.col + cell.span >= columns {
        row_area.right().saturating_sub(x)
    } else {
        cell.span * col_width
    };
    Rect::new(x, row_area.y, width, row_area.height)
}

/// Row index containing `tile`.
pub fn row_of(rows: &[GridRow], tile: usize) -> Option<usize> {
    rows.iter()
        .position(|row| row.cells.iter().any(|c| c.tile == tile))
}

/// Next selection after moving from `selected` in `direction`.
pub fn neighbour(rows: &[GridRow], selected: usize, direction: Direction) -> usize {
    let total: usize = rows.iter().map(|r| r.cells.len()).sum();
    if total == 0 {
        return 0;
    }
    match direction {
        Direction::Left => selected.saturating_sub(1),
        Direction::Right => (selected + 1).min(total - 1),
        Direction::Up | Direction::Down => {
            let Some(row) = row_of(rows, selected) else {
                return selected;
            };
            let target = match direction {
                Direction::Up => row.checked_sub(1),
                _ => Some(row + 1).filter(|r| *r < rows.len()),
            };
            let Some(target) = target.and_then(|r| rows.get(r)) else {
                return selected;
            };
            let col = rows
                .get(row)
                .and_then(|r| r.cells.iter().find(|c| c.tile == selected))
                .map_or(0, |c| c.col);
            target
                .cells
                .iter()
                .rev()
                .find(|c| c.col <= col)
                .or_else(|| target.cells.first())
                .map_or(selected, |c| c.tile)
        }
    }
}
