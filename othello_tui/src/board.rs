//! Othello board rendering and hit-testing.
//!
//! Rendering is a pure function of its inputs: the board marks, the legal
//! set, and an optional cursor. The widget keeps no state between frames,
//! so the hit-test can recompute the same geometry from the frame area and
//! stay consistent with what was drawn.

use othello_client::{BOARD_SIZE, Board, Coord, Disc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

/// Terminal columns per cell.
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per cell.
pub const CELL_HEIGHT: u16 = 2;

const GRID_WIDTH: u16 = CELL_WIDTH * BOARD_SIZE as u16;
const GRID_HEIGHT: u16 = CELL_HEIGHT * BOARD_SIZE as u16;

/// True when an activation on `coord` may fire: the cell is empty and the
/// server listed it as legal. Everything else is a no-op.
pub fn is_playable(board: &Board, legal: &[Coord], coord: Coord) -> bool {
    board.get(coord) == Disc::Empty && legal.contains(&coord)
}

/// Renders the board centered in `area`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    legal: &[Coord],
    cursor: Option<Coord>,
) {
    let grid = grid_rect(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); BOARD_SIZE])
        .split(grid);

    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); BOARD_SIZE])
            .split(*row_area);
        for (col, cell_area) in cols.iter().enumerate() {
            let coord = Coord {
                row: row as u8,
                col: col as u8,
            };
            draw_cell(
                frame,
                *cell_area,
                board.get(coord),
                legal.contains(&coord),
                cursor == Some(coord),
                (row + col) % 2 == 0,
            );
        }
    }
}

/// Maps a terminal position to a cell, `None` outside the grid. `area` must
/// be the same rect that was passed to [`render`].
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Coord> {
    let grid = grid_rect(area);
    if column < grid.x || row < grid.y {
        return None;
    }
    let col = (column - grid.x) / CELL_WIDTH;
    let r = (row - grid.y) / CELL_HEIGHT;
    Coord::new(r.try_into().ok()?, col.try_into().ok()?)
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    disc: Disc,
    legal: bool,
    is_cursor: bool,
    checker: bool,
) {
    // Two-tone felt marks where one cell ends and the next begins when
    // neighboring cells are empty.
    let bg = if checker { Color::Green } else { Color::LightGreen };

    let (symbol, style) = match disc {
        Disc::Black => (
            "●",
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Disc::White => (
            "○",
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Disc::Empty if legal => ("·", Style::default().fg(Color::Yellow).bg(bg)),
        Disc::Empty => (" ", Style::default().bg(bg)),
    };

    let style = if is_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };

    let cell = Paragraph::new(symbol)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(cell, area);
}

fn grid_rect(area: Rect) -> Rect {
    center_rect(area, GRID_WIDTH, GRID_HEIGHT)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn synthetic_board() -> (Board, Vec<Coord>) {
        let mut cells = [[Disc::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Disc::White;
        cells[3][4] = Disc::Black;
        cells[4][3] = Disc::Black;
        cells[4][4] = Disc::White;
        cells[0][7] = Disc::Black;
        // The legal set deliberately includes an occupied cell to check
        // that occupancy alone vetoes activation.
        let legal = vec![coord(2, 3), coord(3, 2), coord(4, 5), coord(5, 4), coord(3, 3)];
        (Board::new(cells), legal)
    }

    #[test]
    fn activation_fires_only_on_empty_legal_cells() {
        let (board, legal) = synthetic_board();
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let c = coord(row, col);
                let expected = board.get(c) == Disc::Empty && legal.contains(&c);
                assert_eq!(
                    is_playable(&board, &legal, c),
                    expected,
                    "cell [{row}, {col}]"
                );
            }
        }
    }

    #[test]
    fn occupied_cell_in_legal_set_is_not_playable() {
        let (board, legal) = synthetic_board();
        assert!(legal.contains(&coord(3, 3)));
        assert!(!is_playable(&board, &legal, coord(3, 3)));
    }

    #[test]
    fn hit_test_maps_grid_corners() {
        let area = Rect::new(0, 0, 80, 24);
        let grid = grid_rect(area);
        assert_eq!((grid.width, grid.height), (GRID_WIDTH, GRID_HEIGHT));

        assert_eq!(hit_test(area, grid.x, grid.y), Some(coord(0, 0)));
        assert_eq!(
            hit_test(area, grid.x + GRID_WIDTH - 1, grid.y + GRID_HEIGHT - 1),
            Some(coord(7, 7))
        );
        // Interior of a cell maps to that cell.
        assert_eq!(
            hit_test(area, grid.x + 2 * CELL_WIDTH + 1, grid.y + CELL_HEIGHT + 1),
            Some(coord(1, 2))
        );
    }

    #[test]
    fn hit_test_rejects_positions_outside_the_grid() {
        let area = Rect::new(0, 0, 80, 24);
        let grid = grid_rect(area);

        assert_eq!(hit_test(area, grid.x.saturating_sub(1), grid.y), None);
        assert_eq!(hit_test(area, grid.x, grid.y.saturating_sub(1)), None);
        assert_eq!(hit_test(area, grid.x + GRID_WIDTH, grid.y), None);
        assert_eq!(hit_test(area, grid.x, grid.y + GRID_HEIGHT), None);
    }
}
