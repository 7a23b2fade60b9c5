use crossterm::style::Stylize;

use crate::puzzle::{State, SIZE};

/// Lays the board out as three rows of space-separated tiles.
///
/// With `color` set, the blank is dimmed and tiles already on their goal
/// position are shown in green.
pub fn render(state: &State, color: bool) -> String {
    let mut out = String::new();

    for (row, tiles) in state.tiles().chunks(SIZE).enumerate() {
        for (col, &tile) in tiles.iter().enumerate() {
            if col > 0 {
                out.push(' ');
            }

            let position = row * SIZE + col;
            let text = tile.to_string();
            let cell = match (color, tile) {
                (false, _) => text,
                (true, 0) => text.dark_grey().to_string(),
                (true, t) if t as usize == position => text.green().bold().to_string(),
                (true, _) => text.bold().to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_layout() {
        let state: State = "312045678".parse().unwrap();
        assert_eq!(render(&state, false), "3 1 2\n0 4 5\n6 7 8\n");
    }

    #[test]
    fn test_colored_layout_keeps_digits() {
        let state: State = "312045678".parse().unwrap();
        let colored = render(&state, true);
        assert!(colored.contains('\u{1b}'));
        assert_eq!(colored.lines().count(), 3);
        for digit in "012345678".chars() {
            assert!(colored.contains(digit));
        }
    }
}
