use std::fmt::{self, Display, Formatter};

use engine::TerminalResult;

use super::board::{map_board_to_arr, NUM_CELLS};

const TOP_ROW_MASK: u64 = 0b0100000_0100000_0100000_0100000_0100000_0100000_0100000;

pub const NUM_COLUMNS: usize = 7;

/// Two planes of 42 cells: the pieces of the side that just moved, then the pieces of the side to move.
pub const FEATURE_WIDTH: usize = NUM_CELLS * 2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub p1_turn_to_move: bool,
    pub p1_piece_board: u64,
    pub p2_piece_board: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    pub fn initial() -> Self {
        GameState {
            p1_turn_to_move: true,
            p1_piece_board: 0,
            p2_piece_board: 0,
        }
    }

    pub fn drop_piece(&self, column: usize) -> Self {
        let column_adder = 1 << (7 * (column - 1));
        let all_pieces = self.p1_piece_board | self.p2_piece_board;
        let dropped_piece = (all_pieces + column_adder) & !all_pieces;
        let mut p1_piece_board = self.p1_piece_board;
        let mut p2_piece_board = self.p2_piece_board;

        if self.p1_turn_to_move {
            p1_piece_board |= dropped_piece;
        } else {
            p2_piece_board |= dropped_piece;
        }

        Self {
            p1_turn_to_move: !self.p1_turn_to_move,
            p1_piece_board,
            p2_piece_board,
        }
    }

    pub fn get_valid_actions(&self) -> [bool; NUM_COLUMNS] {
        let all_pieces = self.p1_piece_board | self.p2_piece_board;
        let mut valid_columns = [false; NUM_COLUMNS];

        for (column_idx, valid) in valid_columns.iter_mut().enumerate() {
            let column_mask_row_six = 1 << (7 * column_idx + 5);
            *valid = column_mask_row_six & all_pieces == 0;
        }

        valid_columns
    }

    /// Every position reachable with one legal move, in column order.
    /// Terminal positions have none.
    pub fn successors(&self) -> Vec<GameState> {
        if self.is_terminal().is_some() {
            return vec![];
        }

        self.get_valid_actions()
            .iter()
            .enumerate()
            .filter(|(_, valid)| **valid)
            .map(|(column_idx, _)| self.drop_piece(column_idx + 1))
            .collect()
    }

    /// The result when the game is won or the board is full, otherwise None.
    ///
    /// A win by the first player is reported with a positive margin and a win by the second player with a
    /// negative one. Faster wins are worth more: the magnitude is one more than the number of empty cells.
    pub fn is_terminal(&self) -> Option<TerminalResult> {
        let all_pieces = self.p1_piece_board | self.p2_piece_board;

        if self.has_connected_4() {
            let empty_cells = (NUM_CELLS - self.number_of_actions()) as i32;
            let p1_won = !self.p1_turn_to_move;
            let margin = if p1_won { empty_cells + 1 } else { -(empty_cells + 1) };
            return Some(TerminalResult::new(p1_won, margin));
        }

        if all_pieces & TOP_ROW_MASK == TOP_ROW_MASK {
            return Some(TerminalResult::new(false, 0));
        }

        None
    }

    pub fn number_of_actions(&self) -> usize {
        (self.p1_piece_board | self.p2_piece_board).count_ones() as usize
    }

    pub fn to_features(&self) -> Vec<f32> {
        let (just_moved, to_move) = if self.p1_turn_to_move {
            (self.p2_piece_board, self.p1_piece_board)
        } else {
            (self.p1_piece_board, self.p2_piece_board)
        };

        let mut features = Vec::with_capacity(FEATURE_WIDTH);
        features.extend_from_slice(&map_board_to_arr(just_moved));
        features.extend_from_slice(&map_board_to_arr(to_move));
        features
    }

    fn has_connected_4(&self) -> bool {
        let board = if self.p1_turn_to_move {
            self.p2_piece_board
        } else {
            self.p1_piece_board
        };

        [6, 7, 8, 1].iter().any(|&shift| {
            let c2 = board & (board << shift);
            c2 & (c2 << (2 * shift)) != 0
        })
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let p1_board = map_board_to_arr(self.p1_piece_board);
        let p2_board = map_board_to_arr(self.p2_piece_board);

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+")?;

        for y in 0..6 {
            write!(f, "   |")?;
            for x in 0..NUM_COLUMNS {
                let idx = y * NUM_COLUMNS + x;
                let p = if p1_board[idx] != 0.0 {
                    "X"
                } else if p2_board[idx] != 0.0 {
                    "O"
                } else {
                    " "
                };
                write!(f, " {} |", p)?;
            }
            writeln!(f)?;
            if y != 5 {
                writeln!(f, "   |---+---+---+---+---+---+---|")?;
            }
        }

        writeln!(f, "   +---+---+---+---+---+---+---+")?;
        writeln!(f, "     1   2   3   4   5   6   7  ")?;

        Ok(())
    }
}
