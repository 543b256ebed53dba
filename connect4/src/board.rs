pub const NUM_CELLS: usize = 42;

pub fn map_board_to_arr(mut board: u64) -> [f32; NUM_CELLS] {
    let mut result = [0.0; NUM_CELLS];
    while board != 0 {
        let removed_bit_idx = board.trailing_zeros() as usize;
        result[map_board_idx_to_vec_idx(removed_bit_idx)] = 1.0;
        board &= board - 1;
    }

    result
}

/// Converts from the bit_board index, which starts in the bottom left and traverses bottom to top with every
/// 7th bit being empty.
/// From:
/// 05  12  19  26  33  40  47
/// 04  11  18  25  32  39  46
/// 03  10  17  24  31  38  45
/// 02  09  16  23  30  37  44
/// 01  08  15  22  29  36  43
/// 00  07  14  21  28  35  42
///
/// To the vector form which start in the top left and goes left to right with no skipped bits.
/// To:
/// 00  01  02  03  04  05  06
/// 07  08  09  10  11  12  13
/// 14  15  16  17  18  19  20
/// 21  22  23  24  25  26  27
/// 28  29  30  31  32  33  34
/// 35  36  37  38  39  40  41
fn map_board_idx_to_vec_idx(board_idx: usize) -> usize {
    let column_idx = board_idx / 7;
    let row_idx = board_idx % 7;
    ((5 - row_idx) * 7) + column_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_board_idx_to_vec_idx_bottom_left() {
        assert_eq!(map_board_idx_to_vec_idx(0), 35);
    }

    #[test]
    fn test_map_board_idx_to_vec_idx_top_left() {
        assert_eq!(map_board_idx_to_vec_idx(5), 0);
    }

    #[test]
    fn test_map_board_idx_to_vec_idx_bottom_right() {
        assert_eq!(map_board_idx_to_vec_idx(42), 41);
    }

    #[test]
    fn test_map_board_idx_to_vec_idx_top_right() {
        assert_eq!(map_board_idx_to_vec_idx(47), 6);
    }

    #[test]
    fn test_map_board_to_arr_sets_one_cell_per_piece() {
        let board = 1 | (1 << 7) | (1 << 47);
        let arr = map_board_to_arr(board);

        assert_eq!(arr.iter().filter(|&&v| v == 1.0).count(), 3);
        assert_eq!(arr[35], 1.0);
        assert_eq!(arr[36], 1.0);
        assert_eq!(arr[6], 1.0);
    }
}
