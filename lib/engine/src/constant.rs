use crate::board::PieceKind::{self, *};

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

// 九宫格的列范围，两方相同
pub const PALACE_COLS: (i32, i32) = (3, 5);
// 九宫格的行范围：黑方在上，红方在下
pub const BLACK_PALACE_ROWS: (i32, i32) = (0, 2);
pub const RED_PALACE_ROWS: (i32, i32) = (7, 9);

// 楚河汉界：0..=4 为黑方一侧，5..=9 为红方一侧
pub const RIVER_BLACK_LAST_ROW: i32 = 4;
pub const RIVER_RED_FIRST_ROW: i32 = 5;

/// Mobility is counted in whole moves and scaled down to stay below material.
pub const MOBILITY_WEIGHT: f64 = 0.1;
pub const CHECK_BONUS: f64 = 50.0;

/// Black's half of the opening layout; red's half is the point mirror `(8 - x, 9 - y)`.
pub const HALF_LAYOUT: [(PieceKind, (i32, i32)); 16] = [
    (Chariot, (0, 0)),
    (Chariot, (8, 0)),
    (Horse, (1, 0)),
    (Horse, (7, 0)),
    (Elephant, (2, 0)),
    (Elephant, (6, 0)),
    (Advisor, (3, 0)),
    (Advisor, (5, 0)),
    (General, (4, 0)),
    (Cannon, (1, 2)),
    (Cannon, (7, 2)),
    (Soldier, (0, 3)),
    (Soldier, (2, 3)),
    (Soldier, (4, 3)),
    (Soldier, (6, 3)),
    (Soldier, (8, 3)),
];

// 四个正交方向与四个斜方向
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
