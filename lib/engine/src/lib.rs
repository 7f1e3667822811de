/*
 * 象棋规则引擎
 *
 * - board: 棋盘状态、棋子、走子记录与点击选子
 * - movegen: 各棋种的走法生成与送将过滤
 * - check: 将军与将帅照面检测
 * - evaluate: 局面静态评估
 * - search: 电脑一层贪心选步
 * - game: 给界面层使用的对局接口
 */
pub mod board;
pub mod check;
pub mod constant;
pub mod evaluate;
pub mod game;
pub mod movegen;
pub mod search;

pub use board::{Board, Move, Outcome, Piece, PieceId, PieceKind, Player, Position};
pub use game::{Game, GameConfig};
pub use search::MoveSelector;
