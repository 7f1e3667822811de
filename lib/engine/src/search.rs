/*
 * 电脑走子：一层贪心搜索
 *
 * 枚举走棋方的全部合法走法，打乱顺序后逐个试走、评估、撤销，
 * 红方取最高分，黑方取最低分，分数相同时保留先遇到的走法。
 */

use tracing::{info, trace};

use crate::board::{Board, PieceId, Player, Position};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Choice {
    pub piece: PieceId,
    pub to: Position,
    pub score: f64,
}

pub struct MoveSelector {
    rng: fastrand::Rng,
}

impl Default for MoveSelector {
    fn default() -> Self {
        MoveSelector::new()
    }
}

impl MoveSelector {
    pub fn new() -> Self {
        MoveSelector {
            rng: fastrand::Rng::new(),
        }
    }

    /// Same seed, same position, same choice.
    pub fn with_seed(seed: u64) -> Self {
        MoveSelector {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(MoveSelector::new, MoveSelector::with_seed)
    }

    /// Scores every legal move of the side to move and returns the best one,
    /// or `None` when that side cannot move. The board is restored after each
    /// trial move.
    pub fn choose(&mut self, board: &mut Board) -> Option<Choice> {
        let turn = board.turn();
        let mut candidates = board.all_legal_moves(turn);
        self.rng.shuffle(&mut candidates);

        let mut best: Option<Choice> = None;
        for (piece, to) in candidates {
            let Some(m) = board.make_move(piece, to) else {
                continue;
            };
            let score = board.evaluate();
            board.unmake_move(&m);
            trace!("candidate {} scores {:.1}", m, score);

            let better = match best {
                None => true,
                Some(b) if turn == Player::Red => score > b.score,
                Some(b) => score < b.score,
            };
            if better {
                best = Some(Choice { piece, to, score });
            }
        }
        best
    }

    /// Plays for the computer side. Returns `false` without touching the
    /// board when it is the human's turn. A computer side with no legal move
    /// passes, which also counts as having moved.
    pub fn make_move(&mut self, board: &mut Board) -> bool {
        if board.turn() == board.human() {
            return false;
        }
        match self.choose(board) {
            Some(choice) => {
                if let Some(m) = board.apply_move(choice.piece, choice.to) {
                    info!("computer ({}) plays {} with score {:.1}", m.player, m, choice.score);
                }
            }
            None => board.pass(),
        }
        true
    }
}
