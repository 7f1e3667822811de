/* 局面评估：子力、机动性与将军加减分，正数对红方有利 */

use crate::board::{Board, Player};
use crate::constant::{CHECK_BONUS, MOBILITY_WEIGHT};

impl Board {
    /// Static score of the position, positive when red is better.
    ///
    /// material + (red mobility - black mobility) * 0.1, then +50 when black
    /// is in check and -50 when red is in check. Both check terms may apply.
    pub fn evaluate(&mut self) -> f64 {
        let material: f64 = self
            .pieces()
            .map(|(_, p)| p.player.sign() * p.kind.material_value())
            .sum();
        let mobility =
            self.legal_move_count(Player::Red) as f64 - self.legal_move_count(Player::Black) as f64;

        let mut score = material + mobility * MOBILITY_WEIGHT;
        if self.is_in_check(Player::Black) {
            score += CHECK_BONUS;
        }
        if self.is_in_check(Player::Red) {
            score -= CHECK_BONUS;
        }
        score
    }
}
