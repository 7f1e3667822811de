/* 走法生成：按棋种生成伪合法落点，再用模拟走子过滤掉送将的走法 */

use crate::board::{in_board, in_country, in_palace, Board, Piece, PieceId, PieceKind, Player, Position};
use crate::constant::{DIAGONAL, ORTHOGONAL};

impl Board {
    // 落点在棋盘内，且不是己方棋子
    fn can_land(&self, piece: &Piece, to: Position) -> bool {
        in_board(to) && !self.piece_at(to).is_some_and(|p| p.player == piece.player)
    }

    /// Pseudo-legal destinations of a piece: movement, blocking and
    /// same-colour rules only. Leaving one's own general attacked is not
    /// considered here.
    pub fn generate_moves_for(&self, id: PieceId) -> Vec<Position> {
        let Some(&piece) = self.piece(id) else {
            return vec![];
        };
        let from = piece.position;
        let mut targets = vec![];
        match piece.kind {
            PieceKind::General => {
                for (dx, dy) in ORTHOGONAL {
                    let to = from.offset(dx, dy);
                    if in_palace(to, piece.player) && self.can_land(&piece, to) {
                        targets.push(to);
                    }
                }
                // 飞将：同一列且中间无子，可以直接吃对方的将
                if let Some(opponent) = self.general_position(piece.player.next()) {
                    if opponent.x == from.x && !self.has_piece_between(from, opponent) {
                        targets.push(opponent);
                    }
                }
            }
            PieceKind::Advisor => {
                for (dx, dy) in DIAGONAL {
                    let to = from.offset(dx, dy);
                    if in_palace(to, piece.player) && self.can_land(&piece, to) {
                        targets.push(to);
                    }
                }
            }
            PieceKind::Elephant => {
                for (dx, dy) in DIAGONAL {
                    let eye = from.offset(dx, dy);
                    let to = from.offset(dx * 2, dy * 2);
                    // 象不能过河，塞象眼不能走
                    if in_country(to.y, piece.player)
                        && self.can_land(&piece, to)
                        && !self.has_piece(eye)
                    {
                        targets.push(to);
                    }
                }
            }
            PieceKind::Horse => {
                for (lx, ly) in ORTHOGONAL {
                    let leg = from.offset(lx, ly);
                    // 蹩马腿
                    if !in_board(leg) || self.has_piece(leg) {
                        continue;
                    }
                    for (dx, dy) in DIAGONAL {
                        // 只取远离起点的两个斜向，保证是日字
                        if lx * dx + ly * dy <= 0 {
                            continue;
                        }
                        let to = leg.offset(dx, dy);
                        if self.can_land(&piece, to) {
                            targets.push(to);
                        }
                    }
                }
            }
            PieceKind::Chariot => {
                for (dx, dy) in ORTHOGONAL {
                    let mut to = from.offset(dx, dy);
                    while in_board(to) {
                        match self.piece_at(to) {
                            None => targets.push(to),
                            Some(other) => {
                                if other.player != piece.player {
                                    targets.push(to);
                                }
                                break;
                            }
                        }
                        to = to.offset(dx, dy);
                    }
                }
            }
            PieceKind::Cannon => {
                for (dx, dy) in ORTHOGONAL {
                    let mut to = from.offset(dx, dy);
                    let mut screened = false;
                    while in_board(to) {
                        match (screened, self.piece_at(to)) {
                            (false, None) => targets.push(to),
                            (false, Some(_)) => screened = true,
                            (true, None) => {}
                            (true, Some(other)) => {
                                // 隔一子吃子，无论能否吃都到此为止
                                if other.player != piece.player {
                                    targets.push(to);
                                }
                                break;
                            }
                        }
                        to = to.offset(dx, dy);
                    }
                }
            }
            PieceKind::Soldier => {
                let forward = if piece.player == Player::Red { -1 } else { 1 };
                let to = from.offset(0, forward);
                if self.can_land(&piece, to) {
                    targets.push(to);
                }
                // 过河后可以左右走
                if !in_country(from.y, piece.player) {
                    for dx in [-1, 1] {
                        let to = from.offset(dx, 0);
                        if self.can_land(&piece, to) {
                            targets.push(to);
                        }
                    }
                }
            }
        }
        targets
    }

    /// Destinations of a piece. With `filter_self_check` every destination
    /// that would leave the mover's own general attacked is dropped; the
    /// unfiltered form is what check detection itself uses.
    pub fn legal_moves(&mut self, id: PieceId, filter_self_check: bool) -> Vec<Position> {
        let mut targets = self.generate_moves_for(id);
        if filter_self_check {
            targets.retain(|&to| !self.would_result_in_check(id, to));
        }
        targets
    }

    /// Every legal `(piece, destination)` pair for one side.
    pub fn all_legal_moves(&mut self, player: Player) -> Vec<(PieceId, Position)> {
        let mut moves = vec![];
        for id in self.piece_ids(player) {
            moves.extend(self.legal_moves(id, true).into_iter().map(|to| (id, to)));
        }
        moves
    }

    pub fn legal_move_count(&mut self, player: Player) -> usize {
        self.piece_ids(player)
            .into_iter()
            .map(|id| self.legal_moves(id, true).len())
            .sum()
    }
}
