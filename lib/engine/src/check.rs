/* 将军检测 */

use crate::board::{Board, PieceId, Player, Position};

impl Board {
    pub fn has_piece_between(&self, a: Position, b: Position) -> bool {
        if a.x == b.x {
            (a.y.min(b.y) + 1..a.y.max(b.y)).any(|y| self.has_piece(Position::new(a.x, y)))
        } else if a.y == b.y {
            (a.x.min(b.x) + 1..a.x.max(b.x)).any(|x| self.has_piece(Position::new(x, a.y)))
        } else {
            false
        }
    }

    // 将帅照面：同一列且中间没有棋子
    pub fn generals_facing(&self) -> bool {
        match (
            self.general_position(Player::Red),
            self.general_position(Player::Black),
        ) {
            (Some(red), Some(black)) => red.x == black.x && !self.has_piece_between(red, black),
            _ => false,
        }
    }

    /// Whether `player`'s general is attacked by any opposing piece, or faces
    /// the opposing general on an open file. A side without a general is
    /// never in check.
    pub fn is_in_check(&self, player: Player) -> bool {
        let Some(general) = self.general_position(player) else {
            return false;
        };
        let attacked = self
            .pieces()
            .filter(|(_, p)| p.player == player.next())
            .any(|(id, _)| self.generate_moves_for(id).contains(&general));
        attacked || self.generals_facing()
    }

    /// Plays the move on the board, asks whether the mover's general is in
    /// check, and takes the move back. The board is left exactly as it was.
    pub fn would_result_in_check(&mut self, id: PieceId, to: Position) -> bool {
        let Some(player) = self.piece(id).map(|p| p.player) else {
            return false;
        };
        let Some(m) = self.make_move(id, to) else {
            return false;
        };
        let in_check = self.is_in_check(player);
        self.unmake_move(&m);
        in_check
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;

    #[test]
    fn test_is_checked() {
        let board = Board::init(Player::Red);
        for _ in 0..1_000 {
            assert!(!board.is_in_check(Player::Red));
        }
        assert!(!board.is_in_check(Player::Black));
    }

    #[test]
    fn test_king_eye_to_eye() {
        let mut board = Board::empty(Player::Red);
        board.place(PieceKind::General, Player::Red, Position::new(4, 9));
        board.place(PieceKind::General, Player::Black, Position::new(4, 0));
        assert!(board.generals_facing());
        assert!(board.is_in_check(Player::Red));
        assert!(board.is_in_check(Player::Black));

        board.place(PieceKind::Advisor, Player::Red, Position::new(4, 8));
        assert!(!board.generals_facing());
        assert!(!board.is_in_check(Player::Red));
        assert!(!board.is_in_check(Player::Black));

        // 不同列
        let mut board = Board::empty(Player::Red);
        board.place(PieceKind::General, Player::Red, Position::new(3, 8));
        board.place(PieceKind::General, Player::Black, Position::new(4, 1));
        assert!(!board.generals_facing());

        // 开局时中间有兵和炮位
        assert!(!Board::init(Player::Red).generals_facing());
    }

    #[test]
    fn test_check_by_each_attacker() {
        let cases = [
            (PieceKind::Chariot, Position::new(4, 3), None),
            (PieceKind::Horse, Position::new(3, 7), None),
            (PieceKind::Cannon, Position::new(4, 4), Some(Position::new(4, 6))),
            (PieceKind::Soldier, Position::new(4, 8), None),
            (PieceKind::Soldier, Position::new(3, 9), None),
        ];
        for (kind, at, screen) in cases {
            let mut board = Board::empty(Player::Red);
            board.place(PieceKind::General, Player::Red, Position::new(4, 9));
            board.place(PieceKind::General, Player::Black, Position::new(3, 0));
            if let Some(screen) = screen {
                board.place(PieceKind::Elephant, Player::Red, screen);
            }
            board.place(kind, Player::Black, at);
            assert!(board.is_in_check(Player::Red), "{kind:?} at {at}");
            assert!(!board.is_in_check(Player::Black), "{kind:?} at {at}");
        }
    }

    #[test]
    fn test_horse_leg_blocks_check() {
        let mut board = Board::empty(Player::Red);
        board.place(PieceKind::General, Player::Red, Position::new(4, 9));
        board.place(PieceKind::General, Player::Black, Position::new(3, 0));
        board.place(PieceKind::Horse, Player::Black, Position::new(3, 7));
        assert!(board.is_in_check(Player::Red));
        board.place(PieceKind::Soldier, Player::Black, Position::new(3, 8));
        assert!(!board.is_in_check(Player::Red));
    }

    #[test]
    fn test_missing_general_is_not_in_check() {
        let mut board = Board::empty(Player::Red);
        board.place(PieceKind::Chariot, Player::Black, Position::new(4, 0));
        assert!(!board.is_in_check(Player::Red));
    }

    #[test]
    fn test_would_result_in_check() {
        let mut board = Board::empty(Player::Red);
        board.place(PieceKind::General, Player::Red, Position::new(4, 9));
        board.place(PieceKind::General, Player::Black, Position::new(3, 0));
        let guard = board.place(PieceKind::Chariot, Player::Red, Position::new(4, 5)).unwrap();
        board.place(PieceKind::Chariot, Player::Black, Position::new(4, 2));
        let before = board.clone();

        // 车被牵制，离开这一列就会被将
        assert!(board.would_result_in_check(guard, Position::new(3, 5)));
        assert!(!board.would_result_in_check(guard, Position::new(4, 3)));
        // 吃掉对方的车也可以
        assert!(!board.would_result_in_check(guard, Position::new(4, 2)));
        assert_eq!(board, before);

        let moves = board.legal_moves(guard, true);
        assert!(moves.iter().all(|p| p.x == 4));
        assert_eq!(moves.len(), 6);
        assert_eq!(board.legal_moves(guard, false).len(), 6 + 8);
        assert_eq!(board, before);
    }

    #[test]
    fn test_general_cannot_step_into_open_file() {
        let mut board = Board::empty(Player::Red);
        let red = board.place(PieceKind::General, Player::Red, Position::new(3, 9)).unwrap();
        board.place(PieceKind::General, Player::Black, Position::new(4, 0));
        let moves = board.legal_moves(red, true);
        assert_eq!(moves, vec![Position::new(3, 8)]);
    }

    #[test]
    fn test_flying_general_capture_is_legal() {
        let mut board = Board::empty(Player::Red);
        let red = board.place(PieceKind::General, Player::Red, Position::new(4, 9)).unwrap();
        board.place(PieceKind::General, Player::Black, Position::new(4, 0));
        let moves = board.legal_moves(red, true);
        assert!(moves.contains(&Position::new(4, 0)));
        assert!(!moves.contains(&Position::new(4, 8)));
    }

    // 随机对局，检查每一步的合法走法都不会送将，且模拟走子后局面不变
    #[test]
    fn test_random_playouts_keep_invariants() {
        for seed in 0..6 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut board = Board::init(Player::Red);
            for _ in 0..60 {
                if board.is_game_over().is_some() {
                    break;
                }
                let turn = board.turn();
                let before = board.clone();
                let moves = board.all_legal_moves(turn);
                assert_eq!(board, before);
                for &(id, to) in &moves {
                    assert!(!board.would_result_in_check(id, to));
                    let mover = board.piece(id).unwrap();
                    assert_eq!(mover.player, turn);
                    assert!(board.piece_at(to).map_or(true, |p| p.player != turn));
                    if matches!(mover.kind, PieceKind::General | PieceKind::Advisor) {
                        assert!(in_palace(to, turn));
                    }
                    if mover.kind == PieceKind::Elephant {
                        assert!(in_country(to.y, turn));
                    }
                }
                assert_eq!(board, before);
                if moves.is_empty() {
                    board.pass();
                    continue;
                }
                let (id, to) = moves[rng.usize(..moves.len())];
                board.apply_move(id, to);
                for (id, piece) in board.pieces() {
                    assert!(in_board(piece.position));
                    assert_eq!(board.piece_id_at(piece.position), Some(id));
                }
            }
        }
    }
}
