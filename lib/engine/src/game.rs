/* 对外接口：界面层只通过 Game 驱动对局和查询局面 */

use tracing::info;

use crate::board::{Board, Outcome, Piece, PieceId, Player, Position};
use crate::search::MoveSelector;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameConfig {
    /// The side the human plays; the other side is the computer.
    pub human: Player,
    /// Fixes the computer's tie-breaking when set.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human: Player::Red,
            seed: None,
        }
    }
}

pub struct Game {
    board: Board,
    selector: MoveSelector,
    winner: Option<Outcome>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut game = Game {
            board: Board::init(config.human),
            selector: MoveSelector::from_seed(config.seed),
            winner: None,
        };
        game.start(config.human);
        game
    }

    /// Starts a fresh game with the human on `human`. Red always opens, so the
    /// computer moves at once when the human takes black.
    pub fn start(&mut self, human: Player) {
        self.board = Board::init(human);
        self.winner = None;
        info!("new game, human plays {}", human);
        if human != Player::Red {
            self.ai_make_move();
        }
    }

    /// Back to the opening layout, keeping the sides. As in `start`, the
    /// computer opens when it plays red.
    pub fn reset(&mut self) {
        self.board.reset();
        self.winner = None;
        if self.board.human() != Player::Red {
            self.ai_make_move();
        }
    }

    /// One click from the player. Plays the human move if the click completes
    /// one, then lets the computer answer unless the game just ended. Clicks
    /// on the computer's turn are ignored.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        if self.winner.is_some() || self.board.turn() != self.board.human() {
            return false;
        }
        let moved = self.select_cell(x, y);
        if moved && self.winner.is_none() {
            self.ai_make_move();
        }
        moved
    }

    /// Raw selection command, without a computer reply.
    pub fn select_cell(&mut self, x: i32, y: i32) -> bool {
        if self.winner.is_some() {
            return false;
        }
        let moved = self.board.select_cell(x, y);
        if moved {
            self.update_outcome();
        }
        moved
    }

    pub fn ai_make_move(&mut self) -> bool {
        if self.winner.is_some() {
            return false;
        }
        let moved = self.selector.make_move(&mut self.board);
        if moved {
            self.update_outcome();
        }
        moved
    }

    /// Takes back the last human move together with any computer replies
    /// after it, so the human is to move again. Returns `false` when the human
    /// has not moved yet; the computer's opening move is never taken back.
    pub fn undo(&mut self) -> bool {
        let human = self.board.human();
        if !self.board.history().iter().any(|m| m.player == human) {
            return false;
        }
        while let Some(m) = self.board.undo() {
            if m.player == human {
                break;
            }
        }
        self.winner = None;
        true
    }

    fn update_outcome(&mut self) {
        self.winner = self.board.is_game_over();
        if let Some(outcome) = self.winner {
            info!("game over, {} wins", outcome.winner());
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.board.pieces()
    }

    pub fn turn(&self) -> Player {
        self.board.turn()
    }

    pub fn human(&self) -> Player {
        self.board.human()
    }

    pub fn is_game_over(&self) -> Option<Outcome> {
        self.winner
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        self.board.is_in_check(player)
    }

    pub fn legal_moves_for_selected(&mut self) -> Vec<(Position, bool)> {
        self.board.legal_moves_for_selected()
    }
}
