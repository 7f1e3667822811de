/*
 * 棋盘状态模块
 *
 * 设计要点
 * - 棋盘 9 列 x 10 行，黑方在上（0..=4 行），红方在下（5..=9 行）
 * - 棋子保存在 pieces 中，下标即 PieceId；被吃掉的棋子对应位置为 None
 * - grid 是按坐标索引的占位表，由 pieces 派生，每次走子/撤销时同步更新
 * - Move 记录一次走子的完整信息（起点、终点、被吃的子），可以原样撤销
 */

use std::fmt;

use tracing::debug;

use crate::constant::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    pub fn next(&self) -> Player {
        if self == &Player::Red {
            Player::Black
        } else {
            Player::Red
        }
    }
    /// +1 for red, -1 for black; scores are always from red's point of view.
    pub fn sign(&self) -> f64 {
        if self == &Player::Red { 1.0 } else { -1.0 }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Black => "Black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    General,  // 帅
    Advisor,  // 仕
    Elephant, // 相
    Horse,    // 马
    Chariot,  // 车
    Cannon,   // 炮
    Soldier,  // 兵
}

impl PieceKind {
    pub fn material_value(&self) -> f64 {
        match self {
            PieceKind::General => 1000.0,
            PieceKind::Advisor => 20.0,
            PieceKind::Elephant => 20.0,
            PieceKind::Horse => 40.0,
            PieceKind::Chariot => 90.0,
            PieceKind::Cannon => 45.0,
            PieceKind::Soldier => 10.0,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            PieceKind::General => 'G',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'S',
        }
    }

    pub fn name(&self, player: Player) -> &'static str {
        match (player, self) {
            (Player::Red, PieceKind::General) => "帅",
            (Player::Red, PieceKind::Advisor) => "仕",
            (Player::Red, PieceKind::Elephant) => "相",
            (Player::Black, PieceKind::General) => "将",
            (Player::Black, PieceKind::Advisor) => "士",
            (Player::Black, PieceKind::Elephant) => "象",
            (Player::Red, PieceKind::Soldier) => "兵",
            (Player::Black, PieceKind::Soldier) => "卒",
            (_, PieceKind::Horse) => "马",
            (_, PieceKind::Chariot) => "车",
            (_, PieceKind::Cannon) => "炮",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position {
            x: value.0,
            y: value.1,
        }
    }
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }
    pub fn mirror(&self) -> Self {
        Position::new(BOARD_WIDTH - 1 - self.x, BOARD_HEIGHT - 1 - self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// 棋子是否在棋盘内
pub fn in_board(pos: Position) -> bool {
    pos.x >= 0 && pos.x < BOARD_WIDTH && pos.y >= 0 && pos.y < BOARD_HEIGHT
}

// 是否在该方的九宫格内
pub fn in_palace(pos: Position, player: Player) -> bool {
    let (min_y, max_y) = match player {
        Player::Red => RED_PALACE_ROWS,
        Player::Black => BLACK_PALACE_ROWS,
    };
    (PALACE_COLS.0..=PALACE_COLS.1).contains(&pos.x) && (min_y..=max_y).contains(&pos.y)
}

// 该行是否在该方的楚河汉界以内（未过河）
pub fn in_country(y: i32, player: Player) -> bool {
    match player {
        Player::Red => (RIVER_RED_FIRST_ROW..BOARD_HEIGHT).contains(&y),
        Player::Black => (0..=RIVER_BLACK_LAST_ROW).contains(&y),
    }
}

/// Index of a piece in the board's piece arena. Stable for the whole game.
pub type PieceId = usize;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub player: Player,
    pub position: Position,
    /// Only a rendering hint, carries no rule meaning.
    pub selected: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, player: Player, position: Position) -> Self {
        Piece {
            kind,
            player,
            position,
            selected: false,
        }
    }
}

/// A make/unmake record. Reversing it with [`Board::unmake_move`] restores the
/// board exactly, captured piece included.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Move {
    pub player: Player, // 走子前轮到的一方
    pub piece: PieceId,
    pub from: Position,
    pub to: Position,
    pub capture: Option<(PieceId, Piece)>, // 这一步吃的子
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    RedWins,
    BlackWins,
}

impl Outcome {
    pub fn winner(&self) -> Player {
        match self {
            Outcome::RedWins => Player::Red,
            Outcome::BlackWins => Player::Black,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
    grid: [[Option<PieceId>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    turn: Player,
    human: Player,
    selected: Option<PieceId>,
    history: Vec<Move>,
}

impl Board {
    pub fn empty(human: Player) -> Self {
        Board {
            pieces: vec![],
            grid: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            turn: Player::Red,
            human,
            selected: None,
            history: vec![],
        }
    }

    // 标准开局局面，红方先走
    pub fn init(human: Player) -> Self {
        let mut board = Board::empty(human);
        let layout = HALF_LAYOUT.iter().flat_map(|&(kind, (x, y))| {
            let pos = Position::new(x, y);
            [(kind, Player::Red, pos.mirror()), (kind, Player::Black, pos)]
        });
        for (kind, player, pos) in layout {
            board.place(kind, player, pos);
        }
        board
    }

    /// Rebuilds the opening position, keeping the human side.
    pub fn reset(&mut self) {
        *self = Board::init(self.human);
        debug!("board reset, human plays {}", self.human);
    }

    /// Puts a new piece on an empty square. Returns `None` when the square is
    /// off the board or taken.
    pub fn place(&mut self, kind: PieceKind, player: Player, pos: Position) -> Option<PieceId> {
        if !in_board(pos) || self.has_piece(pos) {
            return None;
        }
        let id = self.pieces.len();
        self.pieces.push(Some(Piece::new(kind, player, pos)));
        self.grid[pos.y as usize][pos.x as usize] = Some(id);
        Some(id)
    }

    pub fn set_turn(&mut self, turn: Player) {
        self.turn = turn;
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id).and_then(Option::as_ref)
    }

    pub fn piece_id_at(&self, pos: Position) -> Option<PieceId> {
        if in_board(pos) {
            self.grid[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.piece_id_at(pos).and_then(|id| self.piece(id))
    }

    pub fn has_piece(&self, pos: Position) -> bool {
        self.piece_id_at(pos).is_some()
    }

    /// Live pieces only; captured pieces never show up here.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(id, piece)| piece.as_ref().map(|p| (id, p)))
    }

    pub fn piece_ids(&self, player: Player) -> Vec<PieceId> {
        self.pieces()
            .filter(|(_, p)| p.player == player)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn general_position(&self, player: Player) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::General && p.player == player)
            .map(|(_, p)| p.position)
    }

    /// Moves a piece without any legality check and flips the turn. Whatever
    /// stands on `to` is taken off the board.
    pub fn make_move(&mut self, id: PieceId, to: Position) -> Option<Move> {
        if !in_board(to) {
            return None;
        }
        let from = self.piece(id)?.position;
        if from == to {
            return None;
        }
        let capture = self
            .piece_id_at(to)
            .and_then(|cid| self.pieces[cid].take().map(|p| (cid, p)));

        self.grid[from.y as usize][from.x as usize] = None;
        self.grid[to.y as usize][to.x as usize] = Some(id);
        if let Some(piece) = self.pieces[id].as_mut() {
            piece.position = to;
        }

        let m = Move {
            player: self.turn,
            piece: id,
            from,
            to,
            capture,
        };
        self.turn = self.turn.next();
        Some(m)
    }

    // 撤销 make_move，恢复被吃的子和走棋方
    pub fn unmake_move(&mut self, m: &Move) {
        if let Some(piece) = self.pieces.get_mut(m.piece).and_then(Option::as_mut) {
            piece.position = m.from;
        }
        self.grid[m.from.y as usize][m.from.x as usize] = Some(m.piece);
        self.grid[m.to.y as usize][m.to.x as usize] = m.capture.map(|(cid, _)| cid);
        if let Some((cid, captured)) = m.capture {
            self.pieces[cid] = Some(captured);
        }
        self.turn = m.player;
    }

    /// Plays a move for real: records it in the history and drops the selection.
    /// The caller is responsible for having validated it.
    pub fn apply_move(&mut self, id: PieceId, to: Position) -> Option<Move> {
        self.clear_selection();
        let m = self.make_move(id, to)?;
        debug!(
            "{} moves {} {}{}",
            m.player,
            self.piece(id).map(|p| p.kind.name(p.player)).unwrap_or("?"),
            m,
            if m.capture.is_some() { " (capture)" } else { "" }
        );
        self.history.push(m);
        Some(m)
    }

    /// Takes back the last applied move.
    pub fn undo(&mut self) -> Option<Move> {
        self.clear_selection();
        let m = self.history.pop()?;
        self.unmake_move(&m);
        debug!("{} takes back {}", m.player, m);
        Some(m)
    }

    // 无子可走时直接交换走棋方
    pub fn pass(&mut self) {
        debug!("{} has no legal move and passes", self.turn);
        self.turn = self.turn.next();
    }

    pub fn is_game_over(&self) -> Option<Outcome> {
        if self.general_position(Player::Red).is_none() {
            return Some(Outcome::BlackWins);
        }
        if self.general_position(Player::Black).is_none() {
            return Some(Outcome::RedWins);
        }
        None
    }

    fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            if let Some(piece) = self.pieces[id].as_mut() {
                piece.selected = false;
            }
        }
    }

    fn select(&mut self, id: PieceId) {
        self.clear_selection();
        if let Some(piece) = self.pieces[id].as_mut() {
            piece.selected = true;
            self.selected = Some(id);
            debug!("selected {} at {}", piece.kind.name(piece.player), piece.position);
        }
    }

    /// Handles a click on `(x, y)`. Returns whether a move was made.
    ///
    /// - clicking a piece of the side to move selects it (or switches to it)
    /// - clicking a legal destination of the selected piece plays the move
    /// - anything else drops the selection
    ///
    /// Clicks outside the board are ignored.
    pub fn select_cell(&mut self, x: i32, y: i32) -> bool {
        let pos = Position::new(x, y);
        if !in_board(pos) {
            return false;
        }
        let own = self
            .piece_id_at(pos)
            .filter(|&id| self.piece(id).is_some_and(|p| p.player == self.turn));
        let current = self.selected;
        self.clear_selection();

        if let Some(id) = own {
            self.select(id);
            return false;
        }
        let Some(current) = current else {
            return false;
        };
        if !self.piece(current).is_some_and(|p| p.player == self.turn) {
            return false;
        }
        if self.legal_moves(current, true).contains(&pos) {
            return self.apply_move(current, pos).is_some();
        }
        false
    }

    /// Destinations of the selected piece, each flagged with whether it captures.
    pub fn legal_moves_for_selected(&mut self) -> Vec<(Position, bool)> {
        let Some(id) = self.selected else {
            return vec![];
        };
        self.legal_moves(id, true)
            .into_iter()
            .map(|pos| (pos, self.has_piece(pos)))
            .collect()
    }
}
