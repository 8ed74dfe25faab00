/*
 * 详细中文注释 - 对局状态机
 *
 * 说明
 * - Game 持有唯一的棋盘、当前走棋方与对局状态（进行中/红胜/蓝胜）
 * - 走子流程：校验（走棋方、伪合法落点、走后不被将军）-> 落子 -> 判断对方是否被将死
 * - 起点与终点相同视为停着：未被将军时允许，轮到对方，同样判断对方是否被将死
 * - 被拒绝的走子不改变任何状态；对局结束后不再接受走子
 */

use tracing::{debug, info};

use crate::board::{parse_move, Board, Move, Piece, Player, Position};
use crate::error::{FenError, MoveError, PlayError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    RedWon,
    BlueWon,
}

impl GameStatus {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Red => GameStatus::RedWon,
            Player::Blue => GameStatus::BlueWon,
        }
    }
    pub fn is_over(&self) -> bool {
        self != &GameStatus::InProgress
    }
}

/// 一步成功走子的结果
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub mv: Move,
    // 对方走后是否被将军
    pub check: bool,
    pub status: GameStatus,
}

impl MoveOutcome {
    pub fn captured(&self) -> Option<Piece> {
        self.mv.capture
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    turn: Player,
    status: GameStatus,
    in_check: bool,
    counter: u32,
    move_history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    // 标准开局，红方先走
    pub fn new() -> Self {
        Game::with_board(Board::init(), Player::Red)
    }

    pub fn with_board(board: Board, turn: Player) -> Self {
        let in_check = board.is_in_check(turn);
        let status = if in_check && board.is_checkmate(turn) {
            GameStatus::won_by(turn.next())
        } else {
            GameStatus::InProgress
        };
        Game {
            board,
            turn,
            status,
            in_check,
            counter: 0,
            move_history: vec![],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, turn) = Board::from_fen(fen)?;
        Ok(Game::with_board(board, turn))
    }

    pub fn to_fen(&self) -> String {
        let side = if self.turn == Player::Red { "r" } else { "b" };
        format!("{} {}", self.board.to_fen(), side)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn turn(&self) -> Player {
        self.turn
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    // 当前走棋方是否正被将军
    pub fn in_check(&self) -> bool {
        self.in_check
    }
    pub fn counter(&self) -> u32 {
        self.counter
    }
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        self.board.is_in_check(player)
    }
    pub fn is_checkmate(&self, player: Player) -> bool {
        self.board.is_checkmate(player)
    }

    // 当前走棋方的全部合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.turn)
    }

    /// 按顺序校验：起点有当前走棋方的棋子、终点在伪合法落点内、走后己方不被将军。
    /// from == to 为停着，只要求当前走棋方未被将军
    pub fn validate_move(&self, from: Position, to: Position) -> Result<Move, MoveError> {
        for pos in [from, to] {
            if !self.board.is_on_board(pos) {
                return Err(MoveError::OffBoard(pos));
            }
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if !piece.belong_to(self.turn) {
            return Err(MoveError::OutOfTurn { turn: self.turn, from });
        }
        if from == to {
            if self.board.is_in_check(self.turn) {
                return Err(MoveError::PassInCheck(from));
            }
            return Ok(Move {
                player: self.turn,
                from,
                to,
                piece,
                capture: None,
            });
        }
        if !self.board.legal_targets(from)?.contains(&to) {
            return Err(MoveError::IllegalTarget { from, to });
        }
        if self.board.leaves_in_check(from, to, self.turn) {
            return Err(MoveError::SelfCheck { from, to });
        }
        Ok(Move {
            player: self.turn,
            from,
            to,
            piece,
            capture: self.board.piece_at(to),
        })
    }

    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        self.validate_move(from, to).is_ok()
    }

    /// 执行走子；失败时局面不变，同一方可重新走
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        if self.status.is_over() {
            debug!("对局已结束（{:?}），拒绝 {} -> {}", self.status, from, to);
            return Err(MoveError::GameOver);
        }
        let mv = self.validate_move(from, to).inspect_err(|e| {
            debug!("拒绝走子 {} -> {}: {}", from, to, e);
        })?;

        if from != to {
            self.board.move_piece(from, to);
        }
        self.counter += 1;
        self.move_history.push(mv);
        debug!("第{}步 {:?} {:?}: {}", self.counter, mv.player, mv.piece.kind, mv);

        let opponent = self.turn.next();
        let check = self.board.is_in_check(opponent);
        if check && self.board.is_checkmate(opponent) {
            self.status = GameStatus::won_by(self.turn);
            self.in_check = true;
            info!("{:?} 被将死，{:?}", opponent, self.status);
        } else {
            if check {
                info!("{:?} 被将军", opponent);
            }
            self.turn = opponent;
            self.in_check = check;
        }

        Ok(MoveOutcome {
            mv,
            check,
            status: self.status,
        })
    }

    /// 解析 `a4-a5` 之类的走法并执行
    pub fn play(&mut self, notation: &str) -> Result<MoveOutcome, PlayError> {
        let (from, to) = parse_move(notation)?;
        Ok(self.make_move(from, to)?)
    }
}
