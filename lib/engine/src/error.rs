// 走子、坐标记法与局面串的错误类型
use crate::board::{Player, Position};
use thiserror::Error;

/// 走子被拒绝的原因，局面保持不变，同一方可以重试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("对局已结束，不再接受走子")]
    GameOver,

    #[error("坐标 {0} 不在棋盘内")]
    OffBoard(Position),

    #[error("{0} 处没有棋子")]
    EmptySquare(Position),

    #[error("当前轮到 {turn:?}，{from} 处的棋子不属于该方")]
    OutOfTurn { turn: Player, from: Position },

    #[error("{from} 处的棋子不能走到 {to}")]
    IllegalTarget { from: Position, to: Position },

    #[error("{from} -> {to} 会使己方将帅被将军")]
    SelfCheck { from: Position, to: Position },

    #[error("被将军时不能停着（{0}）")]
    PassInCheck(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("无法识别的坐标 `{0}`")]
    BadSquare(String),

    #[error("无法识别的走法 `{0}`")]
    BadMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("局面串需要 10 行，实际为 {0} 行")]
    RowCount(usize),

    #[error("第 {rank} 行宽度为 {width}，应为 9")]
    RowWidth { rank: usize, width: i32 },

    #[error("无法识别的棋子字符 `{0}`")]
    UnknownPiece(char),

    #[error("无法识别的走棋方 `{0}`")]
    UnknownSide(String),
}

/// `Game::play` 既可能因记法出错，也可能因走子非法而失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Move(#[from] MoveError),
}
