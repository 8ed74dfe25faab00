/**
 * 详细中文注释 - 引擎核心库入口
 *
 * 说明
 * - board: 棋盘、坐标、棋子与局面串
 * - constant: 棋盘尺寸、九宫、开局局面等常量
 * - rules: 各棋子的走法表与伪合法走法生成
 * - check: 将军与将死判定
 * - game: 对局状态机与走子校验
 * - error: 错误类型
 */
pub mod board;
pub mod check;
pub mod constant;
pub mod error;
pub mod game;
pub mod rules;

pub use board::{Board, Move, Piece, PieceKind, Player, Position};
pub use error::{FenError, MoveError, NotationError, PlayError};
pub use game::{Game, GameStatus, MoveOutcome};
