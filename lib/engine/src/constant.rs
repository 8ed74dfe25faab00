use crate::board::{Piece, PieceKind, Player, Position};
use std::{collections::HashMap, sync::LazyLock};

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

// 标准开局：蓝方（楚）在上，红方（漢）在下，红方先走
pub const INITIAL_FEN: &str = "rbna1abnr/4k4/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/4K4/RBNA1ABNR r";

// 九宫中心
pub const BLUE_PALACE_CENTER: Position = Position { file: 4, rank: 1 };
pub const RED_PALACE_CENTER: Position = Position { file: 4, rank: 8 };

// 九宫四角，斜线只连接四角与中心
pub const BLUE_PALACE_CORNERS: [Position; 4] = [
    Position { file: 3, rank: 0 },
    Position { file: 5, rank: 0 },
    Position { file: 3, rank: 2 },
    Position { file: 5, rank: 2 },
];
pub const RED_PALACE_CORNERS: [Position; 4] = [
    Position { file: 3, rank: 7 },
    Position { file: 5, rank: 7 },
    Position { file: 3, rank: 9 },
    Position { file: 5, rank: 9 },
];

pub static FEN_MAP: LazyLock<HashMap<char, Piece>> = LazyLock::new(|| {
    HashMap::from([
        ('k', Piece::new(PieceKind::General, Player::Blue)),
        ('a', Piece::new(PieceKind::Guard, Player::Blue)),
        ('b', Piece::new(PieceKind::Elephant, Player::Blue)),
        ('n', Piece::new(PieceKind::Horse, Player::Blue)),
        ('r', Piece::new(PieceKind::Chariot, Player::Blue)),
        ('c', Piece::new(PieceKind::Cannon, Player::Blue)),
        ('p', Piece::new(PieceKind::Soldier, Player::Blue)),
        ('K', Piece::new(PieceKind::General, Player::Red)),
        ('A', Piece::new(PieceKind::Guard, Player::Red)),
        ('B', Piece::new(PieceKind::Elephant, Player::Red)),
        ('N', Piece::new(PieceKind::Horse, Player::Red)),
        ('R', Piece::new(PieceKind::Chariot, Player::Red)),
        ('C', Piece::new(PieceKind::Cannon, Player::Red)),
        ('P', Piece::new(PieceKind::Soldier, Player::Red)),
    ])
});
