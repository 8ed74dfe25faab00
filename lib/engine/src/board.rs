/*
 * 详细中文注释 - 将棋棋盘模块（Board 与棋子表示）
 *
 * 设计要点
 * - 棋盘尺寸为 9 列 x 10 行，蓝方（楚）在上，红方（漢）在下
 * - 每个格子为 Option<Piece>，None 表示空格，一格最多一个棋子
 * - PieceKind 定义棋子类型（General/Guard/Horse/Elephant/Chariot/Cannon/Soldier）
 * - Player 表示走棋方（Red/Blue），红方向 rank 0 推进，蓝方向 rank 9 推进
 * - Position 为 (file, rank) 坐标，file 0..=8 对应 a..i，rank 0 为蓝方底线
 * - Move 记录一次落子：起点、终点、走子的棋子以及吃掉的棋子
 * - Board 是值类型（Copy），用于模拟走子时直接复制后丢弃
 *
 * 注意
 * - 本模块只提供结构性查询与修改，不做任何规则校验
 */

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::constant::{
    BLUE_PALACE_CENTER, BLUE_PALACE_CORNERS, BOARD_HEIGHT, BOARD_WIDTH, FEN_MAP, INITIAL_FEN, RED_PALACE_CENTER,
    RED_PALACE_CORNERS,
};
use crate::error::{FenError, NotationError};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn next(&self) -> Player {
        if self == &Player::Red {
            Player::Blue
        } else {
            Player::Red
        }
    }
    // 前进方向上 rank 的变化量
    pub fn forward(&self) -> i32 {
        if self == &Player::Red { -1 } else { 1 }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    General,  // 將
    Guard,    // 士
    Horse,    // 馬
    Elephant, // 象
    Chariot,  // 車
    Cannon,   // 包
    Soldier,  // 卒
}

impl PieceKind {
    pub fn value(&self) -> usize {
        match self {
            PieceKind::General => 0,
            PieceKind::Guard => 1,
            PieceKind::Horse => 2,
            PieceKind::Elephant => 3,
            PieceKind::Chariot => 4,
            PieceKind::Cannon => 5,
            PieceKind::Soldier => 6,
        }
    }

    pub fn name_value(&self) -> &'static str {
        match self {
            PieceKind::General => "將",
            PieceKind::Guard => "士",
            PieceKind::Horse => "馬",
            PieceKind::Elephant => "象",
            PieceKind::Chariot => "車",
            PieceKind::Cannon => "包",
            PieceKind::Soldier => "卒",
        }
    }

    fn fen_char(&self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Guard => 'a',
            PieceKind::Horse => 'n',
            PieceKind::Elephant => 'b',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Player) -> Self {
        Piece { kind, owner }
    }
    pub fn belong_to(&self, player: Player) -> bool {
        self.owner == player
    }
    pub fn fen_char(&self) -> char {
        let c = self.kind.fen_char();
        if self.owner == Player::Red {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Position {
    pub file: i32,
    pub rank: i32,
}

impl Position {
    pub const fn new(file: i32, rank: i32) -> Self {
        Position { file, rank }
    }
    pub fn left(&self, delta: i32) -> Self {
        Position::new(self.file - delta, self.rank)
    }
    pub fn right(&self, delta: i32) -> Self {
        Position::new(self.file + delta, self.rank)
    }
    pub fn offset(&self, df: i32, dr: i32) -> Self {
        Position::new(self.file + df, self.rank + dr)
    }
    // 上下翻转，用于红蓝对称
    pub fn flip(&self) -> Self {
        Position::new(self.file, BOARD_HEIGHT - 1 - self.rank)
    }
}

// 记法：a..i 加上从红方底线数起的 1..10，例如 a1 = (0, 9)，e9 = (4, 1)
impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || NotationError::BadSquare(s.to_string());
        let mut chars = s.chars();
        let file = match chars.next() {
            Some(c @ 'a'..='i') => c as i32 - 'a' as i32,
            _ => return Err(bad()),
        };
        let number: i32 = chars.as_str().parse().map_err(|_| bad())?;
        if !(1..=BOARD_HEIGHT).contains(&number) {
            return Err(bad());
        }
        Ok(Position::new(file, BOARD_HEIGHT - number))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !in_board(*self) {
            return write!(f, "({}, {})", self.file, self.rank);
        }
        let file = char::from(b'a' + self.file as u8);
        write!(f, "{}{}", file, BOARD_HEIGHT - self.rank)
    }
}

static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<from>[a-i](?:10|[1-9]))\s*-?\s*(?P<to>[a-i](?:10|[1-9]))\s*$")
        .expect("move pattern is a valid constant regex")
});

/// 解析 `a4a5`、`a4-a5`、`a4 a5` 形式的走法
pub fn parse_move(s: &str) -> Result<(Position, Position), NotationError> {
    let caps = MOVE_RE
        .captures(s)
        .ok_or_else(|| NotationError::BadMove(s.to_string()))?;
    Ok((caps["from"].parse()?, caps["to"].parse()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub player: Player,          // 玩家
    pub from: Position,          // 起手位置
    pub to: Position,            // 落子位置
    pub piece: Piece,            // 走的子
    pub capture: Option<Piece>, // 这一步吃的子
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

// 棋子是否在棋盘内
pub fn in_board(pos: Position) -> bool {
    pos.rank >= 0 && pos.rank < BOARD_HEIGHT && pos.file >= 0 && pos.file < BOARD_WIDTH
}

// 是否在该方的九宫内
pub fn in_palace(pos: Position, player: Player) -> bool {
    if player == Player::Blue {
        pos.rank >= 0 && pos.rank < 3 && pos.file >= 3 && pos.file < 6
    } else {
        pos.rank >= 7 && pos.rank < BOARD_HEIGHT && pos.file >= 3 && pos.file < 6
    }
}

// 所在九宫属于哪一方
pub fn palace_owner(pos: Position) -> Option<Player> {
    [Player::Red, Player::Blue]
        .into_iter()
        .find(|p| in_palace(pos, *p))
}

pub fn palace_center(player: Player) -> Position {
    match player {
        Player::Red => RED_PALACE_CENTER,
        Player::Blue => BLUE_PALACE_CENTER,
    }
}

pub fn palace_corners(player: Player) -> [Position; 4] {
    match player {
        Player::Red => RED_PALACE_CORNERS,
        Player::Blue => BLUE_PALACE_CORNERS,
    }
}

/// 九宫斜线上的相邻点：角 -> 中心，中心 -> 四角，其余格子没有斜线
pub fn palace_diagonal_neighbors(pos: Position) -> Vec<Position> {
    let Some(owner) = palace_owner(pos) else {
        return vec![];
    };
    let center = palace_center(owner);
    let corners = palace_corners(owner);
    if pos == center {
        corners.to_vec()
    } else if corners.contains(&pos) {
        vec![center]
    } else {
        vec![]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    // 9×10的棋盘，蓝方在上，红方在下
    pub cells: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    // 初始化标准开局局面
    pub fn init() -> Self {
        match Board::from_fen(INITIAL_FEN) {
            Ok((board, _)) => board,
            Err(_) => unreachable!("INITIAL_FEN is well formed"),
        }
    }

    /// 从局面串加载，返回棋盘与轮到的一方（缺省为红方）
    pub fn from_fen(fen: &str) -> Result<(Self, Player), FenError> {
        let mut board = Board::empty();
        let mut parts = fen.split_whitespace();
        let layout = parts.next().unwrap_or("");
        let rows: Vec<&str> = layout.split('/').collect();
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(FenError::RowCount(rows.len()));
        }
        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0;
            for c in row.chars() {
                if let Some(n) = c.to_digit(10) {
                    file += n as i32;
                    continue;
                }
                let piece = *FEN_MAP.get(&c).ok_or(FenError::UnknownPiece(c))?;
                let pos = Position::new(file, rank as i32);
                if in_board(pos) {
                    board.place_piece(pos, piece);
                }
                file += 1;
            }
            if file != BOARD_WIDTH {
                return Err(FenError::RowWidth { rank, width: file });
            }
        }
        let turn = match parts.next() {
            None | Some("r") | Some("w") => Player::Red,
            Some("b") => Player::Blue,
            Some(other) => return Err(FenError::UnknownSide(other.to_string())),
        };
        Ok((board, turn))
    }

    pub fn to_fen(&self) -> String {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                let mut s = String::new();
                let mut empty = 0;
                for cell in row {
                    match cell {
                        Some(piece) => {
                            if empty > 0 {
                                s.push_str(&empty.to_string());
                                empty = 0;
                            }
                            s.push(piece.fen_char());
                        }
                        None => empty += 1,
                    }
                }
                if empty > 0 {
                    s.push_str(&empty.to_string());
                }
                s
            })
            .collect();
        rows.join("/")
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if in_board(pos) {
            self.cells[pos.rank as usize][pos.file as usize]
        } else {
            None
        }
    }
    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }
    pub fn is_on_board(&self, pos: Position) -> bool {
        in_board(pos)
    }
    pub fn is_in_palace(&self, pos: Position, side: Player) -> bool {
        in_palace(pos, side)
    }

    // 棋盘外的坐标一律忽略
    pub fn place_piece(&mut self, pos: Position, piece: Piece) {
        if in_board(pos) {
            self.cells[pos.rank as usize][pos.file as usize] = Some(piece);
        }
    }
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        if !in_board(pos) {
            return None;
        }
        self.cells[pos.rank as usize][pos.file as usize].take()
    }
    /// 把 from 的棋子移到 to，覆盖并返回 to 上原有的棋子；任一坐标在棋盘外时不做任何事
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        if !in_board(from) || !in_board(to) {
            return None;
        }
        let piece = self.remove_piece(from);
        let captured = self.cells[to.rank as usize][to.file as usize].take();
        self.cells[to.rank as usize][to.file as usize] = piece;
        captured
    }

    // 按 rank、file 顺序遍历某一方的全部棋子
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(rank, row)| {
            row.iter().enumerate().filter_map(move |(file, cell)| match cell {
                Some(piece) if piece.belong_to(player) => Some((Position::new(file as i32, rank as i32), *piece)),
                _ => None,
            })
        })
    }

    pub fn general_position(&self, player: Player) -> Option<Position> {
        self.pieces(player)
            .find(|(_, piece)| piece.kind == PieceKind::General)
            .map(|(pos, _)| pos)
    }

    /// 上下翻转并交换红蓝，得到镜像局面
    pub fn mirror(&self) -> Self {
        let mut board = Board::empty();
        for player in [Player::Red, Player::Blue] {
            for (pos, piece) in self.pieces(player) {
                board.place_piece(pos.flip(), Piece::new(piece.kind, player.next()));
            }
        }
        board
    }
}
