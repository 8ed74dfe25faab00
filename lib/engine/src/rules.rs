/*
 * 详细中文注释 - 棋子走法表与伪合法走法生成
 *
 * 说明
 * - 每种棋子对应一个规则函数，按 PieceKind::value() 下标放在 RULES 表中
 * - 规则函数只按棋子走法与阻挡关系给出候选落点，落点上可能有己方棋子
 * - legal_targets 负责去掉己方棋子占据的落点，不检查走后是否被将军
 * - 九宫斜线：四角与中心相连，車、包、將、士、卒都只能沿这些斜线斜走
 */

use crate::board::{in_board, in_palace, palace_diagonal_neighbors, palace_owner, Board, Piece, PieceKind, Position};
use crate::error::MoveError;

/// 规则函数：给定棋盘、棋子位置与棋子，返回候选落点
pub type MoveRule = fn(&Board, Position, Piece) -> Vec<Position>;

const RULES: [MoveRule; 7] = [
    palace_step_targets, // General
    palace_step_targets, // Guard
    horse_targets,
    elephant_targets,
    chariot_targets,
    cannon_targets,
    soldier_targets,
];

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl PieceKind {
    pub fn rule(&self) -> MoveRule {
        RULES[self.value()]
    }
}

// 將/士：九宫内直走一步，或沿九宫斜线斜走一步
fn palace_step_targets(board: &Board, pos: Position, piece: Piece) -> Vec<Position> {
    let mut targets: Vec<Position> = ORTHOGONAL
        .iter()
        .map(|&(df, dr)| pos.offset(df, dr))
        .filter(|target| in_palace(*target, piece.owner))
        .collect();
    if board.is_in_palace(pos, piece.owner) {
        targets.extend(palace_diagonal_neighbors(pos));
    }
    targets
}

// 馬：先直走一格，再向外斜走一格，直走的那一格有子则被蹩
fn horse_targets(board: &Board, pos: Position, _piece: Piece) -> Vec<Position> {
    let mut targets = vec![];
    for (df, dr) in ORTHOGONAL {
        let leg = pos.offset(df, dr);
        if !in_board(leg) || !board.is_empty(leg) {
            continue;
        }
        // 与前进方向垂直的两个方向
        for side in [-1, 1] {
            targets.push(leg.offset(df + dr * side, dr + df * side));
        }
    }
    targets.into_iter().filter(|t| in_board(*t)).collect()
}

// 象：先直走一格，再沿同一方向斜走两格，途经的两格都必须为空
fn elephant_targets(board: &Board, pos: Position, _piece: Piece) -> Vec<Position> {
    let mut targets = vec![];
    for (df, dr) in ORTHOGONAL {
        let leg = pos.offset(df, dr);
        if !in_board(leg) || !board.is_empty(leg) {
            continue;
        }
        for side in [-1, 1] {
            let (sf, sr) = (df + dr * side, dr + df * side);
            let eye = leg.offset(sf, sr);
            if !in_board(eye) || !board.is_empty(eye) {
                continue;
            }
            let target = eye.offset(sf, sr);
            if in_board(target) {
                targets.push(target);
            }
        }
    }
    targets
}

// 沿九宫斜线从 pos 经过 first 一直走下去的格子序列
fn palace_diagonal_ray(pos: Position, first: Position) -> Vec<Position> {
    let (df, dr) = (first.file - pos.file, first.rank - pos.rank);
    let mut ray = vec![first];
    let mut current = first;
    loop {
        let next = current.offset(df, dr);
        if !palace_diagonal_neighbors(current).contains(&next) {
            break;
        }
        ray.push(next);
        current = next;
    }
    ray
}

// 所有可走的射线：四个直线方向，以及身处九宫斜线时的斜向
fn rays(pos: Position) -> Vec<Vec<Position>> {
    let mut rays: Vec<Vec<Position>> = ORTHOGONAL
        .iter()
        .map(|&(df, dr)| {
            (1..)
                .map(|delta| pos.offset(df * delta, dr * delta))
                .take_while(|p| in_board(*p))
                .collect()
        })
        .collect();
    rays.extend(
        palace_diagonal_neighbors(pos)
            .into_iter()
            .map(|first| palace_diagonal_ray(pos, first)),
    );
    rays
}

// 車：直线滑行到第一个有子的格子为止（含该格，可能吃子）
fn chariot_targets(board: &Board, pos: Position, _piece: Piece) -> Vec<Position> {
    let mut targets = vec![];
    for ray in rays(pos) {
        for target in ray {
            targets.push(target);
            if !board.is_empty(target) {
                break;
            }
        }
    }
    targets
}

fn is_cannon(board: &Board, pos: Position) -> bool {
    matches!(board.piece_at(pos), Some(p) if p.kind == PieceKind::Cannon)
}

// 包：必须隔着恰好一个非包的棋子（炮架）才能走或吃，不能吃包
fn cannon_targets(board: &Board, pos: Position, _piece: Piece) -> Vec<Position> {
    let mut targets = vec![];
    for ray in rays(pos) {
        let mut cells = ray.into_iter();
        // 找炮架
        let Some(screen) = cells.by_ref().find(|p| !board.is_empty(*p)) else {
            continue;
        };
        if is_cannon(board, screen) {
            continue;
        }
        for target in cells {
            if board.is_empty(target) {
                targets.push(target);
                continue;
            }
            if !is_cannon(board, target) {
                targets.push(target);
            }
            break;
        }
    }
    targets
}

// 卒：向前、向左、向右各一步，不能后退；在对方九宫内可沿斜线向前斜走
fn soldier_targets(_board: &Board, pos: Position, piece: Piece) -> Vec<Position> {
    let forward = piece.owner.forward();
    let mut targets: Vec<Position> = [pos.offset(0, forward), pos.left(1), pos.right(1)]
        .into_iter()
        .filter(|t| in_board(*t))
        .collect();
    if palace_owner(pos) == Some(piece.owner.next()) {
        targets.extend(
            palace_diagonal_neighbors(pos)
                .into_iter()
                .filter(|t| t.rank - pos.rank == forward),
        );
    }
    targets
}

impl Board {
    // 棋子按走法可到达的落点，已去掉己方棋子所在的格子
    pub(crate) fn targets_of(&self, pos: Position, piece: Piece) -> Vec<Position> {
        let mut targets: Vec<Position> = piece
            .kind
            .rule()(self, pos, piece)
            .into_iter()
            .filter(|t| !matches!(self.piece_at(*t), Some(p) if p.belong_to(piece.owner)))
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// 伪合法落点：满足走法与阻挡规则，不考虑走后己方是否被将军
    pub fn legal_targets(&self, pos: Position) -> Result<Vec<Position>, MoveError> {
        if !in_board(pos) {
            return Err(MoveError::OffBoard(pos));
        }
        let piece = self.piece_at(pos).ok_or(MoveError::EmptySquare(pos))?;
        Ok(self.targets_of(pos, piece))
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap().0
    }

    fn targets(board: &Board, square: &str) -> Vec<String> {
        let mut list: Vec<String> = board
            .legal_targets(square.parse().unwrap())
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect();
        list.sort();
        list
    }

    #[test]
    fn test_empty_square_is_an_error() {
        let board = Board::init();
        assert!(board.legal_targets(Position::new(4, 4)).is_err());
        assert!(board.legal_targets(Position::new(-1, 4)).is_err());
    }

    #[test]
    fn test_initial_position_targets() {
        let board = Board::init();
        // 車被己方卒和象挡住，只能上走两格
        assert_eq!(targets(&board, "a1"), vec!["a2", "a3"]);
        // 將在九宫中心，可以向四个方向和四角走，但四角中 d1、f1 有士
        assert_eq!(targets(&board, "e2"), vec!["d2", "d3", "e1", "e3", "f2", "f3"]);
        // 馬 c1：只有向上的马腿 c2 为空，b3 是己方包
        assert_eq!(targets(&board, "c1"), vec!["d3"]);
        // 象 b1：向上 b2 空，再斜走 c3、d4
        assert_eq!(targets(&board, "b1"), vec!["d4"]);
        // 包 b3：上方第一个子是对方的包，下方的象后面已出棋盘
        assert!(targets(&board, "b3").is_empty());
    }

    #[test]
    fn test_generated_targets_never_hold_own_piece() {
        let board = Board::init();
        for player in [Player::Red, Player::Blue] {
            for (pos, _) in board.pieces(player) {
                for target in board.legal_targets(pos).unwrap() {
                    assert!(!matches!(board.piece_at(target), Some(p) if p.belong_to(player)));
                }
            }
        }
    }

    #[test]
    fn test_horse_is_blocked_by_leg() {
        let free = board("4k4/9/9/9/9/4N4/9/9/4K4/9");
        assert_eq!(targets(&free, "e5").len(), 8);
        let blocked = board("4k4/9/9/9/4p4/4N4/9/9/4K4/9");
        // e6 被占，向上的两个落点消失
        assert_eq!(
            targets(&blocked, "e5"),
            vec!["c4", "c6", "d3", "f3", "g4", "g6"]
        );
    }

    #[test]
    fn test_elephant_blocked_by_either_cell() {
        let free = board("4k4/9/9/9/9/4B4/9/9/4K4/9");
        assert_eq!(
            targets(&free, "e5"),
            vec!["b3", "b7", "c2", "c8", "g2", "g8", "h3", "h7"]
        );
        // 斜线上的第一格 f7 被占，只挡住 g8
        let eye_blocked = board("4k4/9/9/5p3/9/4B4/9/9/4K4/9");
        let list = targets(&eye_blocked, "e5");
        assert!(!list.contains(&"g8".to_string()));
        assert!(list.contains(&"c8".to_string()));
        assert!(list.contains(&"h7".to_string()));
    }

    #[test]
    fn test_chariot_slides_and_captures() {
        let b = board("4k4/9/9/9/p8/9/9/9/4K4/R8");
        let list = targets(&b, "a1");
        assert!(list.contains(&"a6".to_string()));
        assert!(!list.contains(&"a7".to_string()));
        assert!(list.contains(&"i1".to_string()));
        assert_eq!(list.len(), 5 + 8);
    }

    #[test]
    fn test_chariot_palace_diagonal() {
        // 車在蓝方九宫角 d10，可斜走到 e9，e9 空时继续到 f8
        let b = board("3R5/9/9/9/9/9/9/9/4K4/4k4");
        let list = targets(&b, "d10");
        assert!(list.contains(&"e9".to_string()));
        assert!(list.contains(&"f8".to_string()));
        // 中心有子时停在中心（吃子）
        let b = board("3R5/4p4/9/9/9/9/9/9/4K4/9");
        let list = targets(&b, "d10");
        assert!(list.contains(&"e9".to_string()));
        assert!(!list.contains(&"f8".to_string()));
        // 九宫外没有斜走
        let b = board("9/9/9/9/4R4/9/9/9/4K4/4k4");
        assert_eq!(targets(&b, "e6").len(), 4 + 3 + 8);
    }

    #[test]
    fn test_cannon_needs_a_screen() {
        let lonely = board("4k4/9/9/9/9/C8/9/9/4K4/9");
        assert!(targets(&lonely, "a5").is_empty());

        let screened = board("4k4/9/9/p8/9/C8/9/9/4K4/9");
        // 隔着 a7 的卒，可以走到 a8、a9、a10
        assert_eq!(targets(&screened, "a5"), vec!["a10", "a8", "a9"]);
    }

    #[test]
    fn test_cannon_cannot_jump_or_capture_cannon() {
        let over_cannon = board("4k4/9/9/c8/9/C8/9/9/4K4/9");
        assert!(targets(&over_cannon, "a5").is_empty());

        let onto_cannon = board("c3k4/9/9/p8/9/C8/9/9/4K4/9");
        assert_eq!(targets(&onto_cannon, "a5"), vec!["a8", "a9"]);

        let capture = board("r3k4/9/9/p8/9/C8/9/9/4K4/9");
        assert_eq!(targets(&capture, "a5"), vec!["a10", "a8", "a9"]);
    }

    #[test]
    fn test_cannon_palace_diagonal_jump() {
        // 包在 d1，中心 e2 为己方士，可跳到 f3
        let b = board("4k4/9/9/9/9/9/9/9/4A4/3CK4");
        let list = targets(&b, "d1");
        assert!(list.contains(&"f3".to_string()));
        // 中心为包时不能跳
        let b = board("4k4/9/9/9/9/9/9/9/4c4/3C1K3");
        assert!(!targets(&b, "d1").contains(&"f3".to_string()));
    }

    #[test]
    fn test_soldier_never_moves_backward() {
        let b = board("4k4/9/9/9/4P4/9/9/9/4K4/9");
        assert_eq!(targets(&b, "e6"), vec!["d6", "e7", "f6"]);
        let b = board("4k4/9/9/9/4p4/9/9/9/4K4/9");
        assert_eq!(targets(&b, "e6"), vec!["d6", "e5", "f6"]);
    }

    #[test]
    fn test_soldier_in_enemy_palace() {
        // 红卒在蓝方九宫角 d8，可以斜进中心 e9
        let b = board("4k4/9/3P5/9/9/9/9/9/4K4/9");
        assert_eq!(targets(&b, "d8"), vec!["c8", "d9", "e8", "e9"]);
        // 在中心 e9（有將在 e10 时）可斜进 d10、f10
        let b = board("4k4/4P4/9/9/9/9/9/9/4K4/9");
        assert_eq!(targets(&b, "e9"), vec!["d10", "d9", "e10", "f10", "f9"]);
        // 蓝卒在红方九宫角 d3，可以斜吃中心的將
        let b = board("4k4/9/9/9/9/9/9/3p5/4K4/9");
        assert_eq!(targets(&b, "d3"), vec!["c3", "d2", "e2", "e3"]);
        // 卒在己方九宫没有斜走
        let b = board("4k4/9/9/9/9/9/9/9/9/3P1K3");
        assert_eq!(targets(&b, "d1"), vec!["c1", "d2", "e1"]);
    }

    #[test]
    fn test_guard_stays_in_palace() {
        let b = board("4k4/9/9/9/9/9/9/3A5/4K4/9");
        // d3 是九宫角，中心有己方將，d4、c3 在九宫外
        assert_eq!(targets(&b, "d3"), vec!["d2", "e3"]);
    }
}
