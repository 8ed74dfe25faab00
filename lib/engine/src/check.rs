// 将军与将死判定，全部在棋盘副本上模拟，不修改原局面
use crate::board::{Board, Move, Player, Position};

impl Board {
    /// 在副本上走一步，返回走后的局面
    pub fn simulate(&self, from: Position, to: Position) -> Board {
        let mut board = *self;
        board.move_piece(from, to);
        board
    }

    /// player 的將是否被对方任一棋子的伪合法走法攻击到；找不到將视为被将军
    pub fn is_in_check(&self, player: Player) -> bool {
        let Some(general) = self.general_position(player) else {
            return true;
        };
        self.pieces(player.next())
            .any(|(pos, piece)| self.targets_of(pos, piece).contains(&general))
    }

    // 走完后己方是否仍被将军
    pub fn leaves_in_check(&self, from: Position, to: Position, player: Player) -> bool {
        self.simulate(from, to).is_in_check(player)
    }

    /// player 的全部合法走法（已排除走后被将军的走法）
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = vec![];
        for (from, piece) in self.pieces(player) {
            for to in self.targets_of(from, piece) {
                if self.leaves_in_check(from, to, player) {
                    continue;
                }
                moves.push(Move {
                    player,
                    from,
                    to,
                    piece,
                    capture: self.piece_at(to),
                });
            }
        }
        moves
    }

    // 是否存在任何一步能解除将军
    fn has_escape(&self, player: Player) -> bool {
        self.pieces(player).any(|(from, piece)| {
            self.targets_of(from, piece)
                .into_iter()
                .any(|to| !self.leaves_in_check(from, to, player))
        })
    }

    /// 被将军且没有任何一步能解除将军
    pub fn is_checkmate(&self, player: Player) -> bool {
        self.is_in_check(player) && !self.has_escape(player)
    }
}
