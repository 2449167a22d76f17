use crate::rules::{Move, board::Board};


/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        return self.0 as usize;
    }
}


/// Every node keeps its own board snapshot so rollouts and expansion never
/// replay moves from the root.
#[derive(Debug, Clone)]
pub struct MonteCarloNode {
    pub board: Board,

    /// Parent index. The root is its own parent.
    pub parent: NodeId,

    /// Empty until the node is expanded.
    pub children: Vec<NodeId>,

    /// Move that produced this node from its parent (NullMove at the root).
    pub mov: Move,

    pub visits: u32,

    /// Sum of 0/1/2 contributions, scored for the side to move at the root.
    pub wins: u32,
}

impl MonteCarloNode {
    pub fn new_root(board: Board) -> Self {
        return Self::new_child(NodeId::ROOT, board, Move::NullMove);
    }

    pub fn new_child(parent: NodeId, board: Board, mov: Move) -> Self {
        return Self {
            board: board,
            parent: parent,
            children: Vec::new(),
            mov: mov,
            visits: 0,
            wins: 0,
        }
    }

    /// UCB1 score. Undefined for unvisited nodes, which callers pick before
    /// ever asking for a score.
    #[inline]
    pub fn ucb_score(&self, parent_visits: u32, normalization: f64, exploration: f64) -> f64 {
        debug_assert!(self.visits > 0);
        let visits = self.visits as f64;
        let win_rate = self.wins as f64 / (normalization * visits);
        return win_rate + (exploration * (parent_visits as f64).ln() / visits).sqrt();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_its_own_parent() {
        let root = MonteCarloNode::new_root(Board::new());
        assert_eq!(root.parent, NodeId::ROOT);
        assert_eq!(root.mov, Move::NullMove);
        assert!(root.children.is_empty());
    }

    #[test]
    fn ucb_score_combines_win_rate_and_exploration() {
        let mut node = MonteCarloNode::new_child(NodeId::ROOT, Board::new(), Move::Drop(3));
        node.visits = 4;
        node.wins = 6;
        // 6 / (2 * 4) + sqrt(2 * ln(16) / 4)
        let expected = 0.75 + (2.0 * 16f64.ln() / 4.0).sqrt();
        assert!((node.ucb_score(16, 2.0, 2.0) - expected).abs() < 1e-9);
        assert!((node.ucb_score(16, 2.0, 0.0) - 0.75).abs() < 1e-9);
    }
}
