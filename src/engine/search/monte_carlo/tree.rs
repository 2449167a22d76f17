use std::mem::size_of;

use crate::rules::{Color, Move, board::Board, board::state::GameState};

use super::node::{MonteCarloNode, NodeId};


/// Nodes live in one `Vec` and refer to each other by `NodeId`. The arena is
/// built per search call and dropped with it.
#[derive(Debug)]
pub struct MonteCarloTree {
    nodes: Vec<MonteCarloNode>,
}

impl MonteCarloTree {
    pub fn new(board: Board) -> Self {
        return Self { nodes: vec![MonteCarloNode::new_root(board)] };
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        return NodeId::ROOT;
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MonteCarloNode {
        return &self.nodes[id.index()];
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MonteCarloNode {
        return &mut self.nodes[id.index()];
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }

    /// Approximate heap footprint of the arena.
    pub fn memory_size(&self) -> u64 {
        let children: usize = self.nodes.iter().map(|n| n.children.capacity()).sum();
        return (self.nodes.capacity() * size_of::<MonteCarloNode>() + children * size_of::<NodeId>()) as u64;
    }

    pub fn add_child(&mut self, parent: NodeId, board: Board, mov: Move) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MonteCarloNode::new_child(parent, board, mov));
        self.get_mut(parent).children.push(id);
        return id;
    }

    /// Picks the child to descend into. The first unvisited child in column
    /// order wins outright; otherwise the highest score, earliest on ties.
    pub fn select_child(&self, id: NodeId, normalization: f64, exploration: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in node.children.iter() {
            let child = self.get(child_id);
            if child.visits == 0 {
                return Some(child_id);
            }
            let score = child.ucb_score(node.visits, normalization, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {},
                _ => best = Some((child_id, score)),
            }
        }
        return best.map(|(child_id, _)| child_id);
    }

    pub fn find_best_leaf(&self, normalization: f64, exploration: f64) -> NodeId {
        let mut current = self.root();
        while let Some(child) = self.select_child(current, normalization, exploration) {
            current = child;
        }
        return current;
    }

    /// Creates one child per legal column and returns the first. `None` when
    /// the node's board is full.
    pub fn expand(&mut self, id: NodeId) -> Option<NodeId> {
        let board = self.get(id).board;
        let mut first = None;
        for mov in board.legal_moves() {
            if let Move::Drop(column) = mov {
                let mut child_board = board;
                child_board.insert(column);
                let child = self.add_child(id, child_board, mov);
                first.get_or_insert(child);
            }
        }
        return first;
    }

    /// Credits a rollout outcome to every node from `leaf` up to and
    /// including the root: 2 for a win by `root_color`, 1 for a draw.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: GameState, root_color: Color) {
        let reward = match outcome {
            GameState::Draw => 1,
            GameState::InProgress => 0,
            decided => if decided.winner() == Some(root_color) { 2 } else { 0 },
        };
        let mut current = leaf;
        loop {
            let node = self.get_mut(current);
            node.visits += 1;
            node.wins += reward;
            if node.parent == current {
                break;
            }
            current = node.parent;
        }
    }
}
