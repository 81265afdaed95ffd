//! Monte-Carlo tree search over attack and defense decisions.
//!
//! 1. Selection: descend by UCB1 while the node has children
//! 2. Expansion: one child per legal move, each seeded with one rollout
//! 3. Simulation: uniformly random playout to DONE (see [`play_out`])
//! 4. Backpropagation: add the 0/1 result to every ancestor
//!
//! Nodes live in a flat arena and refer to each other by index. Each node
//! owns its own copy of the game.

use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::ai::config::SearchConfig;
use crate::ai::rollout::{apply_move, legal_moves, play_out, Move};
use crate::ai::trait_def::AiError;
use crate::domain::{
    legal_attacks, legal_defenses, AttackMove, DefenseMove, Game, Phase, PlayerId,
};
use crate::errors::domain::DomainError;

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
struct Node {
    game: Game,
    parent: Option<NodeId>,
    mv: Option<Move>,
    /// `None` until expanded.
    children: Option<Vec<NodeId>>,
    plays: u32,
    wins: u32,
    terminal: bool,
}

impl Node {
    fn new(game: Game, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let terminal = game.is_done();
        Self {
            game,
            parent,
            mv,
            children: None,
            plays: 0,
            wins: 0,
            terminal,
        }
    }

    fn win_rate(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.plays)
        }
    }
}

/// Visit statistics for one root move.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub plays: u32,
    pub wins: u32,
}

/// Result of a search: the chosen move plus what the tree saw.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best: Move,
    pub iterations: u64,
    pub simulations: u32,
    pub elapsed: Duration,
    pub children: Vec<ChildStats>,
}

struct SearchTree<'a, R: Rng + ?Sized> {
    nodes: Vec<Node>,
    perspective: PlayerId,
    config: &'a SearchConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SearchTree<'a, R> {
    fn new(root: Game, config: &'a SearchConfig, rng: &'a mut R) -> Self {
        let perspective = root.perspective;
        Self {
            nodes: vec![Node::new(root, None, None)],
            perspective,
            config,
            rng,
        }
    }

    fn rollout(&mut self, id: NodeId) -> Result<bool, DomainError> {
        play_out(
            &self.nodes[id].game,
            self.perspective,
            self.config.rollout_move_limit,
            &mut *self.rng,
        )
    }

    fn backpropagate(&mut self, from: NodeId, won: bool) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = &mut self.nodes[id];
            node.plays += 1;
            if won {
                node.wins += 1;
            }
            cursor = node.parent;
        }
    }

    /// Terminal nodes get one more rollout. Otherwise every legal move gets a
    /// child, and each child starts life with one simulation counted.
    fn expand(&mut self, id: NodeId) -> Result<(), DomainError> {
        if self.nodes[id].terminal {
            let won = self.rollout(id)?;
            self.backpropagate(id, won);
            return Ok(());
        }

        let moves = legal_moves(&self.nodes[id].game);
        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            let mut game = self.nodes[id].game.clone();
            apply_move(&mut game, &mv)?;
            let child = self.nodes.len();
            self.nodes.push(Node::new(game, Some(id), Some(mv)));
            children.push(child);

            let won = self.rollout(child)?;
            self.backpropagate(child, won);
        }
        self.nodes[id].children = Some(children);
        Ok(())
    }

    fn ucb1(&self, child: NodeId, ln_total: f64) -> f64 {
        let node = &self.nodes[child];
        let plays = f64::from(node.plays.max(1));
        node.win_rate() + (self.config.exploration * ln_total / plays).sqrt()
    }

    /// Walk down from the root to the node to expand next.
    fn select(&mut self) -> NodeId {
        let mut current = ROOT;
        loop {
            let children = match &self.nodes[current].children {
                Some(children) if !children.is_empty() => children.clone(),
                _ => return current,
            };

            let ln_total = f64::from(self.nodes[ROOT].plays.max(1)).ln();
            let mut best: Option<(NodeId, f64)> = None;
            for &child in &children {
                if self.nodes[child].terminal {
                    continue;
                }
                let score = self.ucb1(child, ln_total);
                match best {
                    Some((_, top)) if score <= top => {}
                    _ => best = Some((child, score)),
                }
            }

            match best {
                Some((child, _)) => current = child,
                // Every child is terminal: pick one at random and stop here.
                None => return *children.choose(&mut *self.rng).unwrap_or(&current),
            }
        }
    }

    /// Iterate until the cap or the clock stops us. The first pass always
    /// runs and expands the root.
    fn run(&mut self) -> Result<u64, DomainError> {
        let start = Instant::now();
        let budget = self.config.time_budget();
        let interval = self.config.clock_check_interval.max(1);
        let mut iterations: u64 = 0;

        loop {
            if self
                .config
                .max_iterations
                .is_some_and(|cap| iterations >= cap.max(1))
            {
                break;
            }
            if iterations % interval == 0 && iterations > 0 && start.elapsed() >= budget {
                break;
            }

            let leaf = self.select();
            self.expand(leaf)?;
            iterations += 1;
        }
        Ok(iterations)
    }

    /// Root child with the most plays, ties broken uniformly at random.
    fn best_child(&mut self) -> Option<NodeId> {
        let children = self.nodes[ROOT].children.as_deref()?;
        let most = children.iter().map(|&c| self.nodes[c].plays).max()?;
        let tied: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&c| self.nodes[c].plays == most)
            .collect();
        tied.choose(&mut *self.rng).copied()
    }

    fn child_stats(&self) -> Vec<ChildStats> {
        self.nodes[ROOT]
            .children
            .iter()
            .flatten()
            .filter_map(|&c| {
                let node = &self.nodes[c];
                node.mv.clone().map(|mv| ChildStats {
                    mv,
                    plays: node.plays,
                    wins: node.wins,
                })
            })
            .collect()
    }
}

/// Run a full search from `root`, scoring rollouts for `root.perspective`.
///
/// The root is always expanded at least once, so the report names a move
/// whenever the root has any legal move.
pub fn search<R: Rng + ?Sized>(
    root: Game,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<SearchReport, AiError> {
    let start = Instant::now();
    let mut tree = SearchTree::new(root, config, rng);

    let iterations = tree.run()?;

    let best = tree
        .best_child()
        .and_then(|id| tree.nodes[id].mv.clone())
        .ok_or_else(|| AiError::Internal("Search root has no children".into()))?;

    let report = SearchReport {
        best,
        iterations,
        simulations: tree.nodes[ROOT].plays,
        elapsed: start.elapsed(),
        children: tree.child_stats(),
    };
    debug!(
        perspective = tree.perspective,
        iterations = report.iterations,
        simulations = report.simulations,
        nodes = tree.nodes.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        best = ?report.best,
        "MCTS search complete"
    );
    Ok(report)
}

/// Pick a move for the active attacker.
///
/// A single legal move is returned without searching. The caller's game is
/// never modified.
pub fn decide_attack<R: Rng + ?Sized>(
    game: &Game,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<AttackMove, AiError> {
    let mut root = game.clone();
    root.phase = Phase::Attack;
    root.perspective = root.attacker;

    let mut moves = legal_attacks(&root);
    match moves.len() {
        0 => return Ok(AttackMove::Pass),
        1 => return Ok(moves.remove(0)),
        _ => {}
    }

    match search(root, config, rng)?.best {
        Move::Attack(mv) => Ok(mv),
        Move::Defense(mv) => Err(AiError::InvalidMove(format!(
            "Attack search returned a defense move {mv:?}"
        ))),
    }
}

/// Pick a move for the defender. Symmetric to [`decide_attack`].
pub fn decide_defense<R: Rng + ?Sized>(
    game: &Game,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<DefenseMove, AiError> {
    let mut root = game.clone();
    root.phase = Phase::Defense;
    root.perspective = root.defender;

    let mut moves = legal_defenses(&root);
    if moves.len() <= 1 {
        return Ok(moves.pop().unwrap_or(DefenseMove::Surrender));
    }

    match search(root, config, rng)?.best {
        Move::Defense(mv) => Ok(mv),
        Move::Attack(mv) => Err(AiError::InvalidMove(format!(
            "Defense search returned an attack move {mv:?}"
        ))),
    }
}
