use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::collections::HashMap;

use super::{EngineFault, GameEngine, PositionHandle, TerminalResult};

/// One position of a scripted game tree.
#[derive(Clone, Debug)]
pub struct ScriptedNode {
    features: Vec<f32>,
    children: Vec<usize>,
    result: TerminalResult,
}

impl ScriptedNode {
    pub fn new(features: Vec<f32>, children: Vec<usize>) -> Self {
        Self {
            features,
            children,
            result: TerminalResult::default(),
        }
    }

    pub fn terminal(features: Vec<f32>, result: TerminalResult) -> Self {
        Self {
            features,
            children: vec![],
            result,
        }
    }
}

#[derive(Default)]
struct Registry {
    next_key: u64,
    live: HashMap<u64, usize>,
    issued: usize,
}

impl Registry {
    fn issue(&mut self, node: usize) -> PositionHandle {
        self.next_key += 1;
        self.issued += 1;
        self.live.insert(self.next_key, node);
        PositionHandle::from_key(self.next_key)
    }
}

/// A deterministic in-process engine over an explicit game tree. Node 0 is the initial position.
///
/// Keeps track of every handle it has issued so callers can check that nothing leaks.
pub struct ScriptedEngine {
    feature_width: usize,
    nodes: Vec<ScriptedNode>,
    registry: Mutex<Registry>,
}

impl ScriptedEngine {
    pub fn new(feature_width: usize, nodes: Vec<ScriptedNode>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(anyhow!("A scripted game needs at least an initial position"));
        }

        for (idx, node) in nodes.iter().enumerate() {
            if node.features.len() != feature_width {
                return Err(anyhow!(
                    "Node {} has {} features, expected {}",
                    idx,
                    node.features.len(),
                    feature_width
                ));
            }

            if let Some(child) = node.children.iter().find(|&&c| c >= nodes.len()) {
                return Err(anyhow!("Node {} refers to missing node {}", idx, child));
            }
        }

        Ok(Self {
            feature_width,
            nodes,
            registry: Mutex::new(Registry::default()),
        })
    }

    /// A game with exactly one legal move per position. `features` holds one entry per position, the last
    /// of which is terminal.
    pub fn line(features: Vec<Vec<f32>>, result: TerminalResult) -> Result<Self> {
        let feature_width = features.first().map(|f| f.len()).unwrap_or(0);
        let num_positions = features.len();
        let nodes = features
            .into_iter()
            .enumerate()
            .map(|(idx, features)| {
                if idx + 1 == num_positions {
                    ScriptedNode::terminal(features, result)
                } else {
                    ScriptedNode::new(features, vec![idx + 1])
                }
            })
            .collect();

        Self::new(feature_width, nodes)
    }

    /// Handles that have been issued and not yet released.
    pub fn live_positions(&self) -> usize {
        self.registry.lock().live.len()
    }

    pub fn issued_positions(&self) -> usize {
        self.registry.lock().issued
    }

    /// The tree node a live handle points at.
    pub fn node_of(&self, position: &PositionHandle) -> Result<usize> {
        self.registry
            .lock()
            .live
            .get(&position.key())
            .copied()
            .ok_or_else(|| EngineFault::UnknownPosition(position.key()).into())
    }
}

impl GameEngine for ScriptedEngine {
    fn feature_width(&self) -> usize {
        self.feature_width
    }

    fn initial_position(&self) -> Result<PositionHandle> {
        Ok(self.registry.lock().issue(0))
    }

    fn successors(&self, position: &PositionHandle) -> Result<Vec<PositionHandle>> {
        let node = self.node_of(position)?;
        let mut registry = self.registry.lock();

        Ok(self.nodes[node]
            .children
            .iter()
            .map(|&child| registry.issue(child))
            .collect())
    }

    fn feature_vector(&self, position: &PositionHandle) -> Result<Vec<f32>> {
        let node = self.node_of(position)?;
        Ok(self.nodes[node].features.clone())
    }

    fn terminal_result(&self, position: &PositionHandle) -> Result<TerminalResult> {
        let node = &self.nodes[self.node_of(position)?];

        if !node.children.is_empty() {
            return Err(EngineFault::NotTerminal(position.key()).into());
        }

        Ok(node.result)
    }

    fn release(&self, position: PositionHandle) {
        self.registry.lock().live.remove(&position.key());
    }

    fn describe(&self, position: &PositionHandle) -> Result<String> {
        Ok(format!("{} at node {}", position, self.node_of(position)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork() -> ScriptedEngine {
        ScriptedEngine::new(
            1,
            vec![
                ScriptedNode::new(vec![0.0], vec![1, 2]),
                ScriptedNode::terminal(vec![1.0], TerminalResult::new(true, 3)),
                ScriptedNode::terminal(vec![2.0], TerminalResult::new(false, -3)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_successors_issue_fresh_handles_in_order() {
        let engine = fork();
        let root = engine.initial_position().unwrap();

        let first = engine.successors(&root).unwrap();
        let second = engine.successors(&root).unwrap();

        assert_eq!(first.len(), 2);
        assert_ne!(first[0].key(), second[0].key());
        assert_eq!(engine.feature_vector(&first[0]).unwrap(), vec![1.0]);
        assert_eq!(engine.feature_vector(&first[1]).unwrap(), vec![2.0]);
        assert_eq!(engine.live_positions(), 5);
    }

    #[test]
    fn test_release_is_idempotent() {
        let engine = fork();
        let root = engine.initial_position().unwrap();
        let key = root.key();

        engine.release(root);
        engine.release(PositionHandle::from_key(key));

        assert_eq!(engine.live_positions(), 0);
        assert_eq!(engine.issued_positions(), 1);
    }

    #[test]
    fn test_released_handle_is_unknown() {
        let engine = fork();
        let root = engine.initial_position().unwrap();
        let key = root.key();
        engine.release(root);

        let err = engine
            .feature_vector(&PositionHandle::from_key(key))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<EngineFault>(),
            Some(&EngineFault::UnknownPosition(key))
        );
    }

    #[test]
    fn test_terminal_result_on_non_terminal_is_fault() {
        let engine = fork();
        let root = engine.initial_position().unwrap();

        let err = engine.terminal_result(&root).unwrap_err();

        assert_eq!(
            err.downcast_ref::<EngineFault>(),
            Some(&EngineFault::NotTerminal(root.key()))
        );
    }

    #[test]
    fn test_terminal_result_on_leaf() {
        let engine = fork();
        let root = engine.initial_position().unwrap();
        let children = engine.successors(&root).unwrap();

        assert!(engine.successors(&children[1]).unwrap().is_empty());
        assert_eq!(
            engine.terminal_result(&children[1]).unwrap(),
            TerminalResult::new(false, -3)
        );
    }

    #[test]
    fn test_line_links_each_position_to_the_next() {
        let engine = ScriptedEngine::line(
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]],
            TerminalResult::new(true, 1),
        )
        .unwrap();

        let mut position = engine.initial_position().unwrap();
        let mut plies = 0;
        while let Some(next) = engine.successors(&position).unwrap().pop() {
            engine.release(position);
            position = next;
            plies += 1;
        }

        assert_eq!(plies, 2);
        assert_eq!(engine.feature_vector(&position).unwrap(), vec![2.0, 2.0]);
        assert_eq!(engine.terminal_result(&position).unwrap(), TerminalResult::new(true, 1));
    }

    #[test]
    fn test_new_rejects_mismatched_width() {
        let res = ScriptedEngine::new(2, vec![ScriptedNode::new(vec![0.0], vec![])]);

        assert!(res.is_err());
    }
}
