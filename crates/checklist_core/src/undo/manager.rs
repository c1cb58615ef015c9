//! Undo/redo stack manager.

use crate::undo::command::Command;

/// Two-stack history of executed commands.
///
/// `history` holds applied commands and `future` holds undone ones; both keep
/// the most recent entry last.
#[derive(Debug)]
pub struct UndoManager<C> {
    history: Vec<C>,
    future: Vec<C>,
}

impl<C> Default for UndoManager<C> {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            future: Vec::new(),
        }
    }
}

impl<C: Command> UndoManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `command` to `target` and records it.
    ///
    /// Clears the redo stack.
    pub fn execute(&mut self, command: C, target: &mut C::Target) {
        command.forward(target);
        self.history.push(command);
        self.future.clear();
    }

    /// Reverses the most recent command.
    ///
    /// Returns `false` without touching `target` when nothing can be undone.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        let Some(command) = self.history.pop() else {
            return false;
        };
        command.reverse(target);
        self.future.push(command);
        true
    }

    /// Re-applies the most recently undone command.
    ///
    /// Returns `false` without touching `target` when nothing can be redone.
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        let Some(command) = self.future.pop() else {
            return false;
        };
        command.forward(target);
        self.history.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::UndoManager;
    use crate::undo::command::Command;

    /// Appends one value; reversal pops it back off.
    struct Push(i32);

    impl Command for Push {
        type Target = Vec<i32>;

        fn forward(&self, target: &mut Vec<i32>) {
            target.push(self.0);
        }

        fn reverse(&self, target: &mut Vec<i32>) {
            target.pop();
        }
    }

    #[test]
    fn execute_applies_forward_once() {
        let mut state = Vec::new();
        let mut manager = UndoManager::new();

        manager.execute(Push(1), &mut state);

        assert_eq!(state, vec![1]);
        assert!(manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn undo_and_redo_follow_lifo_order() {
        let mut state = Vec::new();
        let mut manager = UndoManager::new();
        manager.execute(Push(1), &mut state);
        manager.execute(Push(2), &mut state);

        assert!(manager.undo(&mut state));
        assert_eq!(state, vec![1]);
        assert!(manager.undo(&mut state));
        assert!(state.is_empty());

        assert!(manager.redo(&mut state));
        assert_eq!(state, vec![1]);
        assert!(manager.redo(&mut state));
        assert_eq!(state, vec![1, 2]);
        assert_eq!(manager.history_len(), 2);
        assert_eq!(manager.future_len(), 0);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut state = vec![9];
        let mut manager: UndoManager<Push> = UndoManager::new();

        assert!(!manager.undo(&mut state));
        assert!(!manager.redo(&mut state));
        assert_eq!(state, vec![9]);
    }

    #[test]
    fn execute_after_undo_discards_redo() {
        let mut state = Vec::new();
        let mut manager = UndoManager::new();
        manager.execute(Push(1), &mut state);
        manager.execute(Push(2), &mut state);
        manager.undo(&mut state);
        assert!(manager.can_redo());

        manager.execute(Push(3), &mut state);

        assert!(!manager.can_redo());
        assert!(!manager.redo(&mut state));
        assert_eq!(state, vec![1, 3]);
    }

    #[test]
    fn stack_lengths_track_undo_and_redo() {
        let mut state = Vec::new();
        let mut manager = UndoManager::new();
        manager.execute(Push(1), &mut state);
        manager.execute(Push(2), &mut state);
        manager.undo(&mut state);

        assert_eq!(manager.history_len(), 1);
        assert_eq!(manager.future_len(), 1);
        assert_eq!(state, vec![1]);
    }
}
