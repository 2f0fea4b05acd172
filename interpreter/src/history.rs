use cube_core::Move;

/// Every move the player committed since activation or the last reset
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Oldest first
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Empty the stack, returning the moves that undo it: the most recent move reversed comes first.
    pub fn unwind(&mut self) -> Vec<Move> {
        let mut undo = Vec::with_capacity(self.moves.len());

        while let Some(mv) = self.moves.pop() {
            undo.push(mv.reverse());
        }

        undo
    }
}

#[cfg(test)]
mod tests {
    use cube_core::{CubeState, Move};
    use pretty_assertions::assert_eq;

    use super::History;

    #[test]
    fn unwind_reverses() {
        let mut history = History::default();
        for mv in [Move::R, Move::U_PRIME, Move::F] {
            history.push(mv);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.unwind(),
            vec![Move::F_PRIME, Move::U, Move::R_PRIME]
        );
        assert!(history.is_empty());
        assert_eq!(history.unwind(), Vec::<Move>::new());
    }

    #[test]
    fn unwinding_restores_the_state() {
        let mut rng = fastrand::Rng::with_seed(77);
        let start = CubeState::solved().apply_all(&[Move::D, Move::L, Move::B_PRIME]);

        for _ in 0..50 {
            let mut history = History::default();
            for _ in 0..rng.usize(0..25) {
                history.push(Move::ALL[rng.usize(0..Move::COUNT)]);
            }

            let played = start.apply_all(history.moves());
            assert_eq!(played.apply_all(&history.unwind()), start);
        }
    }
}
