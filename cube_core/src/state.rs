use crate::{
    moves::Move,
    rotation::Rotation,
    slot::{SLOT_COUNT, Slot},
};

/// Which physical cubelet this is. Assigned once when the solved layout is built and carried along by every move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeletId(u8);

impl CubeletId {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// A cubelet as it sits in some slot: who it is and how far it has been turned from its solved orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cubelet {
    pub id: CubeletId,
    pub orientation: Rotation,
}

/// The contents of every movable slot of the cube
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    cubelets: [Cubelet; SLOT_COUNT],
}

impl CubeState {
    /// The solved layout: every cubelet in the slot with its own index, unrotated
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn solved() -> CubeState {
        CubeState {
            cubelets: std::array::from_fn(|i| Cubelet {
                id: CubeletId(i as u8),
                orientation: Rotation::IDENTITY,
            }),
        }
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> &Cubelet {
        &self.cubelets[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Cubelet)> {
        Slot::all().zip(self.cubelets.iter())
    }

    /// Perform a quarter turn, producing the new state. The only way a state ever changes.
    #[must_use]
    pub fn apply(&self, mv: Move) -> CubeState {
        let def = mv.def();
        let turn = def.turn();

        CubeState {
            cubelets: std::array::from_fn(|i| {
                let target = Slot::from_index(i);

                if def.in_layer(target) {
                    let source = &self.cubelets[def.source(target).index()];
                    Cubelet {
                        id: source.id,
                        orientation: turn * source.orientation,
                    }
                } else {
                    self.cubelets[i]
                }
            }),
        }
    }

    /// Perform every move of the sequence in order
    #[must_use]
    pub fn apply_all<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> CubeState {
        moves
            .into_iter()
            .fold(self.clone(), |state, &mv| state.apply(mv))
    }

    /// Whether every cubelet is back where `reference` has it, unrotated.
    ///
    /// Face centers are skipped: they never leave their slot and a half-turned center looks exactly like a solved one.
    #[must_use]
    pub fn is_solved(&self, reference: &CubeState) -> bool {
        self.iter()
            .zip(reference.cubelets.iter())
            .filter(|((slot, _), _)| !slot.is_face_center())
            .all(|((_, cubelet), expected)| {
                cubelet.id == expected.id && cubelet.orientation.is_identity()
            })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}
