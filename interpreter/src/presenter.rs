use cube_core::{Move, Slot};

/// The view side of the module: whatever draws the cube, animates the turns and plays sounds.
///
/// Presenters only ever hear about turns. They never see or change which cubelet is where.
pub trait Presenter {
    /// A turn has been applied to the cube state and its animation begins
    fn turn_started(&mut self, _mv: Move, _slots: &[Slot; 9]) {}

    /// The turn has progressed to `degrees` out of 90
    fn turn_progress(&mut self, _mv: Move, _degrees: f32) {}

    fn turn_finished(&mut self, _mv: Move) {}

    /// The player asked to look at the cube from another side
    fn rotate_view(&mut self) {}

    /// The cube was solved by the player. Called exactly once.
    fn solved(&mut self) {}
}

/// A presenter that shows nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Presenter for Headless {}
