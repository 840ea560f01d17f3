//! Static key map: physical matrix cell → logical action.

/// A physical key position in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixCell {
    pub row: u8,
    pub col: u8,
}

impl MatrixCell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// What a key does when pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalAction {
    VolumeDown,
    Mute,
    VolumeUp,
    PreviousTrack,
    PlayPause,
    NextTrack,
    /// Ctrl+C
    CopyChord,
    /// Ctrl+V
    PasteChord,
    /// Ctrl+X
    CutChord,
}

impl LogicalAction {
    /// Chord actions hold a modifier around a letter key.
    pub const fn is_chord(self) -> bool {
        matches!(
            self,
            LogicalAction::CopyChord | LogicalAction::PasteChord | LogicalAction::CutChord
        )
    }
}

/// The compiled key map, row-major.
pub const KEY_MAP: [(MatrixCell, LogicalAction); 9] = [
    (MatrixCell::new(0, 0), LogicalAction::VolumeDown),
    (MatrixCell::new(0, 1), LogicalAction::Mute),
    (MatrixCell::new(0, 2), LogicalAction::VolumeUp),
    (MatrixCell::new(1, 0), LogicalAction::PreviousTrack),
    (MatrixCell::new(1, 1), LogicalAction::PlayPause),
    (MatrixCell::new(1, 2), LogicalAction::NextTrack),
    (MatrixCell::new(2, 0), LogicalAction::CopyChord),
    (MatrixCell::new(2, 1), LogicalAction::PasteChord),
    (MatrixCell::new(2, 2), LogicalAction::CutChord),
];

/// Look up the action bound to `cell`; unmapped cells yield `None`.
pub fn action_for(cell: MatrixCell) -> Option<LogicalAction> {
    KEY_MAP
        .iter()
        .find(|(mapped, _)| *mapped == cell)
        .map(|(_, action)| *action)
}
