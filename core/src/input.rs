use crate::*;

/// What a click ended up doing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    /// Game busy or finished, off the board, or an empty cell without a selection
    Ignored,
    Selected(Coords),
    Deselected,
    /// A move was attempted, the selection is kept when it was blocked
    Moved(MoveOutcome),
}

/// Click and hover handling on top of a [`Game`], tracking which ball is selected.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerInput {
    selected: Option<Coords>,
}

impl PointerInput {
    pub fn selected(&self) -> Option<Coords> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn click(&mut self, game: &mut Game, coords: Coords, pacer: impl Pacer) -> Result<PointerOutcome> {
        use PointerOutcome::*;

        if !game.state().is_ready() {
            return Ok(Ignored);
        }
        let Some(color) = game.cell_at(coords) else {
            return Ok(Ignored);
        };

        Ok(match self.selected {
            Some(selected) if selected == coords => {
                self.selected = None;
                Deselected
            }
            Some(selected) if color.is_empty() => {
                let outcome = game.move_ball(selected, coords, pacer)?;
                if outcome.is_success() {
                    self.selected = None;
                }
                Moved(outcome)
            }
            _ if color.is_ball() => {
                self.selected = Some(coords);
                Selected(coords)
            }
            _ => Ignored,
        })
    }

    /// Renders and returns the preview from the selected ball to `coords`.
    pub fn hover(&self, game: &mut Game, coords: Coords) -> Option<Board> {
        let selected = self.selected?;
        if !game.state().is_ready() {
            return None;
        }
        Some(game.preview_move(selected, coords))
    }
}
