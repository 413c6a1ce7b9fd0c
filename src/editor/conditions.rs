//! Run conditions for editor input systems.

use bevy::prelude::*;

use crate::editor::controller::InteractionState;
use crate::ui::DialogState;

/// Run condition: returns true when no modal dialog is open.
///
/// Use this to prevent editor input handlers from processing when
/// the user is interacting with a dialog.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}

/// Run condition: true unless a bubble's text is being edited.
pub fn not_editing_text(interaction: Res<InteractionState>) -> bool {
    !interaction.is_editing_text()
}
