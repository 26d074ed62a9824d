//! Egui input guard: prevents click-through from UI panels to the world.
//!
//! When egui (toolbar, inspector) is handling pointer input, world-level
//! input systems should skip processing so a toolbar click never doubles
//! as a placement or demolition underneath it.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui panel or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
