//! Pointer tracking for the particle field.
//!
//! The pointer is either over the surface at a known position or absent.
//! Absent means no repulsion and no pointer links, whatever the distances.
//!
//! ```ignore
//! let mut pointer = PointerState::Absent;
//! pointer.handle_event(&window_event);
//! if let Some(at) = pointer.position() {
//!     // particles near `at` are pushed away
//! }
//! ```

use glam::Vec2;
use winit::event::WindowEvent;

/// Last known pointer position, or absent when the cursor left the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Absent,
    At(Vec2),
}

impl PointerState {
    /// Position in surface pixels, if the pointer is over the surface.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(*p),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, PointerState::At(_))
    }

    /// Record a pointer move.
    pub fn move_to(&mut self, x: f32, y: f32) {
        *self = PointerState::At(Vec2::new(x, y));
    }

    /// Record the pointer leaving the surface.
    pub fn clear(&mut self) {
        *self = PointerState::Absent;
    }

    /// Apply a winit window event. Returns `true` if the event changed the
    /// pointer.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.move_to(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                let was_present = self.is_present();
                self.clear();
                was_present
            }
            _ => false,
        }
    }
}
