//! Staged text composition
//!
//! The composer is how typed input becomes particles: each character is
//! spawned as a *frozen* glyph body at a wrapping cursor, so the text hangs
//! in place while being written. Releasing unfreezes the whole staged batch
//! at once. Frozen bodies keep accumulating gravity while staged, so release
//! also resets their velocity to zero.

use drift2d_math::Vec2;
use drift2d_physics::{Body, BodyKey};

use crate::spawn::GLYPH_ASPECT;
use crate::world::World;

/// Default glyph cell height in world units
pub const DEFAULT_CELL: f32 = 16.0;

/// A staging area that turns typed characters into frozen glyph bodies
pub struct Composer {
    staged: Vec<BodyKey>,
    origin: Vec2,
    offset: Vec2,
    cell: f32,
    wrap_width: f32,
}

impl Composer {
    /// Create a composer for a world of the given bounds
    ///
    /// The cursor origin sits at 10% width / 25% height and lines wrap at
    /// 80% of the width.
    pub fn new(bounds: Vec2) -> Self {
        Self {
            staged: Vec::new(),
            origin: Vec2::new(bounds.x * 0.10, bounds.y * 0.25),
            offset: Vec2::ZERO,
            cell: DEFAULT_CELL,
            wrap_width: bounds.x * 0.80,
        }
    }

    /// Set the glyph cell height
    pub fn with_cell(mut self, cell: f32) -> Self {
        self.cell = cell;
        self
    }

    /// Width of one glyph block
    #[inline]
    fn block(&self) -> f32 {
        self.cell * GLYPH_ASPECT
    }

    /// Cursor advance per character (one pixel of letter spacing)
    #[inline]
    fn advance(&self) -> f32 {
        self.block() + 1.0
    }

    /// Number of characters currently staged
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Stage one typed character as a frozen glyph at the cursor
    ///
    /// Spaces advance the cursor without spawning a body. The cursor wraps
    /// to the next row once it passes the wrap width.
    pub fn push_char(&mut self, world: &mut World, ch: char) {
        if self.offset.x > self.wrap_width {
            self.offset.x = 0.0;
            self.offset.y += self.advance();
        }

        if ch != ' ' {
            let size = Vec2::new(self.block(), self.block());
            let body = Body::glyph(ch, self.origin + self.offset, size).with_frozen(true);
            self.staged.push(world.add_body(body));
        }
        self.offset.x += self.advance();
    }

    /// Remove the most recently staged character (backspace)
    pub fn pop_char(&mut self, world: &mut World) {
        let Some(key) = self.staged.pop() else {
            return;
        };
        world.remove_body(key);

        self.offset.x -= self.advance();
        if self.offset.x < 0.0 {
            self.offset.x = 0.0;
        }
    }

    /// Release every staged glyph into the simulation
    ///
    /// Velocity accumulated while frozen is discarded, otherwise the batch
    /// would launch at whatever gravity built up during typing.
    pub fn release(&mut self, world: &mut World) {
        for key in self.staged.drain(..) {
            if let Some(body) = world.get_body_mut(key) {
                body.velocity = Vec2::ZERO;
                body.frozen = false;
            }
        }
        self.offset.x = 0.0;
    }
}
