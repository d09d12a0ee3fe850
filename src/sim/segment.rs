//! Endless scrolling with two recycled world segments
//!
//! Two fixed-width strips sit side by side. Once one has scrolled completely
//! behind the camera's visible window it jumps ahead of the other and gets
//! fresh content, so the world never holds more than two strips.

use glam::Vec2;

use super::spawner::ObstacleKind;
use crate::Rect;

/// Number of live segments
pub const SEGMENT_COUNT: usize = 2;

/// Ground tiles per segment strip
pub const GROUND_TILES: usize = 3;

/// A fixed-width strip of world
#[derive(Debug, Clone)]
pub struct WorldSegment {
    pub index: usize,
    /// Left edge in world units
    pub origin_x: f32,
    pub width: f32,
    /// Last generated obstacle type
    pub content: Option<ObstacleKind>,
    /// Background hue in [0, 1)
    pub hue: f32,
    /// Ground strip body
    pub floor_id: u32,
    /// Ceiling strip body
    pub ceiling_id: u32,
    /// Times this segment has been moved forward
    pub generation: u32,
}

impl WorldSegment {
    pub fn new(index: usize, origin_x: f32, width: f32) -> Self {
        Self {
            index,
            origin_x,
            width,
            content: None,
            hue: 0.0,
            floor_id: 0,
            ceiling_id: 0,
            generation: 0,
        }
    }

    /// Right edge in world units
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.origin_x + self.width
    }

    /// Ground strip rectangle
    pub fn floor_rect(&self, ground_height: f32) -> Rect {
        Rect::from_corner(
            Vec2::new(self.origin_x, 0.0),
            Vec2::new(self.width, ground_height),
        )
    }

    /// Ceiling strip rectangle, flush with the top of the visible window
    pub fn ceiling_rect(&self, screen_height: f32, ceiling_height: f32) -> Rect {
        Rect::from_corner(
            Vec2::new(self.origin_x, screen_height - ceiling_height),
            Vec2::new(self.width, ceiling_height),
        )
    }

    /// The ground strip split into equal tiles, left to right
    pub fn ground_tiles(&self, ground_height: f32) -> [Rect; GROUND_TILES] {
        let w = self.width / GROUND_TILES as f32;
        std::array::from_fn(|i| {
            Rect::from_corner(
                Vec2::new(self.origin_x + i as f32 * w, 0.0),
                Vec2::new(w, ground_height),
            )
        })
    }

    /// Whether the segment is entirely behind the visible window
    pub fn is_behind(&self, camera_x: f32, screen_width: f32) -> bool {
        self.trailing_edge() < camera_x - screen_width / 2.0
    }
}

/// Lay out the initial pair of segments starting at x = 0
pub fn initial_segments(width: f32) -> [WorldSegment; SEGMENT_COUNT] {
    std::array::from_fn(|i| WorldSegment::new(i, i as f32 * width, width))
}

/// Move every segment that has scrolled out behind the camera to the front
///
/// Returns the indices of moved segments in the order they moved. A large
/// camera jump can move the same segment more than once.
pub fn recycle(
    segments: &mut [WorldSegment; SEGMENT_COUNT],
    camera_x: f32,
    screen_width: f32,
) -> Vec<usize> {
    let mut moved = Vec::new();
    if !camera_x.is_finite() {
        log::warn!("Camera x={} is not finite, segments left in place", camera_x);
        return moved;
    }

    loop {
        // Always move the rearmost segment first so the pair stays adjacent
        let rear = if segments[0].origin_x <= segments[1].origin_x {
            0
        } else {
            1
        };
        let segment = &mut segments[rear];
        if !segment.is_behind(camera_x, screen_width) {
            break;
        }
        segment.origin_x += SEGMENT_COUNT as f32 * segment.width;
        segment.generation += 1;
        log::debug!(
            "Segment {} recycled to x={} (camera x={})",
            rear,
            segment.origin_x,
            camera_x
        );
        moved.push(rear);
    }

    moved
}
