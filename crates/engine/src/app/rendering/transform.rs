use crate::app::scene::{RoomRect, Vec2};

pub const VIEW_PADDING_PX: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Uniform pixels-per-world-unit that fits the room into the viewport with
/// padding on all sides. Degenerate rooms or viewports map to zero scale.
pub(crate) fn pixels_per_world(room: &RoomRect, viewport: Viewport) -> f32 {
    let usable_w = viewport.width as f32 - 2.0 * VIEW_PADDING_PX;
    let usable_h = viewport.height as f32 - 2.0 * VIEW_PADDING_PX;
    if usable_w <= 0.0 || usable_h <= 0.0 || room.width() <= 0.0 || room.height() <= 0.0 {
        return 0.0;
    }
    (usable_w / room.width()).min(usable_h / room.height())
}

/// Maps a floor-plane point to screen pixels, room centered in the viewport.
/// Positive world y is drawn toward the top of the screen.
pub fn world_to_screen_px(room: &RoomRect, viewport: Viewport, point: Vec2) -> (i32, i32) {
    let scale = pixels_per_world(room, viewport);
    let room_center = Vec2 {
        x: (room.min.x + room.max.x) * 0.5,
        y: (room.min.y + room.max.y) * 0.5,
    };
    let x = viewport.width as f32 * 0.5 + (point.x - room_center.x) * scale;
    let y = viewport.height as f32 * 0.5 - (point.y - room_center.y) * scale;
    (x.round() as i32, y.round() as i32)
}
