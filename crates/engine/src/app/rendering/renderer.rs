use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::scene::{SceneVisualState, Vec2};

use super::transform::{pixels_per_world, world_to_screen_px, Viewport};

const CLEAR_COLOR: [u8; 4] = [17, 17, 17, 255];
const WALL_COLOR: [u8; 4] = [68, 68, 68, 255];
const CAMERA_COLOR: [u8; 4] = [220, 220, 240, 255];
const WIN_ZONE_COLOR: [u8; 4] = [0, 255, 0, 255];
const FLASH_COLOR: [u8; 3] = [255, 0, 0];
const FADE_COLOR: [u8; 3] = [0, 0, 0];
const ACTOR_HALF_SIZE_PX: i32 = 6;
const CAMERA_HALF_SIZE_PX: i32 = 4;
const WIN_ZONE_HALF_SIZE_PX: i32 = 5;
const FACING_TICK_COUNT: i32 = 6;
const FACING_TICK_STEP_PX: f32 = 3.0;

/// Flat top-down presentation of the scene's visual state: room outline,
/// actor markers, win zone, and the full-screen flash/fade overlays. The
/// simulation never reads anything back from it.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub fn render_visual_state(&mut self, visual: &SceneVisualState) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let viewport = self.viewport;
        let frame = self.pixels.frame_mut();
        for chunk in frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }

        if pixels_per_world(&visual.room, viewport) > 0.0 {
            draw_room_outline(frame, viewport, visual);

            if let Some(win_marker) = visual.win_marker {
                let (x, y) = world_to_screen_px(&visual.room, viewport, win_marker.position);
                fill_rect(
                    frame,
                    viewport,
                    x,
                    y,
                    WIN_ZONE_HALF_SIZE_PX,
                    WIN_ZONE_COLOR,
                );
            }

            for actor in &visual.actors {
                let (x, y) = world_to_screen_px(&visual.room, viewport, actor.position);
                fill_rect(frame, viewport, x, y, ACTOR_HALF_SIZE_PX, actor.tint);
            }

            draw_camera_marker(frame, viewport, visual);
        }

        blend_full_screen(frame, FLASH_COLOR, visual.flash_alpha);
        blend_full_screen(frame, FADE_COLOR, visual.fade_alpha);

        self.pixels.render()
    }
}

fn draw_room_outline(frame: &mut [u8], viewport: Viewport, visual: &SceneVisualState) {
    let room = &visual.room;
    let (left, top) = world_to_screen_px(room, viewport, Vec2::new(room.min.x, room.max.y));
    let (right, bottom) = world_to_screen_px(room, viewport, Vec2::new(room.max.x, room.min.y));
    for x in left..=right {
        put_pixel(frame, viewport, x, top, WALL_COLOR);
        put_pixel(frame, viewport, x, bottom, WALL_COLOR);
    }
    for y in top..=bottom {
        put_pixel(frame, viewport, left, y, WALL_COLOR);
        put_pixel(frame, viewport, right, y, WALL_COLOR);
    }
}

fn draw_camera_marker(frame: &mut [u8], viewport: Viewport, visual: &SceneVisualState) {
    let camera = &visual.camera;
    let (x, y) = world_to_screen_px(&visual.room, viewport, camera.position);
    fill_rect(frame, viewport, x, y, CAMERA_HALF_SIZE_PX, CAMERA_COLOR);

    // Short dotted ray showing the facing direction.
    let forward = camera.planar_forward();
    for step in 1..=FACING_TICK_COUNT {
        let offset = step as f32 * FACING_TICK_STEP_PX;
        let tick_x = x + (forward.x * offset).round() as i32;
        let tick_y = y - (forward.y * offset).round() as i32;
        put_pixel(frame, viewport, tick_x, tick_y, CAMERA_COLOR);
    }
}

fn fill_rect(
    frame: &mut [u8],
    viewport: Viewport,
    center_x: i32,
    center_y: i32,
    half_size: i32,
    color: [u8; 4],
) {
    for y in (center_y - half_size)..=(center_y + half_size) {
        for x in (center_x - half_size)..=(center_x + half_size) {
            put_pixel(frame, viewport, x, y, color);
        }
    }
}

fn put_pixel(frame: &mut [u8], viewport: Viewport, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= viewport.width as i32 || y >= viewport.height as i32 {
        return;
    }
    let index = (y as usize * viewport.width as usize + x as usize) * 4;
    if let Some(pixel) = frame.get_mut(index..index + 4) {
        pixel.copy_from_slice(&color);
    }
}

fn blend_full_screen(frame: &mut [u8], color: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    for chunk in frame.chunks_exact_mut(4) {
        chunk[0] = blend_channel(chunk[0], color[0], alpha);
        chunk[1] = blend_channel(chunk[1], color[1], alpha);
        chunk[2] = blend_channel(chunk[2], color[2], alpha);
        chunk[3] = 255;
    }
}

fn blend_channel(base: u8, overlay: u8, alpha: f32) -> u8 {
    let mixed = base as f32 * (1.0 - alpha) + overlay as f32 * alpha;
    mixed.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_channel_endpoints() {
        assert_eq!(blend_channel(10, 200, 0.0), 10);
        assert_eq!(blend_channel(10, 200, 1.0), 200);
    }

    #[test]
    fn blend_full_screen_is_noop_at_zero_alpha() {
        let mut frame = vec![9u8, 9, 9, 255, 30, 40, 50, 255];
        let original = frame.clone();
        blend_full_screen(&mut frame, FLASH_COLOR, 0.0);
        assert_eq!(frame, original);
    }

    #[test]
    fn blend_full_screen_saturates_alpha_above_one() {
        let mut frame = vec![9u8, 9, 9, 255];
        blend_full_screen(&mut frame, FADE_COLOR, 4.0);
        assert_eq!(&frame[..3], &[0, 0, 0]);
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let viewport = Viewport {
            width: 2,
            height: 2,
        };
        let mut frame = vec![0u8; 16];
        put_pixel(&mut frame, viewport, -1, 0, CAMERA_COLOR);
        put_pixel(&mut frame, viewport, 2, 0, CAMERA_COLOR);
        put_pixel(&mut frame, viewport, 0, 5, CAMERA_COLOR);
        assert!(frame.iter().all(|byte| *byte == 0));
    }
}
