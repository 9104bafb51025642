use crate::burger::BurgerSprite;
use crate::fonts::draw_text_centered;
use image::RgbaImage;
use rand::Rng;
use winit::event::VirtualKeyCode;

pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;

const TOP_BUN_PATH: &str = "image/top_buns.png";
const BOTTOM_BUN_PATH: &str = "image/bottom_buns.png";

const NAME: &str = "ange delfin";
const NAME_SCALE: i32 = 3;
const STATUS_SCALE: i32 = 2;
const STATUS_Y: i32 = 30;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RUNNING_GREEN: [u8; 4] = [0, 128, 0, 255];
const PAUSED_RED: [u8; 4] = [255, 0, 0, 255];

pub struct Game {
    pub x: f32,
    pub y: f32,
    pub dx: i32,
    pub dy: i32,
    pub paused: bool,
    pub text_color: [u8; 4],
    pub bg_color: [u8; 4],
    pub burger: BurgerSprite,
    half_w: i32,
    half_h: i32,
}

impl Game {
    pub fn new() -> anyhow::Result<Self> {
        let burger = BurgerSprite::load(TOP_BUN_PATH, BOTTOM_BUN_PATH)?;
        log::info!(
            "burger sprite composited: {}x{}, label offset {}",
            burger.width,
            burger.height,
            burger.text_offset_y
        );
        Ok(Self::with_burger(burger))
    }

    fn with_burger(burger: BurgerSprite) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: 200.0,
            y: 200.0,
            dx: 5,
            dy: 4,
            paused: false,
            text_color: random_color(&mut rng),
            bg_color: WHITE,
            half_w: burger.width as i32 / 2,
            half_h: burger.height as i32 / 2,
            burger,
        }
    }

    pub fn on_key(&mut self, key: VirtualKeyCode, pressed: bool) {
        if pressed && key == VirtualKeyCode::Space {
            self.toggle_pause();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("{}", if self.paused { "paused" } else { "running" });
    }

    // One timer tick: paused skips the advance, the timer itself never stops.
    pub fn tick(&mut self) {
        if !self.paused {
            self.move_burger();
        }
    }

    fn move_burger(&mut self) {
        self.x += self.dx as f32;
        self.y += self.dy as f32;
        let mut hit_edge = false;

        let min_x = self.half_w as f32;
        let max_x = (WINDOW_WIDTH - self.half_w) as f32;
        if self.x <= min_x {
            self.x = min_x;
            self.dx = -self.dx;
            hit_edge = true;
        } else if self.x >= max_x {
            self.x = max_x;
            self.dx = -self.dx;
            hit_edge = true;
        }

        let min_y = self.half_h as f32;
        let max_y = (WINDOW_HEIGHT - self.half_h) as f32;
        if self.y <= min_y {
            self.y = min_y;
            self.dy = -self.dy;
            hit_edge = true;
        } else if self.y >= max_y {
            self.y = max_y;
            self.dy = -self.dy;
            hit_edge = true;
        }

        // One re-roll per tick, even on a corner hit
        if hit_edge {
            let mut rng = rand::thread_rng();
            self.text_color = random_color(&mut rng);
            self.bg_color = random_color(&mut rng);
        }
    }

    pub fn status(&self) -> (&'static str, [u8; 4]) {
        if self.paused {
            ("⏸ PAUSED", PAUSED_RED)
        } else {
            ("▶ RUNNING", RUNNING_GREEN)
        }
    }

    pub fn render(&self, frame: &mut [u8], w: i32, h: i32) {
        fill(frame, w, h, self.bg_color);

        blit_image(
            frame,
            w,
            h,
            &self.burger.image,
            self.x as i32 - self.half_w,
            self.y as i32 - self.half_h,
        );

        draw_text_centered(
            frame,
            w,
            h,
            self.x as i32,
            self.y as i32 + self.burger.text_offset_y,
            NAME,
            NAME_SCALE,
            self.text_color,
        );

        // Status last, so it stays on top of the sprite
        let (text, color) = self.status();
        draw_text_centered(frame, w, h, w / 2, STATUS_Y, text, STATUS_SCALE, color);
    }
}

// Uniform draw over the full 24-bit color space, always opaque
pub fn random_color(rng: &mut impl Rng) -> [u8; 4] {
    let rgb: u32 = rng.gen_range(0..=0xFFFFFF);
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]
}

fn fill(frame: &mut [u8], w: i32, h: i32, color: [u8; 4]) {
    for px in frame.chunks_exact_mut(4).take((w * h) as usize) {
        px.copy_from_slice(&color);
    }
}

fn blit_image(frame: &mut [u8], w: i32, h: i32, img: &RgbaImage, ox: i32, oy: i32) {
    for (sx, sy, px) in img.enumerate_pixels() {
        let a = px.0[3] as u32;
        if a == 0 {
            continue;
        }
        let x = ox + sx as i32;
        let y = oy + sy as i32;
        if x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        let idx = ((y * w + x) * 4) as usize;
        if a == 255 {
            frame[idx..idx + 4].copy_from_slice(&px.0);
        } else {
            for c in 0..3 {
                let src = px.0[c] as u32;
                let dst = frame[idx + c] as u32;
                frame[idx + c] = ((src * a + dst * (255 - a)) / 255) as u8;
            }
            frame[idx + 3] = 255;
        }
    }
}
