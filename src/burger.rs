use anyhow::Context;
use image::{imageops, RgbaImage};

// Vertical layout of the composite: top bun, gap, name text slot, gap, bottom bun.
pub const GAP_TOP: u32 = 10;
pub const GAP_BOTTOM: u32 = 10;
pub const TEXT_HEIGHT: u32 = 25;

pub struct BurgerSprite {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
    // From the sprite center to the center of the text slot
    pub text_offset_y: i32,
}

impl BurgerSprite {
    pub fn load(top_path: &str, bottom_path: &str) -> anyhow::Result<Self> {
        let top = image::open(top_path)
            .with_context(|| format!("failed to load {top_path}"))?
            .to_rgba8();
        let bottom = image::open(bottom_path)
            .with_context(|| format!("failed to load {bottom_path}"))?
            .to_rgba8();
        Ok(Self::compose(&top, &bottom))
    }

    pub fn compose(top: &RgbaImage, bottom: &RgbaImage) -> Self {
        let top = trim_transparent(top);
        let bottom = trim_transparent(bottom);

        let width = top.width().max(bottom.width());
        let height = top.height() + GAP_TOP + TEXT_HEIGHT + GAP_BOTTOM + bottom.height();

        let mut image = RgbaImage::new(width, height);
        let top_x = (width - top.width()) / 2;
        let bottom_x = (width - bottom.width()) / 2;
        let bottom_y = top.height() + GAP_TOP + TEXT_HEIGHT + GAP_BOTTOM;
        imageops::overlay(&mut image, &top, top_x as i64, 0);
        imageops::overlay(&mut image, &bottom, bottom_x as i64, bottom_y as i64);

        // Floor division: the center of an odd-height composite rounds up
        let text_offset_y = (-(height as i32)).div_euclid(2)
            + top.height() as i32
            + GAP_TOP as i32
            + (TEXT_HEIGHT / 2) as i32;

        Self {
            image,
            width,
            height,
            text_offset_y,
        }
    }
}

// Crop to the smallest box containing non-transparent pixels.
// A fully transparent image is returned unchanged.
pub fn trim_transparent(img: &RgbaImage) -> RgbaImage {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] != 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if min_x == u32::MAX {
        return img.clone();
    }
    imageops::crop_imm(img, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 150, 80, 255]))
    }

    fn with_transparent_border(w: u32, h: u32, pad: u32) -> RgbaImage {
        let mut img = RgbaImage::new(w + 2 * pad, h + 2 * pad);
        imageops::overlay(&mut img, &opaque(w, h), pad as i64, pad as i64);
        img
    }

    #[test]
    fn trim_crops_to_opaque_content() {
        let img = with_transparent_border(30, 12, 7);
        let trimmed = trim_transparent(&img);
        assert_eq!((trimmed.width(), trimmed.height()), (30, 12));
        assert_eq!(trimmed.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn trim_leaves_fully_transparent_image_alone() {
        let img = RgbaImage::new(8, 8);
        let trimmed = trim_transparent(&img);
        assert_eq!((trimmed.width(), trimmed.height()), (8, 8));
    }

    #[test]
    fn composite_dimensions_follow_layout() {
        let top = opaque(100, 17);
        let bottom = opaque(60, 18);
        let burger = BurgerSprite::compose(&top, &bottom);
        assert_eq!(burger.width, 100);
        assert_eq!(burger.height, 17 + 10 + 25 + 10 + 18);
    }

    #[test]
    fn buns_are_trimmed_before_stacking() {
        let top = with_transparent_border(100, 17, 9);
        let bottom = with_transparent_border(60, 18, 4);
        let burger = BurgerSprite::compose(&top, &bottom);
        assert_eq!(burger.width, 100);
        assert_eq!(burger.height, 80);
    }

    #[test]
    fn narrower_bun_is_centered() {
        let top = opaque(100, 17);
        let bottom = opaque(60, 18);
        let burger = BurgerSprite::compose(&top, &bottom);
        let bottom_y = 17 + 10 + 25 + 10;
        // 20 px of transparent margin on each side of the bottom bun
        assert_eq!(burger.image.get_pixel(19, bottom_y).0[3], 0);
        assert_eq!(burger.image.get_pixel(20, bottom_y).0[3], 255);
        assert_eq!(burger.image.get_pixel(80, bottom_y).0[3], 0);
        // text slot stays transparent
        assert_eq!(burger.image.get_pixel(50, 17 + 10 + 12).0[3], 0);
    }

    #[test]
    fn text_offset_centers_on_the_slot() {
        // even height: 17 + 45 + 18 = 80
        let burger = BurgerSprite::compose(&opaque(100, 17), &opaque(100, 18));
        assert_eq!(burger.text_offset_y, -40 + 17 + 10 + 12);

        // odd height floors toward negative: 16 + 45 + 16 = 77
        let burger = BurgerSprite::compose(&opaque(100, 16), &opaque(100, 16));
        assert_eq!(burger.text_offset_y, -39 + 16 + 10 + 12);
    }
}
