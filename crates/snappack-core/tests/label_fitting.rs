use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng, rngs::StdRng};
use snappack_core::label::{
    MIN_FONT_PX, draw_label, fit_font_px, initial_font_px, max_shrink_steps, normalize_label,
};
use snappack_core::model::Rect;
use std::cell::Cell;

fn advance(text: &str, px: f32) -> f32 {
    text.chars().count() as f32 * px * 0.6
}

#[test]
fn short_name_keeps_initial_size() {
    assert_eq!(fit_font_px("ANA", 413, 69, advance), 36);
}

#[test]
fn wide_name_shrinks_in_steps_of_two() {
    // 20 chars: 12 px per px of size, limit 393 -> 32 is the first that fits (384)
    let text = "ABCDEFGHIJKLMNOPQRST";
    assert_eq!(fit_font_px(text, 413, 69, advance), 32);
}

#[test]
fn overflow_at_floor_is_accepted() {
    let text = "X".repeat(60);
    assert_eq!(fit_font_px(&text, 413, 69, advance), MIN_FONT_PX);
}

#[test]
fn any_name_up_to_sixty_chars_gets_at_least_floor_size() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let len = rng.gen_range(1..=60);
        let text: String = (0..len).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();
        let per_char = rng.gen_range(0.2f32..1.2);
        let size = fit_font_px(&text, 413, 69, |t, px| t.len() as f32 * px * per_char);
        assert!(size >= MIN_FONT_PX && size <= 36, "{text}: {size}");
    }
}

#[test]
fn measuring_is_bounded_even_if_width_never_shrinks() {
    let calls = Cell::new(0u32);
    let size = fit_font_px("ANYTHING", 413, 69, |_, _| {
        calls.set(calls.get() + 1);
        f32::INFINITY
    });
    assert_eq!(size, MIN_FONT_PX);
    assert_eq!(calls.get(), max_shrink_steps(initial_font_px(69)));
}

#[test]
fn normalize_handles_unicode() {
    assert_eq!(normalize_label("josé niño", 60).as_deref(), Some("JOSÉ NIÑO"));
    assert_eq!(normalize_label("ab cd", 3).as_deref(), Some("AB"));
}

#[test]
fn label_strip_is_painted_white_without_face() {
    let mut canvas = RgbImage::from_pixel(40, 20, Rgb([0, 0, 0]));
    draw_label(&mut canvas, &Rect::new(5, 5, 30, 10), Some("NAME"), None, Rgb([17, 17, 17]));
    assert_eq!(canvas.get_pixel(5, 5).0, [255, 255, 255]);
    assert_eq!(canvas.get_pixel(34, 14).0, [255, 255, 255]);
    assert_eq!(canvas.get_pixel(4, 5).0, [0, 0, 0]);
    assert_eq!(canvas.get_pixel(35, 14).0, [0, 0, 0]);
}
