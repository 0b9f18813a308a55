use mood_palette::{
    image::{Rgba, RgbaImage},
    ExtractionStatus, PaletteBuilder, SelectionMode,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn noise(width: u32, height: u32, seed: u64, opaque: bool) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);

    RgbaImage::from_fn(width, height, |_, _| {
        let alpha = if opaque { 255 } else { rng.gen() };
        Rgba([rng.gen(), rng.gen(), rng.gen(), alpha])
    })
}

fn is_hex_color(hex: &str) -> bool {
    hex.len() == 7
        && hex.starts_with('#')
        && hex[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

fn mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![Just(SelectionMode::TopN), Just(SelectionMode::Balanced)]
}

proptest! {
    #[test]
    fn prop_palette_has_target_length_and_valid_hex(
        width in 1u32..80,
        height in 1u32..80,
        seed in any::<u64>(),
        opaque in any::<bool>(),
        count in 1usize..12,
        mode in mode()
    ) {
        let palette = PaletteBuilder::from_image(noise(width, height, seed, opaque))
            .target_count(count)
            .selection_mode(mode)
            .generate()
            .unwrap();

        prop_assert_eq!(palette.colors().len(), count);
        for hex in palette.hex_colors() {
            prop_assert!(is_hex_color(&hex), "malformed color {}", hex);
        }
    }

    #[test]
    fn prop_extraction_is_deterministic(
        width in 1u32..64,
        height in 1u32..64,
        seed in any::<u64>(),
        mode in mode()
    ) {
        let image = noise(width, height, seed, false);

        let first = PaletteBuilder::from_image(image.clone()).selection_mode(mode).generate().unwrap();
        let second = PaletteBuilder::from_image(image).selection_mode(mode).generate().unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_solid_colors_are_idempotent(
        r in 0u8..=255,
        g in 0u8..=255,
        b in 0u8..=255,
        mode in mode()
    ) {
        let brightness = (r as f32 + g as f32 + b as f32) / 3.0;
        prop_assume!((15.0..=240.0).contains(&brightness));

        let image = RgbaImage::from_pixel(50, 40, Rgba([r, g, b, 255]));
        let palette = PaletteBuilder::from_image(image).selection_mode(mode).generate().unwrap();
        let expected = format!("#{r:02X}{g:02X}{b:02X}");

        prop_assert_eq!(palette.status(), ExtractionStatus::Ok);
        for hex in palette.hex_colors() {
            prop_assert_eq!(&hex, &expected);
        }
    }

    #[test]
    fn prop_transparent_images_degrade(
        width in 1u32..64,
        height in 1u32..64,
        alpha in 0u8..128,
        count in 1usize..8
    ) {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 30, 90, alpha]));
        let palette = PaletteBuilder::from_image(image).target_count(count).generate().unwrap();

        prop_assert_eq!(palette.status(), ExtractionStatus::Degraded);
        prop_assert_eq!(palette.hex_colors(), vec!["#808080".to_owned(); count]);
    }
}

#[test]
fn noisy_photo_sized_image_stays_within_bounds() {
    let palette = PaletteBuilder::from_image(noise(640, 480, 7, true))
        .generate()
        .unwrap();

    assert_eq!(palette.status(), ExtractionStatus::Ok);
    assert_eq!(palette.colors().len(), 5);
    // at most one cluster per clustered sample
    assert!(palette.clusters().len() <= mood_palette::DEFAULT_MAX_CLUSTER_SAMPLES);

    let populations = palette.clusters().iter().map(|c| c.population()).collect::<Vec<_>>();
    assert!(populations.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(populations.iter().sum::<u32>() as usize <= mood_palette::DEFAULT_MAX_CLUSTER_SAMPLES);
}
