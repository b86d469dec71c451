//! Property tests for the size-dependent invariants.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use retrocam_core::artifacts::sensor_noise::{
    NoiseMode, NoiseParams, apply_sensor_noise, perturbation_count,
};
use retrocam_core::{Color, OrientationTag, RetroImage, normalize};

fn noise_mode() -> impl Strategy<Value = NoiseMode> {
    prop_oneof![Just(NoiseMode::Binary), Just(NoiseMode::FullRandom)]
}

fn orientation() -> impl Strategy<Value = OrientationTag> {
    prop_oneof![
        Just(OrientationTag::Normal),
        Just(OrientationTag::Rotate90),
        Just(OrientationTag::Rotate180),
        Just(OrientationTag::Rotate270),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn noise_density_never_exceeds_bound(
        width in 1u32..80,
        height in 1u32..80,
        cap_max in 0u32..300,
        divisor in 1u32..64,
        alpha_lo in 1u8..=255,
        mode in noise_mode(),
        seed in any::<u64>(),
    ) {
        let params = NoiseParams {
            cap_max,
            divisor,
            alpha_range: [alpha_lo, 255],
            mode,
        };
        let src = RetroImage::filled(width, height, Color::rgb(128, 128, 128));
        let out = apply_sensor_noise(src.clone(), &params, &mut StdRng::seed_from_u64(seed));

        let bound = perturbation_count(width, height, &params);
        prop_assert!(bound <= cap_max as u64);
        prop_assert!(bound <= (width as u64 * height as u64) / divisor as u64);

        let changed = src.pixels.iter().zip(&out.pixels).filter(|(a, b)| a != b).count();
        prop_assert!(changed as u64 <= bound, "changed {} > bound {}", changed, bound);
        prop_assert!(out.pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn rotation_dimensions_follow_tag(
        width in 1u32..48,
        height in 1u32..48,
        tag in orientation(),
    ) {
        let out = normalize(RetroImage::filled(width, height, Color::WHITE), tag);
        let expected = match tag {
            OrientationTag::Normal | OrientationTag::Rotate180 => (width, height),
            OrientationTag::Rotate90 | OrientationTag::Rotate270 => (height, width),
        };
        prop_assert_eq!((out.width, out.height), expected);
        prop_assert_eq!(out.pixels.len(), (width * height) as usize);
    }

    #[test]
    fn four_quarter_turns_are_identity(width in 1u32..24, height in 1u32..24, seed in any::<u8>()) {
        let mut src = RetroImage::filled(width, height, Color::BLACK);
        for (i, px) in src.pixels.iter_mut().enumerate() {
            *px = [(i as u8).wrapping_mul(31).wrapping_add(seed), i as u8, seed, 255];
        }
        let mut img = src.clone();
        for _ in 0..4 {
            img = normalize(img, OrientationTag::Rotate90);
        }
        prop_assert_eq!(img, src);
    }
}
