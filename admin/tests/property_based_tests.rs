use admin::theme::color::{
    Rgb, derive_secondary, hex_to_rgb, hsl_to_rgb, lighten, rgb_to_hex, rgb_to_hsl,
};
use admin::theme::palette::DerivedPalette;
use proptest::prelude::*;

fn any_rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

#[cfg(test)]
mod hex_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_hex_round_trip(rgb in any_rgb()) {
            let hex = rgb.to_hex();

            // Property: canonical form is '#' plus six lowercase digits
            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex.starts_with('#'));
            prop_assert_eq!(hex.to_lowercase(), hex.clone());

            prop_assert_eq!(hex_to_rgb(&hex), rgb);
            prop_assert_eq!(hex_to_rgb(&hex.to_uppercase()), rgb);
        }

        #[test]
        fn test_rgb_to_hex_always_clamps(
            r in -1000i32..1000,
            g in -1000i32..1000,
            b in -1000i32..1000
        ) {
            let rgb = hex_to_rgb(&rgb_to_hex(r, g, b));

            prop_assert_eq!(i32::from(rgb.r), r.clamp(0, 255));
            prop_assert_eq!(i32::from(rgb.g), g.clamp(0, 255));
            prop_assert_eq!(i32::from(rgb.b), b.clamp(0, 255));
        }

        #[test]
        fn test_arbitrary_text_never_panics(input in ".*") {
            // Property: parsing is total; anything unparseable is black
            let rgb = hex_to_rgb(&input);
            if Rgb::parse(&input).is_none() {
                prop_assert_eq!(rgb, Rgb::BLACK);
            }
        }
    }
}

#[cfg(test)]
mod derivation_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_lighten_never_darkens(rgb in any_rgb(), amount in 0i32..256) {
            let lighter = hex_to_rgb(&lighten(&rgb.to_hex(), amount));

            prop_assert!(lighter.r >= rgb.r);
            prop_assert!(lighter.g >= rgb.g);
            prop_assert!(lighter.b >= rgb.b);
        }

        #[test]
        fn test_hsl_round_trip_is_close(rgb in any_rgb()) {
            let back = hsl_to_rgb(rgb_to_hsl(rgb));

            // Property: conversion loses at most one step per channel
            prop_assert!((i16::from(back.r) - i16::from(rgb.r)).abs() <= 1);
            prop_assert!((i16::from(back.g) - i16::from(rgb.g)).abs() <= 1);
            prop_assert!((i16::from(back.b) - i16::from(rgb.b)).abs() <= 1);
        }

        #[test]
        fn test_secondary_is_never_lighter(rgb in any_rgb()) {
            let pair = derive_secondary(rgb);
            let primary = rgb_to_hsl(rgb);
            let secondary = rgb_to_hsl(pair.secondary);

            prop_assert!(secondary.l <= primary.l * 0.60 + 2.0 / 255.0);
            prop_assert!(pair.secondary_dark.r <= pair.secondary.r);
            prop_assert!(pair.secondary_dark.g <= pair.secondary.g);
            prop_assert!(pair.secondary_dark.b <= pair.secondary.b);
        }

        #[test]
        fn test_palette_is_a_pure_function_of_accent(rgb in any_rgb()) {
            let first = DerivedPalette::from_accent(rgb);
            let second = DerivedPalette::from_accent(hex_to_rgb(&rgb.to_hex()));

            prop_assert_eq!(first, second);
            prop_assert_eq!(first.primary, rgb);
        }
    }
}
