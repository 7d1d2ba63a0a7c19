//! Geometry properties checked over grids of source and target sizes.
//!
//! The unit tests pin exact values; these sweep many shapes (landscape,
//! portrait, square, extreme ratios, up- and downscaling) to check the
//! relationships that must hold for every input.

use da_vinci::imaging::{
    Center, Length, ResizeMethod, Size, calculate_crop_box, calculate_dimensions, resolve_length,
};

const EXTENTS: &[u32] = &[1, 2, 3, 7, 10, 99, 100, 101, 333, 640, 1000, 1920, 4000];

fn sizes() -> impl Iterator<Item = Size> {
    EXTENTS
        .iter()
        .flat_map(|&w| EXTENTS.iter().map(move |&h| Size::new(w, h)))
}

fn within_one(a: u32, b: u32) -> bool {
    a.abs_diff(b) <= 1
}

// =========================================================================
// Resize
// =========================================================================

#[test]
fn stretch_returns_request_for_every_source() {
    for source in sizes() {
        for target in sizes() {
            let result = calculate_dimensions(
                Some(target.width),
                Some(target.height),
                source,
                ResizeMethod::Stretch,
            )
            .unwrap();
            assert_eq!(result, target, "source {source}");
        }
    }
}

#[test]
fn stretch_to_current_size_is_identity() {
    for source in sizes() {
        let result = calculate_dimensions(
            Some(source.width),
            Some(source.height),
            source,
            ResizeMethod::Stretch,
        )
        .unwrap();
        assert_eq!(result, source);
    }
}

#[test]
fn fit_stays_inside_box_and_touches_one_side() {
    for source in sizes() {
        for target in sizes() {
            let result = calculate_dimensions(
                Some(target.width),
                Some(target.height),
                source,
                ResizeMethod::Fit,
            )
            .unwrap();
            let ctx = format!("fit {source} into {target} gave {result}");

            assert!(result.width <= target.width, "{ctx}");
            assert!(result.height <= target.height, "{ctx}");
            assert!(
                within_one(result.width, target.width) || within_one(result.height, target.height),
                "{ctx}"
            );
        }
    }
}

#[test]
fn fill_covers_box_and_touches_one_side() {
    for source in sizes() {
        for target in sizes() {
            let result = calculate_dimensions(
                Some(target.width),
                Some(target.height),
                source,
                ResizeMethod::Fill,
            )
            .unwrap();
            let ctx = format!("fill {target} from {source} gave {result}");

            assert!(result.width + 1 >= target.width, "{ctx}");
            assert!(result.height + 1 >= target.height, "{ctx}");
            assert!(
                within_one(result.width, target.width) || within_one(result.height, target.height),
                "{ctx}"
            );
        }
    }
}

#[test]
fn fit_and_fill_preserve_aspect_ratio() {
    for source in sizes() {
        for target in [Size::new(200, 200), Size::new(800, 450), Size::new(300, 1200)] {
            for method in [ResizeMethod::Fit, ResizeMethod::Fill] {
                let result = calculate_dimensions(
                    Some(target.width),
                    Some(target.height),
                    source,
                    method,
                )
                .unwrap();
                if result.width < 20 || result.height < 20 {
                    // rounding dominates at tiny sizes
                    continue;
                }
                let drift = (result.aspect_ratio() - source.aspect_ratio()).abs()
                    / source.aspect_ratio();
                assert!(
                    drift < 0.06,
                    "{method:?} {source} -> {result} (target {target}) drift {drift}"
                );
            }
        }
    }
}

#[test]
fn derived_axis_follows_source_ratio() {
    for source in sizes() {
        for &present in EXTENTS {
            let by_width =
                calculate_dimensions(Some(present), None, source, ResizeMethod::Stretch).unwrap();
            assert_eq!(by_width.width, present);
            let expected = (f64::from(present) * f64::from(source.height) / f64::from(source.width))
                .round()
                .max(1.0) as u32;
            assert!(
                within_one(by_width.height, expected),
                "width {present} from {source} gave {by_width}, expected height ~{expected}"
            );

            let by_height =
                calculate_dimensions(None, Some(present), source, ResizeMethod::Fit).unwrap();
            assert_eq!(by_height.height, present);
            let expected = (f64::from(present) * f64::from(source.width) / f64::from(source.height))
                .round()
                .max(1.0) as u32;
            assert!(
                within_one(by_height.width, expected),
                "height {present} from {source} gave {by_height}, expected width ~{expected}"
            );
        }
    }
}

#[test]
fn results_are_never_empty() {
    for source in sizes() {
        for target in sizes() {
            for method in [ResizeMethod::Stretch, ResizeMethod::Fit, ResizeMethod::Fill] {
                let result = calculate_dimensions(
                    Some(target.width),
                    Some(target.height),
                    source,
                    method,
                )
                .unwrap();
                assert!(!result.is_empty(), "{method:?} {source} -> {target}");
            }
        }
    }
}

// =========================================================================
// Length resolution
// =========================================================================

#[test]
fn percentages_scale_linearly() {
    for &total in EXTENTS {
        let total = i64::from(total);
        assert_eq!(resolve_length(Length::Percent(0.0), total).unwrap(), 0);
        assert_eq!(resolve_length(Length::Percent(100.0), total).unwrap(), total);
        assert_eq!(resolve_length(Length::Percent(200.0), total).unwrap(), total * 2);
        assert_eq!(resolve_length(Length::Pixels(30), total).unwrap(), 30);
    }
}

// =========================================================================
// Crop
// =========================================================================

fn centers() -> Vec<Center> {
    let lengths = [
        Length::Percent(0.0),
        Length::Percent(25.0),
        Length::Percent(50.0),
        Length::Percent(100.0),
        Length::Percent(150.0),
        Length::Pixels(0),
        Length::Pixels(17),
        Length::Pixels(5000),
    ];
    lengths
        .iter()
        .flat_map(|&x| lengths.iter().map(move |&y| Center::new(x, y)))
        .collect()
}

#[test]
fn crop_box_is_always_inside_source() {
    let crops = [Size::new(1, 1), Size::new(40, 40), Size::new(150, 90), Size::new(5000, 3)];
    for source in sizes() {
        for crop in crops {
            for center in centers() {
                let b = calculate_crop_box(crop.width, crop.height, source, center).unwrap();
                let ctx = format!("crop {crop} at {center} from {source} gave {b}");

                assert!(b.left < b.right && b.top < b.bottom, "{ctx}");
                assert!(b.right <= source.width && b.bottom <= source.height, "{ctx}");
                assert_eq!(b.width(), crop.width.min(source.width), "{ctx}");
                assert_eq!(b.height(), crop.height.min(source.height), "{ctx}");
            }
        }
    }
}

#[test]
fn centered_crop_is_nearly_symmetric() {
    // Rounding the center and halving the length can each shift the box by one
    for source in sizes() {
        let crop = Size::new(source.width / 2 + 1, source.height / 2 + 1);
        let b = calculate_crop_box(crop.width, crop.height, source, Center::default()).unwrap();
        let left_margin = b.left;
        let right_margin = source.width - b.right;
        assert!(left_margin.abs_diff(right_margin) <= 2, "{source}: {b}");
        let top_margin = b.top;
        let bottom_margin = source.height - b.bottom;
        assert!(top_margin.abs_diff(bottom_margin) <= 2, "{source}: {b}");
    }
}

#[test]
fn fill_then_crop_produces_exact_target() {
    for source in sizes() {
        for target in [Size::new(100, 100), Size::new(400, 500), Size::new(1920, 1080)] {
            let filled = calculate_dimensions(
                Some(target.width),
                Some(target.height),
                source,
                ResizeMethod::Fill,
            )
            .unwrap();
            let b = calculate_crop_box(target.width, target.height, filled, Center::default())
                .unwrap();
            assert!(
                within_one(b.width(), target.width) && within_one(b.height(), target.height),
                "{source} filled to {filled}, crop {b}"
            );
        }
    }
}
