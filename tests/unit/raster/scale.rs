use super::*;

#[test]
fn scale_to_width_preserves_aspect() {
    let out = scale_to_width(Bitmap::filled(200, 100, [9, 9, 9]), 64);
    assert_eq!((out.width, out.height), (64, 32));
    assert!(out.is_uniform([9, 9, 9]));
}

#[test]
fn scale_to_height_preserves_aspect() {
    let out = scale_to_height(Bitmap::filled(100, 200, [1, 2, 3]), 50);
    assert_eq!((out.width, out.height), (25, 50));
}

#[test]
fn scale_to_fit_picks_the_limiting_axis() {
    let wide = scale_to_fit(Bitmap::black(400, 100), 200, 200);
    assert_eq!((wide.width, wide.height), (200, 50));

    let tall = scale_to_fit(Bitmap::black(100, 400), 200, 200);
    assert_eq!((tall.width, tall.height), (50, 200));

    let small = scale_to_fit(Bitmap::black(10, 5), 100, 100);
    assert_eq!((small.width, small.height), (100, 50));
}

#[test]
fn tiny_results_never_collapse_to_zero() {
    let out = scale_to_width(Bitmap::black(1000, 1), 10);
    assert_eq!((out.width, out.height), (10, 1));
}

#[test]
fn matching_size_is_returned_unchanged() {
    let src = Bitmap::filled(64, 10, [5, 6, 7]);
    let out = scale_to_width(src.clone(), 64);
    assert_eq!(out, src);
}

#[test]
fn empty_images_take_the_target_cross_size() {
    let out = scale_to_width(Bitmap::black(0, 0), 64);
    assert_eq!((out.width, out.height), (64, 0));
    let out = scale_to_height(Bitmap::black(30, 0), 16);
    assert_eq!((out.width, out.height), (0, 16));
}
