use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_source")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(path: &Path, w: u32, h: u32, shade: u8) {
    image::RgbImage::from_pixel(w, h, image::Rgb([shade, shade, shade]))
        .save(path)
        .unwrap();
}

fn write_gif(path: &Path, frames: usize) {
    let file = std::fs::File::create(path).unwrap();
    let mut enc = image::codecs::gif::GifEncoder::new(file);
    enc.encode_frames((0..frames).map(|_| {
        image::Frame::new(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([0, 255, 0, 255]),
        ))
    }))
    .unwrap();
}

fn shades(images: &[Bitmap]) -> Vec<u8> {
    images.iter().map(|b| b.pixel(0, 0)[0]).collect()
}

#[test]
fn directory_images_load_in_natural_order() {
    let dir = scratch_dir("natural");
    write_png(&dir.join("p10.png"), 4, 4, 30);
    write_png(&dir.join("p2.png"), 4, 4, 20);
    write_png(&dir.join("p1.png"), 4, 4, 10);

    let (images, report) = load_images(&[dir.clone()], &SourceOpts::default()).unwrap();
    assert_eq!(shades(&images), vec![10, 20, 30]);
    assert_eq!(report.images, 3);

    let reversed = SourceOpts {
        reverse: true,
        ..SourceOpts::default()
    };
    let (images, _) = load_images(&[dir], &reversed).unwrap();
    assert_eq!(shades(&images), vec![30, 20, 10]);
}

#[test]
fn directory_gifs_are_opt_in() {
    let dir = scratch_dir("gifs");
    write_png(&dir.join("a1.png"), 4, 4, 10);
    write_gif(&dir.join("a2.gif"), 3);

    let (images, report) = load_images(&[dir.clone()], &SourceOpts::default()).unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(report.skipped_gifs.len(), 1);

    let with_gifs = SourceOpts {
        render_gifs: true,
        ..SourceOpts::default()
    };
    let (images, _) = load_images(&[dir], &with_gifs).unwrap();
    assert_eq!(images.len(), 4);
}

#[test]
fn broken_files_are_omitted() {
    let dir = scratch_dir("broken");
    write_png(&dir.join("1.png"), 4, 4, 10);
    std::fs::write(dir.join("2.png"), b"garbage").unwrap();
    write_png(&dir.join("3.png"), 4, 4, 30);

    let (images, report) = load_images(&[dir.clone()], &SourceOpts::default()).unwrap();
    assert_eq!(shades(&images), vec![10, 30]);
    assert_eq!(report.failed, vec![dir.join("2.png")]);
}

#[test]
fn inputs_are_concatenated_in_argument_order() {
    let a = scratch_dir("concat_a");
    let b = scratch_dir("concat_b");
    write_png(&a.join("x.png"), 4, 4, 1);
    write_png(&b.join("y.png"), 4, 4, 2);
    let single = b.join("y.png");

    let (images, _) = load_images(&[b, a, single], &SourceOpts::default()).unwrap();
    assert_eq!(shades(&images), vec![2, 1, 2]);
}

#[test]
fn nothing_loaded_is_a_precondition_error() {
    let dir = scratch_dir("empty");
    std::fs::write(dir.join("readme.txt"), b"hi").unwrap();
    let err = load_images(&[dir], &SourceOpts::default()).unwrap_err();
    assert!(matches!(err, PtvError::Precondition(_)));
}

#[test]
fn missing_or_unsupported_inputs_are_source_errors() {
    let err = load_images(
        &[PathBuf::from("target/unit_source/does_not_exist.pdf")],
        &SourceOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PtvError::Source(_)));

    let dir = scratch_dir("unsupported");
    let txt = dir.join("notes.txt");
    std::fs::write(&txt, b"hi").unwrap();
    let err = load_images(&[txt], &SourceOpts::default()).unwrap_err();
    assert!(matches!(err, PtvError::Source(_)));
}

#[test]
fn auto_resolution_fills_only_missing_dimensions() {
    let first = Bitmap::black(801, 600);
    assert_eq!(auto_resolution(0, 0, &first), (802, 600));
    assert_eq!(auto_resolution(1280, 0, &first), (1280, 600));
    assert_eq!(auto_resolution(0, 720, &first), (802, 720));
    assert_eq!(auto_resolution(640, 480, &first), (640, 480));
}

#[test]
fn scaling_follows_the_mode_and_keeps_order() {
    let images = vec![
        Bitmap::filled(200, 100, [1, 1, 1]),
        Bitmap::filled(50, 100, [2, 2, 2]),
    ];

    let width = scale_images(images.clone(), ScaleMode::Width, 100, 80);
    assert_eq!(
        width.iter().map(|b| (b.width, b.height)).collect::<Vec<_>>(),
        vec![(100, 50), (100, 200)]
    );
    assert_eq!(shades(&width), vec![1, 2]);

    let height = scale_images(images.clone(), ScaleMode::Height, 100, 80);
    assert_eq!(
        height.iter().map(|b| (b.width, b.height)).collect::<Vec<_>>(),
        vec![(160, 80), (40, 80)]
    );

    let fit = scale_images(images, ScaleMode::Fit, 100, 80);
    assert_eq!(
        fit.iter().map(|b| (b.width, b.height)).collect::<Vec<_>>(),
        vec![(100, 50), (40, 80)]
    );
}
