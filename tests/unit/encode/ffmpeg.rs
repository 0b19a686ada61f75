use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_encode")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn cfg(width: u32, height: u32, fps: f64) -> SinkConfig {
    SinkConfig { width, height, fps }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(validate_config(&cfg(0, 10, 30.0)).is_err());
    assert!(validate_config(&cfg(11, 10, 30.0)).is_err());
    assert!(validate_config(&cfg(10, 10, 0.0)).is_err());
    assert!(validate_config(&cfg(10, 10, f64::INFINITY)).is_err());
    assert!(validate_config(&cfg(10, 10, 0.5)).is_ok());
}

#[test]
fn begin_refuses_to_replace_an_existing_file() {
    let dir = scratch_dir("no_overwrite");
    let out = dir.join("taken.mp4");
    std::fs::write(&out, b"keep").unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    let err = sink.begin(cfg(16, 16, 1.0)).unwrap_err();
    assert!(matches!(err, PtvError::Validation(_)));
    assert_eq!(std::fs::read(&out).unwrap(), b"keep");
}

#[test]
fn push_before_begin_is_an_encode_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/unit_encode/never.mp4"));
    let err = sink
        .push_frame(FrameIndex(0), &Bitmap::black(16, 16))
        .unwrap_err();
    assert!(matches!(err, PtvError::Encode(_)));
}

#[test]
fn default_output_path_follows_the_first_input() {
    assert_eq!(
        default_output_path(Path::new("docs/report.pdf")),
        PathBuf::from("docs/report.mp4")
    );
    let dir = scratch_dir("pages");
    assert_eq!(
        default_output_path(&dir),
        dir.parent().unwrap().join("pages.mp4")
    );
}

#[test]
fn unique_output_path_appends_a_counter() {
    let dir = scratch_dir("unique");
    let base = dir.join("movie.mp4");
    assert_eq!(unique_output_path(&base), base);

    std::fs::write(&base, b"").unwrap();
    assert_eq!(unique_output_path(&base), dir.join("movie_1.mp4"));

    std::fs::write(dir.join("movie_1.mp4"), b"").unwrap();
    assert_eq!(unique_output_path(&base), dir.join("movie_2.mp4"));
}

#[test]
fn encodes_frames_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = scratch_dir("encode");
    let out = dir.join("clip.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: out.clone(),
        overwrite: true,
    });
    sink.begin(cfg(16, 16, 2.0)).unwrap();
    for i in 0..4u8 {
        sink.push_frame(FrameIndex(u64::from(i)), &Bitmap::filled(16, 16, [i * 60, 0, 0]))
            .unwrap();
    }
    sink.end().unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn rejects_out_of_order_frames_and_abort_removes_output() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = scratch_dir("abort");
    let out = dir.join("partial.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16, 1.0)).unwrap();
    sink.push_frame(FrameIndex(0), &Bitmap::black(16, 16)).unwrap();
    assert!(
        sink.push_frame(FrameIndex(2), &Bitmap::black(16, 16))
            .is_err()
    );
    assert!(
        sink.push_frame(FrameIndex(1), &Bitmap::black(8, 8))
            .is_err()
    );
    sink.abort();
    assert!(!out.exists());
}
