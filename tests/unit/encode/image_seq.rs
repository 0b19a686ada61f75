use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_image_seq")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn file_names_are_one_based_and_padded() {
    assert_eq!(
        ImageSequenceSink::frame_file_name(FrameIndex(0)),
        "frame000001.jpg"
    );
    assert_eq!(
        ImageSequenceSink::frame_file_name(FrameIndex(41)),
        "frame000042.jpg"
    );
}

#[test]
fn writes_decodable_jpegs_in_order() {
    let dir = scratch_dir("write");
    let mut sink = ImageSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 8,
        height: 6,
        fps: 1.0,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &Bitmap::filled(8, 6, [200, 200, 200]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &Bitmap::black(8, 6)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    let first = image::open(dir.join("frame000001.jpg")).unwrap().to_rgb8();
    assert_eq!(first.dimensions(), (8, 6));
    assert!(first.get_pixel(4, 3)[0] > 150);
}

#[test]
fn rejects_gaps_and_wrong_sizes() {
    let dir = scratch_dir("reject");
    let mut sink = ImageSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: 1.0,
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(1), &Bitmap::black(4, 4)).is_err());
    assert!(sink.push_frame(FrameIndex(0), &Bitmap::black(2, 4)).is_err());
}

#[test]
fn abort_removes_written_frames() {
    let dir = scratch_dir("abort");
    let mut sink = ImageSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 4,
        height: 4,
        fps: 1.0,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &Bitmap::black(4, 4)).unwrap();
    assert!(dir.join("frame000001.jpg").exists());
    sink.abort();
    assert!(!dir.join("frame000001.jpg").exists());
}
