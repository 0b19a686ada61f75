use super::*;
use crate::encode::sink::InMemorySink;

fn viewport(fps: f64, spp: f64, duration: f64) -> Viewport {
    Viewport::new(10, 8, fps, spp, duration).unwrap()
}

#[test]
fn small_slack_is_not_centred() {
    assert_eq!(centre_offset(10, 10), 0);
    assert_eq!(centre_offset(10, 9), 0);
    assert_eq!(centre_offset(10, 8), 1);
    assert_eq!(centre_offset(10, 3), 3);
}

#[test]
fn compose_centres_on_black() {
    let comp = FramesCompositor::new(viewport(1.0, 1.0, 0.0)).unwrap();
    let canvas = comp.compose(&Bitmap::filled(4, 8, [9, 9, 9])).unwrap();
    assert_eq!((canvas.width, canvas.height), (10, 8));
    assert_eq!(canvas.pixel(2, 4), [0, 0, 0]);
    assert_eq!(canvas.pixel(3, 0), [9, 9, 9]);
    assert_eq!(canvas.pixel(6, 7), [9, 9, 9]);
    assert_eq!(canvas.pixel(7, 7), [0, 0, 0]);
}

#[test]
fn oversized_image_is_rejected() {
    let comp = FramesCompositor::new(viewport(1.0, 1.0, 0.0)).unwrap();
    assert!(comp.compose(&Bitmap::black(12, 8)).is_err());
}

#[test]
fn each_image_is_held_for_its_share_of_frames() {
    let comp = FramesCompositor::new(viewport(4.0, 0.5, 30.0)).unwrap();
    assert_eq!(comp.frames_per_item(), 2);

    let mut sink = InMemorySink::new();
    let images = vec![Bitmap::filled(10, 8, [1, 1, 1]), Bitmap::filled(10, 8, [2, 2, 2])];
    let stats = comp.run(images, &mut sink).unwrap();
    assert_eq!(stats.frames, 4);
    let firsts: Vec<u8> = sink.frames().iter().map(|(_, f)| f.pixel(0, 0)[0]).collect();
    assert_eq!(firsts, vec![1, 1, 2, 2]);
    assert!(sink.frames().iter().enumerate().all(|(k, (i, _))| i.0 == k as u64));
}

#[test]
fn at_least_one_frame_per_image() {
    let comp = FramesCompositor::new(viewport(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(comp.frames_per_item(), 1);
}

#[test]
fn empty_sequence_is_a_precondition_error() {
    let comp = FramesCompositor::new(viewport(1.0, 1.0, 0.0)).unwrap();
    let mut sink = InMemorySink::new();
    assert!(matches!(
        comp.run(Vec::new(), &mut sink).unwrap_err(),
        PtvError::Precondition(_)
    ));
}
