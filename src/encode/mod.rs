//! Frame sinks: the ffmpeg video encoder, a JPEG frame exporter and an in-memory capture.

pub mod ffmpeg;
pub mod image_seq;
pub mod sink;
