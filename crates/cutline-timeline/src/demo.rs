//! Stock session layout: a main video track with two clips, a text track
//! with a title card, and an empty image track.

use crate::clip::{Clip, Transform};
use crate::track::{Track, TrackKind};

/// Track ID of the main video track.
pub const MAIN_TRACK: u32 = 1;
/// Track ID of the text overlay track.
pub const TEXT_TRACK: u32 = 2;
/// Track ID of the sticker/image track.
pub const IMAGE_TRACK: u32 = 3;

fn video_clip(id: &str, name: &str, start: f64, duration: f64, source: &str) -> Clip {
    Clip {
        id: id.into(),
        track_id: MAIN_TRACK,
        kind: TrackKind::Video,
        name: name.into(),
        start,
        duration,
        source: Some(source.into()),
        text_content: None,
        properties: Transform {
            x: 0.0,
            y: 0.0,
            ..Transform::default()
        },
    }
}

/// Tracks the editor opens with.
pub fn demo_tracks() -> Vec<Track> {
    let main = Track::new(MAIN_TRACK, TrackKind::Video, "Main Track")
        .with_clip(video_clip(
            "clip-1",
            "Nature Background",
            0.0,
            15.0,
            "https://videos.pexels.com/video-files/856973/856973-hd_1920_1080_25fps.mp4",
        ))
        .with_clip(video_clip(
            "clip-2",
            "City Life",
            15.0,
            10.0,
            "https://videos.pexels.com/video-files/855564/855564-hd_1920_1080_24fps.mp4",
        ));

    let text = Track::new(TEXT_TRACK, TrackKind::Text, "Text Overlay").with_clip(Clip {
        id: "clip-text-1".into(),
        track_id: TEXT_TRACK,
        kind: TrackKind::Text,
        name: "Title Card".into(),
        start: 1.0,
        duration: 5.0,
        source: None,
        text_content: Some("WELCOME TO CUTLINE".into()),
        properties: Transform {
            color: Some("#ffffff".into()),
            font_size: Some(60.0),
            ..Transform::default()
        },
    });

    let images = Track::new(IMAGE_TRACK, TrackKind::Image, "Stickers/Images");

    vec![main, text, images]
}
