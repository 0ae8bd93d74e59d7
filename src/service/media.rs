use crate::models::listingmodel::Media;

/// Extensions treated as video; everything else renders as an image.
const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".ogg", ".mov"];

/// Card image shown when a listing has no media at all.
pub const PLACEHOLDER_URL: &str = "/placeholder-property.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Media kind is derived from the URL, never stored. Unrecognized
/// extensions count as images.
pub fn classify(url: &str) -> MediaKind {
    let lower = url.to_lowercase();
    if VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

pub fn is_video(url: &str) -> bool {
    classify(url) == MediaKind::Video
}

/// Card assets for a listing: the first image by sort order as the cover
/// and the first video by sort order as the hover preview. Each is chosen
/// among its own kind, regardless of where the other sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMedia<'a> {
    pub cover_image: Option<&'a Media>,
    pub preview_video: Option<&'a Media>,
}

pub fn select_display_media(media: &[Media]) -> DisplayMedia<'_> {
    let first_of = |kind: MediaKind| {
        media
            .iter()
            .filter(|m| classify(&m.url) == kind)
            .min_by_key(|m| (m.sort_order, m.id))
    };

    DisplayMedia {
        cover_image: first_of(MediaKind::Image),
        preview_video: first_of(MediaKind::Video),
    }
}

/// How a listing card renders its media slot.
///
/// With both kinds present the image is the default and the video only
/// plays on hover (muted, looping, from the start; paused and rewound
/// when the hover ends). With no image the video is the permanent cover
/// and hover gating does not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDisplay<'a> {
    ImageOnly { image: &'a str },
    ImageWithVideoPreview { image: &'a str, video: &'a str },
    VideoLoop { video: &'a str },
    Placeholder,
}

impl<'a> CardDisplay<'a> {
    pub fn mode(&self) -> &'static str {
        match self {
            CardDisplay::ImageOnly { .. } => "image",
            CardDisplay::ImageWithVideoPreview { .. } => "image_with_preview",
            CardDisplay::VideoLoop { .. } => "video",
            CardDisplay::Placeholder => "placeholder",
        }
    }
}

pub fn card_display(media: &[Media]) -> CardDisplay<'_> {
    let selected = select_display_media(media);

    match (selected.cover_image, selected.preview_video) {
        (Some(image), Some(video)) => CardDisplay::ImageWithVideoPreview {
            image: &image.url,
            video: &video.url,
        },
        (Some(image), None) => CardDisplay::ImageOnly { image: &image.url },
        (None, Some(video)) => CardDisplay::VideoLoop { video: &video.url },
        (None, None) => CardDisplay::Placeholder,
    }
}

/// Detail-page gallery over the complete ordered media collection, images
/// and videos interleaved. Navigation wraps around; the counter and the
/// controls are suppressed for a single item; an empty collection is an
/// explicit "no media" state, not an empty frame.
#[derive(Debug, Clone)]
pub struct Gallery<'a> {
    items: &'a [Media],
    index: usize,
}

impl<'a> Gallery<'a> {
    pub fn new(items: &'a [Media]) -> Self {
        Gallery { items, index: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&'a Media> {
        self.items.get(self.index)
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.items.len();
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.items.len() - 1
        } else {
            self.index - 1
        };
    }

    pub fn has_navigation(&self) -> bool {
        self.items.len() > 1
    }

    /// 1-based "current / total" counter, hidden for 0 or 1 items.
    pub fn counter(&self) -> Option<(usize, usize)> {
        if self.has_navigation() {
            Some((self.index + 1, self.items.len()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: i64, url: &str, sort_order: i32) -> Media {
        Media {
            id,
            listing_id: 1,
            url: url.to_string(),
            alt: None,
            sort_order,
        }
    }

    #[test]
    fn classifies_all_video_extensions() {
        for url in [
            "https://cdn.example.com/tour.mp4",
            "/media/walkthrough.webm",
            "clip.ogg",
            "drone-pass.mov",
        ] {
            assert_eq!(classify(url), MediaKind::Video, "{url}");
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("/media/TOUR.MP4"), MediaKind::Video);
        assert_eq!(classify("/media/Clip.MoV"), MediaKind::Video);
    }

    #[test]
    fn unrecognized_extensions_are_images() {
        assert_eq!(classify("/media/front.jpg"), MediaKind::Image);
        assert_eq!(classify("/media/plan.pdf"), MediaKind::Image);
        assert_eq!(classify("/media/no-extension"), MediaKind::Image);
    }

    #[test]
    fn cover_is_first_image_even_when_video_sorts_earlier() {
        let items = vec![
            media(10, "/m/tour.mp4", 0),
            media(11, "/m/back.jpg", 5),
            media(12, "/m/front.jpg", 2),
        ];

        let selected = select_display_media(&items);
        assert_eq!(selected.cover_image.map(|m| m.id), Some(12));
        assert_eq!(selected.preview_video.map(|m| m.id), Some(10));
    }

    #[test]
    fn selection_ignores_input_order() {
        let mut items = vec![
            media(1, "/m/a.jpg", 3),
            media(2, "/m/b.mp4", 4),
            media(3, "/m/c.jpg", 1),
            media(4, "/m/d.webm", 2),
        ];
        items.reverse();

        let selected = select_display_media(&items);
        assert_eq!(selected.cover_image.map(|m| m.id), Some(3));
        assert_eq!(selected.preview_video.map(|m| m.id), Some(4));
    }

    #[test]
    fn sort_order_ties_break_by_id() {
        let items = vec![media(8, "/m/b.jpg", 1), media(5, "/m/a.jpg", 1)];

        let selected = select_display_media(&items);
        assert_eq!(selected.cover_image.map(|m| m.id), Some(5));
    }

    #[test]
    fn card_with_both_kinds_gates_video_behind_hover() {
        let items = vec![media(1, "/m/front.jpg", 1), media(2, "/m/tour.mp4", 2)];

        match card_display(&items) {
            CardDisplay::ImageWithVideoPreview { image, video } => {
                assert_eq!(image, "/m/front.jpg");
                assert_eq!(video, "/m/tour.mp4");
            }
            other => panic!("unexpected display: {other:?}"),
        }
    }

    #[test]
    fn card_with_only_videos_loops_the_video_permanently() {
        let items = vec![media(1, "/m/tour.mp4", 1), media(2, "/m/drone.mov", 2)];

        assert_eq!(
            card_display(&items),
            CardDisplay::VideoLoop {
                video: "/m/tour.mp4"
            }
        );
    }

    #[test]
    fn empty_collection_falls_back_to_placeholder() {
        assert_eq!(card_display(&[]), CardDisplay::Placeholder);
    }

    #[test]
    fn gallery_wraps_in_both_directions() {
        let items = vec![
            media(1, "/m/a.jpg", 1),
            media(2, "/m/b.mp4", 2),
            media(3, "/m/c.jpg", 3),
        ];
        let mut gallery = Gallery::new(&items);

        gallery.previous();
        assert_eq!(gallery.current().map(|m| m.id), Some(3));
        gallery.next();
        assert_eq!(gallery.current().map(|m| m.id), Some(1));
        gallery.next();
        gallery.next();
        gallery.next();
        assert_eq!(gallery.current().map(|m| m.id), Some(1));
    }

    #[test]
    fn gallery_counter_tracks_position() {
        let items = vec![media(1, "/m/a.jpg", 1), media(2, "/m/b.jpg", 2)];
        let mut gallery = Gallery::new(&items);

        assert_eq!(gallery.counter(), Some((1, 2)));
        gallery.next();
        assert_eq!(gallery.counter(), Some((2, 2)));
    }

    #[test]
    fn single_item_gallery_hides_navigation_and_counter() {
        let items = vec![media(1, "/m/a.jpg", 1)];
        let gallery = Gallery::new(&items);

        assert!(!gallery.has_navigation());
        assert_eq!(gallery.counter(), None);
        assert_eq!(gallery.current().map(|m| m.id), Some(1));
    }

    #[test]
    fn empty_gallery_reports_no_media() {
        let mut gallery = Gallery::new(&[]);

        assert!(gallery.is_empty());
        assert_eq!(gallery.current(), None);
        gallery.next();
        gallery.previous();
        assert_eq!(gallery.current(), None);
    }
}
