use super::view::{FocusTarget, GalleryView};
use crate::state::contact::ContactForm;
use crate::state::data::{Media, Photographer};
use crate::state::likes::LikeChange;
use crate::state::route::Route;
use crate::state::sort::SortKey;

/// Sticky box at the bottom of the photographer page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoBox {
    pub total_likes: u32,
    pub price: u32,
}

/// What the lightbox currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxFrame {
    pub media: Media,
    pub position: usize,
    pub len: usize,
}

/// Open contact modal
#[derive(Debug, Clone, PartialEq)]
pub struct ContactFrame {
    pub photographer: String,
    pub form: ContactForm,
}

/// Retained page state drawn by the iced `view` function.
///
/// The gallery controller writes into it through `GalleryView`; the widgets in
/// `ui::widgets` only read it.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub route: Option<Route>,
    pub loading: bool,
    pub error: Option<String>,
    pub photographers: Vec<Photographer>,
    pub banner: Option<Photographer>,
    pub info: Option<InfoBox>,
    pub media: Vec<Media>,
    pub sort: SortKey,
    pub lightbox: Option<LightboxFrame>,
    pub contact: Option<ContactFrame>,
    pub focus: Option<FocusTarget>,
}

impl Screen {
    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.focus == Some(target)
    }

    /// True while a modal covers the page
    pub fn has_modal(&self) -> bool {
        self.lightbox.is_some() || self.contact.is_some()
    }
}

impl GalleryView for Screen {
    fn show_loading(&mut self, route: Route) {
        *self = Screen {
            route: Some(route),
            loading: true,
            ..Screen::default()
        };
    }

    fn show_photographers(&mut self, photographers: &[Photographer]) {
        self.loading = false;
        self.error = None;
        self.photographers = photographers.to_vec();
    }

    fn show_error(&mut self, message: &str) {
        // Nothing of the failed page stays on screen
        *self = Screen {
            route: self.route,
            error: Some(message.to_string()),
            ..Screen::default()
        };
    }

    fn show_banner(&mut self, photographer: &Photographer) {
        self.loading = false;
        self.banner = Some(photographer.clone());
    }

    fn show_info_box(&mut self, total_likes: u32, price: u32) {
        self.info = Some(InfoBox { total_likes, price });
    }

    fn show_media_list(&mut self, media: &[Media], sort: SortKey) {
        self.media = media.to_vec();
        self.sort = sort;
    }

    fn update_likes(&mut self, change: &LikeChange) {
        if let Some(media) = self.media.iter_mut().find(|m| m.id == change.media_id) {
            media.likes = change.media_likes;
            media.is_liked = change.is_liked;
        }
        if let Some(frame) = self.lightbox.as_mut().filter(|f| f.media.id == change.media_id) {
            frame.media.likes = change.media_likes;
            frame.media.is_liked = change.is_liked;
        }
        if let Some(info) = self.info.as_mut() {
            info.total_likes = change.total_likes;
        }
    }

    fn show_lightbox(&mut self, media: &Media, position: usize, len: usize) {
        self.lightbox = Some(LightboxFrame {
            media: media.clone(),
            position,
            len,
        });
    }

    fn hide_lightbox(&mut self) {
        self.lightbox = None;
    }

    fn show_contact(&mut self, photographer: &str, form: &ContactForm) {
        self.contact = Some(ContactFrame {
            photographer: photographer.to_string(),
            form: form.clone(),
        });
    }

    fn hide_contact(&mut self) {
        self.contact = None;
    }

    fn set_focus(&mut self, target: Option<FocusTarget>) {
        self.focus = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::MediaKind;
    use chrono::NaiveDate;

    fn media(id: u32, likes: u32) -> Media {
        Media {
            id,
            photographer_id: 1,
            title: format!("Media {}", id),
            date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            price: 30,
            likes,
            kind: MediaKind::Video(format!("{}.mp4", id)),
            is_liked: false,
        }
    }

    #[test]
    fn test_error_replaces_page() {
        let mut screen = Screen::default();
        screen.show_loading(Route::Photographer(Some(1)));
        screen.show_media_list(&[media(1, 2)], SortKey::Popularity);
        screen.show_info_box(2, 100);

        screen.show_error("boom");
        assert!(screen.media.is_empty());
        assert!(screen.info.is_none());
        assert!(!screen.loading);
        assert_eq!(screen.error.as_deref(), Some("boom"));
        assert_eq!(screen.route, Some(Route::Photographer(Some(1))));
    }

    #[test]
    fn test_update_likes_refreshes_every_region() {
        let mut screen = Screen::default();
        screen.show_media_list(&[media(1, 2), media(2, 7)], SortKey::Popularity);
        screen.show_info_box(9, 100);
        screen.show_lightbox(&media(2, 7), 1, 2);

        screen.update_likes(&LikeChange {
            media_id: 2,
            media_likes: 8,
            total_likes: 10,
            is_liked: true,
        });

        assert_eq!(screen.media[1].likes, 8);
        assert!(screen.media[1].is_liked);
        assert_eq!(screen.media[0].likes, 2);
        assert_eq!(screen.info.map(|i| i.total_likes), Some(10));
        assert_eq!(screen.lightbox.as_ref().map(|f| f.media.likes), Some(8));
    }

    #[test]
    fn test_loading_clears_previous_page() {
        let mut screen = Screen::default();
        screen.show_lightbox(&media(1, 0), 0, 1);
        screen.set_focus(Some(FocusTarget::MediaCard(1)));

        screen.show_loading(Route::Home);
        assert!(screen.loading);
        assert!(!screen.has_modal());
        assert!(screen.focus.is_none());
    }
}
