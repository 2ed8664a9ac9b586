use crate::state::contact::{ContactField, ContactForm};
use crate::state::data::{Media, Photographer};
use crate::state::lightbox::LightboxControl;
use crate::state::likes::LikeChange;
use crate::state::route::Route;
use crate::state::sort::SortKey;

/// Anything that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A card on the home page
    PhotographerCard(u32),
    /// A card in the media grid
    MediaCard(u32),
    /// The "Contact me" button in the banner
    ContactButton,
    Lightbox(LightboxControl),
    Contact(ContactField),
}

/// Render target driven by the gallery controller.
///
/// The controller pushes state into the view; the view never calls back into
/// the controller. Each method refreshes one region of the page.
pub trait GalleryView {
    /// A page is being fetched
    fn show_loading(&mut self, route: Route);

    /// Home page content
    fn show_photographers(&mut self, photographers: &[Photographer]);

    /// Replace the page content with an error message
    fn show_error(&mut self, message: &str);

    /// Name, location, tagline and portrait of the photographer page
    fn show_banner(&mut self, photographer: &Photographer);

    /// Sticky box with the aggregate likes and the daily rate
    fn show_info_box(&mut self, total_likes: u32, price: u32);

    /// The media grid in display order
    fn show_media_list(&mut self, media: &[Media], sort: SortKey);

    /// Both like counters after a toggle
    fn update_likes(&mut self, change: &LikeChange);

    /// Open the lightbox on `media`, the `position`th of `len`
    fn show_lightbox(&mut self, media: &Media, position: usize, len: usize);

    fn hide_lightbox(&mut self);

    /// Open or refresh the contact modal
    fn show_contact(&mut self, photographer: &str, form: &ContactForm);

    fn hide_contact(&mut self);

    /// Move keyboard focus; `None` clears it
    fn set_focus(&mut self, target: Option<FocusTarget>);
}
