//! Gallery controller
//!
//! Coordinates the store, the gallery selection state and the render target.
//! Fetching is separated from applying: `navigate` starts a page and hands back
//! the fetch, `apply` shows its result. `render` does both in one go, while the
//! iced shell runs the fetch as a task.

use std::future::Future;

use super::contact::{ContactField, ContactForm};
use super::data::{Media, Photographer};
use super::lightbox::{FocusTrap, KeyOutcome, Lightbox, LightboxControl, NavKey};
use super::likes::{self, LikeChange};
use super::route::Route;
use super::sort::{sort_media, SortKey};
use super::store::{PageData, Store};
use crate::error::{PortfolioError, PortfolioResult};
use crate::ui::view::{FocusTarget, GalleryView};

/// A finished page fetch, ready to be applied
#[derive(Debug, Clone)]
pub enum Fetched {
    Home(PortfolioResult<Vec<Photographer>>),
    Page(PortfolioResult<PageData>),
}

/// Open contact modal: form content plus its focus ring
#[derive(Debug, Clone)]
struct ContactSession {
    form: ContactForm,
    focus: FocusTrap<ContactField>,
}

/// The gallery controller owns the current page state and drives a `GalleryView`
pub struct GalleryController<V> {
    store: Store,
    view: V,
    route: Route,
    /// Bumped on every navigation so late fetch results can be recognised
    generation: u64,
    photographer: Option<Photographer>,
    /// Gallery sequence in display order
    media: Vec<Media>,
    sort: SortKey,
    /// Order a freshly loaded gallery starts in
    initial_sort: SortKey,
    /// Tab ring over the cards (and contact button) of the current page
    page_focus: FocusTrap<FocusTarget>,
    lightbox: Lightbox,
    lightbox_focus: FocusTrap<LightboxControl>,
    /// Element that opened the lightbox, focused again on close
    opener: Option<FocusTarget>,
    contact: Option<ContactSession>,
    focus: Option<FocusTarget>,
}

impl<V: GalleryView> GalleryController<V> {
    pub fn new(store: Store, view: V) -> Self {
        Self {
            store,
            view,
            route: Route::Home,
            generation: 0,
            photographer: None,
            media: Vec::new(),
            sort: SortKey::default(),
            initial_sort: SortKey::default(),
            page_focus: FocusTrap::unfocused(&[]),
            lightbox: Lightbox::Closed,
            lightbox_focus: FocusTrap::new(&LightboxControl::TAB_ORDER),
            opener: None,
            contact: None,
            focus: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Swap the document source. Takes effect on the next render.
    pub fn set_store(&mut self, store: Store) {
        tracing::info!(source = %store.source().describe(), "Switching portfolio document");
        self.store = store;
    }

    /// Order used for every gallery loaded from now on
    pub fn set_initial_sort(&mut self, key: SortKey) {
        self.initial_sort = key;
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn photographer(&self) -> Option<&Photographer> {
        self.photographer.as_ref()
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    pub fn is_contact_open(&self) -> bool {
        self.contact.is_some()
    }

    // ========== Page rendering ==========

    /// Start a navigation: drop the current page state and show the loading state.
    /// Returns the generation the fetch result must be applied with.
    pub fn begin(&mut self, route: Route) -> u64 {
        self.generation += 1;
        self.route = route;
        self.reset_page();
        self.view.show_loading(route);
        tracing::debug!(%route, generation = self.generation, "Navigation started");
        self.generation
    }

    /// Start a navigation and build the fetch for `route`.
    ///
    /// The future owns a clone of the store, so it can run anywhere. Its result
    /// goes back through `apply` with the returned generation.
    pub fn navigate(&mut self, route: Route) -> (u64, impl Future<Output = Fetched> + Send + 'static) {
        let generation = self.begin(route);
        let store = self.store.clone();
        let fetch = async move {
            match route {
                Route::Home => Fetched::Home(store.get_photographers().await),
                Route::Photographer(Some(id)) => Fetched::Page(store.load_photographer_page(id).await),
                Route::Photographer(None) => Fetched::Page(Err(missing_id())),
            }
        };
        (generation, fetch)
    }

    /// Fetch and render whatever `route` points at. Never fails.
    pub async fn render(&mut self, route: Route) {
        let (generation, fetch) = self.navigate(route);
        let fetched = fetch.await;
        self.apply(generation, fetched);
    }

    /// Load every photographer and show the home page
    pub async fn render_home(&mut self) {
        self.render(Route::Home).await;
    }

    /// Load one photographer and their media and show the detail page
    pub async fn render_photographer_page(&mut self, id: u32) {
        self.render(Route::Photographer(Some(id))).await;
    }

    /// Show a finished fetch. Results from an older navigation are dropped.
    pub fn apply(&mut self, generation: u64, fetched: Fetched) {
        match fetched {
            Fetched::Home(result) => self.apply_home(generation, result),
            Fetched::Page(result) => self.apply_photographer_page(generation, result),
        }
    }

    /// Apply a fetched photographer list. Results from an older navigation are dropped.
    pub fn apply_home(&mut self, generation: u64, result: PortfolioResult<Vec<Photographer>>) {
        if !self.is_current(generation) {
            return;
        }

        match result {
            Ok(photographers) => {
                tracing::info!(count = photographers.len(), "Home page rendered");
                let ring: Vec<FocusTarget> = photographers
                    .iter()
                    .map(|photographer| FocusTarget::PhotographerCard(photographer.id))
                    .collect();
                self.page_focus = FocusTrap::unfocused(&ring);
                self.view.show_photographers(&photographers);
            }
            Err(error) => self.report_load_error("home page", &error),
        }
    }

    /// Apply a fetched photographer page.
    /// The whole page is shown at once, or only the error state.
    pub fn apply_photographer_page(&mut self, generation: u64, result: PortfolioResult<PageData>) {
        if !self.is_current(generation) {
            return;
        }

        let page = result.and_then(|page| {
            let total = total_likes(&page.media)?;
            Ok((page, total))
        });

        let (page, total) = match page {
            Ok(page) => page,
            Err(error) => {
                self.report_load_error("photographer page", &error);
                return;
            }
        };

        let mut photographer = page.photographer;
        photographer.total_likes = total;
        self.sort = self.initial_sort;
        self.media = sort_media(&page.media, Some(self.sort));
        self.rebuild_page_focus();

        self.view.show_banner(&photographer);
        self.view.show_info_box(photographer.total_likes, photographer.price);
        self.view.show_media_list(&self.media, self.sort);

        tracing::info!(
            photographer = photographer.id,
            media = self.media.len(),
            total_likes = photographer.total_likes,
            "Photographer page rendered"
        );
        self.photographer = Some(photographer);
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Dropping stale fetch result");
            return false;
        }
        true
    }

    fn reset_page(&mut self) {
        self.photographer = None;
        self.media.clear();
        self.sort = self.initial_sort;
        self.page_focus = FocusTrap::unfocused(&[]);
        self.lightbox.close();
        self.opener = None;
        self.contact = None;
        self.focus = None;
    }

    fn report_load_error(&mut self, page: &str, error: &PortfolioError) {
        tracing::error!(page, %error, "Failed to render page");
        self.reset_page();
        self.view.show_error(error.user_message());
    }

    // ========== Sorting ==========

    /// Re-sort the current sequence and refresh the media grid only
    pub fn change_sort_order(&mut self, key: SortKey) {
        if self.photographer.is_none() {
            tracing::warn!(%key, "Sort requested before a gallery was loaded");
            return;
        }

        let shown = self.lightbox.index().map(|index| self.media[index].id);
        self.media = sort_media(&self.media, Some(key));
        self.sort = key;
        self.rebuild_page_focus();
        self.view.show_media_list(&self.media, self.sort);

        // Keep the lightbox on the same media after the reorder
        if let Some(id) = shown {
            if let Some(index) = self.position_of(id) {
                self.lightbox.open(index, self.media.len());
                self.view.show_lightbox(&self.media[index], index, self.media.len());
            }
        }
    }

    /// Tab order of the photographer page: the contact button, then the cards
    /// in display order. The focused element keeps its place in the new ring.
    fn rebuild_page_focus(&mut self) {
        let ring: Vec<FocusTarget> = std::iter::once(FocusTarget::ContactButton)
            .chain(self.media.iter().map(|media| FocusTarget::MediaCard(media.id)))
            .collect();
        self.page_focus = FocusTrap::unfocused(&ring);
        if let Some(target) = self.focus {
            self.page_focus.focus(target);
        }
    }

    fn position_of(&self, media_id: u32) -> Option<usize> {
        self.media.iter().position(|media| media.id == media_id)
    }

    // ========== Lightbox ==========

    /// Show `media_id` in the lightbox and trap focus inside it
    pub fn open_lightbox(&mut self, media_id: u32) -> PortfolioResult<()> {
        if self.photographer.is_none() || self.media.is_empty() {
            let error = PortfolioError::InvalidState(
                "lightbox requested before the gallery was loaded".to_string(),
            );
            tracing::warn!(%error, media_id, "Cannot open lightbox");
            return Err(error);
        }

        let Some(index) = self.position_of(media_id) else {
            let error = PortfolioError::NotFound(format!("media {} is not in this gallery", media_id));
            tracing::warn!(%error, "Cannot open lightbox");
            return Err(error);
        };

        self.lightbox.open(index, self.media.len());
        self.opener = Some(FocusTarget::MediaCard(media_id));
        self.lightbox_focus = FocusTrap::new(&LightboxControl::TAB_ORDER);
        self.view.show_lightbox(&self.media[index], index, self.media.len());
        self.set_focus(self.lightbox_focus.current().map(FocusTarget::Lightbox));

        tracing::debug!(media_id, index, "Lightbox opened");
        Ok(())
    }

    pub fn show_next(&mut self) {
        if let Some(index) = self.lightbox.next(self.media.len()) {
            self.view.show_lightbox(&self.media[index], index, self.media.len());
        }
    }

    pub fn show_previous(&mut self) {
        if let Some(index) = self.lightbox.previous(self.media.len()) {
            self.view.show_lightbox(&self.media[index], index, self.media.len());
        }
    }

    /// Hide the lightbox and give focus back to the card that opened it
    pub fn close_lightbox(&mut self) {
        if !self.lightbox.is_open() {
            return;
        }
        self.lightbox.close();
        self.view.hide_lightbox();
        let opener = self.opener.take();
        self.set_focus(opener);
        tracing::debug!("Lightbox closed");
    }

    /// Press a lightbox button
    pub fn activate_lightbox_control(&mut self, control: LightboxControl) {
        match control {
            LightboxControl::Close => self.close_lightbox(),
            LightboxControl::Previous => self.show_previous(),
            LightboxControl::Next => self.show_next(),
        }
    }

    // ========== Likes ==========

    /// Like or unlike a media of the current gallery and refresh both counters
    pub fn toggle_like(&mut self, media_id: u32) -> PortfolioResult<LikeChange> {
        let Some(photographer) = self.photographer.as_mut() else {
            let error = PortfolioError::InvalidState("no gallery loaded".to_string());
            tracing::warn!(%error, media_id, "Cannot toggle like");
            return Err(error);
        };

        let Some(media) = self.media.iter_mut().find(|media| media.id == media_id) else {
            let error = PortfolioError::NotFound(format!("media {} is not in this gallery", media_id));
            tracing::warn!(%error, "Cannot toggle like");
            return Err(error);
        };

        let change = likes::toggle(media, photographer).map_err(|error| {
            tracing::error!(%error, "Like toggle refused");
            error
        })?;

        // Both numbers come from the updated entities
        self.view.update_likes(&change);
        tracing::debug!(
            media_id,
            likes = change.media_likes,
            total = change.total_likes,
            liked = change.is_liked,
            "Like toggled"
        );
        Ok(change)
    }

    // ========== Contact modal ==========

    pub fn open_contact(&mut self) -> PortfolioResult<()> {
        let Some(photographer) = self.photographer.as_ref() else {
            let error = PortfolioError::InvalidState("no photographer loaded".to_string());
            tracing::warn!(%error, "Cannot open contact form");
            return Err(error);
        };

        let session = ContactSession {
            form: ContactForm::new(),
            focus: FocusTrap::new(&ContactField::TAB_ORDER),
        };
        self.view.show_contact(&photographer.name, &session.form);
        let first = session.focus.current().map(FocusTarget::Contact);
        self.contact = Some(session);
        self.set_focus(first);
        Ok(())
    }

    /// Update one input of the open form
    pub fn edit_contact(&mut self, field: ContactField, value: String) {
        let Some(session) = self.contact.as_mut() else {
            return;
        };
        session.form.set(field, value);
        session.focus.focus(field);
        self.refresh_contact();
        self.set_focus(Some(FocusTarget::Contact(field)));
    }

    /// Validate and send. Returns whether the form was accepted.
    pub fn submit_contact(&mut self) -> bool {
        let Some(name) = self.photographer.as_ref().map(|p| p.name.clone()) else {
            return false;
        };
        let Some(session) = self.contact.as_mut() else {
            return false;
        };

        if session.form.submit(&name) {
            self.close_contact();
            return true;
        }

        self.refresh_contact();
        false
    }

    /// Hide the modal and focus the contact button again
    pub fn close_contact(&mut self) {
        if self.contact.take().is_none() {
            return;
        }
        self.view.hide_contact();
        self.set_focus(Some(FocusTarget::ContactButton));
    }

    fn refresh_contact(&mut self) {
        if let (Some(photographer), Some(session)) = (self.photographer.as_ref(), self.contact.as_ref()) {
            self.view.show_contact(&photographer.name, &session.form);
        }
    }

    // ========== Keyboard ==========

    /// Offer a key to the open modal, or to the page when none is open.
    /// Keys that mean nothing there are returned as `Ignored`.
    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome {
        if self.contact.is_some() {
            return self.handle_contact_key(key);
        }
        if self.lightbox.is_open() {
            return self.handle_lightbox_key(key);
        }

        match key {
            NavKey::Tab => {
                let target = self.page_focus.forward();
                self.move_page_focus(target)
            }
            NavKey::ShiftTab => {
                let target = self.page_focus.backward();
                self.move_page_focus(target)
            }
            NavKey::Enter => self.activate_focused(),
            NavKey::Left | NavKey::Right | NavKey::Escape => KeyOutcome::Ignored,
        }
    }

    fn move_page_focus(&mut self, target: Option<FocusTarget>) -> KeyOutcome {
        if target.is_none() {
            return KeyOutcome::Ignored;
        }
        self.set_focus(target);
        KeyOutcome::Handled
    }

    /// Enter on the focused page element
    fn activate_focused(&mut self) -> KeyOutcome {
        let activated = match self.focus {
            Some(FocusTarget::PhotographerCard(id)) => {
                return KeyOutcome::Navigate(Route::Photographer(Some(id)));
            }
            Some(FocusTarget::MediaCard(id)) => self.open_lightbox(id).is_ok(),
            Some(FocusTarget::ContactButton) => self.open_contact().is_ok(),
            _ => false,
        };
        if activated {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }

    fn handle_lightbox_key(&mut self, key: NavKey) -> KeyOutcome {
        match key {
            NavKey::Left => self.show_previous(),
            NavKey::Right => self.show_next(),
            NavKey::Escape => self.close_lightbox(),
            NavKey::Tab => {
                let target = self.lightbox_focus.forward().map(FocusTarget::Lightbox);
                self.set_focus(target);
            }
            NavKey::ShiftTab => {
                let target = self.lightbox_focus.backward().map(FocusTarget::Lightbox);
                self.set_focus(target);
            }
            NavKey::Enter => match self.lightbox_focus.current() {
                Some(control) => self.activate_lightbox_control(control),
                None => return KeyOutcome::Ignored,
            },
        }
        KeyOutcome::Handled
    }

    fn handle_contact_key(&mut self, key: NavKey) -> KeyOutcome {
        let Some(session) = self.contact.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key {
            NavKey::Escape => self.close_contact(),
            NavKey::Tab => {
                let target = session.focus.forward().map(FocusTarget::Contact);
                self.set_focus(target);
            }
            NavKey::ShiftTab => {
                let target = session.focus.backward().map(FocusTarget::Contact);
                self.set_focus(target);
            }
            NavKey::Enter => match session.focus.current() {
                Some(ContactField::Submit) => {
                    self.submit_contact();
                }
                Some(ContactField::Close) => self.close_contact(),
                _ => return KeyOutcome::Ignored,
            },
            NavKey::Left | NavKey::Right => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    /// Record focus for pointer-driven changes (clicking an input, hovering a card).
    /// Focus may not leave an open modal.
    pub fn focus_on(&mut self, target: FocusTarget) {
        if let Some(session) = self.contact.as_mut() {
            let FocusTarget::Contact(field) = target else {
                return;
            };
            session.focus.focus(field);
        } else if self.lightbox.is_open() {
            let FocusTarget::Lightbox(control) = target else {
                return;
            };
            self.lightbox_focus.focus(control);
        } else if matches!(target, FocusTarget::Contact(_) | FocusTarget::Lightbox(_)) {
            return;
        }
        self.set_focus(Some(target));
    }

    fn set_focus(&mut self, target: Option<FocusTarget>) {
        // Keyboard cycling continues from wherever focus lands on the page
        if let Some(target) = target {
            self.page_focus.focus(target);
        }
        self.focus = target;
        self.view.set_focus(target);
    }
}

fn missing_id() -> PortfolioError {
    PortfolioError::NotFound("photographer page requested without an id".to_string())
}

/// Aggregate likes of a gallery
fn total_likes(media: &[Media]) -> PortfolioResult<u32> {
    let total: u64 = media.iter().map(|media| u64::from(media.likes)).sum();
    u32::try_from(total)
        .map_err(|_| PortfolioError::DataShape(format!("aggregate likes {} out of range", total)))
}
