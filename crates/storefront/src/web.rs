//! Browser binding.
//!
//! Wires a [`PageController`] over `localStorage` to whichever storefront
//! elements the current page has. Every element is optional: a page without
//! `#cartItems` simply gets no cart listing, a page without `#contactForm`
//! no contact validation.
//!
//! Element ids: `themeToggle`, `greeting`, `year`, `cartCount`, `cartItems`,
//! `cartTotal`, `contactForm` (`name`, `email`, `message`) and `checkoutForm`
//! (`fullname`, `address`, `email`, `payment`). Product buttons are any
//! `button[data-name][data-price]`.

use std::cell::RefCell;
use std::rc::Rc;

use elegance_core::Theme;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, Element, Event, EventTarget, HtmlFormElement, StorageEvent, Window};

use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::forms::{CheckoutForm, ContactForm};
use crate::greeting::{footer_year, greeting_line};
use crate::page::{PageController, PageEvent, PageOutcome, Submission};
use crate::render::{LineControl, Refresh};
use crate::storage::{BrowserStore, Storage};

type SharedPage = Rc<RefCell<PageController<BrowserStore>>>;

const DARK_CLASS: &str = "dark";

impl From<JsValue> for StorefrontError {
    fn from(value: JsValue) -> Self {
        Self::Page(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Entry point, run once when the module loads.
///
/// # Errors
///
/// Returns an error if there is no window or document, or if a listener
/// cannot be attached.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    init().map_err(|e| {
        tracing::error!(error = %e, "Storefront page failed to initialize");
        JsValue::from_str(&e.user_message())
    })
}

fn init() -> Result<()> {
    let window =
        web_sys::window().ok_or_else(|| StorefrontError::Page("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| StorefrontError::Page("no document".to_string()))?;
    let view = View { window, document };

    let page: SharedPage = Rc::new(RefCell::new(PageController::load(
        StorefrontConfig::default(),
        Storage::new(BrowserStore),
    )));

    view.apply_theme(page.borrow().theme());
    view.show_greeting();
    view.render(&page.borrow(), Refresh::ALL)?;

    bind_theme_toggle(&view, &page)?;
    bind_product_buttons(&view, &page)?;
    bind_cart_controls(&view, &page)?;
    bind_contact_form(&view, &page)?;
    bind_checkout_form(&view, &page)?;
    bind_storage_events(&view, &page)?;

    tracing::debug!("Storefront page initialized");
    Ok(())
}

/// Handles to the page's window and document.
#[derive(Clone)]
struct View {
    window: Window,
    document: Document,
}

impl View {
    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Current `.value` of a form control, or empty.
    fn field(&self, id: &str) -> String {
        self.element(id)
            .and_then(|el| js_sys::Reflect::get(&el, &JsValue::from_str("value")).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(body) = self.document.body() {
            let _ = body
                .class_list()
                .toggle_with_force(DARK_CLASS, theme.body_class().is_some());
        }
    }

    fn show_greeting(&self) {
        let now = chrono::Local::now();
        if let Some(el) = self.element("greeting") {
            el.set_text_content(Some(&greeting_line(&now)));
        }
        if let Some(el) = self.element("year") {
            el.set_text_content(Some(&footer_year(&now).to_string()));
        }
    }

    /// Redraw the requested regions. The listing is only drawn on pages
    /// that have both `#cartItems` and `#cartTotal`.
    fn render(&self, page: &PageController<BrowserStore>, refresh: Refresh) -> Result<()> {
        if refresh.summary
            && let Some(el) = self.element("cartCount")
        {
            el.set_text_content(Some(&page.cart().summary().count.to_string()));
        }
        if let Some((list, total)) =
            refresh.listing_targets(self.element("cartItems"), self.element("cartTotal"))
        {
            let listing = page.cart().listing();
            list.set_inner_html(&listing.to_html()?);
            total.set_text_content(Some(&listing.total));
        }
        Ok(())
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    /// Apply an outcome to the page. `event` is the DOM event that produced
    /// it, when there is one to cancel.
    fn apply(&self, page: &SharedPage, outcome: PageOutcome, event: Option<&Event>) {
        if let Some(theme) = outcome.theme {
            self.apply_theme(theme);
        }
        if !outcome.refresh.is_empty()
            && let Err(e) = self.render(&page.borrow(), outcome.refresh)
        {
            tracing::warn!(error = %e, "Failed to render cart");
            self.alert(&e.user_message());
        }

        if let Some(event) = event {
            match outcome.submission {
                Submission::Prevent | Submission::PreventAndReset => event.prevent_default(),
                Submission::Proceed | Submission::Unaffected => {}
            }
        }

        if let Some(message) = outcome.alert {
            self.alert(&message);
        }

        if outcome.submission == Submission::PreventAndReset
            && let Some(form) = event
                .and_then(Event::target)
                .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }
}

/// Attach `handler` for `kind` events on `target` for the life of the page.
fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `event` through the page and apply the result.
fn dispatch(view: &View, page: &SharedPage, event: PageEvent, dom_event: Option<&Event>) {
    let outcome = page.borrow_mut().handle(event);
    view.apply(page, outcome, dom_event);
}

fn bind_theme_toggle(view: &View, page: &SharedPage) -> Result<()> {
    let Some(toggle) = view.element("themeToggle") else {
        return Ok(());
    };
    let (view, page) = (view.clone(), Rc::clone(page));
    listen(&toggle, "click", move |_| {
        dispatch(&view, &page, PageEvent::ToggleTheme, None);
    })
}

fn bind_product_buttons(view: &View, page: &SharedPage) -> Result<()> {
    let buttons = view
        .document
        .query_selector_all("button[data-name][data-price]")?;
    for index in 0..buttons.length() {
        let Some(button) = buttons
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let (view, page) = (view.clone(), Rc::clone(page));
        let target = button.clone();
        listen(&target, "click", move |_| {
            let name = button.get_attribute("data-name").unwrap_or_default();
            let price = button.get_attribute("data-price").unwrap_or_default();
            dispatch(&view, &page, PageEvent::AddToCart { name, price }, None);
        })?;
    }
    Ok(())
}

/// Row buttons are re-rendered on every change, so clicks are delegated to
/// the list itself.
fn bind_cart_controls(view: &View, page: &SharedPage) -> Result<()> {
    let Some(list) = view.element("cartItems") else {
        return Ok(());
    };
    let (view, page) = (view.clone(), Rc::clone(page));
    listen(&list, "click", move |event| {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button[data-action]").ok().flatten())
        else {
            return;
        };
        let control = button
            .get_attribute("data-action")
            .and_then(|action| LineControl::from_action(&action));
        let name = button.get_attribute("data-name");
        if let (Some(control), Some(name)) = (control, name) {
            dispatch(&view, &page, PageEvent::from_control(control, name), None);
        }
    })
}

fn bind_contact_form(view: &View, page: &SharedPage) -> Result<()> {
    let Some(form) = view.element("contactForm") else {
        return Ok(());
    };
    let (view, page) = (view.clone(), Rc::clone(page));
    listen(&form, "submit", move |event| {
        let form = ContactForm {
            name: view.field("name"),
            email: view.field("email"),
            message: view.field("message"),
        };
        dispatch(&view, &page, PageEvent::SubmitContact(form), Some(&event));
    })
}

fn bind_checkout_form(view: &View, page: &SharedPage) -> Result<()> {
    let Some(form) = view.element("checkoutForm") else {
        return Ok(());
    };
    let (view, page) = (view.clone(), Rc::clone(page));
    listen(&form, "submit", move |event| {
        let form = CheckoutForm {
            full_name: view.field("fullname"),
            address: view.field("address"),
            email: view.field("email"),
            payment: view.field("payment"),
        };
        dispatch(&view, &page, PageEvent::SubmitCheckout(form), Some(&event));
    })
}

/// `storage` fires in every other tab of the origin after a write.
fn bind_storage_events(view: &View, page: &SharedPage) -> Result<()> {
    let (target, view, page) = (view.window.clone(), view.clone(), Rc::clone(page));
    listen(&target, "storage", move |event| {
        let Some(event) = event.dyn_ref::<StorageEvent>() else {
            return;
        };
        let key = event.key();
        tracing::debug!(key = ?key, "Storage changed in another tab");
        dispatch(&view, &page, PageEvent::StorageChanged { key }, None);
    })
}
