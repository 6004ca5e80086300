use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use yew::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{window, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub const REVEAL_SELECTOR: &str = ".service-card, .pricing-card, .process-step, .advisory-card, .about-content, .hero-content, .hero-image, .about-image";
pub const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_KEY_ATTR: &str = "data-reveal-key";

type RevealCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Remembers which elements have already been revealed.
#[derive(Debug, Default)]
pub struct RevealLatch {
    revealed: HashSet<u32>,
}

impl RevealLatch {
    /// True only the first time `key` is triggered.
    pub fn trigger(&mut self, key: u32) -> bool {
        self.revealed.insert(key)
    }

    /// Keys from one batch of `(key, is_intersecting)` entries that should be
    /// revealed now.
    pub fn reveal_batch(&mut self, entries: impl IntoIterator<Item = (u32, bool)>) -> Vec<u32> {
        entries
            .into_iter()
            .filter(|(_, intersecting)| *intersecting)
            .filter(|(key, _)| self.trigger(*key))
            .map(|(key, _)| key)
            .collect()
    }
}

fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

fn hide(el: &HtmlElement) {
    set_styles(el, &[
        ("opacity", "0"),
        ("transform", "translateY(30px)"),
        ("transition", "opacity 0.6s ease-out, transform 0.6s ease-out"),
    ]);
}

fn show(el: &HtmlElement) {
    set_styles(el, &[("opacity", "1"), ("transform", "translateY(0)")]);
}

fn reveal_key(el: &web_sys::Element) -> Option<u32> {
    el.get_attribute(REVEAL_KEY_ATTR)?.parse().ok()
}

fn start_reveal_observer() -> Option<(IntersectionObserver, RevealCallback)> {
    let document = window()?.document()?;
    let latch = Rc::new(RefCell::new(RevealLatch::default()));

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let entries: Vec<IntersectionObserverEntry> =
            entries.iter().map(|entry| entry.unchecked_into()).collect();
        let batch = entries
            .iter()
            .filter_map(|entry| reveal_key(&entry.target()).map(|key| (key, entry.is_intersecting())));
        let revealed = latch.borrow_mut().reveal_batch(batch);

        for entry in &entries {
            let target = entry.target();
            if !reveal_key(&target).map_or(false, |key| revealed.contains(&key)) {
                continue;
            }
            if let Ok(el) = target.clone().dyn_into::<HtmlElement>() {
                show(&el);
            }
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => observer,
        Err(err) => {
            log::error!("Could not create reveal observer: {:?}", err);
            return None;
        }
    };

    let nodes = document.query_selector_all(REVEAL_SELECTOR).ok()?;
    for index in 0..nodes.length() {
        let Some(el) = nodes.get(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let _ = el.set_attribute(REVEAL_KEY_ATTR, &index.to_string());
        hide(&el);
        observer.observe(&el);
    }
    log::info!("Observing {} elements for scroll reveal", nodes.length());
    Some((observer, callback))
}

/// Fades in every marked element the first time it scrolls into view. Must
/// be called by the component that renders those elements.
#[hook]
pub fn use_scroll_reveal() {
    use_effect_with_deps(
        |_| {
            let observer = start_reveal_observer();
            move || {
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
            }
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_fires_once_per_key() {
        let mut latch = RevealLatch::default();
        assert!(latch.trigger(3));
        assert!(!latch.trigger(3));
        assert!(latch.trigger(4));
    }

    #[test]
    fn batch_ignores_hidden_and_already_revealed() {
        let mut latch = RevealLatch::default();
        assert_eq!(latch.reveal_batch([(1, true), (2, false)]), vec![1]);
        assert_eq!(latch.reveal_batch([(1, true), (2, true)]), vec![2]);
        assert!(latch.reveal_batch([(1, true), (2, true)]).is_empty());
    }
}
