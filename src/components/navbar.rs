use yew::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, ScrollBehavior, ScrollToOptions};

/// Height of the fixed navbar; anchored sections stop just below it.
pub const NAVBAR_HEIGHT: f64 = 76.0;
pub const SCROLL_THRESHOLD: f64 = 50.0;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("#inicio", "Inicio"),
    ("#servicios", "Servicios"),
    ("#precios", "Precios"),
    ("#proceso", "Proceso"),
    ("#nosotros", "Nosotros"),
    ("#contacto", "Contacto"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarAppearance {
    pub shadow: bool,
    pub background: &'static str,
}

pub fn navbar_appearance(scroll_y: f64) -> NavbarAppearance {
    if scroll_y > SCROLL_THRESHOLD {
        NavbarAppearance {
            shadow: true,
            background: "rgba(255, 255, 255, 0.95)",
        }
    } else {
        NavbarAppearance {
            shadow: false,
            background: "rgba(255, 255, 255, 1)",
        }
    }
}

pub fn anchor_scroll_top(offset_top: f64) -> f64 {
    offset_top - NAVBAR_HEIGHT
}

/// Smoothly scrolls to the section an in-page `#id` link points at.
/// Returns false when there is no such section.
pub fn scroll_to_anchor(href: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let target = window
        .document()
        .and_then(|d| d.get_element_by_id(href.trim_start_matches('#')))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let Some(target) = target else {
        log::warn!("No section for anchor {}", href);
        return false;
    };
    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(target.offset_top() as f64));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}

/// Click handler for an in-page link: smooth scroll instead of a jump.
pub fn anchor_link(href: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll_to_anchor(href);
    })
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let menu_open = use_state(|| false);
    let appearance = use_state_eq(|| navbar_appearance(0.0));

    {
        let appearance = appearance.clone();
        use_effect_with_deps(move |_| {
            let listener = window().map(|window| {
                let scroll_window = window.clone();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
                    appearance.set(navbar_appearance(scroll_y));
                }) as Box<dyn FnMut()>);
                let _ = window.add_event_listener_with_callback(
                    "scroll",
                    scroll_callback.as_ref().unchecked_ref(),
                );
                (window, scroll_callback)
            });

            move || {
                if let Some((window, scroll_callback)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let nav_link = |href: &'static str| {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if scroll_to_anchor(href) {
                // Close the mobile menu once the jump starts
                menu_open.set(false);
            }
        })
    };

    html! {
        <nav
            class={classes!("navbar", "navbar-expand-lg", "navbar-light", "fixed-top", appearance.shadow.then(|| "shadow"))}
            style={format!("background-color: {};", appearance.background)}
        >
            <div class="container">
                <a class="navbar-brand fw-bold" href="#inicio" onclick={nav_link("#inicio")}>{"Apex"}</a>
                <button
                    class="navbar-toggler"
                    type="button"
                    aria-controls="navbarNav"
                    aria-expanded={(*menu_open).to_string()}
                    aria-label="Abrir menú"
                    onclick={toggle_menu}
                >
                    <span class="navbar-toggler-icon"></span>
                </button>
                <div class={classes!("collapse", "navbar-collapse", (*menu_open).then(|| "show"))} id="navbarNav">
                    <ul class="navbar-nav ms-auto">
                        { for NAV_LINKS.iter().map(|(href, text)| html! {
                            <li class="nav-item">
                                <a class="nav-link" href={*href} onclick={nav_link(*href)}>{*text}</a>
                            </li>
                        }) }
                    </ul>
                </div>
            </div>
        </nav>
    }
}
