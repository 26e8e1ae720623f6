use std::time::Duration;

use dioxus::prelude::*;
use services::{QUOTE_ROTATE_SECS, QuoteDeck};

/// Decorative quote rotator for the sidebar. Each panel instance owns its
/// timer; nothing is shared and nothing is persisted.
#[component]
pub fn QuotePanel() -> Element {
    let deck = use_hook(QuoteDeck::builtin);
    let mut index = use_signal(|| 0usize);

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(QUOTE_ROTATE_SECS)).await;
            let next = index() + 1;
            index.set(next);
        }
    });

    match deck.quote(index()) {
        Some(quote) => rsx! {
            aside { class: "quote-panel",
                p { class: "quote-text", "{quote}" }
            }
        },
        None => rsx! {},
    }
}
