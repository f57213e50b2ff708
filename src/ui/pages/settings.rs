use dioxus::prelude::*;

use crate::{
    app::Engine,
    domain::{AppState, DisplayMode},
    ui::components::toast::{push_toast, ToastKind, ToastMessage},
    ui::theme,
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let engine = use_context::<Signal<Option<Engine>>>();

    let (league, mode, last_update) =
        state.with(|st| (st.league.clone(), st.display_mode, st.last_update.clone()));

    let on_clear_cache = {
        let toasts = toasts.clone();
        let engine = engine.clone();
        move |_| {
            let Some(engine) = engine() else {
                push_toast(toasts.clone(), ToastKind::Warning, "Price source not ready yet.");
                return;
            };
            engine.clear_caches();
            let api = engine.source().clone();
            spawn(async move {
                api.clear_cache().await;
            });
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cleared cached prices. The next refresh fetches everything anew.",
            );
        }
    };

    let set_mode = {
        let mut state = state.clone();
        move |mode: DisplayMode| {
            state.with_mut(|st| st.display_mode = mode);
        }
    };
    let mut set_chaos = set_mode.clone();
    let mut set_divine = set_mode;
    let chaos_class = if mode == DisplayMode::Chaos {
        theme::BTN_TOGGLE_ACTIVE
    } else {
        theme::BTN_TOGGLE_INACTIVE
    };
    let divine_class = if mode == DisplayMode::Divine {
        theme::BTN_TOGGLE_ACTIVE
    } else {
        theme::BTN_TOGGLE_INACTIVE
    };

    rsx! {
        div { class: "space-y-6",
            header {
                h1 { class: "text-2xl font-semibold text-slate-100", "Settings" }
                p { class: "text-sm {theme::TEXT_MUTED}",
                    "League detection and display defaults. Set the LEAGUE environment variable to pin a league."
                }
            }

            section { class: "{theme::PANEL} p-4 space-y-2",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::TEXT_MUTED}", "Data Source" }
                div { class: "grid grid-cols-2 gap-2 text-sm max-w-md",
                    span { class: "{theme::TEXT_MUTED}", "League" }
                    span { class: "{theme::TEXT_SECONDARY}", "{league}" }
                    span { class: "{theme::TEXT_MUTED}", "Last refresh" }
                    span { class: "{theme::TEXT_SECONDARY}",
                        {last_update.unwrap_or_else(|| "never".to_string())}
                    }
                }
                button {
                    class: "{theme::BTN_SECONDARY} mt-2",
                    onclick: on_clear_cache,
                    "Clear Price Caches"
                }
            }

            section { class: "{theme::PANEL} p-4 space-y-2",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::TEXT_MUTED}", "Display" }
                div { class: "flex gap-1",
                    button {
                        class: "{chaos_class}",
                        onclick: move |_| set_chaos(DisplayMode::Chaos),
                        "Chaos Orbs"
                    }
                    button {
                        class: "{divine_class}",
                        onclick: move |_| set_divine(DisplayMode::Divine),
                        "Divine Orbs"
                    }
                }
                p { class: "text-xs {theme::TEXT_MUTED}",
                    "Divine mode shows values of at least one divine in divines and everything smaller in chaos."
                }
            }
        }
    }
}
