use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::ui::theme;
use crate::util::APP_NAME;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let league = state.with(|s| s.league.clone());
    let last_update = state.with(|s| s.last_update.clone());

    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto grid max-w-6xl grid-cols-[1fr_auto] items-center gap-4",
                    div {
                        h1 { class: "text-xl font-semibold tracking-tight {theme::TEXT_PRIMARY}",
                            "💎 {APP_NAME}"
                        }
                        p { class: "text-xs {theme::TEXT_MUTED}",
                            "Awakened gems · L1 Q0 → L5 Q20 via Wild Brambleback · {league} league"
                        }
                    }
                    nav { class: "flex items-center gap-2 text-sm justify-end",
                        if let Some(stamp) = last_update {
                            span { class: "mr-2 text-xs {theme::TEXT_MUTED}", "updated {stamp}" }
                        }
                        NavButton {
                            active: matches!(current_route, Route::Gems {}),
                            onclick: move |_| { nav.push(Route::Gems {}); },
                            label: "📊 Gems",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-8",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-amber-500/60 bg-amber-500/15 px-4 py-2 font-semibold text-amber-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
