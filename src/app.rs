use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use dioxus::{prelude::*, signals::Signal};
use tokio::time::sleep;

use crate::{
    domain::{AppState, LoadProgress, PriceSource, ValuationEngine},
    infra::source::PoeApi,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{GemsPage, SettingsPage},
        shell::Shell,
    },
    util::{clock_label, config::AppConfig},
};

/// How long bulk results stay current before the background loop re-prices.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Quality the leveled gem is refined to before sale.
pub const TARGET_QUALITY: u8 = 20;

const PROGRESS_POLL: Duration = Duration::from_millis(500);

pub type Engine = Arc<ValuationEngine<PoeApi>>;
pub type SharedProgress = Arc<Mutex<LoadProgress>>;

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Gems {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::from_env);

    let state = use_signal(AppState::default);
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    let engine = use_signal(|| None::<Engine>);
    use_context_provider(|| engine.clone());

    let progress = use_hook(|| Arc::new(Mutex::new(LoadProgress::default())));
    use_context_provider(|| progress.clone());

    // League detection, then the initial bulk load unless deferred.
    let _init = use_future({
        let config = config.clone();
        let mut state = state.clone();
        let mut engine = engine.clone();
        let toasts = toasts.clone();
        let progress = progress.clone();
        move || {
            let config = config.clone();
            let progress = progress.clone();
            async move {
                // The desktop webview binds no listener; the hosted variant is
                // served behind this port by its supervisor.
                println!(
                    "[app] config: port {}, deferred load {}",
                    config.port, config.deferred_load
                );
                match PoeApi::detect(config.league.clone()).await {
                    Ok(api) => {
                        let league = api.league().to_string();
                        println!("[app] using league {league}");
                        state.with_mut(|st| st.league = league);
                        let built: Engine = Arc::new(ValuationEngine::new(api));
                        engine.set(Some(built.clone()));
                        if config.deferred_load {
                            println!("[app] managed mode: waiting for first refresh");
                        } else {
                            run_bulk_load(built, state.clone(), toasts.clone(), progress, false)
                                .await;
                        }
                    }
                    Err(err) => {
                        println!("[app] league detection failed: {err}");
                        push_toast(
                            toasts.clone(),
                            ToastKind::Error,
                            format!("Could not reach poe.ninja: {err}"),
                        );
                    }
                }
            }
        }
    });

    // Mirror loader progress into UI state at a fixed cadence.
    let _progress_pump = use_future({
        let mut state = state.clone();
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move {
                loop {
                    sleep(PROGRESS_POLL).await;
                    let current = progress.lock().expect("progress mutex poisoned").clone();
                    let stale = state.with(|st| st.progress != current);
                    if stale {
                        state.with_mut(|st| st.progress = current);
                    }
                }
            }
        }
    });

    // Periodic re-price once an initial result set exists.
    let _auto_refresh = use_future({
        let state = state.clone();
        let toasts = toasts.clone();
        let engine = engine.clone();
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move {
                loop {
                    sleep(REFRESH_INTERVAL).await;
                    let ready = state.with(|st| st.last_update.is_some());
                    let idle = {
                        let guard = progress.lock().expect("progress mutex poisoned");
                        guard.complete || guard.status.is_empty()
                    };
                    if let (true, true, Some(engine)) = (ready, idle, engine()) {
                        println!("[app] periodic refresh");
                        run_bulk_load(
                            engine,
                            state.clone(),
                            toasts.clone(),
                            progress.clone(),
                            true,
                        )
                        .await;
                    }
                }
            }
        }
    });

    rsx! {
        document::Script { src: "https://cdn.tailwindcss.com" }
        Router::<Route> {}
        Toast {}
    }
}

/// Runs the full pricing pass and swaps the results into UI state. With
/// `clear_first` the engine and snapshot caches are dropped so every price
/// is fetched anew.
pub async fn run_bulk_load(
    engine: Engine,
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    progress: SharedProgress,
    clear_first: bool,
) {
    if clear_first {
        engine.clear_caches();
        engine.source().clear_cache().await;
    }

    let currency = engine.source().currency_prices().await;
    let divine_rate = engine.source().divine_rate().await;
    let profits = engine
        .price_all(&currency, TARGET_QUALITY, &progress)
        .await;

    if profits.is_empty() {
        push_toast(
            toasts.clone(),
            ToastKind::Warning,
            "No gems could be priced. poe.ninja may be unreachable.",
        );
    }

    let estimates = profits
        .iter()
        .map(|profit| {
            (
                profit.gem_name.clone(),
                engine.estimate_corruption(profit, currency.vaal),
            )
        })
        .collect();

    println!("[app] bulk load finished with {} gems", profits.len());
    state.with_mut(|st| {
        st.replace_results(profits, estimates, currency, divine_rate, clock_label());
    });
}

#[component]
pub fn Gems() -> Element {
    rsx! { Shell { GemsPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
