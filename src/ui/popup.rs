/// Popup UI: destination pickers and the "save all tabs" action

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::controller::{self, PopupData};
use crate::host::{BrowserHost, ChromeHost};
use crate::i18n::tr;
use crate::notion::FetchTransport;
use crate::settings::Settings;
use crate::ui::components::{CheckboxField, SelectField, SelectOption};

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading(tr("loading")));
    let data = use_state(PopupData::default);
    let running = use_state(|| false);

    // Load settings, then both lists, on mount
    {
        let state = state.clone();
        let data = data.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let host = ChromeHost;
                let saved = match host.load_settings().await {
                    Ok(saved) => saved,
                    Err(e) => {
                        state.set(AppState::Error(e.to_string()));
                        return;
                    }
                };
                data.set(PopupData {
                    selection: saved.clone(),
                    ..PopupData::default()
                });

                match controller::populate(&host, FetchTransport, &saved).await {
                    Ok(loaded) => {
                        data.set(loaded);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        log::error!("Failed to load from Notion: {}", e);
                        state.set(AppState::Error(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_refetch = {
        let state = state.clone();
        let data = data.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let data = data.clone();
            let current = data.selection.clone();
            state.set(AppState::Loading(tr("loading")));

            spawn_local(async move {
                match controller::refresh(&ChromeHost, FetchTransport, &current).await {
                    Ok(loaded) => {
                        data.set(loaded);
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_workspace_change = {
        let state = state.clone();
        let data = data.clone();
        Callback::from(move |space_id: String| {
            let state = state.clone();
            let data = data.clone();
            let current = data.selection.clone();
            data.set(PopupData {
                workspaces: data.workspaces.clone(),
                databases: Vec::new(),
                selection: Settings::new(space_id.clone(), "", current.close_tabs),
            });
            state.set(AppState::Loading(tr("loading")));

            spawn_local(async move {
                match controller::select_workspace(&ChromeHost, FetchTransport, &current, &space_id).await {
                    Ok((databases, selection)) => {
                        data.set(PopupData {
                            workspaces: data.workspaces.clone(),
                            databases,
                            selection,
                        });
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_database_change = {
        let state = state.clone();
        let data = data.clone();
        Callback::from(move |block_id: String| {
            let selection = Settings {
                block_id,
                ..data.selection.clone()
            };
            data.set(PopupData {
                selection: selection.clone(),
                ..(*data).clone()
            });
            persist(selection, state.clone());
        })
    };

    let on_close_tabs_change = {
        let state = state.clone();
        let data = data.clone();
        Callback::from(move |close_tabs: bool| {
            let selection = Settings {
                close_tabs,
                ..data.selection.clone()
            };
            data.set(PopupData {
                selection: selection.clone(),
                ..(*data).clone()
            });
            persist(selection, state.clone());
        })
    };

    let on_run = {
        let state = state.clone();
        let running = running.clone();
        Callback::from(move |_| {
            running.set(true);
            state.set(AppState::Idle);

            spawn_local(async move {
                controller::run_clip(&ChromeHost).await;
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.close() {
                        log::warn!("Could not close popup: {:?}", e);
                    }
                }
            });
        })
    };

    let is_loading = matches!(*state, AppState::Loading(_));
    let controls_disabled = is_loading || *running;
    let run_disabled = controls_disabled || !controller::can_run(&data.selection);

    let workspace_options: Vec<SelectOption> = data.workspaces.iter().map(SelectOption::from).collect();
    let database_options: Vec<SelectOption> = data.databases.iter().map(SelectOption::from).collect();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{tr("popupTitle")}</h1>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                <SelectField
                    id="workspaceSelect"
                    label={tr("workspaceLabel")}
                    options={workspace_options}
                    selected={data.selection.space_id.clone()}
                    placeholder={tr("notSelected")}
                    disabled={controls_disabled}
                    onchange={on_workspace_change}
                />
                <SelectField
                    id="dbSelect"
                    label={tr("databaseLabel")}
                    options={database_options}
                    selected={data.selection.block_id.clone()}
                    placeholder={tr("notSelected")}
                    disabled={controls_disabled}
                    onchange={on_database_change}
                />
                if data.selection.has_destination() && !data.selection.appends_to_block() {
                    <p class="field-hint">{tr("newDatabaseHint")}</p>
                }
                <CheckboxField
                    id="closeTabs"
                    label={tr("closeTabsLabel")}
                    checked={data.selection.close_tabs}
                    disabled={controls_disabled}
                    onchange={on_close_tabs_change}
                />

                <Button onclick={on_refetch} disabled={controls_disabled} variant={ButtonVariant::Secondary} block={true}>
                    {tr("fetchSpaces")}
                </Button>
                <Button onclick={on_run} disabled={run_disabled} variant={ButtonVariant::Primary} block={true}>
                    {tr("run")}
                </Button>
            </div>
        </div>
    }
}

// Every change is saved immediately; failures only surface in the status line
fn persist(selection: Settings, state: UseStateHandle<AppState>) {
    spawn_local(async move {
        if let Err(e) = ChromeHost.save_settings(&selection).await {
            state.set(AppState::Error(e.to_string()));
        }
    });
}
