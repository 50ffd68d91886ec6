use leptos::*;

use crate::backend::{self, TrackingUpdate};
use crate::classify;
use crate::google;
use crate::plan;
use crate::plates::{self, EquipmentConfig};
use crate::session::{self, Session};
use crate::types::{AppView, ExerciseEntry, SpreadsheetFile, WorkoutPlan};

pub fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{:.0}", w)
    } else {
        format!("{:.2}", w).trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Badge text and class for the gap between target and loadable weight.
/// Positive difference means the bar is lighter than asked. Dust-sized
/// gaps left over from float arithmetic get no badge.
fn difference_badge(difference: f64) -> Option<(String, &'static str)> {
    if difference.abs() <= 1e-6 {
        return None;
    }
    if difference > 0.0 {
        Some((format!("-{}kg", format_weight(difference)), "diff under"))
    } else {
        Some((format!("+{}kg", format_weight(-difference)), "diff over"))
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (session, set_session) = create_signal(session::load_session());
    let (plan, set_plan) = create_signal(Option::<WorkoutPlan>::None);
    let (auth_error, set_auth_error) = create_signal(Option::<String>::None);

    let initial_view = if session.get_untracked().is_some() {
        AppView::SheetPicker
    } else {
        AppView::SignIn
    };
    let (view, set_view) = create_signal(initial_view);

    // Coming back from the consent screen: the URL fragment carries either
    // the bearer token or the provider's denial. Finish sign-in by fetching
    // the profile, or surface the denial on the sign-in banner.
    match google::token_from_redirect() {
        Some(Ok(token)) => {
            set_view.set(AppView::SignIn);
            spawn_local(async move {
                match google::fetch_user_profile(&token).await {
                    Ok(user) => {
                        let s = Session::new(token, user);
                        session::save_session(&s);
                        set_session.set(Some(s));
                        set_view.set(AppView::SheetPicker);
                    }
                    Err(e) => set_auth_error.set(Some(e)),
                }
            });
        }
        Some(Err(e)) => {
            set_auth_error.set(Some(e));
            set_view.set(AppView::SignIn);
        }
        None => {}
    }

    view! {
        <div class="app">
            {move || match view.get() {
                AppView::SignIn => view! {
                    <SignIn error=auth_error set_error=set_auth_error />
                }.into_view(),
                AppView::SheetPicker => view! {
                    <SheetPicker
                        session=session
                        set_session=set_session
                        set_plan=set_plan
                        set_view=set_view
                    />
                }.into_view(),
                AppView::Workout => view! {
                    <Workout
                        session=session
                        set_session=set_session
                        plan=plan
                        set_plan=set_plan
                        set_view=set_view
                    />
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn SignIn(
    error: ReadSignal<Option<String>>,
    set_error: WriteSignal<Option<String>>,
) -> impl IntoView {
    let do_sign_in = move |_| {
        set_error.set(None);
        if let Err(e) = google::begin_sign_in() {
            set_error.set(Some(e));
        }
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"LIFTSHEET"</div>
            <div class="auth-card">
                <h2 class="auth-title">"Track your program"</h2>
                <p class="auth-subtitle">
                    "Sign in with Google to load a training program from your sheets."
                </p>

                {move || error.get().map(|e| view! {
                    <div class="auth-error">
                        {e}
                        <button class="auth-link" on:click=do_sign_in>"Try again"</button>
                    </div>
                })}

                <button class="auth-button" on:click=do_sign_in>
                    "Sign in with Google"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SheetPicker(
    session: ReadSignal<Option<Session>>,
    set_session: WriteSignal<Option<Session>>,
    set_plan: WriteSignal<Option<WorkoutPlan>>,
    set_view: WriteSignal<AppView>,
) -> impl IntoView {
    let (sheets, set_sheets) = create_signal(Vec::<SpreadsheetFile>::new());
    let (loading, set_loading) = create_signal(true);
    let (busy_sheet, set_busy_sheet) = create_signal(Option::<String>::None);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (reload, set_reload) = create_signal(0u32);

    create_effect(move |_| {
        reload.get();
        let Some(s) = session.get_untracked() else {
            return;
        };
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match google::list_spreadsheets(&s.token).await {
                Ok(files) => set_sheets.set(files),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let pick_sheet = move |file: SpreadsheetFile| {
        let Some(mut s) = session.get_untracked() else {
            return;
        };
        set_busy_sheet.set(Some(file.id.clone()));
        set_error.set(None);
        spawn_local(async move {
            let loaded = async {
                let grid =
                    google::fetch_sheet_values(&s.token, &file.id, google::DEFAULT_RANGE).await?;
                let plan = backend::parse_sheet(&grid).await?;
                Ok::<_, String>((grid, plan))
            }
            .await;

            match loaded {
                Ok((grid, plan)) => {
                    session::save_sheet_id(&file.id);
                    s.spreadsheet_id = Some(file.id);
                    s.last_grid = Some(grid);
                    session::save_session(&s);
                    set_session.set(Some(s));
                    set_plan.set(Some(plan));
                    set_view.set(AppView::Workout);
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_busy_sheet.set(None);
                }
            }
        });
    };

    let sign_out = move |_| {
        session::clear_session();
        set_session.set(None);
        set_plan.set(None);
        set_view.set(AppView::SignIn);
    };

    view! {
        <div class="picker-container">
            <UserHeader session=session />

            <h2 class="picker-title">"Pick a program sheet"</h2>

            {move || error.get().map(|e| view! {
                <div class="fetch-error">
                    {e}
                    <button class="auth-link" on:click=move |_| set_reload.update(|n| *n += 1)>
                        "Retry"
                    </button>
                </div>
            })}

            {move || {
                if loading.get() {
                    view! { <div class="loading">"Loading your spreadsheets..."</div> }.into_view()
                } else if sheets.get().is_empty() && error.get().is_none() {
                    view! {
                        <div class="empty-message">
                            "No spreadsheets found in your Google Drive."
                        </div>
                    }.into_view()
                } else {
                    sheets.get().into_iter().map(|file| {
                        let picked = file.clone();
                        let id = file.id.clone();
                        view! {
                            <button
                                class="sheet-button"
                                disabled=move || busy_sheet.get().is_some()
                                on:click=move |_| pick_sheet(picked.clone())
                            >
                                {file.name.clone()}
                                {move || (busy_sheet.get().as_deref() == Some(id.as_str()))
                                    .then(|| " (loading...)")}
                            </button>
                        }
                    }).collect_view()
                }
            }}

            <button class="link-button" on:click=sign_out>"Sign out"</button>
        </div>
    }
}

#[component]
fn UserHeader(session: ReadSignal<Option<Session>>) -> impl IntoView {
    move || {
        session.get().map(|s| view! {
            <div class="user-info">
                <img class="user-avatar" src=s.user.picture alt="Profile" />
                <div class="user-name">{s.user.name} " (" {s.user.email} ")"</div>
            </div>
        })
    }
}

#[component]
fn Workout(
    session: ReadSignal<Option<Session>>,
    set_session: WriteSignal<Option<Session>>,
    plan: ReadSignal<Option<WorkoutPlan>>,
    set_plan: WriteSignal<Option<WorkoutPlan>>,
    set_view: WriteSignal<AppView>,
) -> impl IntoView {
    let (selected_week, set_selected_week) = create_signal(String::new());
    let (selected_day, set_selected_day) = create_signal(String::new());
    let (entries, set_entries) = create_signal(Vec::<ExerciseEntry>::new());

    let weeks = move || {
        plan.with(|p| p.as_ref().map(plan::available_weeks).unwrap_or_default())
    };
    let days = move || {
        plan.with(|p| {
            p.as_ref()
                .map(|p| plan::available_days(p, &selected_week.get()))
                .unwrap_or_default()
        })
    };

    // Auto-select the first week when a plan arrives, and keep the day
    // selection valid whenever the week changes.
    create_effect(move |_| {
        let available = weeks();
        let current = selected_week.get_untracked();
        if !available.contains(&current) {
            set_selected_week.set(available.first().cloned().unwrap_or_default());
        }
    });
    create_effect(move |_| {
        let available = days();
        let current = selected_day.get_untracked();
        if !available.contains(&current) {
            set_selected_day.set(available.first().cloned().unwrap_or_default());
        }
    });

    // Entries are rebuilt from the plan whenever the selection changes;
    // in-flight edits for the previous day are discarded by design.
    create_effect(move |_| {
        let week = selected_week.get();
        let day = selected_day.get();
        let next = plan.with(|p| {
            p.as_ref()
                .map(|p| plan::day_entries(p, &week, &day))
                .unwrap_or_default()
        });
        set_entries.set(next);
    });

    let commit = Callback::new(move |(idx, field, value): (usize, &'static str, String)| {
        set_entries.update(|list| {
            if let Some(entry) = list.get_mut(idx) {
                match field {
                    backend::FIELD_WEIGHT => entry.weight = value.clone(),
                    backend::FIELD_RPE => entry.rpe = value.clone(),
                    backend::FIELD_NOTES => entry.notes = value.clone(),
                    _ => {}
                }
            }
        });

        let Some(entry) = entries.get_untracked().get(idx).cloned() else {
            return;
        };
        if entry.is_rest() {
            return;
        }
        let Some(sheet_id) = session.get_untracked().and_then(|s| s.spreadsheet_id) else {
            return;
        };
        backend::send_tracking_update(TrackingUpdate {
            field: field.to_string(),
            new_value: value,
            day: selected_day.get_untracked(),
            week: selected_week.get_untracked(),
            exercise: entry.exercise,
            prescribed: entry.prescribed,
            spreadsheet_id: sheet_id,
        });
    });

    let export = move |_| {
        if let Some(p) = plan.get_untracked() {
            if let Err(e) = backend::download_plan_as_file(&p, "workoutData.js") {
                web_sys::console::warn_1(&format!("Export failed: {e}").into());
            }
        }
    };

    let change_sheet = move |_| set_view.set(AppView::SheetPicker);

    let sign_out = move |_| {
        session::clear_session();
        set_session.set(None);
        set_plan.set(None);
        set_view.set(AppView::SignIn);
    };

    view! {
        <div class="workout-container">
            <UserHeader session=session />

            <div class="workout-navigation">
                <h2>"Workout Selection"</h2>
                <div class="navigation-grid">
                    <label class="nav-label">"Week"
                        <select
                            class="nav-select"
                            on:change=move |ev| set_selected_week.set(event_target_value(&ev))
                        >
                            {move || weeks().into_iter().map(|week| {
                                let selected = week == selected_week.get();
                                view! {
                                    <option value=week.clone() selected=selected>{week.clone()}</option>
                                }
                            }).collect_view()}
                        </select>
                    </label>
                    <label class="nav-label">"Day"
                        <select
                            class="nav-select"
                            on:change=move |ev| set_selected_day.set(event_target_value(&ev))
                        >
                            {move || days().into_iter().map(|day| {
                                let selected = day == selected_day.get();
                                view! {
                                    <option value=day.clone() selected=selected>{day.clone()}</option>
                                }
                            }).collect_view()}
                        </select>
                    </label>
                </div>
            </div>

            {move || {
                let list = entries.get();
                if list.is_empty() {
                    let day = selected_day.get();
                    return view! {
                        <div class="empty-message">
                            "No workout data available for " {day}
                            ". This might be a rest day or the data hasn't been entered yet."
                        </div>
                    }.into_view();
                }

                let summary = plan::summarize(&list);
                let split = classify::classify(&list);

                view! {
                    <WorkoutSummaryBar summary=summary />

                    {(!split.top_sets.is_empty()).then(|| view! {
                        <ExerciseSection
                            title="Top Sets"
                            badge="top-set"
                            items=split.top_sets
                            commit=commit
                        />
                    })}
                    {(!split.backdown_sets.is_empty()).then(|| view! {
                        <ExerciseSection
                            title="Backdown Sets"
                            badge="backdown-set"
                            items=split.backdown_sets
                            commit=commit
                        />
                    })}
                    {(!split.accessories.is_empty()).then(|| view! {
                        <ExerciseSection
                            title="Accessories"
                            badge="accessory"
                            items=split.accessories
                            commit=commit
                        />
                    })}
                }.into_view()
            }}

            <PlateCalculator />

            <div class="workout-actions">
                <button class="action-button" on:click=export>"Export plan"</button>
                <button class="action-button" on:click=change_sheet>"Change sheet"</button>
                <button class="link-button" on:click=sign_out>"Sign out"</button>
            </div>
        </div>
    }
}

#[component]
fn WorkoutSummaryBar(summary: plan::WorkoutSummary) -> impl IntoView {
    view! {
        <div class="workout-summary">
            <h2>"Workout Summary"</h2>
            <div class="summary-grid">
                <div class="summary-item">
                    <div class="summary-value blue">{summary.total_sets}</div>
                    <div class="summary-label">"Total Sets"</div>
                </div>
                <div class="summary-item">
                    <div class="summary-value teal">{format_weight(summary.total_volume)}</div>
                    <div class="summary-label">"Volume (kg)"</div>
                </div>
                <div class="summary-item">
                    <div class="summary-value green">{summary.main_lifts}</div>
                    <div class="summary-label">"Main Lifts"</div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ExerciseSection(
    title: &'static str,
    badge: &'static str,
    items: Vec<(usize, ExerciseEntry)>,
    commit: Callback<(usize, &'static str, String)>,
) -> impl IntoView {
    view! {
        <div class="exercise-section">
            <h2 class=badge>{title}</h2>
            {items.into_iter().map(|(idx, entry)| view! {
                <WorkoutCard idx=idx entry=entry badge=badge commit=commit />
            }).collect_view()}
        </div>
    }
}

#[component]
fn WorkoutCard(
    idx: usize,
    entry: ExerciseEntry,
    badge: &'static str,
    commit: Callback<(usize, &'static str, String)>,
) -> impl IntoView {
    if entry.is_rest() {
        return view! {
            <div class="workout-card rest-day">
                <div class="card-header">
                    <h3 class="card-title">"Rest"</h3>
                </div>
                <div class="card-notes">{entry.notes}</div>
            </div>
        }
        .into_view();
    }

    let (weight, set_weight) = create_signal(entry.weight.clone());
    let (rpe, set_rpe) = create_signal(entry.rpe.clone());
    let (notes, set_notes) = create_signal(entry.notes.clone());

    let commit_weight = move || commit.call((idx, backend::FIELD_WEIGHT, weight.get_untracked()));
    let commit_rpe = move || commit.call((idx, backend::FIELD_RPE, rpe.get_untracked()));
    let commit_notes = move || commit.call((idx, backend::FIELD_NOTES, notes.get_untracked()));

    view! {
        <div class=format!("workout-card {badge}")>
            <div class="card-header">
                <h3 class="card-title">{entry.exercise.clone()}</h3>
                <span class=format!("card-badge {badge}")>{entry.prescribed.clone()}</span>
            </div>

            <div class="card-grid">
                <div class="static-label">
                    <div class="label">"Sets"</div>
                    <div class="value">{entry.sets}</div>
                </div>
                <div class="static-label">
                    <div class="label">"Reps"</div>
                    <div class="value">{entry.reps}</div>
                </div>

                <div class="input-field">
                    <div class="label">"Weight (kg)"</div>
                    <input
                        type="number"
                        placeholder="Enter weight"
                        prop:value=weight
                        on:input=move |ev| set_weight.set(event_target_value(&ev))
                        on:keydown=move |ev| if ev.key() == "Enter" { commit_weight() }
                    />
                </div>

                <div class="rpe-container">
                    <div class="label">"RPE"</div>
                    <div class="rpe-controls">
                        <input
                            type="number"
                            class="narrow"
                            placeholder="Actual"
                            prop:value=rpe
                            on:input=move |ev| set_rpe.set(event_target_value(&ev))
                            on:keydown=move |ev| if ev.key() == "Enter" { commit_rpe() }
                        />
                        <span class="rpe-separator">"/"</span>
                        <div class="rpe-prescribed">{entry.prescribed_rpe.clone()}</div>
                    </div>
                </div>
            </div>

            <div class="textarea-field">
                <div class="label">"Notes"</div>
                <textarea
                    placeholder="Add workout notes..."
                    prop:value=notes
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                    on:blur=move |_| commit_notes()
                />
            </div>
        </div>
    }
    .into_view()
}

#[component]
fn PlateCalculator() -> impl IntoView {
    let (target_input, set_target_input) = create_signal(String::new());
    let (use_collars, set_use_collars) = create_signal(false);

    let config = move || EquipmentConfig {
        use_collars: use_collars.get(),
        ..EquipmentConfig::default()
    };

    // Boundary coercion: anything non-numeric or negative becomes 0 before
    // it reaches the solver.
    let target = move || {
        target_input
            .get()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(0.0)
    };

    view! {
        <div class="plate-calculator">
            <h2>"Plate Calculator"</h2>

            <div class="calculator-controls">
                <label class="nav-label">"Target Weight (kg)"
                    <input
                        type="number"
                        step="2.5"
                        placeholder="Enter weight"
                        prop:value=target_input
                        on:input=move |ev| set_target_input.set(event_target_value(&ev))
                    />
                </label>
                <button
                    class="collar-toggle"
                    class:active=use_collars
                    on:click=move |_| set_use_collars.update(|c| *c = !*c)
                >
                    {move || if use_collars.get() { "Collars (ON)" } else { "Collars (OFF)" }}
                </button>
            </div>

            {move || {
                let config = config();
                let target = target();
                let base = config.base_weight();

                if target <= base {
                    return view! {
                        <div class="empty-message">
                            "Enter a weight greater than "
                            {format_weight(base)}
                            "kg to see the plate configuration"
                        </div>
                    }.into_view();
                }

                let breakdown = plates::solve(target, &config);
                let achieved = breakdown.achieved_total(&config);
                let difference = breakdown.difference(target, &config);

                view! {
                    <div class="plate-row">
                        <div class="bar-stub"></div>
                        {breakdown.flattened().into_iter().map(|denom| view! {
                            <div
                                class="plate"
                                style=format!(
                                    "background-color: {}; color: {};",
                                    plates::plate_color(denom),
                                    plates::plate_text_color(denom),
                                )
                            >
                                {format_weight(denom)}
                            </div>
                        }).collect_view()}
                    </div>

                    <div class="plate-totals">
                        <div class="total-weight">{format_weight(achieved)} "kg"</div>
                        {difference_badge(difference).map(|(text, class)| view! {
                            <div class=class>{text}</div>
                        })}
                    </div>
                }.into_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_loaded_bar_shows_missing_weight() {
        let badge = difference_badge(0.5).expect("real gap must show");
        assert_eq!(badge, ("-0.5kg".to_string(), "diff under"));
    }

    #[test]
    fn over_loaded_bar_shows_surplus_weight() {
        let badge = difference_badge(-2.5).expect("real gap must show");
        assert_eq!(badge, ("+2.5kg".to_string(), "diff over"));
    }

    #[test]
    fn exact_and_dust_sized_gaps_show_no_badge() {
        assert_eq!(difference_badge(0.0), None);
        // float dust from the subtraction chain, not a real gap
        assert_eq!(difference_badge(5.0e-7), None);
        assert_eq!(difference_badge(-5.0e-7), None);
    }
}
