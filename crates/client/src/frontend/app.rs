//! Inventory page: error banner, add/edit form and the car table.

use std::rc::Rc;

use dealership_core::{CarId, FieldInput, FormField};
use leptos::*;

use crate::confirm::BrowserConfirm;
use crate::view::{InventoryView, ListView};
use crate::{ClientConfig, FormMode, HttpInventoryApi, InventoryClient, InventoryState};

type Client = InventoryClient<HttpInventoryApi, BrowserConfirm>;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "invalid client config, falling back to defaults");
        ClientConfig::default()
    });
    let client = Rc::new(Client::from_config(
        HttpInventoryApi::new(config.clone()),
        BrowserConfirm,
        &config,
    ));

    // First frame already shows the loading text.
    let ticket = client.begin_mount();

    // Mirror controller state into a signal for the view.
    let mut subscription = client.subscribe();
    let state = create_rw_signal(subscription.current());
    spawn_local(async move {
        while subscription.changed().await {
            state.set(subscription.current());
        }
    });

    let client = store_value(client);
    spawn_local(async move {
        let client = client.get_value();
        let _ = client.finish_fetch(ticket).await;
    });

    let screen = create_memo(move |_| state.with(InventoryView::from_state));

    view! {
        <div class="app-container">
            <h1>"Dealership Inventory Management"</h1>
            <ErrorBanner screen=screen client=client/>
            <Show when=move || !screen.with(|s| s.read_only)>
                <div class="actions">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            client.with_value(|c| {
                                let _ = c.toggle_add_form();
                            })
                        }
                    >
                        {move || screen.with(|s| s.toggle_label())}
                    </button>
                </div>
            </Show>
            <Show when=move || screen.with(|s| s.form != FormMode::Hidden)>
                <CarForm screen=screen state=state client=client/>
            </Show>
            <CarTable screen=screen state=state client=client/>
        </div>
    }
}

#[component]
fn ErrorBanner(screen: Memo<InventoryView>, client: StoredValue<Rc<Client>>) -> impl IntoView {
    move || {
        screen.with(|s| s.error.clone()).map(|message| {
            view! {
                <div class="error-message">
                    <strong>"Error:"</strong>
                    " "
                    {message}
                    <button on:click=move |_| client.with_value(|c| c.dismiss_error())>"×"</button>
                </div>
            }
        })
    }
}

#[component]
fn CarForm(
    screen: Memo<InventoryView>,
    state: RwSignal<InventoryState>,
    client: StoredValue<Rc<Client>>,
) -> impl IntoView {
    let on_text = move |field: FormField| {
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            client.with_value(|c| c.update_field(field, FieldInput::text(value)));
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let client = client.get_value();
        spawn_local(async move {
            let _ = client.submit().await;
        });
    };

    view! {
        <div class="form-container">
            <h2>{move || screen.with(|s| s.form_title())}</h2>
            <form on:submit=on_submit>
                <div class="form-grid">
                    <div class="form-group">
                        <label for="make">"Make *"</label>
                        <input
                            type="text"
                            id="make"
                            name="make"
                            required
                            maxlength="50"
                            placeholder="e.g., Toyota"
                            prop:value=move || state.with(|s| s.form.make.clone())
                            on:input=on_text(FormField::Make)
                        />
                    </div>
                    <div class="form-group">
                        <label for="model">"Model *"</label>
                        <input
                            type="text"
                            id="model"
                            name="model"
                            required
                            maxlength="50"
                            placeholder="e.g., Camry"
                            prop:value=move || state.with(|s| s.form.model.clone())
                            on:input=on_text(FormField::Model)
                        />
                    </div>
                    <div class="form-group">
                        <label for="year">"Year *"</label>
                        <input
                            type="number"
                            id="year"
                            name="year"
                            required
                            min="1900"
                            max="2100"
                            prop:value=move || state.with(|s| s.form.year.clone())
                            on:input=on_text(FormField::Year)
                        />
                    </div>
                    <div class="form-group">
                        <label for="price">"Price *"</label>
                        <input
                            type="number"
                            id="price"
                            name="price"
                            required
                            min="0"
                            step="0.01"
                            placeholder="e.g., 25000"
                            prop:value=move || state.with(|s| s.form.price.clone())
                            on:input=on_text(FormField::Price)
                        />
                    </div>
                    <div class="form-group checkbox-group">
                        <label for="inStock">
                            <input
                                type="checkbox"
                                id="inStock"
                                name="inStock"
                                prop:checked=move || state.with(|s| s.form.in_stock)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    client.with_value(|c| {
                                        c.update_field(FormField::InStock, FieldInput::checked(checked))
                                    });
                                }
                            />
                            "In Stock"
                        </label>
                    </div>
                </div>
                <div class="form-actions">
                    <button type="submit" class="btn btn-success">
                        {move || screen.with(|s| s.submit_label())}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        on:click=move |_| client.with_value(|c| c.reset_form())
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn CarTable(
    screen: Memo<InventoryView>,
    state: RwSignal<InventoryState>,
    client: StoredValue<Rc<Client>>,
) -> impl IntoView {
    let edit = move |id: CarId| {
        let car = state.with_untracked(|s| s.cars.iter().find(|c| c.id == id).cloned());
        if let Some(car) = car {
            client.with_value(|c| {
                let _ = c.begin_edit(&car);
            });
        }
    };

    let delete = move |id: CarId| {
        let client = client.get_value();
        spawn_local(async move {
            let _ = client.delete(id).await;
        });
    };

    move || {
        let current = screen.get();
        let read_only = current.read_only;
        match current.list {
            ListView::Loading => view! { <p class="loading">{crate::view::LOADING_TEXT}</p> }.into_view(),
            ListView::Empty => view! { <p class="no-data">{crate::view::EMPTY_TEXT}</p> }.into_view(),
            ListView::Rows(rows) => view! {
                <div class="table-container">
                    <table>
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Make"</th>
                                <th>"Model"</th>
                                <th>"Year"</th>
                                <th>"Price"</th>
                                <th>"In Stock"</th>
                                {(!read_only).then(|| view! { <th>"Actions"</th> })}
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|row| {
                                let id = row.id;
                                let status = if row.in_stock { "status in-stock" } else { "status out-of-stock" };
                                view! {
                                    <tr class={if row.editing { "editing" } else { "" }}>
                                        <td>{row.id.to_string()}</td>
                                        <td>{row.make}</td>
                                        <td>{row.model}</td>
                                        <td>{row.year}</td>
                                        <td>{row.price}</td>
                                        <td><span class=status>{row.stock}</span></td>
                                        {(!read_only).then(|| view! {
                                            <td class="actions-cell">
                                                <button class="btn btn-edit" title="Edit car" on:click=move |_| edit(id)>
                                                    "Edit"
                                                </button>
                                                <button class="btn btn-delete" title="Delete car" on:click=move |_| delete(id)>
                                                    "Delete"
                                                </button>
                                            </td>
                                        })}
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            }.into_view(),
        }
    }
}
