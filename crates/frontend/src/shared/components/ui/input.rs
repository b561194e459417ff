use leptos::prelude::*;

/// Read-only input with label and an optional legend line below the field
#[component]
pub fn Input(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Secondary text under the field, e.g. a USD counter value
    #[prop(optional, into)]
    legend: MaybeProp<String>,
    /// Disabled state
    #[prop(optional)]
    disabled: bool,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <div class=move || format!("form__group {}", additional_class())>
            {move || label.get().map(|l| view! {
                <label class="form__label">
                    {l}
                </label>
            })}
            <input
                class="form__input"
                type="text"
                prop:value=move || value.get()
                disabled=disabled
                readonly=disabled
            />
            {move || legend.get().map(|l| view! {
                <legend class="form__legend">{l}</legend>
            })}
        </div>
    }
}
