use leptos::prelude::*;

/// Button component with variants (primary, secondary, ghost) and a busy state
#[component]
pub fn Button(
    /// Button variant: "primary" (default), "secondary", or "ghost"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    /// Shows a spinner and blocks clicks while an action is in flight
    #[prop(optional, into)]
    busy: MaybeProp<bool>,
    /// Click event handler
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    /// Button children (content)
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "button--secondary",
        "ghost" => "button--ghost",
        _ => "button--primary",
    };

    let is_busy = move || busy.get().unwrap_or(false);
    let busy_class = move || if is_busy() { "button--busy" } else { "" };
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <button
            type="button"
            class=move || format!("button {} {} {}", variant_class(), busy_class(), additional_class())
            disabled=move || disabled.get().unwrap_or(false) || is_busy()
            aria-busy=move || is_busy().to_string()
            on:click=move |ev| {
                if is_busy() {
                    return;
                }
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            <span class="button__spinner" class:hidden=move || !is_busy()></span>
            <span class="button__label">{children()}</span>
        </button>
    }
}
