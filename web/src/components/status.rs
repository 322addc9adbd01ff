use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent, Spinner, SpinnerSize};

#[component]
pub fn LoadingView(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="loading-container">
            <Spinner size=SpinnerSize::Large />
            <p class="loading-message">{message}</p>
        </div>
    }
}

/// Error banner with a manual retry; nothing is retried automatically.
#[component]
pub fn ErrorView(
    #[prop(into)] message: String,
    on_retry: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="error-container">
            <MessageBar intent=MessageBarIntent::Error>{message}</MessageBar>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_retry()>
                "Try again"
            </Button>
        </div>
    }
}
