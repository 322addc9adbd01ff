use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

use crate::orchestrator::{Toast, ToastKind};

/// Transient notices. Each toast removes itself after `duration`.
#[component]
pub fn ToastStack(
    #[prop(into)] toasts: Signal<Vec<Toast>>,
    duration: Duration,
    on_dismiss: impl Fn(u64) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    Effect::new(move |scheduled: Option<u64>| {
        let scheduled = scheduled.unwrap_or(0);
        toasts.with(|toasts| {
            for toast in toasts.iter().filter(|toast| toast.id > scheduled) {
                let id = toast.id;
                set_timeout(move || on_dismiss(id), duration);
            }
            toasts.iter().map(|toast| toast.id).fold(scheduled, u64::max)
        })
    });

    view! {
        <div class="toast-stack">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let intent = match toast.kind {
                            ToastKind::Success => MessageBarIntent::Success,
                            ToastKind::Error => MessageBarIntent::Error,
                            ToastKind::Info => MessageBarIntent::Info,
                        };
                        let id = toast.id;
                        view! {
                            <div class="toast" on:click=move |_| on_dismiss(id)>
                                <MessageBar intent=intent>{toast.message}</MessageBar>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
